//! Proportional timing estimation for text units

use tracing::debug;

use super::Interval;
use crate::config::TimingConfig;

/// Estimate unit intervals using the default timing configuration
pub fn estimate<S: AsRef<str>>(units: &[S], duration_hint: Option<f64>) -> Vec<Interval> {
    TimingEstimator::default().estimate(units, duration_hint)
}

/// Assigns each unit a share of the total duration proportional to its length
#[derive(Debug, Clone, Default)]
pub struct TimingEstimator {
    config: TimingConfig,
}

impl TimingEstimator {
    /// Create a new estimator
    pub fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Total duration assumed when the audio length is unknown
    pub fn fallback_duration(&self, total_chars: usize) -> f64 {
        let total_chars = total_chars.max(1) as f64;
        (total_chars * self.config.fallback_seconds_per_char).max(self.config.min_fallback_seconds)
    }

    /// Build contiguous intervals for `units`.
    ///
    /// A hint that is missing, non-finite or non-positive falls back to a
    /// per-character estimate. Every unit gets at least `min_unit_seconds`,
    /// even when that pushes the last end past the hint.
    pub fn estimate<S: AsRef<str>>(&self, units: &[S], duration_hint: Option<f64>) -> Vec<Interval> {
        if units.is_empty() {
            return Vec::new();
        }

        let lengths: Vec<usize> = units.iter().map(|u| u.as_ref().chars().count()).collect();
        let total_chars = lengths.iter().sum::<usize>().max(1);

        let total = match duration_hint {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => {
                let fallback = self.fallback_duration(total_chars);
                debug!(
                    "Duration unknown ({:?}), using fallback of {:.2}s for {} chars",
                    duration_hint, fallback, total_chars
                );
                fallback
            }
        };

        let mut cursor = 0.0;
        let intervals: Vec<Interval> = lengths
            .iter()
            .map(|&len| {
                let share = total * (len as f64 / total_chars as f64);
                let start = cursor;
                cursor += share.max(self.config.min_unit_seconds);
                Interval::new(start, cursor)
            })
            .collect();

        debug!(
            "Estimated {} intervals over {:.2}s (target {:.2}s)",
            intervals.len(),
            cursor,
            total
        );

        intervals
    }
}
