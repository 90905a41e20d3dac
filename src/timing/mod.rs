//! Timing estimation and position resolution

pub mod estimator;

use serde::Serialize;

use crate::config::BoundaryPolicy;

pub use estimator::{estimate, TimingEstimator};

/// Time window of one text unit, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check whether `t` falls inside this interval.
    ///
    /// `closed_end` decides whether `t == end` counts.
    pub fn contains(&self, t: f64, closed_end: bool) -> bool {
        if closed_end {
            t >= self.start && t <= self.end
        } else {
            t >= self.start && t < self.end
        }
    }
}

/// Resolve a playback position to the first interval containing it.
///
/// Returns `None` when nothing matches, including for NaN positions and
/// empty interval lists.
pub fn resolve(intervals: &[Interval], t: f64, policy: BoundaryPolicy) -> Option<usize> {
    let last = intervals.len().checked_sub(1)?;

    intervals.iter().enumerate().position(|(i, interval)| {
        let closed_end = match policy {
            BoundaryPolicy::Inclusive => true,
            BoundaryPolicy::Later => i == last,
        };
        interval.contains(t, closed_end)
    })
}
