//! Configuration structures for tts-sync

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub segmentation: SegmenterConfig,
    pub timing: TimingConfig,
    pub playback: PlaybackConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the interval invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        for (field, value) in [
            ("timing.min_unit_seconds", t.min_unit_seconds),
            ("timing.fallback_seconds_per_char", t.fallback_seconds_per_char),
            ("timing.min_fallback_seconds", t.min_fallback_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.playback.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "playback.tick_interval_ms".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

/// Text segmentation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Treat line breaks as unit boundaries instead of folding them into spaces
    pub split_on_line_breaks: bool,
}

/// Timing estimation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Shortest time any unit is allotted (seconds)
    pub min_unit_seconds: f64,
    /// Seconds per character used when the audio duration is unknown
    pub fallback_seconds_per_char: f64,
    /// Lower bound on the fallback total duration (seconds)
    pub min_fallback_seconds: f64,
    /// Which unit owns a position lying exactly on a shared boundary
    pub boundary: BoundaryPolicy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_unit_seconds: 0.35,
            fallback_seconds_per_char: 0.35,
            min_fallback_seconds: 5.0,
            boundary: BoundaryPolicy::Later,
        }
    }
}

/// Interval containment rule used when resolving a playback position.
///
/// Resolution always takes the first matching interval in index order; the
/// policy only decides whether interval ends are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// `[start, end)` for all but the last interval, which is closed
    #[default]
    Later,
    /// `[start, end]` everywhere, so a shared boundary goes to the earlier unit
    Inclusive,
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryPolicy::Later => write!(f, "later"),
            BoundaryPolicy::Inclusive => write!(f, "inclusive"),
        }
    }
}

impl std::str::FromStr for BoundaryPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "later" => Ok(BoundaryPolicy::Later),
            "inclusive" => Ok(BoundaryPolicy::Inclusive),
            _ => Err(ConfigError::InvalidValue {
                field: "timing.boundary".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Simulated playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Interval between position reports (milliseconds)
    pub tick_interval_ms: u64,
    /// Sleep between ticks so the simulation runs at wall-clock speed
    pub realtime: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            realtime: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None = console only)
    pub output_path: Option<PathBuf>,
    /// Enable console output
    pub enable_console: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            output_path: None,
            enable_console: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON with metadata
    Json,
    /// SRT subtitle format
    Srt,
    /// VTT subtitle format
    Vtt,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "srt" => Ok(OutputFormat::Srt),
            "vtt" => Ok(OutputFormat::Vtt),
            _ => Err(ConfigError::InvalidValue {
                field: "output.format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
