//! Playback-side collaborators: audio delivery, position sources and the event driver
//!
//! Nothing here decodes or plays audio. The traits describe what the sync
//! core expects from the surrounding media layer, and [`PlaybackDriver`]
//! feeds their signals to a [`SyncController`](crate::sync::SyncController)
//! in arrival order.

pub mod clock;
pub mod driver;
pub mod wav;

use crate::error::DeliveryError;

pub use clock::SimulatedClock;
pub use driver::PlaybackDriver;
pub use wav::wav_duration;

/// Request sent to a speech synthesis service
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Option<String>,
    pub speed: Option<f32>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            speed: None,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Synthesized audio as returned by a delivery service
#[derive(Debug, Clone, Default)]
pub struct DeliveredAudio {
    /// Encoded audio, opaque to the sync core
    pub bytes: Vec<u8>,
    /// Total duration in seconds, if the service or its metadata knows it
    pub duration: Option<f64>,
}

/// Source of synthesized speech (HTTP backend, local engine, ...)
pub trait AudioDelivery {
    fn deliver(&self, request: &SpeechRequest) -> Result<DeliveredAudio, DeliveryError>;
}

/// Update reported by a playback clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionUpdate {
    /// Current position in seconds
    Position(f64),
    Ended,
}

/// Periodic reporter of playback position
pub trait PositionSource {
    /// Next update, or `None` once the source is exhausted
    fn next_update(&mut self) -> Option<PositionUpdate>;
}
