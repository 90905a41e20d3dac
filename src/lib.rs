//! Text-to-Speech Playback Synchronization
//!
//! Keeps a single highlighted text unit in step with speech audio whose
//! duration may only become known after playback has been requested.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `text`: Sentence segmentation into indexed units
//! - `timing`: Proportional interval estimation and position resolution
//! - `sync`: Sessions, the sync controller state machine and its events
//! - `playback`: Audio delivery / position source interfaces and the event driver
//! - `output`: Cue sheet export and a console presentation adapter
//! - `config`: Configuration structures
//! - `error`: Error types
//!
//! # Example
//!
//! ```
//! use tts_sync::{SyncController, SyncEvent};
//!
//! let mut controller = SyncController::default();
//! let events = controller.subscribe();
//!
//! let session = controller.start_session("Hello there. How are you?");
//! controller.duration_known(Some(3.0)).unwrap();
//!
//! assert_eq!(controller.position(0.5).unwrap(), Some(0));
//! assert_eq!(controller.position(2.5).unwrap(), Some(1));
//!
//! let last = events.drain().pop();
//! assert_eq!(last, Some(SyncEvent::Activate { session, index: 1 }));
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod playback;
pub mod sync;
pub mod text;
pub mod timing;

// Re-exports for convenience
pub use config::{
    BoundaryPolicy, Config, OutputConfig, OutputFormat, PlaybackConfig, SegmenterConfig,
    TimingConfig,
};
pub use error::{ConfigError, DeliveryError, Result, SyncError, TtsSyncError};
pub use output::{ConsoleHighlighter, Cue, CueWriter};
pub use playback::{
    wav_duration, AudioDelivery, DeliveredAudio, PlaybackDriver, PositionSource, PositionUpdate,
    SimulatedClock, SpeechRequest,
};
pub use sync::{
    Dispatch, PlaybackEvent, PlaybackSignal, PresentationAdapter, SessionId, Subscription,
    SyncController, SyncEvent, SyncSession,
};
pub use text::{segment, Segmenter, TextUnit};
pub use timing::{estimate, resolve, Interval, TimingEstimator};
