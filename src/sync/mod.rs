//! Playback synchronization: sessions, the sync controller and its events

pub mod controller;
pub mod events;
pub mod session;

use serde::Serialize;

pub use controller::{Dispatch, PlaybackEvent, PlaybackSignal, SyncController};
pub use events::{PresentationAdapter, SubscriberId, Subscription, SyncEvent};
pub use session::SyncSession;

/// Generation id of a playback session.
///
/// Ids increase monotonically for the lifetime of a controller and are never
/// reused, so an event carrying an old id can always be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionId(pub u64);

impl SessionId {
    pub(crate) fn next(self) -> Self {
        SessionId(self.0 + 1)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
