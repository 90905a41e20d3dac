//! Highlight events and subscriber management

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tracing::debug;

use super::SessionId;
use crate::text::TextUnit;

/// Event emitted by the sync controller, tagged with its session
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A new session's units, sent once before any highlight event
    Rendered {
        session: SessionId,
        units: Arc<[TextUnit]>,
    },
    /// Unit became the highlighted one
    Activate { session: SessionId, index: usize },
    /// Unit is no longer highlighted
    Deactivate { session: SessionId, index: usize },
}

impl SyncEvent {
    pub fn session(&self) -> SessionId {
        match self {
            SyncEvent::Rendered { session, .. }
            | SyncEvent::Activate { session, .. }
            | SyncEvent::Deactivate { session, .. } => *session,
        }
    }
}

/// Receiver side of the highlight stream (rendering, scrolling, ...)
pub trait PresentationAdapter {
    /// Show a fresh unit sequence, replacing whatever was shown before
    fn render(&mut self, units: &[TextUnit]);

    fn activate(&mut self, index: usize);

    fn deactivate(&mut self, index: usize);
}

/// Identifies one subscription on a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub(crate) u64);

/// Handle to a controller's event stream.
///
/// Dropping the handle disconnects the channel; the controller forgets the
/// subscriber on its next emit.
pub struct Subscription {
    id: SubscriberId,
    receiver: Receiver<SyncEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Get the next pending event (non-blocking)
    pub fn try_recv(&self) -> Option<SyncEvent> {
        self.receiver.try_recv().ok()
    }

    /// Take all pending events in emission order
    pub fn drain(&self) -> Vec<SyncEvent> {
        self.receiver.try_iter().collect()
    }

    /// Forward all pending events to an adapter, returning how many were applied
    pub fn drain_into<A: PresentationAdapter + ?Sized>(&self, adapter: &mut A) -> usize {
        let mut count = 0;
        for event in self.receiver.try_iter() {
            match event {
                SyncEvent::Rendered { units, .. } => adapter.render(&units),
                SyncEvent::Activate { index, .. } => adapter.activate(index),
                SyncEvent::Deactivate { index, .. } => adapter.deactivate(index),
            }
            count += 1;
        }
        count
    }
}

/// Fan-out of events to all live subscriptions
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    senders: Vec<(SubscriberId, Sender<SyncEvent>)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> Subscription {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = unbounded();
        self.senders.push((id, sender));
        debug!("Subscriber {:?} attached ({} total)", id, self.senders.len());

        Subscription { id, receiver }
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(sid, _)| *sid != id);
        before != self.senders.len()
    }

    /// Send to every subscriber, dropping those whose receiver is gone
    pub(crate) fn emit(&mut self, event: SyncEvent) {
        self.senders.retain(|(id, sender)| {
            let alive = sender.send(event.clone()).is_ok();
            if !alive {
                debug!("Subscriber {:?} disconnected", id);
            }
            alive
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
