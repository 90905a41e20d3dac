//! Sync controller: drives the active-unit state machine from playback signals

use tracing::{debug, info, trace};

use super::events::{SubscriberId, Subscribers, Subscription, SyncEvent};
use super::session::{SyncSession, Transition};
use super::SessionId;
use crate::config::{BoundaryPolicy, Config};
use crate::error::SyncError;
use crate::text::Segmenter;
use crate::timing::TimingEstimator;

/// Signal reported by the playback layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackSignal {
    /// Audio metadata loaded; `None` when the duration could not be read
    DurationKnown(Option<f64>),
    /// Current playback position in seconds
    Position(f64),
    /// Playback reached the end of the stream
    Ended,
}

/// Playback signal tagged with the session it was produced for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackEvent {
    pub session: SessionId,
    pub signal: PlaybackSignal,
}

impl PlaybackEvent {
    pub fn new(session: SessionId, signal: PlaybackSignal) -> Self {
        Self { session, signal }
    }
}

/// Outcome of [`SyncController::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Event belonged to the live session and was applied
    Applied,
    /// Event belonged to a torn-down session and was ignored
    Stale,
}

/// Owns the live [`SyncSession`] and turns playback signals into highlight events.
///
/// At most one session is live. Starting a new one tears the previous one
/// down first, so every event of the old session is emitted before the new
/// session's `Rendered` event.
pub struct SyncController {
    segmenter: Segmenter,
    estimator: TimingEstimator,
    session: Option<SyncSession>,
    /// Most recently issued session id; `SessionId(0)` before the first session
    latest: SessionId,
    subscribers: Subscribers,
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl SyncController {
    /// Create a new controller
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            Segmenter::new(config.segmentation.clone()),
            TimingEstimator::new(config.timing.clone()),
        )
    }

    pub fn with_parts(segmenter: Segmenter, estimator: TimingEstimator) -> Self {
        Self {
            segmenter,
            estimator,
            session: None,
            latest: SessionId(0),
            subscribers: Subscribers::default(),
        }
    }

    /// Subscribe to highlight events
    pub fn subscribe(&mut self) -> Subscription {
        self.subscribers.subscribe()
    }

    /// Detach a subscriber explicitly. Dropping its [`Subscription`] has the same effect.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn session(&self) -> Option<&SyncSession> {
        self.session.as_ref()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(SyncSession::id)
    }

    /// Currently highlighted unit of the live session
    pub fn active_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(SyncSession::active)
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.estimator.config().boundary
    }

    /// Tear down any live session and start a new one for `text`.
    ///
    /// The returned id must tag every playback event meant for this session.
    pub fn start_session(&mut self, text: &str) -> SessionId {
        self.stop();

        let id = self.latest.next();
        self.latest = id;

        let session = SyncSession::new(id, self.segmenter.units(text));
        info!("Session {} started with {} units", id, session.units().len());

        self.subscribers.emit(SyncEvent::Rendered {
            session: id,
            units: session.shared_units(),
        });
        self.session = Some(session);

        id
    }

    /// Compute intervals for the live session once the audio duration is known
    pub fn duration_known(&mut self, duration_hint: Option<f64>) -> Result<(), SyncError> {
        let session = self.session.as_mut().ok_or(SyncError::NoActiveSession)?;

        let intervals = self.estimator.estimate(session.units(), duration_hint);
        debug!(
            "Session {}: {} intervals ending at {:.2}s",
            session.id(),
            intervals.len(),
            intervals.last().map_or(0.0, |i| i.end)
        );
        session.set_intervals(intervals);

        Ok(())
    }

    /// Handle a playback position update for the live session.
    ///
    /// Returns the unit that is active afterwards. Emits nothing when the
    /// position resolves to the unit that is already active.
    pub fn position(&mut self, t: f64) -> Result<Option<usize>, SyncError> {
        let policy = self.boundary_policy();
        let session = self.session.as_mut().ok_or(SyncError::NoActiveSession)?;

        let index = session.resolve(t, policy);
        if let Some(transition) = session.transition_to(index) {
            trace!(
                "Session {}: {:?} -> {:?} at {:.3}s",
                session.id(),
                transition.deactivated,
                transition.activated,
                t
            );
            emit_transition(&mut self.subscribers, session.id(), transition);
        }

        Ok(index)
    }

    /// Clear the highlight and mark playback of the live session as finished.
    ///
    /// The session stays available for inspection, but [`dispatch`] treats
    /// every later event tagged with its id as stale.
    ///
    /// [`dispatch`]: SyncController::dispatch
    pub fn reset(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Some(transition) = session.transition_to(None) {
                trace!("Session {}: reset from {:?}", session.id(), transition.deactivated);
                emit_transition(&mut self.subscribers, session.id(), transition);
            }
            session.mark_ended();
        }
    }

    /// Reset and discard the live session. Events for it become stale.
    pub fn stop(&mut self) {
        self.reset();
        if let Some(session) = self.session.take() {
            info!("Session {} stopped", session.id());
        }
    }

    /// Apply a session-tagged playback event.
    ///
    /// Events for sessions that have been superseded or stopped are dropped
    /// and reported as [`Dispatch::Stale`], as is anything that arrives after
    /// the live session's `Ended`. An id that was never issued is a caller bug.
    pub fn dispatch(&mut self, event: PlaybackEvent) -> Result<Dispatch, SyncError> {
        if event.session.0 == 0 || event.session > self.latest {
            return Err(SyncError::UnknownSession {
                event: event.session,
                latest: self.latest,
            });
        }

        if self.session_id() != Some(event.session) {
            debug!(
                "Dropping stale {:?} for session {} (live: {:?})",
                event.signal,
                event.session,
                self.session_id()
            );
            return Ok(Dispatch::Stale);
        }

        if self.session.as_ref().is_some_and(SyncSession::is_ended) {
            debug!(
                "Dropping {:?} for session {} after playback ended",
                event.signal, event.session
            );
            return Ok(Dispatch::Stale);
        }

        match event.signal {
            PlaybackSignal::DurationKnown(hint) => self.duration_known(hint)?,
            PlaybackSignal::Position(t) => {
                self.position(t)?;
            }
            PlaybackSignal::Ended => {
                debug!("Session {} playback ended", event.session);
                self.reset();
            }
        }

        Ok(Dispatch::Applied)
    }
}

fn emit_transition(subscribers: &mut Subscribers, session: SessionId, transition: Transition) {
    if let Some(index) = transition.deactivated {
        subscribers.emit(SyncEvent::Deactivate { session, index });
    }
    if let Some(index) = transition.activated {
        subscribers.emit(SyncEvent::Activate { session, index });
    }
}
