//! Ordered delivery of playback events to the sync controller

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{AudioDelivery, DeliveredAudio, PositionSource, PositionUpdate, SpeechRequest};
use crate::error::Result;
use crate::sync::{Dispatch, PlaybackEvent, PlaybackSignal, SessionId, SyncController};

/// Counters for events handled by a driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub applied: u64,
    pub stale: u64,
}

/// Single consumer of playback events.
///
/// Producers (media clocks, metadata loaders) may live on any thread and
/// only hold a [`Sender`]. The driver applies events one at a time in
/// arrival order, so controller state is only ever touched here.
pub struct PlaybackDriver {
    controller: SyncController,
    sender: Sender<PlaybackEvent>,
    receiver: Receiver<PlaybackEvent>,
    stats: DriverStats,
}

impl PlaybackDriver {
    pub fn new(controller: SyncController) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            controller,
            sender,
            receiver,
            stats: DriverStats::default(),
        }
    }

    /// Handle for producers of playback events
    pub fn sender(&self) -> Sender<PlaybackEvent> {
        self.sender.clone()
    }

    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SyncController {
        &mut self.controller
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Stop current playback, fetch audio for `request` and start a session for it.
    ///
    /// On delivery failure no session is started and the error is returned
    /// unchanged. If the service already knows the duration, timings are
    /// computed right away; otherwise the caller sends `DurationKnown` later.
    pub fn request_playback<D: AudioDelivery + ?Sized>(
        &mut self,
        delivery: &D,
        request: &SpeechRequest,
    ) -> Result<(SessionId, DeliveredAudio)> {
        self.controller.stop();

        let audio = delivery.deliver(request).map_err(|e| {
            warn!("Audio delivery failed: {}", e);
            e
        })?;

        let session = self.controller.start_session(&request.text);
        info!(
            "Playback requested for session {} ({} bytes, voice: {:?}, speed: {:?})",
            session,
            audio.bytes.len(),
            request.voice,
            request.speed
        );

        if audio.duration.is_some() {
            self.controller.duration_known(audio.duration)?;
        }

        Ok((session, audio))
    }

    /// Apply one event
    pub fn process(&mut self, event: PlaybackEvent) -> Result<Dispatch> {
        let outcome = self.controller.dispatch(event)?;
        match outcome {
            Dispatch::Applied => self.stats.applied += 1,
            Dispatch::Stale => self.stats.stale += 1,
        }
        Ok(outcome)
    }

    /// Apply every event queued so far, returning how many were handled
    pub fn run_until_idle(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Ok(event) = self.receiver.try_recv() {
            self.process(event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Apply events until `session` reports `Ended` or `timeout` passes.
    ///
    /// Returns `true` if the session ended.
    pub fn run_until_ended(&mut self, session: SessionId, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(event) => {
                    let outcome = self.process(event)?;
                    if outcome == Dispatch::Applied
                        && event.session == session
                        && event.signal == PlaybackSignal::Ended
                    {
                        return Ok(true);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    debug!("Timed out waiting for session {} to end", session);
                    return Ok(false);
                }
                Err(RecvTimeoutError::Disconnected) => return Ok(false),
            }
        }
    }

    /// Forward every update from `source` to `sender`, tagged with `session`.
    ///
    /// Returns the number of updates forwarded; stops early if the driver is gone.
    pub fn feed<S: PositionSource + ?Sized>(
        sender: &Sender<PlaybackEvent>,
        session: SessionId,
        source: &mut S,
    ) -> usize {
        let mut sent = 0;
        while let Some(update) = source.next_update() {
            let signal = match update {
                PositionUpdate::Position(t) => PlaybackSignal::Position(t),
                PositionUpdate::Ended => PlaybackSignal::Ended,
            };
            if sender.send(PlaybackEvent::new(session, signal)).is_err() {
                break;
            }
            sent += 1;
        }
        sent
    }
}
