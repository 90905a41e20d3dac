//! State of a single playback session

use std::sync::Arc;

use super::SessionId;
use crate::config::BoundaryPolicy;
use crate::text::TextUnit;
use crate::timing::{self, Interval};

/// Highlight change produced by moving to a new active unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub deactivated: Option<usize>,
    pub activated: Option<usize>,
}

/// One playback of one text: its units, their timings and the active unit.
///
/// Sessions are created by [`SyncController::start_session`] and never reused.
///
/// [`SyncController::start_session`]: super::SyncController::start_session
#[derive(Debug, Clone)]
pub struct SyncSession {
    id: SessionId,
    units: Arc<[TextUnit]>,
    /// Empty until the audio duration (or its absence) is known
    intervals: Vec<Interval>,
    active: Option<usize>,
    /// Set on reset; later dispatched playback events are ignored
    ended: bool,
}

impl SyncSession {
    pub(crate) fn new(id: SessionId, units: Vec<TextUnit>) -> Self {
        Self {
            id,
            units: units.into(),
            intervals: Vec::new(),
            active: None,
            ended: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    pub(crate) fn shared_units(&self) -> Arc<[TextUnit]> {
        Arc::clone(&self.units)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Currently highlighted unit, if any
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Whether playback of this session has finished
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub(crate) fn mark_ended(&mut self) {
        self.ended = true;
    }

    pub fn has_timings(&self) -> bool {
        !self.intervals.is_empty()
    }

    /// Units paired with their intervals, in order
    pub fn cues(&self) -> impl Iterator<Item = (&TextUnit, &Interval)> + '_ {
        self.units.iter().zip(self.intervals.iter())
    }

    pub(crate) fn set_intervals(&mut self, intervals: Vec<Interval>) {
        self.intervals = intervals;
    }

    pub fn resolve(&self, t: f64, policy: BoundaryPolicy) -> Option<usize> {
        timing::resolve(&self.intervals, t, policy)
    }

    /// Move the highlight to `index`, or report `None` if nothing changes
    pub(crate) fn transition_to(&mut self, index: Option<usize>) -> Option<Transition> {
        if index == self.active {
            return None;
        }

        let transition = Transition {
            deactivated: self.active,
            activated: index,
        };
        self.active = index;
        Some(transition)
    }
}
