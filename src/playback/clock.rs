//! Simulated playback clock

use std::time::Duration;

use super::{PositionSource, PositionUpdate};

/// Position source that ticks at a fixed interval from zero to a total duration.
///
/// Reports every tick position, then the exact end position, then `Ended`.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    duration: f64,
    tick: f64,
    ticks_emitted: u64,
    state: ClockState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockState {
    Ticking,
    AtEnd,
    Ending,
    Exhausted,
}

impl SimulatedClock {
    /// Create a clock. A non-positive or non-finite duration ends immediately.
    pub fn new(duration_secs: f64, tick_interval: Duration) -> Self {
        let duration = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            0.0
        };
        let tick = tick_interval.as_secs_f64().max(0.001);

        Self {
            duration,
            tick,
            ticks_emitted: 0,
            state: ClockState::Ticking,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl PositionSource for SimulatedClock {
    fn next_update(&mut self) -> Option<PositionUpdate> {
        match self.state {
            ClockState::Ticking => {
                // Multiply rather than accumulate so positions don't drift
                let t = self.ticks_emitted as f64 * self.tick;
                if t < self.duration {
                    self.ticks_emitted += 1;
                    Some(PositionUpdate::Position(t))
                } else {
                    self.state = ClockState::AtEnd;
                    self.next_update()
                }
            }
            ClockState::AtEnd => {
                self.state = ClockState::Ending;
                Some(PositionUpdate::Position(self.duration))
            }
            ClockState::Ending => {
                self.state = ClockState::Exhausted;
                Some(PositionUpdate::Ended)
            }
            ClockState::Exhausted => None,
        }
    }
}

impl Iterator for SimulatedClock {
    type Item = PositionUpdate;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_update()
    }
}
