//! Per-agent planning state: where the agent goes next, in which mode, and how.

use std::time::Duration;

use ma_core::{Mode, MockDelay, MockDelayable, MovementType, StopId, Task};

/// The next leg of a journey, computed by [`Itinerary::take_leg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Leg<T> {
    /// Deliver the agent to `destination` to do work in `mode`.
    Visit {
        destination: StopId,
        mode:        Mode<T>,
        movement:    MovementType,
    },
    /// End the journey, visiting `destination` first if there is one.
    Park {
        destination: Option<StopId>,
        mode:        Mode<T>,
    },
    /// No destination could be resolved for the pending movement.
    Stranded { movement: MovementType },
}

/// Planning state owned by exactly one agent.
///
/// Stops are referenced by [`StopId`] only; an itinerary never owns a stop.
///
/// The three planning calls made from stop work are
/// [`set_next_stop`][Self::set_next_stop], [`revisit`][Self::revisit], and
/// [`finished_with_mode`][Self::finished_with_mode].  Each one replaces the
/// pending movement; the last call before the agent says goodbye wins.
#[derive(Debug)]
pub struct Itinerary<T: Task> {
    pub(crate) current_stop:       Option<StopId>,
    pub(crate) next_stop:          Option<StopId>,
    pub(crate) final_destination:  Option<StopId>,
    pub(crate) next_mode:          Mode<T>,
    pub(crate) next_movement_type: MovementType,
    pub(crate) updated:            bool,
    pub(crate) delay:              Option<MockDelay>,
}

impl<T: Task> Default for Itinerary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Task> Itinerary<T> {
    /// A clean itinerary: no stops, `next_mode = Finished`, no pending movement.
    pub fn new() -> Self {
        Self {
            current_stop:       None,
            next_stop:          None,
            final_destination:  None,
            next_mode:          Mode::Finished,
            next_movement_type: MovementType::Unset,
            updated:            false,
            delay:              None,
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Advance to `stop` in `mode` on the next relay.
    pub fn set_next_stop(&mut self, stop: StopId, mode: Mode<T>) {
        self.next_stop = Some(stop);
        self.next_mode = mode;
        self.set_next_movement_type(MovementType::Normal);
    }

    /// Re-enter a stop on the next relay.
    ///
    /// Leaves any planned next stop and mode in place.  With no next stop
    /// planned the agent returns to the current stop, in the mode it is
    /// already in.
    ///
    /// Every relay, revisits included, runs deeper on the same call stack
    /// until the agent parks.  Polling a stop with thousands of revisits in
    /// one journey can overflow a thread's stack; bound the retries.
    pub fn revisit(&mut self) {
        self.set_next_movement_type(MovementType::Revisit);
    }

    /// End the journey in `mode` (normally `Finished` or `Failed`).
    pub fn finished_with_mode(&mut self, mode: Mode<T>) {
        self.next_mode = mode;
        self.next_stop = None;
        self.set_next_movement_type(MovementType::Park);
    }

    /// Where the agent parks.  `None` parks without visiting a stop.
    pub(crate) fn set_final_destination(&mut self, stop: Option<StopId>) {
        self.final_destination = stop;
    }

    pub(crate) fn set_delay(&mut self, delay: Option<MockDelay>) {
        self.delay = delay;
    }

    /// Back to the state of [`new`][Self::new], keeping the mock delay.
    pub(crate) fn reset(&mut self) {
        let delay = self.delay.take();
        *self = Self { delay, ..Self::new() };
    }

    fn set_next_movement_type(&mut self, movement: MovementType) {
        self.next_movement_type = movement;
        self.updated = true;
    }

    // ── Relay step ────────────────────────────────────────────────────────

    /// Consume the pending movement and compute the next leg.
    ///
    /// - `Normal` / `Revisit`: the destination (next stop, or the current
    ///   stop for a revisit) becomes the current stop and the pending
    ///   movement is cleared.
    /// - `Park`: every field returns to a clean slate (`next_mode = Finished`,
    ///   no stops, no final destination).
    /// - A pending movement with nothing to resolve leaves the itinerary
    ///   untouched and yields `Leg::Stranded`.
    pub(crate) fn take_leg(&mut self) -> Leg<T> {
        let movement = self.next_movement_type;
        match movement {
            MovementType::Normal | MovementType::Revisit => {
                let destination = match movement {
                    MovementType::Revisit => self.next_stop.or(self.current_stop),
                    _ => self.next_stop,
                };
                let Some(destination) = destination else {
                    return Leg::Stranded { movement };
                };
                self.next_stop          = None;
                self.current_stop       = Some(destination);
                self.next_movement_type = MovementType::Unset;
                self.updated            = false;
                Leg::Visit { destination, mode: self.next_mode, movement }
            }
            MovementType::Park => {
                let destination = self.final_destination.take();
                let mode = std::mem::replace(&mut self.next_mode, Mode::Finished);
                self.next_stop          = None;
                self.current_stop       = None;
                self.next_movement_type = MovementType::Unset;
                self.updated            = false;
                Leg::Park { destination, mode }
            }
            MovementType::Unset => Leg::Stranded { movement },
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// The stop the agent was most recently delivered to.
    pub fn current_stop(&self) -> Option<StopId> {
        self.current_stop
    }

    pub fn next_stop(&self) -> Option<StopId> {
        self.next_stop
    }

    pub fn final_destination(&self) -> Option<StopId> {
        self.final_destination
    }

    pub fn next_mode(&self) -> Mode<T> {
        self.next_mode
    }

    pub fn next_movement_type(&self) -> MovementType {
        self.next_movement_type
    }

    /// `true` once the pending movement has been set since the last relay.
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// `true` if no stop, destination, or movement is pending.
    pub fn is_clean(&self) -> bool {
        self.current_stop.is_none()
            && self.next_stop.is_none()
            && self.final_destination.is_none()
            && self.next_movement_type == MovementType::Unset
    }
}

impl<T: Task> MockDelayable for Itinerary<T> {
    fn mock_delay(&mut self) -> Option<Duration> {
        self.delay.mock_delay()
    }
}
