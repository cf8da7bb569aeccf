//! The `MobileAgent` struct and its relay loop.

use std::time::Duration;

use ma_core::{
    AgentId, InvariantViolation, Mode, MockDelay, MockDelayable, MovementType, RelayConfig,
    RelayResult, StopId,
};

use crate::itinerary::Leg;
use crate::{AgentBehavior, HelloEvent, Itinerary, ParkEvent, Relay, RelayEvent, StopContext, Traveler};

/// A mobile unit of work travelling between stops.
///
/// A journey is a direct, mutually recursive call chain on the calling
/// thread:
///
/// ```text
/// activate_at_stop ─▶ goodbye ─▶ visit_next_stop ─▶ stop.receive_mobile_agent
///                        ▲                                     │
///                        └──────────── hello ◀─────────────────┘
/// ```
///
/// 1. **Activate**: [`activate_at_stop`][Self::activate_at_stop] plans a
///    `Normal` move to the first stop in `Mode::Activating` and says goodbye.
/// 2. **Relay**: `goodbye` asks the itinerary for the next leg and delivers
///    the agent to that stop.
/// 3. **Work**: the stop calls `hello`, which dispatches on the mode to the
///    [`AgentBehavior`], then says goodbye again.
/// 4. **Park**: once the behavior calls `finished_with_mode`, the next relay
///    visits the final destination (if any) and the agent deactivates.
///
/// Every call returns only after the rest of the journey has completed, so
/// the stack grows by a few frames per relay.
///
/// A parked agent is inert and may be activated again.
pub struct MobileAgent<B: AgentBehavior> {
    id:            AgentId,
    itinerary:     Itinerary<B::Task>,
    mode:          Mode<B::Task>,
    movement_type: MovementType,
    behavior:      B,
    hello_delay:   Option<MockDelay>,
}

impl<B: AgentBehavior> MobileAgent<B> {
    /// Create an agent with a clean itinerary and no mock delays.
    pub fn new(id: AgentId, behavior: B) -> Self {
        Self {
            id,
            itinerary:     Itinerary::new(),
            mode:          Mode::Finished,
            movement_type: MovementType::Unset,
            behavior,
            hello_delay:   None,
        }
    }

    /// Install the mock delays described by `config`.
    pub fn with_config(mut self, config: &RelayConfig) -> Self {
        self.hello_delay = config.make_hello_delay(self.id);
        self.itinerary.set_delay(config.make_relay_delay(self.id));
        self
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Start a journey at `stop`, parking at `final_destination` when done.
    ///
    /// This is the only way a journey starts.  It delivers the agent to
    /// `stop` in `Mode::Activating`; choosing the first task is left to
    /// [`AgentBehavior::activated`].
    ///
    /// Whatever a previous journey left behind (a violation reported under
    /// `ViolationPolicy::Propagate` can abandon one mid-relay) is discarded
    /// first, so every activation starts from a clean itinerary.
    pub fn activate_at_stop(
        &mut self,
        stop:              StopId,
        final_destination: Option<StopId>,
        relay:             &mut Relay<'_>,
    ) -> RelayResult<()> {
        if !self.is_idle() {
            tracing::warn!(
                agent = self.id.0,
                movement = %self.movement_type,
                "discarding unfinished journey"
            );
            self.movement_type = MovementType::Unset;
            self.itinerary.reset();
        }
        tracing::debug!(agent = self.id.0, %stop, ?final_destination, "activating agent");
        self.itinerary.set_final_destination(final_destination);
        self.itinerary.set_next_stop(stop, Mode::Activating);
        self.goodbye(relay)
    }

    /// Start work at the stop the agent was just delivered to.
    pub fn hello(&mut self, relay: &mut Relay<'_>) -> RelayResult<()> {
        match self.movement_type {
            MovementType::Normal | MovementType::Revisit => {
                let stop = self.itinerary.current_stop();
                let stop_code = stop.and_then(|s| relay.stops().diagnostics_code(s));
                relay.emit_hello(&HelloEvent {
                    agent:     self.id,
                    stop,
                    stop_code,
                    mode:      self.mode.identifier(),
                    movement:  self.movement_type,
                });
                self.inject_mock_delay();
                self.execute_stop_on_itinerary(relay)?;
                self.goodbye(relay)
            }
            // Parking is completed by `goodbye`.
            MovementType::Park => Ok(()),
            MovementType::Unset => {
                Err(relay.violation(InvariantViolation::UnsetMovement { agent: self.id }))
            }
        }
    }

    /// Leave the current stop: park if the journey is over, otherwise relay.
    pub fn goodbye(&mut self, relay: &mut Relay<'_>) -> RelayResult<()> {
        if self.movement_type == MovementType::Park {
            self.behavior.deactivated(self.mode);
            self.movement_type = MovementType::Unset;
            tracing::debug!(agent = self.id.0, mode = self.mode.identifier(), "agent parked");
            relay.emit_parked(&ParkEvent { agent: self.id, mode: self.mode.identifier() });
            return Ok(());
        }
        self.visit_next_stop(relay)
    }

    /// Consume the itinerary's pending movement and deliver the agent.
    pub fn visit_next_stop(&mut self, relay: &mut Relay<'_>) -> RelayResult<()> {
        self.itinerary.inject_mock_delay();
        let source = self.itinerary.current_stop();

        match self.itinerary.take_leg() {
            Leg::Visit { destination, mode, movement } => {
                let stop = relay.stop(destination).ok_or_else(|| {
                    relay.violation(InvariantViolation::UnregisteredStop {
                        agent: self.id,
                        stop:  destination,
                    })
                })?;
                self.mode = mode;
                self.movement_type = movement;
                self.emit_relay(relay, source, Some(destination));
                stop.receive_mobile_agent(self, relay)
            }
            Leg::Park { destination, mode } => {
                self.mode = mode;
                self.movement_type = MovementType::Park;
                self.emit_relay(relay, source, destination);
                if let Some(destination) = destination {
                    let stop = relay.stop(destination).ok_or_else(|| {
                        relay.violation(InvariantViolation::UnregisteredStop {
                            agent: self.id,
                            stop:  destination,
                        })
                    })?;
                    stop.receive_mobile_agent(self, relay)?;
                }
                self.goodbye(relay)
            }
            Leg::Stranded { movement } if movement.delivers_work() => {
                Err(relay.violation(InvariantViolation::MissingDestination {
                    agent: self.id,
                    movement,
                }))
            }
            Leg::Stranded { movement } => {
                if self.movement_type == MovementType::Park {
                    return self.goodbye(relay);
                }
                Err(relay.violation(InvariantViolation::StrandedWithoutDestination {
                    agent: self.id,
                    movement,
                }))
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn mode(&self) -> Mode<B::Task> {
        self.mode
    }

    pub fn movement_type(&self) -> MovementType {
        self.movement_type
    }

    pub fn itinerary(&self) -> &Itinerary<B::Task> {
        &self.itinerary
    }

    #[cfg(test)]
    pub(crate) fn itinerary_mut(&mut self) -> &mut Itinerary<B::Task> {
        &mut self.itinerary
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    pub fn into_behavior(self) -> B {
        self.behavior
    }

    /// `true` when the agent is not on a journey: no movement and a clean
    /// itinerary.  Holds before the first activation and after parking.
    pub fn is_idle(&self) -> bool {
        self.movement_type == MovementType::Unset && self.itinerary.is_clean()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Run the work for the current mode.
    ///
    /// `Activating` and task modes go to the behavior; the terminal modes
    /// are handled here by parking in that mode.
    fn execute_stop_on_itinerary(&mut self, relay: &mut Relay<'_>) -> RelayResult<()> {
        let Some(stop) = self.itinerary.current_stop() else {
            return Err(relay.violation(InvariantViolation::MissingDestination {
                agent:    self.id,
                movement: self.movement_type,
            }));
        };

        let mut ctx = StopContext {
            agent:     self.id,
            stop,
            movement:  self.movement_type,
            itinerary: &mut self.itinerary,
            stops:     relay.stops(),
        };
        match self.mode {
            Mode::Activating => self.behavior.activated(&mut ctx),
            Mode::Task(task) => self.behavior.execute(task, &mut ctx),
            mode @ (Mode::Finished | Mode::Failed) => ctx.itinerary.finished_with_mode(mode),
        }
        Ok(())
    }

    fn emit_relay(&self, relay: &mut Relay<'_>, source: Option<StopId>, destination: Option<StopId>) {
        let stops = relay.stops();
        relay.emit_relay(&RelayEvent {
            agent:            self.id,
            source,
            destination,
            source_code:      source.and_then(|s| stops.diagnostics_code(s)),
            destination_code: destination.and_then(|s| stops.diagnostics_code(s)),
            mode:             self.mode.identifier(),
            movement:         self.movement_type,
        });
    }
}

impl<B: AgentBehavior> MockDelayable for MobileAgent<B> {
    fn mock_delay(&mut self) -> Option<Duration> {
        self.hello_delay.mock_delay()
    }
}

impl<B: AgentBehavior> Traveler for MobileAgent<B> {
    fn agent_id(&self) -> AgentId {
        self.id
    }

    fn mode_identifier(&self) -> &'static str {
        self.mode.identifier()
    }

    fn movement_type(&self) -> MovementType {
        self.movement_type
    }

    fn hello(&mut self, relay: &mut Relay<'_>) -> RelayResult<()> {
        MobileAgent::hello(self, relay)
    }
}
