//! The `AgentBehavior` trait — the main extension point for user code.

use ma_core::{AgentId, Mode, MovementType, StopId, Task};

use crate::{Itinerary, MobileAgentStop, StopRegistry};

/// What a behavior sees while working at a stop.
///
/// Built by the agent for the duration of one `hello`.  Planning the next
/// movement happens through [`itinerary`][Self::itinerary]; the agent says
/// goodbye on the behavior's behalf as soon as the callback returns.
pub struct StopContext<'v, T: Task> {
    /// The agent doing the work.
    pub agent:     AgentId,

    /// The stop the agent is at.
    pub stop:      StopId,

    /// How the agent got here (`Normal` or `Revisit`).
    pub movement:  MovementType,

    /// The agent's itinerary, for planning the next movement.
    pub itinerary: &'v mut Itinerary<T>,

    /// Every stop of the journey.
    pub stops:     &'v StopRegistry,
}

impl<'v, T: Task> StopContext<'v, T> {
    /// The current stop downcast to its concrete type.
    pub fn stop_as<S: MobileAgentStop>(&self) -> Option<&'v S> {
        self.stops.get_as::<S>(self.stop)
    }

    /// `true` if the agent came back to the same stop via `revisit`.
    #[inline]
    pub fn is_revisit(&self) -> bool {
        self.movement == MovementType::Revisit
    }

    /// Shorthand for `itinerary.set_next_stop(stop, Mode::Task(task))`.
    pub fn go_to(&mut self, stop: StopId, task: T) {
        self.itinerary.set_next_stop(stop, Mode::Task(task));
    }

    /// Shorthand for `itinerary.finished_with_mode(Mode::Finished)`.
    pub fn finish(&mut self) {
        self.itinerary.finished_with_mode(Mode::Finished);
    }

    /// Shorthand for `itinerary.finished_with_mode(Mode::Failed)`.
    pub fn fail(&mut self) {
        self.itinerary.finished_with_mode(Mode::Failed);
    }
}

/// Per-agent-type work dispatch.
///
/// Every stop visit ends in exactly one of three calls on the itinerary:
/// `set_next_stop`, `revisit`, or `finished_with_mode`.  A callback that
/// plans nothing leaves the agent without a movement, which the relay reports
/// as an invariant violation.
///
/// The lifecycle modes are not the behavior's concern: `Finished` and
/// `Failed` are handled by the agent, and `Activating` arrives only through
/// [`activated`][Self::activated].
///
/// # Example
///
/// ```rust,ignore
/// struct Courier { depot: StopId, door: StopId }
///
/// impl AgentBehavior for Courier {
///     type Task = Leg;
///
///     fn activated(&mut self, ctx: &mut StopContext<'_, Leg>) {
///         ctx.go_to(self.depot, Leg::Pickup);
///     }
///
///     fn execute(&mut self, task: Leg, ctx: &mut StopContext<'_, Leg>) {
///         match task {
///             Leg::Pickup  => ctx.go_to(self.door, Leg::Deliver),
///             Leg::Deliver => ctx.finish(),
///         }
///     }
/// }
/// ```
pub trait AgentBehavior: Send + 'static {
    /// The application's closed set of tasks.
    type Task: Task;

    /// Called at the first stop of a journey.  Must plan the first task.
    fn activated(&mut self, ctx: &mut StopContext<'_, Self::Task>);

    /// Perform `task` at the current stop and plan the next movement.
    fn execute(&mut self, task: Self::Task, ctx: &mut StopContext<'_, Self::Task>);

    /// Called exactly once per journey, when the agent parks.
    ///
    /// `final_mode` is the mode the journey ended in (`Finished`, `Failed`,
    /// or whatever was passed to `finished_with_mode`).
    ///
    /// Default: does nothing.
    fn deactivated(&mut self, _final_mode: Mode<Self::Task>) {}
}
