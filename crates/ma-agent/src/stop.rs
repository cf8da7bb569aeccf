//! The stop capability and the face an agent shows to stops.

use std::any::Any;

use ma_core::{AgentId, MovementType, RelayResult};

use crate::Relay;

// ── Traveler ──────────────────────────────────────────────────────────────────

/// An agent as seen by the stop it arrives at.
///
/// `MobileAgent<B>` is generic over its behavior; stops are not, so they
/// receive agents through this object-safe trait.
pub trait Traveler {
    fn agent_id(&self) -> AgentId;

    /// Identifier of the mode the agent arrived in.
    fn mode_identifier(&self) -> &'static str;

    fn movement_type(&self) -> MovementType;

    /// Start the agent's work at this stop.  Returns once the rest of the
    /// journey that follows from this visit has completed.
    fn hello(&mut self, relay: &mut Relay<'_>) -> RelayResult<()>;
}

// ── MobileAgentStop ───────────────────────────────────────────────────────────

/// Upcast helper so registries can hand back a stop's concrete type.
///
/// Blanket-implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A component that can receive an agent and host a fragment of its work.
///
/// Stops are owned by a [`StopRegistry`][crate::StopRegistry] and outlive
/// every agent that visits them.  All methods take `&self`: the same stop
/// may be re-entered by a revisiting agent while an earlier visit is still on
/// the call stack, so per-stop state belongs behind a `Mutex` or atomics.
///
/// # Example
///
/// ```rust,ignore
/// struct Inbox { received: AtomicUsize }
///
/// impl MobileAgentStop for Inbox {
///     fn diagnostics_type_code(&self) -> u32 { 10 }
///
///     fn receive_mobile_agent(
///         &self,
///         agent: &mut dyn Traveler,
///         relay: &mut Relay<'_>,
///     ) -> RelayResult<()> {
///         self.received.fetch_add(1, Ordering::Relaxed);
///         agent.hello(relay)
///     }
/// }
/// ```
pub trait MobileAgentStop: AsAny + Send + Sync + 'static {
    /// Stable per-type number used only to correlate trace events.
    fn diagnostics_type_code(&self) -> u32;

    /// Accept `agent` and start its work here.
    ///
    /// Default: call [`Traveler::hello`] immediately.
    fn receive_mobile_agent(
        &self,
        agent: &mut dyn Traveler,
        relay: &mut Relay<'_>,
    ) -> RelayResult<()> {
        agent.hello(relay)
    }

    /// Name used in log output.  Default: the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
