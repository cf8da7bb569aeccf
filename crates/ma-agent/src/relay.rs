//! Per-journey context threaded through every `hello`/`goodbye`/relay call.

use ma_core::{InvariantViolation, RelayConfig, RelayError, StopId, ViolationPolicy};

use crate::{HelloEvent, MobileAgentStop, ParkEvent, RelayEvent, RelayObserver, StopRegistry};

/// The collaborators a journey needs, passed explicitly down the relay chain.
///
/// A `Relay` borrows the stop registry immutably and the observer mutably for
/// `'a`.  Stops looked up through it are borrowed for `'a` as well, which is
/// what lets a stop hold on to `&self` while handing the same `&mut Relay` on
/// to the agent it received.
///
/// # Example
///
/// ```rust,ignore
/// let mut log = JourneyLog::new();
/// let mut relay = Relay::new(&stops, &mut log);
/// agent.activate_at_stop(first, Some(last), &mut relay)?;
/// ```
pub struct Relay<'a> {
    stops:    &'a StopRegistry,
    observer: &'a mut dyn RelayObserver,
    policy:   ViolationPolicy,
    relays:   u64,
}

impl<'a> Relay<'a> {
    /// A relay with the default (fatal) violation policy.
    pub fn new(stops: &'a StopRegistry, observer: &'a mut dyn RelayObserver) -> Self {
        Self { stops, observer, policy: ViolationPolicy::default(), relays: 0 }
    }

    /// A relay using `config`'s violation policy.
    pub fn with_config(
        stops:    &'a StopRegistry,
        observer: &'a mut dyn RelayObserver,
        config:   &RelayConfig,
    ) -> Self {
        Self::new(stops, observer).policy(config.violation_policy)
    }

    /// Override the violation policy.
    pub fn policy(mut self, policy: ViolationPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn stops(&self) -> &'a StopRegistry {
        self.stops
    }

    /// The stop behind `id`, borrowed for the whole journey.
    pub fn stop(&self, id: StopId) -> Option<&'a dyn MobileAgentStop> {
        self.stops.get(id)
    }

    pub fn violation_policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Number of relays performed through this context so far.
    pub fn relays(&self) -> u64 {
        self.relays
    }

    // ── Event emission ────────────────────────────────────────────────────

    pub(crate) fn emit_relay(&mut self, event: &RelayEvent) {
        self.relays += 1;
        self.observer.on_relay(event);
    }

    pub(crate) fn emit_hello(&mut self, event: &HelloEvent) {
        self.observer.on_hello(event);
    }

    pub(crate) fn emit_parked(&mut self, event: &ParkEvent) {
        self.observer.on_parked(event);
    }

    /// Report a broken invariant.
    ///
    /// Under [`ViolationPolicy::Panic`] this never returns.  Under
    /// [`ViolationPolicy::Propagate`] it returns the error for the caller to
    /// send back up the relay chain.
    pub(crate) fn violation(&self, violation: InvariantViolation) -> RelayError {
        tracing::error!(agent = violation.agent().0, %violation, "relay invariant violated");
        match self.policy {
            ViolationPolicy::Panic => panic!("relay invariant violated: {violation}"),
            ViolationPolicy::Propagate => RelayError::Invariant(violation),
        }
    }
}
