//! Relay observer trait and the trace events it receives.

use ma_core::{AgentId, MovementType, StopId};

// ── Events ────────────────────────────────────────────────────────────────────

/// One hand-off of an agent from its current stop to the next.
///
/// Emitted for every relay, including the park relay (where `destination` is
/// the final destination, possibly `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayEvent {
    pub agent:            AgentId,
    pub source:           Option<StopId>,
    pub destination:      Option<StopId>,
    /// Diagnostics type code of `source`.
    pub source_code:      Option<u32>,
    /// Diagnostics type code of `destination`.
    pub destination_code: Option<u32>,
    /// Mode the agent travels in.
    pub mode:             &'static str,
    pub movement:         MovementType,
}

/// An agent starting work at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelloEvent {
    pub agent:     AgentId,
    pub stop:      Option<StopId>,
    pub stop_code: Option<u32>,
    pub mode:      &'static str,
    pub movement:  MovementType,
}

/// An agent ending its journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkEvent {
    pub agent: AgentId,
    /// `"finished"` or `"failed"` for journeys that ended normally.
    pub mode:  &'static str,
}

/// Any of the three events, in the order they were observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Relay(RelayEvent),
    Hello(HelloEvent),
    Parked(ParkEvent),
}

// ── RelayObserver ─────────────────────────────────────────────────────────────

/// Callbacks invoked by the relay at key points of a journey.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  The observer is passed in through
/// [`Relay`][crate::Relay]; there is no global sink.
///
/// # Example — relay counter
///
/// ```rust,ignore
/// struct RelayCounter(usize);
///
/// impl RelayObserver for RelayCounter {
///     fn on_relay(&mut self, _event: &RelayEvent) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait RelayObserver {
    /// Called just before an agent is delivered to its next stop.
    fn on_relay(&mut self, _event: &RelayEvent) {}

    /// Called when an agent starts work at a stop.
    fn on_hello(&mut self, _event: &HelloEvent) {}

    /// Called once when an agent parks.
    fn on_parked(&mut self, _event: &ParkEvent) {}
}

/// A [`RelayObserver`] that does nothing.
pub struct NoopObserver;

impl RelayObserver for NoopObserver {}

impl<O: RelayObserver + ?Sized> RelayObserver for &mut O {
    fn on_relay(&mut self, event: &RelayEvent) {
        (**self).on_relay(event);
    }

    fn on_hello(&mut self, event: &HelloEvent) {
        (**self).on_hello(event);
    }

    fn on_parked(&mut self, event: &ParkEvent) {
        (**self).on_parked(event);
    }
}

/// Fan events out to two observers, first `A` then `B`.
impl<A: RelayObserver, B: RelayObserver> RelayObserver for (A, B) {
    fn on_relay(&mut self, event: &RelayEvent) {
        self.0.on_relay(event);
        self.1.on_relay(event);
    }

    fn on_hello(&mut self, event: &HelloEvent) {
        self.0.on_hello(event);
        self.1.on_hello(event);
    }

    fn on_parked(&mut self, event: &ParkEvent) {
        self.0.on_parked(event);
        self.1.on_parked(event);
    }
}

// ── TracingObserver ───────────────────────────────────────────────────────────

/// Emits every event as a structured `tracing` event at `DEBUG` level under
/// the `ma_agent::relay` target.
#[derive(Default)]
pub struct TracingObserver;

impl RelayObserver for TracingObserver {
    fn on_relay(&mut self, e: &RelayEvent) {
        tracing::debug!(
            target: "ma_agent::relay",
            agent = e.agent.0,
            source = ?e.source_code,
            destination = ?e.destination_code,
            mode = e.mode,
            movement = e.movement.raw_value(),
            "relay"
        );
    }

    fn on_hello(&mut self, e: &HelloEvent) {
        tracing::debug!(
            target: "ma_agent::relay",
            agent = e.agent.0,
            stop = ?e.stop_code,
            mode = e.mode,
            movement = e.movement.raw_value(),
            "hello"
        );
    }

    fn on_parked(&mut self, e: &ParkEvent) {
        tracing::debug!(target: "ma_agent::relay", agent = e.agent.0, mode = e.mode, "parked");
    }
}

// ── JourneyLog ────────────────────────────────────────────────────────────────

/// Captures every event in memory.
///
/// Used by tests in place of a tracing backend, and by applications that want
/// to inspect a finished journey.
#[derive(Debug, Default)]
pub struct JourneyLog {
    pub events: Vec<TraceEvent>,
}

impl JourneyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relays(&self) -> impl Iterator<Item = &RelayEvent> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Relay(r) => Some(r),
            _ => None,
        })
    }

    pub fn hellos(&self) -> impl Iterator<Item = &HelloEvent> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Hello(h) => Some(h),
            _ => None,
        })
    }

    pub fn parks(&self) -> impl Iterator<Item = &ParkEvent> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Parked(p) => Some(p),
            _ => None,
        })
    }

    /// Destination of every relay, in order.
    pub fn destinations(&self) -> Vec<Option<StopId>> {
        self.relays().map(|r| r.destination).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RelayObserver for JourneyLog {
    fn on_relay(&mut self, event: &RelayEvent) {
        self.events.push(TraceEvent::Relay(*event));
    }

    fn on_hello(&mut self, event: &HelloEvent) {
        self.events.push(TraceEvent::Hello(*event));
    }

    fn on_parked(&mut self, event: &ParkEvent) {
        self.events.push(TraceEvent::Parked(*event));
    }
}
