//! Owning storage for stops, addressed by [`StopId`].
//!
//! # Design
//!
//! Itineraries never hold stops; they hold `StopId`s, plain indices into this
//! registry.  The registry alone decides how long a stop lives, so an agent
//! being dropped (or parked forever) has no effect on any stop it visited.
//! Lookups of an unknown id return `None`, which the relay reports as
//! `InvariantViolation::UnregisteredStop`.

use ma_core::StopId;

use crate::MobileAgentStop;

/// Registry of stops, one `Box<dyn MobileAgentStop>` per [`StopId`].
///
/// Ids are assigned densely in registration order starting from 0.
///
/// # Usage
///
/// ```rust,ignore
/// let mut stops = StopRegistry::new();
/// let store = stops.register(GoatStore::default());
/// let view  = stops.register(GoatListView::default());
///
/// let goats = stops.get_as::<GoatStore>(store).unwrap();
/// ```
#[derive(Default)]
pub struct StopRegistry {
    stops: Vec<Box<dyn MobileAgentStop>>,
}

impl StopRegistry {
    pub fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Take ownership of `stop` and return its handle.
    pub fn register<S: MobileAgentStop>(&mut self, stop: S) -> StopId {
        self.register_boxed(Box::new(stop))
    }

    /// Like [`register`][Self::register] for an already boxed stop.
    pub fn register_boxed(&mut self, stop: Box<dyn MobileAgentStop>) -> StopId {
        let id = StopId(self.stops.len() as u32);
        self.stops.push(stop);
        id
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// The stop behind `id`, or `None` if `id` was never handed out.
    pub fn get(&self, id: StopId) -> Option<&dyn MobileAgentStop> {
        self.stops.get(id.index()).map(|s| s.as_ref())
    }

    /// The stop behind `id` downcast to its concrete type.
    ///
    /// Returns `None` if `id` is unknown or the stop is not an `S`.
    pub fn get_as<S: MobileAgentStop>(&self, id: StopId) -> Option<&S> {
        self.get(id)?.as_any().downcast_ref::<S>()
    }

    /// Diagnostics type code of the stop behind `id`.
    pub fn diagnostics_code(&self, id: StopId) -> Option<u32> {
        self.get(id).map(|s| s.diagnostics_type_code())
    }

    /// Iterate over every registered id in registration order.
    pub fn ids(&self) -> impl Iterator<Item = StopId> + '_ {
        (0..self.stops.len()).map(|i| StopId(i as u32))
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
