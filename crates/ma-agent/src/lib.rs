//! `ma-agent` — mobile agents, itineraries, and the stops they relay between.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`stop`]      | `MobileAgentStop` capability, `Traveler` (agent as seen by stops) |
//! | [`registry`]  | `StopRegistry` — owns stops, hands out `StopId` handles           |
//! | [`relay`]     | `Relay<'a>` — per-journey context (stops, observer, policy)       |
//! | [`observer`]  | `RelayObserver` trait, trace events, `JourneyLog`, `TracingObserver` |
//! | [`itinerary`] | `Itinerary<T>` — next stop / mode / movement planning             |
//! | [`behavior`]  | `AgentBehavior` trait, `StopContext<'v, T>`                       |
//! | [`agent`]     | `MobileAgent<B>` — `activate_at_stop` / `hello` / `goodbye`       |
//!
//! # Journey model
//!
//! ```text
//! unset ─▶ activating ─▶ task₁ ─▶ task₂ ─▶ … ─▶ finished | failed ─▶ parked
//! ```
//!
//! Transitions are chosen by the [`AgentBehavior`] at each stop through the
//! itinerary (`set_next_stop`, `revisit`, `finished_with_mode`).  The relay is
//! single-threaded and synchronous: one agent is owned by one thread at a
//! time (`&mut`), while stops are shared (`&self`) and may be visited by many
//! agents in turn.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ma_agent::{JourneyLog, MobileAgent, Relay, StopRegistry};
//! use ma_core::AgentId;
//!
//! let mut stops = StopRegistry::new();
//! let x = stops.register(Desk::default());
//! let z = stops.register(Outbox::default());
//!
//! let mut log = JourneyLog::new();
//! let mut relay = Relay::new(&stops, &mut log);
//! let mut agent = MobileAgent::new(AgentId(0), Paperwork::new(z));
//! agent.activate_at_stop(x, Some(z), &mut relay)?;
//! ```

pub mod agent;
pub mod behavior;
pub mod itinerary;
pub mod observer;
pub mod registry;
pub mod relay;
pub mod stop;


pub use agent::MobileAgent;
pub use behavior::{AgentBehavior, StopContext};
pub use itinerary::Itinerary;
pub use observer::{
    HelloEvent, JourneyLog, NoopObserver, ParkEvent, RelayEvent, RelayObserver, TraceEvent,
    TracingObserver,
};
pub use registry::StopRegistry;
pub use relay::Relay;
pub use stop::{MobileAgentStop, Traveler};
