//! `ma-core` — foundational types for the `rust_ma` mobile agent framework.
//!
//! This crate is a dependency of every other `ma-*` crate.  It intentionally
//! has no `ma-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StopId`                                   |
//! | [`mode`]        | `Task` trait, `Mode<T>` sum type                      |
//! | [`movement`]    | `MovementType` enum                                   |
//! | [`config`]      | `RelayConfig`, `MockDelaySpec`, `ViolationPolicy`     |
//! | [`delay`]       | `MockDelay`, `MockDelayable`                          |
//! | [`error`]       | `InvariantViolation`, `RelayError`, `RelayResult`     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                                 |
//! |---------|------------------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on value types; needed to load `RelayConfig` |

pub mod config;
pub mod delay;
pub mod error;
pub mod ids;
pub mod mode;
pub mod movement;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MAX_MOCK_DELAY_MS, MockDelaySpec, RelayConfig, ViolationPolicy};
pub use delay::{MockDelay, MockDelayable};
pub use error::{InvariantViolation, RelayError, RelayResult};
pub use ids::{AgentId, StopId};
pub use mode::{Mode, Task};
pub use movement::MovementType;
