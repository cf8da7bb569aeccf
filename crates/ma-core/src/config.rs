//! Relay configuration.
//!
//! # Design
//!
//! A journey has exactly two tunables: what happens when a relay invariant
//! breaks, and whether relays are slowed down by mock delays.  Delays are
//! expressed in whole milliseconds so a `RelayConfig` reads naturally from
//! JSON or TOML; the jitter is drawn from a seeded RNG so two runs with the
//! same seed sleep for the same durations.

use std::time::Duration;

use crate::{AgentId, MockDelay, RelayError, RelayResult};

/// Upper bound for any configured mock delay (`base_ms + jitter_ms`).
///
/// Mock delays simulate latency in tests; anything longer than this is
/// almost certainly a unit mistake (seconds written as milliseconds).
pub const MAX_MOCK_DELAY_MS: u64 = 10_000;

// ── ViolationPolicy ───────────────────────────────────────────────────────────

/// What a relay does when it detects an [`InvariantViolation`][crate::InvariantViolation].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViolationPolicy {
    /// Panic.  Under the workspace release profile (`panic = "abort"`) this
    /// terminates the process.
    #[default]
    Panic,
    /// Return `Err(RelayError::Invariant(..))` up the relay chain so a test
    /// harness can inspect it.
    Propagate,
}

// ── MockDelaySpec ─────────────────────────────────────────────────────────────

/// A blocking delay of `base_ms` plus a uniform `0..=jitter_ms` extra.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MockDelaySpec {
    pub base_ms: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub jitter_ms: u64,
}

impl MockDelaySpec {
    /// A delay of exactly `ms` milliseconds.
    pub fn fixed(ms: u64) -> Self {
        Self { base_ms: ms, jitter_ms: 0 }
    }

    /// Longest delay this spec can produce.
    #[inline]
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.base_ms.saturating_add(self.jitter_ms))
    }
}

// ── RelayConfig ───────────────────────────────────────────────────────────────

/// Top-level relay configuration.
///
/// Typically built in code by tests or loaded from a JSON/TOML file by the
/// application crate (enable the `serde` feature).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelayConfig {
    /// Master seed for mock-delay jitter.
    pub seed: u64,

    /// What to do on an invariant violation.  Default: panic.
    pub violation_policy: ViolationPolicy,

    /// Delay applied by an agent before executing work at a stop.
    pub hello_delay: Option<MockDelaySpec>,

    /// Delay applied by an itinerary before each relay.
    pub relay_delay: Option<MockDelaySpec>,
}

impl RelayConfig {
    /// Check every configured delay against [`MAX_MOCK_DELAY_MS`].
    pub fn validate(&self) -> RelayResult<()> {
        for (what, spec) in [("hello_delay", self.hello_delay), ("relay_delay", self.relay_delay)] {
            let Some(spec) = spec else { continue };
            let max_ms = spec.base_ms.saturating_add(spec.jitter_ms);
            if max_ms > MAX_MOCK_DELAY_MS {
                return Err(RelayError::Config(format!(
                    "{what} of up to {max_ms} ms exceeds the {MAX_MOCK_DELAY_MS} ms limit"
                )));
            }
        }
        Ok(())
    }

    /// Build the hello delay for `agent`, if one is configured.
    pub fn make_hello_delay(&self, agent: AgentId) -> Option<MockDelay> {
        self.hello_delay.map(|spec| MockDelay::new(spec, self.seed, agent))
    }

    /// Build the relay delay for `agent`'s itinerary, if one is configured.
    ///
    /// Seeded differently from the hello delay so the two sequences are
    /// independent.
    pub fn make_relay_delay(&self, agent: AgentId) -> Option<MockDelay> {
        self.relay_delay
            .map(|spec| MockDelay::new(spec, self.seed.rotate_left(32), agent))
    }
}
