//! Deterministic mock delays for relay timing tests.
//!
//! # Determinism strategy
//!
//! Each delay owns its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space, so
//! agents never share jitter sequences and a rerun with the same seed sleeps
//! for exactly the same durations.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, MockDelaySpec};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── MockDelay ─────────────────────────────────────────────────────────────────

/// A seeded source of blocking delays.
///
/// Not `Sync`-shared: each agent and itinerary holds its own instance.
#[derive(Clone, Debug)]
pub struct MockDelay {
    spec: MockDelaySpec,
    rng:  SmallRng,
}

impl MockDelay {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(spec: MockDelaySpec, global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        Self { spec, rng: SmallRng::seed_from_u64(seed) }
    }

    /// A jitter-free delay of `duration` (rounded down to whole milliseconds).
    pub fn fixed(duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self::new(MockDelaySpec::fixed(ms), 0, AgentId(0))
    }

    pub fn spec(&self) -> MockDelaySpec {
        self.spec
    }

    /// Draw the next delay: `base_ms + uniform(0..=jitter_ms)`.
    pub fn sample(&mut self) -> Duration {
        let jitter = if self.spec.jitter_ms == 0 {
            0
        } else {
            self.rng.gen_range(0..=self.spec.jitter_ms)
        };
        Duration::from_millis(self.spec.base_ms.saturating_add(jitter))
    }
}

// ── MockDelayable ─────────────────────────────────────────────────────────────

/// A component that can simulate latency by blocking the calling thread.
///
/// The relay is synchronous, so the sleep delays every later step of the
/// journey without introducing any concurrency.
pub trait MockDelayable {
    /// The delay to apply now, or `None` to continue immediately.
    fn mock_delay(&mut self) -> Option<Duration>;

    /// Sleep for [`mock_delay`][Self::mock_delay], if any.
    fn inject_mock_delay(&mut self) {
        if let Some(delay) = self.mock_delay() {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    }
}

impl MockDelayable for Option<MockDelay> {
    fn mock_delay(&mut self) -> Option<Duration> {
        self.as_mut().map(MockDelay::sample)
    }
}
