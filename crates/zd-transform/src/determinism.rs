// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Deterministic sampling configuration.
//!
//! Monte Carlo integration is the only stochastic operation in this
//! workspace.  Callers that need reproducible draws either pass their own
//! RNG or enable the environment switch below, which derives stable
//! per-label seeds from a base seed.

use rand::{rngs::StdRng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Snapshot of the deterministic sampling configuration.
#[derive(Clone, Debug)]
pub struct DeterminismConfig {
    /// Whether deterministic sampling is enabled globally.
    pub enabled: bool,
    /// Base seed used to derive per-label seeds.
    pub base_seed: u64,
}

impl DeterminismConfig {
    fn from_env() -> Self {
        let enabled = std::env::var("ZD_DETERMINISTIC")
            .ok()
            .map(|v| !matches!(v.as_str(), "0" | "false" | "False" | "off" | "OFF"))
            .unwrap_or(false);

        let base_seed = std::env::var("ZD_DETERMINISTIC_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(42);

        Self { enabled, base_seed }
    }

    /// Derives a deterministic seed for a given component label.
    pub fn seed_for<L: Hash>(&self, label: L) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.base_seed.hash(&mut hasher);
        label.hash(&mut hasher);
        hasher.finish()
    }
}

static CONFIG: OnceLock<DeterminismConfig> = OnceLock::new();

/// Returns the lazily initialised deterministic configuration.
pub fn config() -> &'static DeterminismConfig {
    CONFIG.get_or_init(DeterminismConfig::from_env)
}

/// Returns a RNG derived from the provided label.  When determinism is
/// disabled this falls back to a random seed from the operating system.
pub fn rng_from_label(label: &str) -> StdRng {
    let cfg = config();
    if cfg.enabled {
        StdRng::seed_from_u64(cfg.seed_for(label))
    } else {
        StdRng::from_entropy()
    }
}

/// Returns a RNG seeded from an optional explicit seed, respecting the
/// deterministic override when the seed is not provided.
pub fn rng_from_optional(seed: Option<u64>, label: &str) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => rng_from_label(label),
    }
}
