// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit") - Sonic Entropy Walk

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const ENTROPY_MIN: f64 = 0.0;
const ENTROPY_MAX: f64 = 100.0;
const ENTROPY_MIDPOINT: f64 = 50.0;
/// Maximum absolute delta per 200 ms step.
const STEP_RANGE: f64 = 10.0;
/// Distance from the midpoint beyond which the trend reads volatile.
const STABLE_BAND: f64 = 30.0;

// ---------------------------------------------------------------------------
// Trend classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntropyTrend {
    Stable,
    Volatile,
}

// ---------------------------------------------------------------------------
// EntropyWalk
// ---------------------------------------------------------------------------

/// Independent bounded random walk driving the luck multiplier. No coupling
/// back from game state: the walk only ever reads its own RNG stream.
#[derive(Debug, Clone)]
pub struct EntropyWalk {
    rng: ChaCha8Rng,
    value: f64,
}

impl EntropyWalk {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            value: ENTROPY_MIDPOINT,
        }
    }

    /// Advance one step: add uniform(-10, +10), clamp to [0, 100].
    /// Returns the new value.
    pub fn step(&mut self) -> f64 {
        let noise = self.rng.gen_range(-STEP_RANGE..=STEP_RANGE);
        self.value = (self.value + noise).clamp(ENTROPY_MIN, ENTROPY_MAX);
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Force the walk to a value. Scenario/test knob.
    pub fn set(&mut self, value: f64) {
        self.value = value.clamp(ENTROPY_MIN, ENTROPY_MAX);
    }

    pub fn trend(&self) -> EntropyTrend {
        if (self.value - ENTROPY_MIDPOINT).abs() <= STABLE_BAND {
            EntropyTrend::Stable
        } else {
            EntropyTrend::Volatile
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
