// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit") - Ambient Traffic Generator
//
// Synthesizes competitor transactions so the feed reads as a busy network.
// Deliberately decoupled from the round state machine: the generator consumes
// the entropy signal and emits a batch; the simulation decides how the batch
// lands in the authoritative state.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actions::multiplier_for;
use crate::types::{GameConfig, Side, Transaction};

/// Spawn-count CDF per tick: 55% none, 35% one, 10% two.
const SPAWN_CDF: [f64; 2] = [0.55, 0.90];

/// Observed latency band for synthetic competitors, in milliseconds.
const LATENCY_MIN_MS: u32 = 380;
const LATENCY_MAX_MS: u32 = 480;

/// Competitors read the oracle slightly out of phase with the player.
const ENTROPY_JITTER: f64 = 15.0;

/// Base58 alphabet used for fake wallet handles.
const HANDLE_CHARS: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// ---------------------------------------------------------------------------
// AmbientActivity
// ---------------------------------------------------------------------------

/// One tick's worth of synthetic network noise.
#[derive(Debug, Clone, Default)]
pub struct AmbientActivity {
    pub transactions: Vec<Transaction>,
    /// Cosmetic active-player drift; the simulation floors the result.
    pub player_drift: i32,
}

// ---------------------------------------------------------------------------
// TrafficGenerator
// ---------------------------------------------------------------------------

pub struct TrafficGenerator {
    rng: ChaCha8Rng,
    pub spawn_count: u64,
}

impl TrafficGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawn_count: 0,
        }
    }

    /// Generate 0-2 competitor transactions for this tick.
    ///
    /// Each competitor samples the shared entropy signal with jitter and gets
    /// the same crit/slip treatment as a player action, so high-entropy
    /// windows visibly light up the feed. `next_id` is the simulation's
    /// shared transaction id counter.
    pub fn generate_tick(
        &mut self,
        entropy: f64,
        tick: u64,
        config: &GameConfig,
        next_id: &mut u64,
    ) -> AmbientActivity {
        let roll: f64 = self.rng.gen();
        let count = if roll < SPAWN_CDF[0] {
            0
        } else if roll < SPAWN_CDF[1] {
            1
        } else {
            2
        };

        if count == 0 {
            return AmbientActivity::default();
        }

        let mut transactions = Vec::with_capacity(count);
        for _ in 0..count {
            let jitter = self.rng.gen_range(-ENTROPY_JITTER..=ENTROPY_JITTER);
            let entropy_value = (entropy + jitter).clamp(0.0, 100.0);
            let (multiplier, is_crit) = multiplier_for(entropy_value, config);

            let side = if self.rng.gen::<bool>() { Side::Bull } else { Side::Bear };
            let id = *next_id;
            *next_id += 1;

            transactions.push(Transaction {
                id,
                side,
                user: self.random_handle(),
                amount: config.action_cost_sol * multiplier,
                tick,
                latency_ms: self.rng.gen_range(LATENCY_MIN_MS..=LATENCY_MAX_MS),
                entropy_value,
                is_crit,
            });
            self.spawn_count += 1;
        }

        let player_drift = if self.rng.gen::<bool>() { 1 } else { -1 };
        AmbientActivity {
            transactions,
            player_drift,
        }
    }

    fn random_handle(&mut self) -> String {
        let a = HANDLE_CHARS[self.rng.gen_range(0..HANDLE_CHARS.len())] as char;
        let b = HANDLE_CHARS[self.rng.gen_range(0..HANDLE_CHARS.len())] as char;
        format!("User-{}...{}", a, b)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(seed: u64, entropy: f64, ticks: u64) -> Vec<Transaction> {
        let config = GameConfig::default();
        let mut gen = TrafficGenerator::new(seed);
        let mut next_id = 0u64;
        let mut out = Vec::new();
        for tick in 0..ticks {
            out.extend(gen.generate_tick(entropy, tick, &config, &mut next_id).transactions);
        }
        out
    }

    #[test]
    fn test_at_most_two_per_tick() {
        let config = GameConfig::default();
        let mut gen = TrafficGenerator::new(42);
        let mut next_id = 0u64;
        for tick in 0..5_000 {
            let batch = gen.generate_tick(50.0, tick, &config, &mut next_id);
            assert!(batch.transactions.len() <= 2);
        }
    }

    #[test]
    fn test_spawn_rate_matches_cdf() {
        let config = GameConfig::default();
        let mut gen = TrafficGenerator::new(42);
        let mut next_id = 0u64;
        let n = 20_000;
        let mut empty_ticks = 0;
        for tick in 0..n {
            if gen.generate_tick(50.0, tick, &config, &mut next_id).transactions.is_empty() {
                empty_ticks += 1;
            }
        }
        let empty_rate = empty_ticks as f64 / n as f64;
        assert!((empty_rate - 0.55).abs() < 0.02, "empty-tick rate {:.3} far from 0.55", empty_rate);
    }

    #[test]
    fn test_latency_band() {
        for tx in run_ticks(7, 50.0, 2_000) {
            assert!((LATENCY_MIN_MS..=LATENCY_MAX_MS).contains(&tx.latency_ms));
        }
    }

    #[test]
    fn test_entropy_samples_clamped() {
        for tx in run_ticks(7, 95.0, 2_000) {
            assert!((0.0..=100.0).contains(&tx.entropy_value));
        }
    }

    #[test]
    fn test_saturated_entropy_always_crits() {
        let txs = run_ticks(9, 100.0, 2_000);
        assert!(!txs.is_empty());
        for tx in &txs {
            assert!(tx.is_crit, "entropy 100 with ±15 jitter stays above the crit threshold");
            assert!((tx.amount - 0.03).abs() < 1e-12);
        }
    }

    #[test]
    fn test_floored_entropy_always_slips() {
        let txs = run_ticks(9, 0.0, 2_000);
        assert!(!txs.is_empty());
        for tx in &txs {
            assert!(!tx.is_crit);
            assert!((tx.amount - 0.005).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ids_are_sequential_from_shared_counter() {
        let config = GameConfig::default();
        let mut gen = TrafficGenerator::new(3);
        let mut next_id = 100u64;
        let mut seen = Vec::new();
        for tick in 0..200 {
            for tx in gen.generate_tick(50.0, tick, &config, &mut next_id).transactions {
                seen.push(tx.id);
            }
        }
        for pair in seen.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
        assert_eq!(next_id, 100 + seen.len() as u64);
    }

    #[test]
    fn test_deterministic_by_seed() {
        let a = run_ticks(1234, 60.0, 500);
        let b = run_ticks(1234, 60.0, 500);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.user, y.user);
            assert_eq!(x.latency_ms, y.latency_ms);
            assert_eq!(x.side, y.side);
        }
    }
}
