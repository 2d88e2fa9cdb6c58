// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit") - Action Handler

use rand::Rng;

use crate::simulation::GameSimulation;
use crate::types::{ActionResult, GameConfig, Side, Transaction};

/// Crit multiplier when entropy exceeds the high threshold.
pub const CRIT_MULTIPLIER: f64 = 3.0;
/// Slippage multiplier when entropy sits below the low threshold.
pub const SLIP_MULTIPLIER: f64 = 0.5;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Entropy-based multiplier policy. Returns `(multiplier, is_crit)`.
///
/// entropy > 80: chaos window, 3x critical hit.
/// entropy < 20: stagnant window, 0.5x slippage.
/// otherwise:    1x.
pub fn multiplier_for(entropy: f64, config: &GameConfig) -> (f64, bool) {
    if entropy > config.entropy_crit_threshold {
        (CRIT_MULTIPLIER, true)
    } else if entropy < config.entropy_slip_threshold {
        (SLIP_MULTIPLIER, false)
    } else {
        (NEUTRAL_MULTIPLIER, false)
    }
}

impl GameSimulation {
    /// Resolve a player pump/dump action against the current committed state.
    ///
    /// Reads entropy and price as they are at call time — there is no
    /// snapshotting between the timer ticks and a user action. Returns `None`
    /// while the round is settled (the click is dropped); wallet gating stays
    /// the caller's responsibility and is never checked here.
    pub fn apply_action_core(&mut self, side: Side) -> Option<ActionResult> {
        if self.state.status.is_settled() {
            return None;
        }

        let entropy = self.state.sonic_entropy;
        let (multiplier, is_crit) = multiplier_for(entropy, &self.config);
        let awarded_points = self.config.base_points * multiplier;

        // Push the spring, signed by side.
        self.velocity += side.sign() * self.config.base_push * multiplier;

        // Side flip is a full commitment reset, not a partial adjustment.
        match self.state.my_side {
            Some(prev) if prev != side => {
                self.state.my_contribution = 1;
                self.state.my_power = awarded_points;
            }
            _ => {
                self.state.my_contribution += 1;
                self.state.my_power += awarded_points;
            }
        }
        self.state.my_side = Some(side);

        match side {
            Side::Bull => self.state.bull_power += awarded_points,
            Side::Bear => self.state.bear_power += awarded_points,
        }

        let stake = self.config.action_cost_sol;
        self.state.jackpot += stake * self.config.jackpot_share;
        self.state.total_volume += stake;

        let tx = Transaction {
            id: self.next_tx_id(),
            side,
            user: "You".to_string(),
            amount: stake,
            tick: self.tick_count,
            latency_ms: 400 + self.price_rng.gen_range(0..20),
            entropy_value: entropy,
            is_crit,
        };
        self.push_tx(tx);

        Some(ActionResult {
            side,
            multiplier,
            is_crit,
            awarded_points,
            applied_power: awarded_points,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoundStatus;

    fn sim() -> GameSimulation {
        GameSimulation::with_seed(42)
    }

    #[test]
    fn test_multiplier_table() {
        let config = GameConfig::default();
        assert_eq!(multiplier_for(90.0, &config), (3.0, true));
        assert_eq!(multiplier_for(10.0, &config), (0.5, false));
        assert_eq!(multiplier_for(50.0, &config), (1.0, false));
        // Thresholds are exclusive on both ends.
        assert_eq!(multiplier_for(80.0, &config), (1.0, false));
        assert_eq!(multiplier_for(20.0, &config), (1.0, false));
    }

    #[test]
    fn test_crit_awards_triple_points() {
        let mut sim = sim();
        sim.set_entropy(90.0);
        let result = sim.apply_action_core(Side::Bull).expect("test: live round");
        assert_eq!(result.multiplier, 3.0);
        assert!(result.is_crit);
        assert_eq!(result.awarded_points, 300.0);
    }

    #[test]
    fn test_slippage_halves_points() {
        let mut sim = sim();
        sim.set_entropy(10.0);
        let result = sim.apply_action_core(Side::Bear).expect("test: live round");
        assert_eq!(result.multiplier, 0.5);
        assert!(!result.is_crit);
        assert_eq!(result.awarded_points, 50.0);
    }

    #[test]
    fn test_action_accumulates_commitment() {
        let mut sim = sim();
        sim.set_entropy(50.0);
        sim.apply_action_core(Side::Bull);
        sim.apply_action_core(Side::Bull);
        let state = sim.state();
        assert_eq!(state.my_contribution, 2);
        assert_eq!(state.my_power, 200.0);
        assert_eq!(state.my_side, Some(Side::Bull));
    }

    #[test]
    fn test_side_flip_resets_commitment() {
        let mut sim = sim();
        sim.set_entropy(50.0);
        sim.apply_action_core(Side::Bull);
        sim.apply_action_core(Side::Bull);
        sim.set_entropy(90.0);
        let result = sim.apply_action_core(Side::Bear).expect("test: live round");
        let state = sim.state();
        assert_eq!(state.my_contribution, 1);
        assert_eq!(state.my_power, result.applied_power);
        assert_eq!(state.my_power, 300.0); // Q, not P + Q
        assert_eq!(state.my_side, Some(Side::Bear));
    }

    #[test]
    fn test_action_pushes_velocity_by_side() {
        let mut sim = sim();
        sim.set_entropy(50.0);
        let before = sim.velocity();
        sim.apply_action_core(Side::Bull);
        assert!((sim.velocity() - before - 0.15).abs() < f64::EPSILON);
        sim.apply_action_core(Side::Bear);
        assert!((sim.velocity() - before).abs() < f64::EPSILON);
    }

    #[test]
    fn test_action_accrues_jackpot_share() {
        let mut sim = sim();
        sim.set_entropy(50.0);
        let pot_before = sim.state().jackpot;
        let volume_before = sim.state().total_volume;
        sim.apply_action_core(Side::Bull);
        let state = sim.state();
        assert!((state.jackpot - pot_before - 0.007).abs() < 1e-12);
        assert!((state.total_volume - volume_before - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_action_records_own_transaction() {
        let mut sim = sim();
        sim.set_entropy(90.0);
        sim.apply_action_core(Side::Bull);
        let tx = &sim.state().recent_tx[0];
        assert_eq!(tx.user, "You");
        assert_eq!(tx.side, Side::Bull);
        assert!(tx.is_crit);
        assert!((380..=480).contains(&tx.latency_ms));
    }

    #[test]
    fn test_action_ignored_while_settled() {
        let mut sim = sim();
        sim.force_status(RoundStatus::Settled);
        assert!(sim.apply_action_core(Side::Bull).is_none());
        assert_eq!(sim.state().my_contribution, 0);
    }
}
