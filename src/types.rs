// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit") - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Side ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bull,
    Bear,
}

impl Side {
    /// Direction applied to the price spring: bulls push up, bears push down.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Bull => 1.0,
            Self::Bear => -1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Bull => Self::Bear,
            Self::Bear => Self::Bull,
        }
    }

    /// Parse the action names used by the presentation layer.
    /// Unknown inputs yield `None`; the caller drops the action silently.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "bull" | "pump" => Some(Self::Bull),
            "bear" | "dump" => Some(Self::Bear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
        }
    }
}

// ─── Round Status ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Active = 0,
    /// Late-round urgency phase. Display-only: no distinct mechanics.
    Overdrive = 1,
    /// Terminal per round. Cleared by the cooldown reset.
    Settled = 2,
}

impl RoundStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }
    /// Live rounds accept actions and ambient traffic.
    pub fn is_live(&self) -> bool {
        !self.is_settled()
    }
}

// ─── Transaction ─────────────────────────────────────────────────────────────

/// A single entry in the live feed. Immutable after creation; created by both
/// player actions and the ambient traffic generator, purely for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub side: Side,
    pub user: String,
    /// Stake in SOL.
    pub amount: f64,
    /// Engine tick at which the transaction was recorded.
    pub tick: u64,
    pub latency_ms: u32,
    /// Entropy reading the stake was evaluated against.
    pub entropy_value: f64,
    pub is_crit: bool,
}

// ─── GameConfig ──────────────────────────────────────────────────────────────

/// Compiled-in game constants, promoted to a config record so scenarios and
/// tests can vary them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub round_duration_secs: f64,
    pub overdrive_threshold_secs: f64,
    /// How long `time_left` may sit below zero before the round resets.
    pub cooldown_secs: f64,
    pub base_points: f64,
    /// Velocity impulse per action before the multiplier is applied.
    pub base_push: f64,
    pub entropy_crit_threshold: f64,
    pub entropy_slip_threshold: f64,
    /// Cost of one action in SOL.
    pub action_cost_sol: f64,
    /// Fraction of every stake that accrues to the round jackpot.
    pub jackpot_share: f64,
    /// Fraction of the jackpot carried into the next round.
    pub jackpot_retention: f64,
    pub recent_tx_cap: usize,
    /// Team power reseeded to each side on round reset.
    pub baseline_team_power: f64,
    pub min_active_players: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: 30.0,
            overdrive_threshold_secs: 5.0,
            cooldown_secs: 3.0,
            base_points: 100.0,
            base_push: 0.15,
            entropy_crit_threshold: 80.0,
            entropy_slip_threshold: 20.0,
            action_cost_sol: 0.01,
            jackpot_share: 0.7,
            jackpot_retention: 0.5,
            recent_tx_cap: 8,
            baseline_team_power: 50.0,
            min_active_players: 50,
        }
    }
}

// ─── GameState ───────────────────────────────────────────────────────────────

/// Full presentation snapshot. One instance per session, mutated in place by
/// every tick and every action; the spring velocity lives on the simulation,
/// not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub current_price: f64,
    pub oracle_price: f64,
    pub bull_power: f64,
    pub bear_power: f64,
    /// Seconds; may run below zero down to the cooldown floor.
    pub time_left: f64,
    pub round_id: u64,
    pub status: RoundStatus,
    pub jackpot: f64,
    pub total_volume: f64,
    pub lifetime_earnings: f64,
    /// Player clicks committed this round. Reset to 1 on side flip.
    pub my_contribution: u32,
    pub my_power: f64,
    pub my_side: Option<Side>,
    /// Bounded [0, 100] luck signal.
    pub sonic_entropy: f64,
    /// Newest-first, capped at `recent_tx_cap`.
    pub recent_tx: Vec<Transaction>,
    pub active_players: u32,
    pub total_clicks: u64,
}

impl GameState {
    /// Derived, never stored: bulls win ties.
    pub fn winning_side(&self) -> Side {
        if self.current_price >= self.oracle_price {
            Side::Bull
        } else {
            Side::Bear
        }
    }

    /// Pro-rata jackpot share if the player's side won at this instant.
    /// Zero for spectators and for players currently on the losing side.
    pub fn potential_win(&self) -> f64 {
        let winning = self.winning_side();
        if self.my_side != Some(winning) || self.my_power <= 0.0 {
            return 0.0;
        }
        let team = match winning {
            Side::Bull => self.bull_power,
            Side::Bear => self.bear_power,
        };
        if team <= 0.0 {
            return 0.0;
        }
        self.jackpot * (self.my_power / team).min(1.0)
    }
}

// ─── ActionResult ────────────────────────────────────────────────────────────

/// Immediate outcome returned to the caller for transient UI feedback
/// (crit flash, popup text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub side: Side,
    pub multiplier: f64,
    pub is_crit: bool,
    pub awarded_points: f64,
    pub applied_power: f64,
}

// ─── RoundSettlement ─────────────────────────────────────────────────────────

/// Emitted exactly once per round, on the transition into `Settled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSettlement {
    pub round_id: u64,
    pub winning_side: Side,
    pub player_won: bool,
    /// SOL credited to `lifetime_earnings`. Zero unless the player committed
    /// to the winning side.
    pub payout: f64,
}

// ─── TickResult ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    pub state: GameState,
    pub settlement: Option<RoundSettlement>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
