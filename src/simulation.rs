// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit") - Simulation Core

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::actions;
use crate::entropy::{EntropyTrend, EntropyWalk};
use crate::settlement;
use crate::traffic::TrafficGenerator;
use crate::types::*;

// ─── Pacing ──────────────────────────────────────────────────────────────────

/// One engine tick covers 100 ms of game time.
pub const TICK_STEP_SECS: f64 = 0.1;
/// The entropy walk advances every second tick (200 ms cadence).
const ENTROPY_TICK_DIVISOR: u64 = 2;

// ─── Price physics ───────────────────────────────────────────────────────────

const SPRING_CONSTANT: f64 = 0.05;
const DAMPING_FACTOR: f64 = 0.9;
const VELOCITY_DEADZONE: f64 = 0.05;
const INTEGRATION_STEP: f64 = 0.1;
const PRICE_NOISE: f64 = 0.01;
const ORACLE_DRIFT: f64 = 0.02;

/// Reference SOL/USD price used until the host pushes a fetched one.
const DEFAULT_ORACLE_PRICE: f64 = 142.0;

/// Competitor stakes land with a fraction of a player click's team power.
const BOT_POWER_SCALE: f64 = 0.2;

/// Cosmetic session seeds.
const INITIAL_JACKPOT: f64 = 2.4;
const INITIAL_VOLUME: f64 = 845.2;
const INITIAL_PLAYERS: u32 = 142;

// ─── GameSimulation struct ───────────────────────────────────────────────────

#[wasm_bindgen]
pub struct GameSimulation {
    pub(crate) state: GameState,
    pub(crate) config: GameConfig,
    /// Spring velocity of the simulated price; actions push it directly.
    pub(crate) velocity: f64,
    pub(crate) entropy: EntropyWalk,
    pub(crate) traffic: TrafficGenerator,
    pub(crate) price_rng: ChaCha8Rng,
    pub(crate) tick_count: u64,
    pub(crate) tx_id_counter: u64,
    pub(crate) seed: u64,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl GameSimulation {
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    /// Build a session from a config and a single seed. The three RNG
    /// concerns (price noise, entropy, traffic) get derived streams so one
    /// seed reproduces the full trajectory.
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let state = GameState {
            current_price: DEFAULT_ORACLE_PRICE,
            oracle_price: DEFAULT_ORACLE_PRICE,
            bull_power: config.baseline_team_power,
            bear_power: config.baseline_team_power,
            time_left: config.round_duration_secs,
            round_id: 1,
            status: RoundStatus::Active,
            jackpot: INITIAL_JACKPOT,
            total_volume: INITIAL_VOLUME,
            lifetime_earnings: 0.0,
            my_contribution: 0,
            my_power: 0.0,
            my_side: None,
            sonic_entropy: 50.0,
            recent_tx: Vec::new(),
            active_players: INITIAL_PLAYERS,
            total_clicks: 0,
        };
        Self {
            state,
            config,
            velocity: 0.0,
            entropy: EntropyWalk::new(seed.wrapping_add(1)),
            traffic: TrafficGenerator::new(seed.wrapping_add(2)),
            price_rng: ChaCha8Rng::seed_from_u64(seed),
            tick_count: 0,
            tx_id_counter: 0,
            seed,
        }
    }

    /// Advance the session by one 100 ms tick.
    ///
    /// Pure in-memory arithmetic: this never fails and never panics, since
    /// the presentation layer's responsiveness rides on it.
    pub fn tick_core(&mut self) -> TickResult {
        self.tick_count += 1;

        if self.tick_count % ENTROPY_TICK_DIVISOR == 0 {
            self.state.sonic_entropy = self.entropy.step();
        }

        if self.state.status.is_live() {
            self.step_price();
            self.inject_traffic();
        }

        let settlement = self.advance_round();
        TickResult {
            state: self.state.clone(),
            settlement,
        }
    }

    /// Damped-spring pull of the simulated price toward the oracle, plus the
    /// oracle's own reference drift.
    fn step_price(&mut self) {
        let distance = self.state.oracle_price - self.state.current_price;
        let force = distance * SPRING_CONSTANT;

        self.velocity *= DAMPING_FACTOR;
        if self.velocity.abs() < VELOCITY_DEADZONE {
            self.velocity += self.price_rng.gen_range(-PRICE_NOISE..=PRICE_NOISE);
        }
        self.velocity += force * INTEGRATION_STEP;

        let noise = self.price_rng.gen_range(-PRICE_NOISE..=PRICE_NOISE);
        self.state.current_price =
            (self.state.current_price + self.velocity + noise).max(0.01);
        self.state.oracle_price = (self.state.oracle_price
            + self.price_rng.gen_range(-ORACLE_DRIFT..=ORACLE_DRIFT))
        .max(0.01);
    }

    /// Land this tick's ambient competitor batch in the authoritative state.
    fn inject_traffic(&mut self) {
        let activity = self.traffic.generate_tick(
            self.state.sonic_entropy,
            self.tick_count,
            &self.config,
            &mut self.tx_id_counter,
        );

        for tx in activity.transactions {
            let (multiplier, _) = actions::multiplier_for(tx.entropy_value, &self.config);
            let power = self.config.base_points * multiplier * BOT_POWER_SCALE;
            match tx.side {
                Side::Bull => self.state.bull_power += power,
                Side::Bear => self.state.bear_power += power,
            }
            self.state.jackpot += tx.amount * self.config.jackpot_share;
            self.state.total_volume += tx.amount;
            self.push_tx(tx);
        }

        if activity.player_drift != 0 {
            let next = self.state.active_players as i64 + activity.player_drift as i64;
            self.state.active_players = next.max(self.config.min_active_players as i64) as u32;
        }
    }

    /// Countdown and round state machine. The settle transition fires its
    /// handler exactly once; the reset snap-back to full duration makes a
    /// second reset on the following tick impossible.
    fn advance_round(&mut self) -> Option<RoundSettlement> {
        let floor = -self.config.cooldown_secs;
        self.state.time_left = (self.state.time_left - TICK_STEP_SECS).max(floor);

        match self.state.status {
            RoundStatus::Settled => {
                if self.state.time_left <= floor + 1e-9 {
                    self.reset_round();
                }
                None
            }
            _ if self.state.time_left <= 0.0 => {
                self.state.status = RoundStatus::Settled;
                Some(self.settle_round())
            }
            _ if self.state.time_left <= self.config.overdrive_threshold_secs => {
                self.state.status = RoundStatus::Overdrive;
                None
            }
            _ => None,
        }
    }

    /// Runs on the single transition into `Settled`. A losing or absent
    /// player, an empty pot, or a zero-power team all degrade to no payout.
    fn settle_round(&mut self) -> RoundSettlement {
        let winning_side = self.state.winning_side();
        let player_won = self.state.my_side == Some(winning_side);
        let mut payout = 0.0;

        if player_won {
            let team_power = match winning_side {
                Side::Bull => self.state.bull_power,
                Side::Bear => self.state.bear_power,
            };
            if let Ok(share) =
                settlement::split_pot(self.state.jackpot, self.state.my_power, team_power)
            {
                payout = share.amount;
                self.state.lifetime_earnings += payout;
                self.state.jackpot -= payout;
            }
        }

        RoundSettlement {
            round_id: self.state.round_id,
            winning_side,
            player_won,
            payout,
        }
    }

    fn reset_round(&mut self) {
        self.state.round_id += 1;
        self.state.status = RoundStatus::Active;
        self.state.time_left = self.config.round_duration_secs;
        self.state.my_power = 0.0;
        self.state.my_contribution = 0;
        self.state.my_side = None;
        self.state.total_clicks = 0;
        self.state.bull_power = self.config.baseline_team_power;
        self.state.bear_power = self.config.baseline_team_power;
        self.state.jackpot *= self.config.jackpot_retention;
        self.state.recent_tx.clear();
        self.velocity = 0.0;
    }

    /// Prepend to the feed, newest-first, evicting past the cap.
    pub(crate) fn push_tx(&mut self, tx: Transaction) {
        self.state.recent_tx.insert(0, tx);
        self.state.recent_tx.truncate(self.config.recent_tx_cap);
        self.state.total_clicks += 1;
    }

    pub(crate) fn next_tx_id(&mut self) -> u64 {
        let id = self.tx_id_counter;
        self.tx_id_counter += 1;
        id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn entropy_trend(&self) -> EntropyTrend {
        self.entropy.trend()
    }

    pub(crate) fn force_status(&mut self, status: RoundStatus) {
        self.state.status = status;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
