// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit")

pub mod types;
pub mod simulation;
pub mod entropy;
pub mod actions;
pub mod traffic;
pub mod settlement;

pub use settlement::{PotShare, SettlementError};
pub use simulation::GameSimulation;
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl GameSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        GameSimulation::with_seed(seed as u64)
    }

    pub fn tick(&mut self) -> JsValue {
        let result = self.tick_core();
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Resolve a player action named by the presentation layer
    /// ("pump"/"bull" or "dump"/"bear"). Unknown names and clicks landing
    /// on a settled round both return NULL.
    pub fn send_action(&mut self, action: &str) -> JsValue {
        let Some(side) = Side::parse(action) else {
            return JsValue::NULL;
        };
        match self.apply_action_core(side) {
            Some(result) => serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state).unwrap_or(JsValue::NULL)
    }

    /// Host pushes a freshly fetched SOL/USD reference price; the engine
    /// itself never performs network fetches.
    pub fn set_oracle_price(&mut self, val: f64) {
        self.state.oracle_price = val.max(0.01);
    }

    /// Scenario knob: force the entropy walk to a value.
    pub fn set_entropy(&mut self, val: f64) {
        self.entropy.set(val);
        self.state.sonic_entropy = self.entropy.value();
    }

    pub fn winning_side(&self) -> String {
        self.state.winning_side().as_str().to_string()
    }

    pub fn potential_win(&self) -> f64 {
        self.state.potential_win()
    }

    pub fn get_trend(&self) -> String {
        match self.entropy_trend() {
            entropy::EntropyTrend::Stable => "stable".to_string(),
            entropy::EntropyTrend::Volatile => "volatile".to_string(),
        }
    }

    /// Run N ticks without returning results (fast batch mode).
    pub fn run_batch(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick_core();
        }
    }

    /// Reset the whole session to its initial state, replaying the same seed.
    pub fn reset(&mut self) {
        *self = GameSimulation::with_config(self.config.clone(), self.seed);
    }
}
