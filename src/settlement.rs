// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CandleWars Simulation Suite ("The Pit") - Pot Settlement
//
// Pro-rata split of the round jackpot among the winning side's contributors.
// The engine only tracks the local player's committed power; the rest of the
// winning team is synthetic, so the split is a single share computation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from pot settlement. The tick path treats any of these as
/// "no payout" rather than surfacing them — tick never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("empty pot -- nothing to split")]
    EmptyPot,
    #[error("winning side committed zero power")]
    ZeroTeamPower,
}

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// One contributor's slice of the pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotShare {
    /// SOL paid out.
    pub amount: f64,
    /// Fraction of the pot, in [0, 1].
    pub share: f64,
}

// ---------------------------------------------------------------------------
// Split
// ---------------------------------------------------------------------------

/// Split `jackpot` pro-rata: the contributor holding `my_power` out of
/// `team_power` total receives `jackpot * my_power / team_power`.
///
/// The share is clamped to [0, 1] so float drift between the individual and
/// team accumulators can never mint value out of the pot.
///
/// # Errors
/// - `EmptyPot` if `jackpot <= 0.0`.
/// - `ZeroTeamPower` if `team_power <= 0.0`.
pub fn split_pot(jackpot: f64, my_power: f64, team_power: f64) -> Result<PotShare, SettlementError> {
    if jackpot <= 0.0 {
        return Err(SettlementError::EmptyPot);
    }
    if team_power <= 0.0 {
        return Err(SettlementError::ZeroTeamPower);
    }

    let share = (my_power / team_power).clamp(0.0, 1.0);
    Ok(PotShare {
        amount: jackpot * share,
        share,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
