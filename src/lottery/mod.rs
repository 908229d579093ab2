// Lottery engine: official odds table, seeded top-4 draw, probability matrix.

pub mod matrix;
pub mod odds;
pub mod simulate;

pub use matrix::{simulate_probability_matrix, ProbabilityMatrix, TeamOdds, MAX_MATRIX_ITERATIONS};
pub use odds::{build_ranges, LotteryRange, TOP_PICK_WEIGHTS, TOTAL_COMBINATIONS};
pub use simulate::{simulate_lottery_detailed, LotteryResult, LotteryWinner, LOTTERY_WINNER_COUNT};

use thiserror::Error;

use crate::standings::LOTTERY_TEAM_COUNT;

#[derive(Debug, Error)]
pub enum LotteryError {
    #[error("lottery draw requires exactly {LOTTERY_TEAM_COUNT} ranked teams, got {actual}")]
    TeamCount { actual: usize },

    #[error("probability matrix requires at least one iteration")]
    ZeroIterations,
}
