// Monte Carlo pick-probability matrix over repeated lottery draws.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lottery::simulate::full_lottery_order;
use crate::lottery::LotteryError;
use crate::standings::{Team, LOTTERY_TEAM_COUNT};

/// Hard cap on matrix iterations. Requests above this are clamped.
pub const MAX_MATRIX_ITERATIONS: usize = 1_000_000;

/// Estimated pick distribution for one lottery team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamOdds {
    pub team: String,
    /// Pre-draw lottery rank (1 = worst record).
    pub rank: u8,
    /// Probability of landing each pick 1 through 14, in percent.
    pub pick_probs: Vec<f64>,
    /// Probability-weighted average landing pick.
    pub expected_pick: f64,
}

/// Full probability matrix for the 14 lottery teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    pub seed_used: u64,
    pub iterations: usize,
    pub teams: Vec<TeamOdds>,
}

/// Estimate each lottery team's pick distribution by running `iterations`
/// independent seeded draws.
///
/// Iteration `i` runs with seed `seed_used + i`, so the whole matrix is
/// reproducible from `seed_used` alone. Iteration counts above
/// [`MAX_MATRIX_ITERATIONS`] are clamped with a warning.
pub fn simulate_probability_matrix(
    ranked: &[Team],
    iterations: usize,
    seed: Option<u64>,
) -> Result<ProbabilityMatrix, LotteryError> {
    if ranked.len() != LOTTERY_TEAM_COUNT {
        return Err(LotteryError::TeamCount {
            actual: ranked.len(),
        });
    }
    if iterations == 0 {
        return Err(LotteryError::ZeroIterations);
    }
    let iterations = if iterations > MAX_MATRIX_ITERATIONS {
        warn!(
            requested = iterations,
            cap = MAX_MATRIX_ITERATIONS,
            "matrix iteration count clamped"
        );
        MAX_MATRIX_ITERATIONS
    } else {
        iterations
    };

    let seed_used = seed.unwrap_or_else(|| thread_rng().gen());

    // counts[rank][pick]: how often rank landed at pick (both 0-based).
    let mut counts = vec![[0u64; LOTTERY_TEAM_COUNT]; LOTTERY_TEAM_COUNT];
    for i in 0..iterations {
        let mut rng = StdRng::seed_from_u64(seed_used.wrapping_add(i as u64));
        let order = full_lottery_order(&mut rng);
        for (pick_idx, &rank_idx) in order.iter().enumerate() {
            counts[rank_idx][pick_idx] += 1;
        }
    }

    let teams = ranked
        .iter()
        .enumerate()
        .map(|(rank_idx, team)| {
            let pick_probs: Vec<f64> = counts[rank_idx]
                .iter()
                .map(|&c| c as f64 / iterations as f64 * 100.0)
                .collect();
            let expected_pick = pick_probs
                .iter()
                .enumerate()
                .map(|(pick_idx, pct)| (pick_idx + 1) as f64 * pct / 100.0)
                .sum();
            TeamOdds {
                team: team.code.clone(),
                rank: (rank_idx + 1) as u8,
                pick_probs,
                expected_pick,
            }
        })
        .collect();

    Ok(ProbabilityMatrix {
        seed_used,
        iterations,
        teams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked_teams() -> Vec<Team> {
        (0..14)
            .map(|i| Team::new(&format!("T{:02}", i + 1), 15 + i * 3, 67 - i * 3))
            .collect()
    }

    #[test]
    fn rows_and_columns_sum_to_one_hundred() {
        let matrix = simulate_probability_matrix(&ranked_teams(), 500, Some(77)).unwrap();
        assert_eq!(matrix.teams.len(), 14);
        for team in &matrix.teams {
            let row: f64 = team.pick_probs.iter().sum();
            assert!((row - 100.0).abs() < 1e-6, "row for {} sums to {row}", team.team);
        }
        for pick_idx in 0..14 {
            let col: f64 = matrix.teams.iter().map(|t| t.pick_probs[pick_idx]).sum();
            assert!((col - 100.0).abs() < 1e-6, "column {pick_idx} sums to {col}");
        }
    }

    #[test]
    fn same_seed_same_matrix() {
        let a = simulate_probability_matrix(&ranked_teams(), 200, Some(5)).unwrap();
        let b = simulate_probability_matrix(&ranked_teams(), 200, Some(5)).unwrap();
        for (ta, tb) in a.teams.iter().zip(&b.teams) {
            assert_eq!(ta.pick_probs, tb.pick_probs);
        }
    }

    #[test]
    fn structural_zeroes_hold() {
        // Rank 1 can never fall past pick 5; rank 14 can never land picks 5-10.
        let matrix = simulate_probability_matrix(&ranked_teams(), 2000, Some(31)).unwrap();
        let worst = &matrix.teams[0];
        for pick_idx in 5..14 {
            assert_eq!(worst.pick_probs[pick_idx], 0.0);
        }
        let best = &matrix.teams[13];
        for pick_idx in 4..10 {
            assert_eq!(best.pick_probs[pick_idx], 0.0);
        }
    }

    #[test]
    fn worst_record_wins_top_pick_most_often() {
        let matrix = simulate_probability_matrix(&ranked_teams(), 5000, Some(99)).unwrap();
        let top_pick_probs: Vec<f64> = matrix.teams.iter().map(|t| t.pick_probs[0]).collect();
        assert!(top_pick_probs[0] > top_pick_probs[13]);
        assert!(matrix.teams[0].expected_pick < matrix.teams[13].expected_pick);
    }

    #[test]
    fn rejects_zero_iterations() {
        match simulate_probability_matrix(&ranked_teams(), 0, Some(1)).unwrap_err() {
            LotteryError::ZeroIterations => {}
            other => panic!("expected ZeroIterations, got: {other}"),
        }
    }
}
