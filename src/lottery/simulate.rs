// Seeded lottery draw for the top four picks.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::lottery::odds::{build_ranges, LotteryRange};
use crate::lottery::LotteryError;
use crate::standings::{Team, LOTTERY_TEAM_COUNT};

/// Number of picks decided by the weighted draw.
pub const LOTTERY_WINNER_COUNT: usize = 4;

/// One team that won a top-four pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryWinner {
    pub team: String,
    /// Pre-draw lottery rank (1 = worst record).
    pub rank: u8,
    /// The combination range the team held going into the draw.
    pub range: LotteryRange,
}

/// Full outcome of a single lottery draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryResult {
    /// The seed the draw actually ran with. Reported even when the caller
    /// did not supply one, so any draw can be replayed.
    pub seed_used: u64,
    /// Winners of picks 1 through 4, in draw order.
    pub winners: Vec<LotteryWinner>,
    /// The combination ranges for all 14 ranks.
    pub ranges: Vec<LotteryRange>,
}

/// Run one weighted lottery draw over the ranked (worst-to-best) lottery
/// teams and return the top-four winners with their odds metadata.
///
/// For each pick, one slot is drawn uniformly from the combinations still in
/// the drum; the owning team wins and all of its remaining combinations are
/// removed before the next draw, so no team can win twice. With a supplied
/// seed the draw is fully deterministic; otherwise a fresh seed is minted
/// from the system RNG and reported in the result.
pub fn simulate_lottery_detailed(
    ranked: &[Team],
    seed: Option<u64>,
) -> Result<LotteryResult, LotteryError> {
    if ranked.len() != LOTTERY_TEAM_COUNT {
        return Err(LotteryError::TeamCount {
            actual: ranked.len(),
        });
    }

    let seed_used = seed.unwrap_or_else(|| thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed_used);
    let ranges = build_ranges();

    let winner_ranks = draw_winner_ranks(&mut rng);
    let winners = winner_ranks
        .into_iter()
        .map(|rank_idx| LotteryWinner {
            team: ranked[rank_idx].code.clone(),
            rank: (rank_idx + 1) as u8,
            range: ranges[rank_idx],
        })
        .collect();

    Ok(LotteryResult {
        seed_used,
        winners,
        ranges,
    })
}

/// Draw the four winning rank indices (0-based) from the combination drum.
///
/// Shared by the single-draw and probability-matrix paths.
pub(crate) fn draw_winner_ranks(rng: &mut StdRng) -> Vec<usize> {
    let mut drum: Vec<(usize, u32)> = build_ranges()
        .iter()
        .enumerate()
        .map(|(idx, range)| (idx, range.weight))
        .collect();

    let mut winners = Vec::with_capacity(LOTTERY_WINNER_COUNT);
    for _ in 0..LOTTERY_WINNER_COUNT {
        let remaining: u32 = drum.iter().map(|(_, w)| w).sum();
        let slot = rng.gen_range(1..=remaining);
        let mut acc = 0u32;
        let mut winner_pos = drum.len() - 1;
        for (pos, (_, weight)) in drum.iter().enumerate() {
            acc += weight;
            if slot <= acc {
                winner_pos = pos;
                break;
            }
        }
        let (rank_idx, _) = drum.remove(winner_pos);
        winners.push(rank_idx);
    }
    winners
}

/// The full 14-slot lottery order for one draw: winners first, then the
/// remaining teams in original worst-to-best order.
pub(crate) fn full_lottery_order(rng: &mut StdRng) -> Vec<usize> {
    let winners = draw_winner_ranks(rng);
    let mut order = winners.clone();
    for rank_idx in 0..LOTTERY_TEAM_COUNT {
        if !winners.contains(&rank_idx) {
            order.push(rank_idx);
        }
    }
    order
}
