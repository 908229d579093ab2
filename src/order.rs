// Initial draft order: lottery results plus record-based slotting.

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::lottery::{simulate_lottery_detailed, LotteryError, LotteryResult};
use crate::standings::{rank_worst_to_best, StandingsError, StandingsSnapshot};

/// Picks in each round.
pub const FIRST_ROUND_PICKS: u32 = 30;
/// Picks across both rounds.
pub const TOTAL_PICKS: u32 = 60;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Standings(#[from] StandingsError),

    #[error(transparent)]
    Lottery(#[from] LotteryError),
}

/// A draft slot before any trade rules run: the pick number and the team
/// that earned it on record (and lottery luck).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialPick {
    pub pick: u32,
    pub team: String,
}

/// First-round order, with the lottery outcome when a draw was run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirstRoundOrder {
    pub picks: Vec<InitialPick>,
    pub lottery: Option<LotteryResult>,
}

/// Build the initial first-round order from a standings snapshot.
///
/// With `simulate_lottery` set, the top four picks come from a weighted draw
/// and the remaining lottery teams slide down in worst-to-best order. Without
/// it, all 14 lottery picks go straight by record. Playoff teams always fill
/// picks 15 through 30 worst-to-best. One seed drives both tie-breaking and
/// the draw, so a whole run replays from the reported `seed_used`.
pub fn build_first_round(
    snapshot: &StandingsSnapshot,
    simulate_lottery: bool,
    seed: Option<u64>,
) -> Result<FirstRoundOrder, OrderError> {
    snapshot.validate()?;
    let seed_used = seed.unwrap_or_else(|| thread_rng().gen());

    let ranked_lottery = rank_worst_to_best(&snapshot.lottery, seed_used);
    let ranked_playoff = rank_worst_to_best(&snapshot.playoff, seed_used);

    let mut picks = Vec::with_capacity(FIRST_ROUND_PICKS as usize);
    let lottery = if simulate_lottery {
        let result = simulate_lottery_detailed(&ranked_lottery, Some(seed_used))?;
        info!(seed = result.seed_used, "lottery draw complete");
        let winner_ranks: Vec<usize> =
            result.winners.iter().map(|w| (w.rank - 1) as usize).collect();
        for &rank_idx in &winner_ranks {
            picks.push(ranked_lottery[rank_idx].code.clone());
        }
        for (rank_idx, team) in ranked_lottery.iter().enumerate() {
            if !winner_ranks.contains(&rank_idx) {
                picks.push(team.code.clone());
            }
        }
        Some(result)
    } else {
        for team in &ranked_lottery {
            picks.push(team.code.clone());
        }
        None
    };
    for team in &ranked_playoff {
        picks.push(team.code.clone());
    }

    let picks = picks
        .into_iter()
        .enumerate()
        .map(|(idx, team)| InitialPick {
            pick: idx as u32 + 1,
            team,
        })
        .collect();

    Ok(FirstRoundOrder { picks, lottery })
}

/// Build the initial second-round order: all 30 teams worst-to-best by
/// record, picks 31 through 60. The lottery never reorders this round.
pub fn build_second_round(
    snapshot: &StandingsSnapshot,
    seed: Option<u64>,
) -> Result<Vec<InitialPick>, OrderError> {
    snapshot.validate()?;
    let seed_used = seed.unwrap_or_else(|| thread_rng().gen());

    let all: Vec<_> = snapshot.all_teams().cloned().collect();
    let ranked = rank_worst_to_best(&all, seed_used);

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(idx, team)| InitialPick {
            pick: FIRST_ROUND_PICKS + idx as u32 + 1,
            team: team.code,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::Team;

    fn snapshot() -> StandingsSnapshot {
        StandingsSnapshot {
            lottery: (0..14)
                .map(|i| Team::new(&format!("L{:02}", i + 1), 15 + i * 2, 67 - i * 2))
                .collect(),
            playoff: (0..16)
                .map(|i| Team::new(&format!("P{:02}", i + 1), 45 + i * 2, 37 - i * 2))
                .collect(),
        }
    }

    #[test]
    fn without_lottery_order_follows_record() {
        let order = build_first_round(&snapshot(), false, Some(1)).unwrap();
        assert!(order.lottery.is_none());
        assert_eq!(order.picks.len(), 30);
        assert_eq!(order.picks[0].team, "L01");
        assert_eq!(order.picks[13].team, "L14");
        assert_eq!(order.picks[14].team, "P01");
        assert_eq!(order.picks[29].team, "P16");
        for (idx, pick) in order.picks.iter().enumerate() {
            assert_eq!(pick.pick, idx as u32 + 1);
        }
    }

    #[test]
    fn lottery_reorders_only_the_lottery_block() {
        let order = build_first_round(&snapshot(), true, Some(12345)).unwrap();
        let result = order.lottery.as_ref().unwrap();
        assert_eq!(result.winners.len(), 4);
        for (idx, winner) in result.winners.iter().enumerate() {
            assert_eq!(order.picks[idx].team, winner.team);
        }
        // Playoff block untouched.
        assert_eq!(order.picks[14].team, "P01");
        assert_eq!(order.picks[29].team, "P16");
        // Every lottery team still appears exactly once in picks 1-14.
        let mut codes: Vec<_> = order.picks[..14].iter().map(|p| p.team.clone()).collect();
        codes.sort();
        let expected: Vec<_> = (0..14).map(|i| format!("L{:02}", i + 1)).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn non_winners_keep_relative_record_order() {
        let order = build_first_round(&snapshot(), true, Some(4242)).unwrap();
        let winners: Vec<_> = order.picks[..4].iter().map(|p| p.team.clone()).collect();
        let tail: Vec<_> = order.picks[4..14]
            .iter()
            .map(|p| p.team.clone())
            .collect();
        for pair in tail.windows(2) {
            assert!(pair[0] < pair[1], "tail must stay worst-to-best: {tail:?}");
        }
        for team in &tail {
            assert!(!winners.contains(team));
        }
    }

    #[test]
    fn same_seed_same_first_round() {
        let a = build_first_round(&snapshot(), true, Some(777)).unwrap();
        let b = build_first_round(&snapshot(), true, Some(777)).unwrap();
        let a_teams: Vec<_> = a.picks.iter().map(|p| p.team.as_str()).collect();
        let b_teams: Vec<_> = b.picks.iter().map(|p| p.team.as_str()).collect();
        assert_eq!(a_teams, b_teams);
    }

    #[test]
    fn second_round_covers_picks_31_to_60() {
        let picks = build_second_round(&snapshot(), Some(3)).unwrap();
        assert_eq!(picks.len(), 30);
        assert_eq!(picks[0].pick, 31);
        assert_eq!(picks[29].pick, 60);
        assert_eq!(picks[0].team, "L01");
        assert_eq!(picks[29].team, "P16");
    }

    #[test]
    fn invalid_snapshot_is_rejected() {
        let bad = StandingsSnapshot {
            lottery: vec![],
            playoff: snapshot().playoff,
        };
        assert!(matches!(
            build_first_round(&bad, true, Some(1)),
            Err(OrderError::Standings(_))
        ));
    }
}
