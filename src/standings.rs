// Standings snapshot and worst-to-best ranking with seeded tie-breaking.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of teams eligible for the weighted lottery draw.
pub const LOTTERY_TEAM_COUNT: usize = 14;
/// Number of non-lottery (playoff) teams picking after the lottery block.
pub const PLAYOFF_TEAM_COUNT: usize = 16;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("lottery standings must contain exactly {expected} teams, got {actual}")]
    LotteryCount { expected: usize, actual: usize },

    #[error("playoff standings must contain exactly {expected} teams, got {actual}")]
    PlayoffCount { expected: usize, actual: usize },

    #[error("duplicate team code in standings: {code}")]
    DuplicateTeam { code: String },

    #[error("failed to parse standings JSON: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Teams and snapshots
// ---------------------------------------------------------------------------

/// A team's season record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Short team code (e.g. "OKC").
    pub code: String,
    pub wins: u32,
    pub losses: u32,
}

impl Team {
    pub fn new(code: &str, wins: u32, losses: u32) -> Self {
        Team {
            code: code.to_string(),
            wins,
            losses,
        }
    }

    /// Win percentage. A team with no games played counts as 0.0 rather than
    /// dividing by zero.
    pub fn win_pct(&self) -> f64 {
        let games = self.wins + self.losses;
        self.wins as f64 / games.max(1) as f64
    }
}

/// Immutable end-of-season standings: the 14 lottery teams and the 16
/// playoff teams. Read-only for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsSnapshot {
    pub lottery: Vec<Team>,
    pub playoff: Vec<Team>,
}

impl StandingsSnapshot {
    /// Parse a snapshot from JSON (`{"lottery": [{team record}, ...], "playoff": [...]}`)
    /// and validate its structure.
    pub fn from_json(text: &str) -> Result<Self, StandingsError> {
        let snapshot: StandingsSnapshot = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the structural preconditions: exact team counts and no
    /// duplicate team codes across the two lists.
    pub fn validate(&self) -> Result<(), StandingsError> {
        if self.lottery.len() != LOTTERY_TEAM_COUNT {
            return Err(StandingsError::LotteryCount {
                expected: LOTTERY_TEAM_COUNT,
                actual: self.lottery.len(),
            });
        }
        if self.playoff.len() != PLAYOFF_TEAM_COUNT {
            return Err(StandingsError::PlayoffCount {
                expected: PLAYOFF_TEAM_COUNT,
                actual: self.playoff.len(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for team in self.all_teams() {
            if !seen.insert(team.code.as_str()) {
                return Err(StandingsError::DuplicateTeam {
                    code: team.code.clone(),
                });
            }
        }
        Ok(())
    }

    /// All 30 teams, lottery block first.
    pub fn all_teams(&self) -> impl Iterator<Item = &Team> {
        self.lottery.iter().chain(self.playoff.iter())
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Order teams worst-to-best by win percentage.
///
/// Groups of teams with identical win percentages are shuffled with a seeded
/// Fisher-Yates restricted to the tied subgroup, so tie order is reproducible
/// for a given seed rather than arbitrary. Tie-free input is returned in the
/// same order for every seed (idempotent).
pub fn rank_worst_to_best(teams: &[Team], seed: u64) -> Vec<Team> {
    let mut ranked: Vec<Team> = teams.to_vec();
    ranked.sort_by(|a, b| {
        a.win_pct()
            .partial_cmp(&b.win_pct())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let mut start = 0;
    while start < ranked.len() {
        let mut end = start + 1;
        while end < ranked.len()
            && (ranked[end].win_pct() - ranked[start].win_pct()).abs() < f64::EPSILON
        {
            end += 1;
        }
        if end - start > 1 {
            ranked[start..end].shuffle(&mut rng);
        }
        start = end;
    }

    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
