// Trade resolution: turns an initial pick order plus a rule registry into
// final ownership with a full audit trail per pick.

mod stages;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::order::InitialPick;
use crate::rules::{Round, TradeRule, TradeRuleRegistry};
use stages::Board;

/// One slot after resolution: who earned it, who drafts with it and every
/// rule that moved it along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPick {
    pub pick: u32,
    pub original_team: String,
    pub new_owner: String,
    pub is_traded: bool,
    /// Ownership trail, starting at "Own" and growing one line per trade.
    pub description: Vec<String>,
}

/// A rule that could not be applied. Resolution never fails outright; bad
/// rules are skipped and reported.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionWarning {
    #[error("rule for {owner} skipped: {team} holds no pick this round")]
    UnknownTeamReference { owner: String, team: String },

    #[error("rule for {owner} skipped: {detail}")]
    AmbiguousRule { owner: String, detail: String },
}

/// Final ownership for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedRound {
    pub picks: Vec<DraftPick>,
    pub warnings: Vec<ResolutionWarning>,
}

/// Resolve first-round trades over the initial order.
pub fn resolve_first_round(
    initial: &[InitialPick],
    registry: &TradeRuleRegistry,
) -> ResolvedRound {
    resolve_round(initial, registry, Round::First, None)
}

/// Resolve second-round trades. First-round results are needed because some
/// second-round obligations depend on whether a first-round pick conveyed.
pub fn resolve_second_round(
    initial: &[InitialPick],
    registry: &TradeRuleRegistry,
    first_round: &[DraftPick],
) -> ResolvedRound {
    resolve_round(initial, registry, Round::Second, Some(first_round))
}

/// Shared staged pass. All rules are ordered by stage first, then by the
/// owning team's pick from worst to best, and applied one at a time against
/// the shared board.
fn resolve_round(
    initial: &[InitialPick],
    registry: &TradeRuleRegistry,
    round: Round,
    first_round: Option<&[DraftPick]>,
) -> ResolvedRound {
    let mut jobs: Vec<(u8, u32, &str, &TradeRule)> = Vec::new();
    for slot in initial {
        for rule in registry.rules_for(&slot.team, round) {
            jobs.push((rule.stage(), slot.pick, slot.team.as_str(), rule));
        }
    }
    jobs.sort_by_key(|(stage, pick, _, _)| (*stage, *pick));

    let mut board = Board::new(initial, first_round);
    for (stage, pick, owner, rule) in jobs {
        debug!(stage, pick, owner, "applying rule");
        board.apply(owner, rule);
    }
    let (picks, warnings) = board.into_result();
    ResolvedRound { picks, warnings }
}
