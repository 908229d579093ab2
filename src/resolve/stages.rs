// Board state and per-rule application for the staged resolution pass.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::order::InitialPick;
use crate::resolve::{DraftPick, ResolutionWarning};
use crate::rules::{Carry, InnerSwap, PoolSource, TradeRule};

/// Mutable round state while rules are applied. Picks are indexed by pick
/// number; a resolved pick is final. It still takes its favorability slot in
/// later swaps and pools, but nothing short of a manual override moves it
/// again.
pub(crate) struct Board<'a> {
    pub picks: Vec<DraftPick>,
    pub warnings: Vec<ResolutionWarning>,
    resolved: HashSet<u32>,
    positions: HashMap<String, u32>,
    first_round: Option<&'a [DraftPick]>,
}

impl<'a> Board<'a> {
    pub fn new(initial: &[InitialPick], first_round: Option<&'a [DraftPick]>) -> Self {
        let picks: Vec<DraftPick> = initial
            .iter()
            .map(|slot| DraftPick {
                pick: slot.pick,
                original_team: slot.team.clone(),
                new_owner: slot.team.clone(),
                is_traded: false,
                description: vec!["Own".to_string()],
            })
            .collect();
        let positions = picks
            .iter()
            .map(|p| (p.original_team.clone(), p.pick))
            .collect();
        Board {
            picks,
            warnings: Vec::new(),
            resolved: HashSet::new(),
            positions,
            first_round,
        }
    }

    /// Where `team`'s own pick landed this round.
    fn position_of(&self, team: &str) -> Option<u32> {
        self.positions.get(team).copied()
    }

    fn idx(&self, pick: u32) -> usize {
        (pick - self.picks[0].pick) as usize
    }

    fn is_resolved(&self, pick: u32) -> bool {
        self.resolved.contains(&pick)
    }

    /// Hand `pick` to `to` and seal it. The audit line is appended only when
    /// ownership actually changes.
    fn assign(&mut self, pick: u32, to: &str, text: &str) {
        let idx = self.idx(pick);
        let slot = &mut self.picks[idx];
        if slot.new_owner != to {
            slot.new_owner = to.to_string();
            slot.is_traded = slot.new_owner != slot.original_team;
            slot.description.push(text.to_string());
        }
        self.resolved.insert(pick);
    }

    fn warn_unknown(&mut self, owner: &str, team: &str) {
        let warning = ResolutionWarning::UnknownTeamReference {
            owner: owner.to_string(),
            team: team.to_string(),
        };
        warn!(%warning, "rule skipped");
        self.warnings.push(warning);
    }

    fn warn_ambiguous(&mut self, owner: &str, detail: &str) {
        let warning = ResolutionWarning::AmbiguousRule {
            owner: owner.to_string(),
            detail: detail.to_string(),
        };
        warn!(%warning, "rule skipped");
        self.warnings.push(warning);
    }

    /// Apply one rule for `owner`. Rules degrade gracefully: a reference to
    /// a team with no pick this round, or a cascade with nothing left to
    /// swap, skips the rule and records a warning instead of failing.
    pub fn apply(&mut self, owner: &str, rule: &TradeRule) {
        let text = rule.describe(owner);
        match rule {
            TradeRule::Direct { to } => {
                let Some(pos) = self.position_of(owner) else {
                    self.warn_unknown(owner, owner);
                    return;
                };
                if !self.is_resolved(pos) {
                    self.assign(pos, to, &text);
                }
            }
            TradeRule::RangeConditional { lo, hi, to } => {
                let Some(pos) = self.position_of(owner) else {
                    self.warn_unknown(owner, owner);
                    return;
                };
                // A miss leaves the pick open for the owner's next rule.
                if !self.is_resolved(pos) && pos >= *lo && pos <= *hi {
                    self.assign(pos, to, &text);
                }
            }
            TradeRule::ConveyIfKeptFirst { lo, hi, to } => {
                let Some(pos) = self.position_of(owner) else {
                    self.warn_unknown(owner, owner);
                    return;
                };
                if self.is_resolved(pos) {
                    return;
                }
                let Some(first) = self.first_round else {
                    self.warn_ambiguous(owner, "no first-round results to check against");
                    return;
                };
                let Some(own_first) = first.iter().find(|p| p.original_team == owner) else {
                    self.warn_ambiguous(owner, "owner has no first-round pick");
                    return;
                };
                let kept = own_first.new_owner == owner;
                if kept && own_first.pick >= *lo && own_first.pick <= *hi {
                    self.assign(pos, to, &text);
                }
            }
            TradeRule::FavorableSwap { swap } => {
                let picks = self.gather(owner, &swap.participants, &[]);
                self.deal_swap(&picks, &swap.assignment, &text);
            }
            TradeRule::Pool {
                participants,
                ranked_assignment,
            } => {
                let picks = self.gather(owner, participants, &[]);
                for (slot, &pick) in picks.iter().enumerate() {
                    if let Some(dest) = ranked_assignment.get(slot) {
                        if !self.is_resolved(pick) {
                            self.assign(pick, dest, &text);
                        }
                    }
                }
            }
            TradeRule::CascadingSwap { inner, outer } => {
                let mut remainders: Vec<Option<u32>> = Vec::with_capacity(inner.len());
                for stage in inner {
                    remainders.push(self.run_inner(owner, stage, &text));
                }
                let mut missing = false;
                for source in &outer.participants {
                    if let PoolSource::Remainder { index } = source {
                        if remainders.get(*index).copied().flatten().is_none() {
                            missing = true;
                        }
                    }
                }
                if missing {
                    self.warn_ambiguous(owner, "cascade left no pick to feed the final swap");
                    return;
                }
                let picks = self.gather(owner, &outer.participants, &remainders);
                self.deal_swap(&picks, &outer.assignment, &text);
            }
            TradeRule::ManualOverride { to } => {
                let Some(pos) = self.position_of(owner) else {
                    self.warn_unknown(owner, owner);
                    return;
                };
                // Overrides ignore resolved state on purpose.
                self.resolved.remove(&pos);
                self.assign(pos, to, &format!("Manual override: {text}"));
            }
        }
    }

    /// Collect the picks feeding a swap or pool, most favorable first.
    /// Out-of-window and unknown-team sources drop out. Resolved picks stay
    /// in: they rank and hold their slot, they just cannot move again.
    fn gather(
        &mut self,
        owner: &str,
        sources: &[PoolSource],
        remainders: &[Option<u32>],
    ) -> Vec<u32> {
        let mut picks = Vec::with_capacity(sources.len());
        for source in sources {
            match source {
                PoolSource::Team { team, window } => {
                    let Some(pos) = self.position_of(team) else {
                        self.warn_unknown(owner, team);
                        continue;
                    };
                    if let Some(w) = window {
                        if !w.contains(pos) {
                            continue;
                        }
                    }
                    picks.push(pos);
                }
                PoolSource::Remainder { index } => {
                    if let Some(pos) = remainders.get(*index).copied().flatten() {
                        picks.push(pos);
                    }
                }
            }
        }
        picks.sort_unstable();
        picks
    }

    /// Deal gathered picks out by favorability slot. A `None` slot, or a
    /// slot past the end of the assignment, leaves the pick open for the
    /// owner's later rules; a resolved pick keeps its slot but stays put.
    fn deal_swap(&mut self, picks: &[u32], assignment: &[Option<String>], text: &str) {
        for (slot, &pick) in picks.iter().enumerate() {
            if let Some(Some(dest)) = assignment.get(slot) {
                if !self.is_resolved(pick) {
                    self.assign(pick, dest, text);
                }
            }
        }
    }

    /// Run one inner cascade stage and return the pick it carries forward,
    /// if any. Picks the stage neither assigns nor carries stay open, so an
    /// owner dropped from the cascade can still convey through its own
    /// later rules.
    fn run_inner(&mut self, owner: &str, stage: &InnerSwap, text: &str) -> Option<u32> {
        let picks = self.gather(owner, &stage.swap.participants, &[]);
        let mut unassigned = Vec::new();
        for (slot, &pick) in picks.iter().enumerate() {
            match stage.swap.assignment.get(slot) {
                Some(Some(dest)) => {
                    if !self.is_resolved(pick) {
                        self.assign(pick, dest, text);
                    }
                }
                _ => unassigned.push(pick),
            }
        }
        match stage.carry {
            Carry::MostFavorableUnassigned => unassigned.first().copied(),
            Carry::LeastFavorableUnassigned => unassigned.last().copied(),
        }
    }

    pub fn into_result(self) -> (Vec<DraftPick>, Vec<ResolutionWarning>) {
        (self.picks, self.warnings)
    }
}
