// Typed trade-rule model: pick protections, swaps, pools and the registry
// that holds every team's obligations for a draft year.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::order::TOTAL_PICKS;

/// Which round a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    First,
    Second,
}

/// Inclusive pick range gating a rule or a pool participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickWindow {
    pub lo: u32,
    pub hi: u32,
}

impl PickWindow {
    pub fn contains(&self, pick: u32) -> bool {
        pick >= self.lo && pick <= self.hi
    }
}

/// A pick feeding a swap or pool: either a team's own pick (optionally only
/// when it lands inside a window) or a leftover from an earlier swap stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolSource {
    Team {
        team: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        window: Option<PickWindow>,
    },
    /// The pick left unassigned by inner swap `index` of a cascade.
    Remainder { index: usize },
}

impl PoolSource {
    pub fn team(code: &str) -> Self {
        PoolSource::Team {
            team: code.to_string(),
            window: None,
        }
    }

    pub fn team_in(code: &str, lo: u32, hi: u32) -> Self {
        PoolSource::Team {
            team: code.to_string(),
            window: Some(PickWindow { lo, hi }),
        }
    }
}

/// Participants sorted most-to-least favorable, with a destination per slot.
/// `assignment[0]` receives the most favorable pick; a `None` slot leaves
/// that pick with whichever team holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSpec {
    pub participants: Vec<PoolSource>,
    pub assignment: Vec<Option<String>>,
}

/// Which leftover pick an inner swap feeds to the outer stage of a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Carry {
    MostFavorableUnassigned,
    LeastFavorableUnassigned,
}

/// One inner stage of a cascading swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerSwap {
    pub swap: SwapSpec,
    pub carry: Carry,
}

/// A single trade obligation attached to one team's pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeRule {
    /// The pick conveys unconditionally.
    Direct { to: String },

    /// The pick conveys only when it lands inside the window; otherwise the
    /// owner keeps it.
    RangeConditional { lo: u32, hi: u32, to: String },

    /// Two or more picks compared once, each slot assigned (or kept).
    FavorableSwap { swap: SwapSpec },

    /// Several picks ordered most-to-least favorable and dealt out to the
    /// listed destinations in rank order.
    Pool {
        participants: Vec<PoolSource>,
        ranked_assignment: Vec<String>,
    },

    /// Inner swaps resolve first; their leftover picks feed the outer swap.
    CascadingSwap {
        inner: Vec<InnerSwap>,
        outer: SwapSpec,
    },

    /// Second-round pick conveys when the owner's first-round pick was kept
    /// inside the window.
    ConveyIfKeptFirst { lo: u32, hi: u32, to: String },

    /// Hand-entered final ownership that wins over everything else.
    ManualOverride { to: String },
}

impl TradeRule {
    /// Resolution stage. Lower stages run first; within a stage, rules run
    /// in worst-to-best order of the owning team's pick.
    pub fn stage(&self) -> u8 {
        match self {
            TradeRule::Pool { participants, .. } => {
                let windowed = participants.iter().any(|p| {
                    matches!(p, PoolSource::Team { window: Some(_), .. })
                        || matches!(p, PoolSource::Remainder { .. })
                });
                if windowed {
                    5
                } else {
                    1
                }
            }
            TradeRule::FavorableSwap { .. } | TradeRule::CascadingSwap { .. } => 2,
            TradeRule::Direct { .. } => 3,
            TradeRule::RangeConditional { .. } | TradeRule::ConveyIfKeptFirst { .. } => 4,
            TradeRule::ManualOverride { .. } => 6,
        }
    }

    /// Every team code the rule mentions, owner excluded.
    pub fn referenced_teams(&self) -> Vec<&str> {
        fn push_swap<'a>(swap: &'a SwapSpec, teams: &mut Vec<&'a str>) {
            push_sources(&swap.participants, teams);
            teams.extend(swap.assignment.iter().flatten().map(String::as_str));
        }
        fn push_sources<'a>(sources: &'a [PoolSource], teams: &mut Vec<&'a str>) {
            for source in sources {
                if let PoolSource::Team { team, .. } = source {
                    teams.push(team.as_str());
                }
            }
        }

        let mut teams = Vec::new();
        match self {
            TradeRule::Direct { to }
            | TradeRule::RangeConditional { to, .. }
            | TradeRule::ConveyIfKeptFirst { to, .. }
            | TradeRule::ManualOverride { to } => teams.push(to.as_str()),
            TradeRule::FavorableSwap { swap } => push_swap(swap, &mut teams),
            TradeRule::Pool {
                participants,
                ranked_assignment,
            } => {
                push_sources(participants, &mut teams);
                teams.extend(ranked_assignment.iter().map(String::as_str));
            }
            TradeRule::CascadingSwap { inner, outer } => {
                for stage in inner {
                    push_swap(&stage.swap, &mut teams);
                }
                push_swap(outer, &mut teams);
            }
        }
        teams
    }

    /// Human-readable audit line for this rule, appended to a pick's
    /// ownership trail when the rule moves it.
    pub fn describe(&self, owner: &str) -> String {
        match self {
            TradeRule::Direct { to } => format!("{owner} pick to {to}"),
            TradeRule::RangeConditional { lo, hi, to } => {
                format!("{owner} pick to {to} if it falls {lo}-{hi}")
            }
            TradeRule::FavorableSwap { swap } => describe_swap(swap),
            TradeRule::Pool {
                participants,
                ranked_assignment,
            } => describe_pool(participants, ranked_assignment),
            TradeRule::CascadingSwap { inner, outer } => {
                let mut parts: Vec<String> =
                    inner.iter().map(|s| describe_swap(&s.swap)).collect();
                parts.push(describe_swap(outer));
                parts.join("; then ")
            }
            TradeRule::ConveyIfKeptFirst { lo, hi, to } => format!(
                "{owner} second-round pick to {to} after keeping first-round pick in {lo}-{hi}"
            ),
            TradeRule::ManualOverride { to } => format!("{owner} pick to {to}"),
        }
    }
}

fn source_label(source: &PoolSource) -> String {
    match source {
        PoolSource::Team { team, window: None } => team.clone(),
        PoolSource::Team {
            team,
            window: Some(w),
        } => format!("{team} (picks {}-{})", w.lo, w.hi),
        PoolSource::Remainder { index } => format!("leftover #{}", index + 1),
    }
}

fn join_labels(labels: &[String]) -> String {
    match labels.len() {
        0 => String::new(),
        1 => labels[0].clone(),
        2 => format!("{} and {}", labels[0], labels[1]),
        _ => format!(
            "{} and {}",
            labels[..labels.len() - 1].join(", "),
            labels[labels.len() - 1]
        ),
    }
}

fn slot_phrase(idx: usize, total: usize) -> String {
    if idx == 0 {
        "Most favorable".to_string()
    } else if idx == total - 1 {
        "Least favorable".to_string()
    } else {
        format!("Slot {} of", idx + 1)
    }
}

fn describe_swap(swap: &SwapSpec) -> String {
    let labels: Vec<String> = swap.participants.iter().map(source_label).collect();
    let list = join_labels(&labels);
    let total = swap.participants.len();
    let parts: Vec<String> = swap
        .assignment
        .iter()
        .enumerate()
        .filter_map(|(idx, dest)| {
            dest.as_ref()
                .map(|to| format!("{} of {list} to {to}", slot_phrase(idx, total)))
        })
        .collect();
    parts.join("; ")
}

fn count_word(n: usize) -> String {
    match n {
        2 => "Two".to_string(),
        3 => "Three".to_string(),
        4 => "Four".to_string(),
        other => other.to_string(),
    }
}

fn describe_pool(participants: &[PoolSource], ranked_assignment: &[String]) -> String {
    let labels: Vec<String> = participants.iter().map(source_label).collect();
    let list = join_labels(&labels);

    // Run-length group consecutive identical destinations so three slots to
    // the same team read as one clause.
    let mut groups: Vec<(usize, &str)> = Vec::new();
    for dest in ranked_assignment {
        match groups.last_mut() {
            Some((count, last)) if *last == dest.as_str() => *count += 1,
            _ => groups.push((1, dest.as_str())),
        }
    }

    let total_groups = groups.len();
    let mut parts = Vec::with_capacity(total_groups);
    for (group_idx, (count, dest)) in groups.iter().enumerate() {
        let phrase = if total_groups == 1 {
            format!("All of {list}")
        } else if group_idx == 0 {
            if *count == 1 {
                format!("Most favorable of {list}")
            } else {
                format!("{} most favorable of {list}", count_word(*count))
            }
        } else if group_idx == total_groups - 1 {
            if *count == 1 {
                "least favorable".to_string()
            } else {
                format!("{} least favorable", count_word(*count).to_lowercase())
            }
        } else if *count == 1 {
            "next most favorable".to_string()
        } else {
            format!("next {}", count_word(*count).to_lowercase())
        };
        parts.push(format!("{phrase} to {dest}"));
    }
    parts.join("; ")
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// All rules attached to one team's picks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRules {
    #[serde(default)]
    pub first_round: Vec<TradeRule>,
    #[serde(default)]
    pub second_round: Vec<TradeRule>,
}

/// The complete rule set for a draft year, keyed by owning team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRuleRegistry {
    pub draft_year: u16,
    pub teams: BTreeMap<String, TeamRules>,
}

/// A structural problem found while validating a registry. Issues do not
/// abort a run; affected rules are skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryIssue {
    #[error("rule for {owner} references unknown team {team}")]
    UnknownTeam { owner: String, team: String },

    #[error("malformed rule for {owner}: {detail}")]
    MalformedRule { owner: String, detail: String },
}

impl TradeRuleRegistry {
    pub fn new(draft_year: u16) -> Self {
        TradeRuleRegistry {
            draft_year,
            teams: BTreeMap::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Rules attached to `team` for `round`, empty when none are registered.
    pub fn rules_for(&self, team: &str, round: Round) -> &[TradeRule] {
        self.teams
            .get(team)
            .map(|rules| match round {
                Round::First => rules.first_round.as_slice(),
                Round::Second => rules.second_round.as_slice(),
            })
            .unwrap_or(&[])
    }

    /// Structural validation against the set of known team codes. Returns
    /// every issue found rather than stopping at the first.
    pub fn validate(&self, known_teams: &[&str]) -> Vec<RegistryIssue> {
        let mut issues = Vec::new();
        for (owner, rules) in &self.teams {
            if !known_teams.contains(&owner.as_str()) {
                issues.push(RegistryIssue::UnknownTeam {
                    owner: owner.clone(),
                    team: owner.clone(),
                });
            }
            for rule in rules.first_round.iter().chain(&rules.second_round) {
                for team in rule.referenced_teams() {
                    if !known_teams.contains(&team) {
                        issues.push(RegistryIssue::UnknownTeam {
                            owner: owner.clone(),
                            team: team.to_string(),
                        });
                    }
                }
                self.check_shape(owner, rule, &mut issues);
            }
        }
        issues
    }

    fn check_shape(&self, owner: &str, rule: &TradeRule, issues: &mut Vec<RegistryIssue>) {
        let mut malformed = |detail: String| {
            issues.push(RegistryIssue::MalformedRule {
                owner: owner.to_string(),
                detail,
            })
        };
        let check_window = |lo: u32, hi: u32, malformed: &mut dyn FnMut(String)| {
            if lo == 0 || lo > hi || hi > TOTAL_PICKS {
                malformed(format!("invalid pick window {lo}-{hi}"));
            }
        };
        let check_swap = |swap: &SwapSpec,
                          allow_remainder: bool,
                          malformed: &mut dyn FnMut(String)| {
            if swap.participants.len() < 2 {
                malformed("swap needs at least two participants".to_string());
            }
            if swap.assignment.len() > swap.participants.len() {
                malformed("swap assigns more slots than it has participants".to_string());
            }
            for source in &swap.participants {
                match source {
                    PoolSource::Team {
                        window: Some(w), ..
                    } => check_window(w.lo, w.hi, malformed),
                    PoolSource::Remainder { .. } if !allow_remainder => {
                        malformed("leftover source only valid in a cascade outer swap".to_string())
                    }
                    _ => {}
                }
            }
        };

        match rule {
            TradeRule::RangeConditional { lo, hi, .. }
            | TradeRule::ConveyIfKeptFirst { lo, hi, .. } => {
                check_window(*lo, *hi, &mut malformed)
            }
            TradeRule::FavorableSwap { swap } => check_swap(swap, false, &mut malformed),
            TradeRule::Pool {
                participants,
                ranked_assignment,
            } => {
                if ranked_assignment.is_empty() {
                    malformed("pool assigns no destinations".to_string());
                }
                if ranked_assignment.len() > participants.len() {
                    malformed("pool assigns more slots than it has participants".to_string());
                }
                for source in participants {
                    match source {
                        PoolSource::Team {
                            window: Some(w), ..
                        } => check_window(w.lo, w.hi, &mut malformed),
                        PoolSource::Remainder { .. } => malformed(
                            "leftover source only valid in a cascade outer swap".to_string(),
                        ),
                        _ => {}
                    }
                }
            }
            TradeRule::CascadingSwap { inner, outer } => {
                if inner.is_empty() {
                    malformed("cascade has no inner swaps".to_string());
                }
                for stage in inner {
                    check_swap(&stage.swap, false, &mut malformed);
                }
                check_swap(outer, true, &mut malformed);
                for source in &outer.participants {
                    if let PoolSource::Remainder { index } = source {
                        if *index >= inner.len() {
                            malformed(format!(
                                "cascade outer references leftover #{} but only {} inner swaps exist",
                                index + 1,
                                inner.len()
                            ));
                        }
                    }
                }
            }
            TradeRule::Direct { .. } | TradeRule::ManualOverride { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 6] = ["OKC", "LAC", "HOU", "WAS", "MEM", "ATL"];

    fn pool_rule() -> TradeRule {
        TradeRule::Pool {
            participants: vec![
                PoolSource::team("OKC"),
                PoolSource::team("LAC"),
                PoolSource::team("HOU"),
            ],
            ranked_assignment: vec!["OKC".into(), "OKC".into(), "WAS".into()],
        }
    }

    #[test]
    fn stage_classification() {
        assert_eq!(pool_rule().stage(), 1);
        assert_eq!(
            TradeRule::FavorableSwap {
                swap: SwapSpec {
                    participants: vec![PoolSource::team("OKC"), PoolSource::team("WAS")],
                    assignment: vec![Some("OKC".into()), None],
                }
            }
            .stage(),
            2
        );
        assert_eq!(TradeRule::Direct { to: "WAS".into() }.stage(), 3);
        assert_eq!(
            TradeRule::RangeConditional {
                lo: 1,
                hi: 8,
                to: "MEM".into()
            }
            .stage(),
            4
        );
        assert_eq!(
            TradeRule::ConveyIfKeptFirst {
                lo: 1,
                hi: 4,
                to: "OKC".into()
            }
            .stage(),
            4
        );
        assert_eq!(TradeRule::ManualOverride { to: "MEM".into() }.stage(), 6);
    }

    #[test]
    fn windowed_pool_is_stage_five() {
        let rule = TradeRule::Pool {
            participants: vec![
                PoolSource::team("OKC"),
                PoolSource::team_in("HOU", 5, 30),
            ],
            ranked_assignment: vec!["OKC".into()],
        };
        assert_eq!(rule.stage(), 5);
    }

    #[test]
    fn pool_description_groups_repeated_destinations() {
        let text = pool_rule().describe("OKC");
        assert_eq!(
            text,
            "Two most favorable of OKC, LAC and HOU to OKC; least favorable to WAS"
        );
    }

    #[test]
    fn swap_description_skips_kept_slots() {
        let rule = TradeRule::FavorableSwap {
            swap: SwapSpec {
                participants: vec![PoolSource::team("MIN"), PoolSource::team("NYK")],
                assignment: vec![None, Some("NYK".into())],
            },
        };
        assert_eq!(
            rule.describe("MIN"),
            "Least favorable of MIN and NYK to NYK"
        );
    }

    #[test]
    fn windowed_participant_shows_its_window() {
        let rule = TradeRule::FavorableSwap {
            swap: SwapSpec {
                participants: vec![
                    PoolSource::team("PHX"),
                    PoolSource::team_in("WAS", 9, 30),
                ],
                assignment: vec![Some("PHX".into())],
            },
        };
        assert_eq!(
            rule.describe("PHX"),
            "Most favorable of PHX and WAS (picks 9-30) to PHX"
        );
    }

    #[test]
    fn registry_round_trips_through_json() {
        let mut registry = TradeRuleRegistry::new(2026);
        registry.teams.insert(
            "OKC".into(),
            TeamRules {
                first_round: vec![pool_rule()],
                second_round: vec![TradeRule::Direct { to: "WAS".into() }],
            },
        );
        let text = serde_json::to_string(&registry).unwrap();
        let parsed = TradeRuleRegistry::from_json(&text).unwrap();
        assert_eq!(parsed.draft_year, 2026);
        assert_eq!(parsed.rules_for("OKC", Round::First), &[pool_rule()]);
        assert_eq!(
            parsed.rules_for("OKC", Round::Second),
            &[TradeRule::Direct { to: "WAS".into() }]
        );
        assert!(parsed.rules_for("MEM", Round::First).is_empty());
    }

    #[test]
    fn validate_flags_unknown_teams() {
        let mut registry = TradeRuleRegistry::new(2026);
        registry.teams.insert(
            "OKC".into(),
            TeamRules {
                first_round: vec![TradeRule::Direct { to: "ZZZ".into() }],
                second_round: vec![],
            },
        );
        let issues = registry.validate(&KNOWN);
        assert_eq!(
            issues,
            vec![RegistryIssue::UnknownTeam {
                owner: "OKC".into(),
                team: "ZZZ".into()
            }]
        );
    }

    #[test]
    fn validate_flags_bad_windows_and_shapes() {
        let mut registry = TradeRuleRegistry::new(2026);
        registry.teams.insert(
            "WAS".into(),
            TeamRules {
                first_round: vec![
                    TradeRule::RangeConditional {
                        lo: 9,
                        hi: 5,
                        to: "MEM".into(),
                    },
                    TradeRule::Pool {
                        participants: vec![PoolSource::team("OKC")],
                        ranked_assignment: vec![],
                    },
                ],
                second_round: vec![],
            },
        );
        let issues = registry.validate(&KNOWN);
        assert!(issues
            .iter()
            .any(|i| matches!(i, RegistryIssue::MalformedRule { detail, .. } if detail.contains("window"))));
        assert!(issues
            .iter()
            .any(|i| matches!(i, RegistryIssue::MalformedRule { detail, .. } if detail.contains("no destinations"))));
    }

    #[test]
    fn validate_flags_leftover_index_out_of_range() {
        let mut registry = TradeRuleRegistry::new(2026);
        registry.teams.insert(
            "MEM".into(),
            TeamRules {
                first_round: vec![TradeRule::CascadingSwap {
                    inner: vec![InnerSwap {
                        swap: SwapSpec {
                            participants: vec![
                                PoolSource::team("PHX"),
                                PoolSource::team("WAS"),
                            ],
                            assignment: vec![Some("PHX".into())],
                        },
                        carry: Carry::LeastFavorableUnassigned,
                    }],
                    outer: SwapSpec {
                        participants: vec![
                            PoolSource::Remainder { index: 3 },
                            PoolSource::team("MEM"),
                        ],
                        assignment: vec![Some("MEM".into())],
                    },
                }],
                second_round: vec![],
            },
        );
        let issues = registry.validate(&["PHX", "WAS", "MEM"]);
        assert!(issues
            .iter()
            .any(|i| matches!(i, RegistryIssue::MalformedRule { detail, .. } if detail.contains("leftover #4"))));
    }
}
