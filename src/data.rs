// Built-in 2026 dataset: team codes, a standings snapshot and the full
// trade-rule registry for the draft year.

use crate::rules::{
    Carry, InnerSwap, PoolSource, SwapSpec, TeamRules, TradeRule, TradeRuleRegistry,
};
use crate::standings::{StandingsSnapshot, Team};

/// The 30 franchise codes.
pub const TEAM_CODES: [&str; 30] = [
    "ATL", "BOS", "BKN", "CHA", "CHI", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MEM", "MIA", "MIL", "MIN", "NOP", "NYK", "OKC", "ORL", "PHI", "PHX", "POR", "SAC",
    "SAS", "TOR", "UTA", "WAS",
];

/// End-of-season standings feeding the 2026 draft.
pub fn standings_2026() -> StandingsSnapshot {
    let lottery = [
        ("UTA", 17, 65),
        ("WAS", 19, 63),
        ("CHA", 21, 61),
        ("NOP", 23, 59),
        ("POR", 25, 57),
        ("TOR", 27, 55),
        ("SAS", 29, 53),
        ("BKN", 31, 51),
        ("PHX", 33, 49),
        ("MIA", 35, 47),
        ("CHI", 36, 46),
        ("DAL", 38, 44),
        ("SAC", 39, 43),
        ("ATL", 40, 42),
    ];
    let playoff = [
        ("ORL", 44, 38),
        ("DET", 45, 37),
        ("MIL", 46, 36),
        ("IND", 47, 35),
        ("GSW", 48, 34),
        ("MIN", 49, 33),
        ("LAL", 50, 32),
        ("LAC", 51, 31),
        ("MEM", 52, 30),
        ("DEN", 53, 29),
        ("NYK", 54, 28),
        ("HOU", 55, 27),
        ("PHI", 56, 26),
        ("BOS", 57, 25),
        ("CLE", 59, 23),
        ("OKC", 64, 18),
    ];
    StandingsSnapshot {
        lottery: lottery
            .iter()
            .map(|&(code, w, l)| Team::new(code, w, l))
            .collect(),
        playoff: playoff
            .iter()
            .map(|&(code, w, l)| Team::new(code, w, l))
            .collect(),
    }
}

fn team_rules(first_round: Vec<TradeRule>, second_round: Vec<TradeRule>) -> TeamRules {
    TeamRules {
        first_round,
        second_round,
    }
}

/// Every pick obligation in force for the 2026 draft, as typed rules.
pub fn registry_2026() -> TradeRuleRegistry {
    let mut registry = TradeRuleRegistry::new(2026);

    // OKC pools its own pick with LAC's and, once HOU clears its top-4
    // protection, HOU's; the two most favorable stay, the worst goes out.
    registry.teams.insert(
        "OKC".into(),
        team_rules(
            vec![TradeRule::Pool {
                participants: vec![
                    PoolSource::team("OKC"),
                    PoolSource::team("LAC"),
                    PoolSource::team_in("HOU", 5, 30),
                ],
                ranked_assignment: vec!["OKC".into(), "OKC".into(), "WAS".into()],
            }],
            vec![],
        ),
    );

    // MEM first picks up the worse of PHX/WAS (WAS only past its top-8
    // protection), then pools that with its own and ORL's picks. Its own
    // second conveys by range.
    registry.teams.insert(
        "MEM".into(),
        team_rules(
            vec![TradeRule::CascadingSwap {
                inner: vec![InnerSwap {
                    swap: SwapSpec {
                        participants: vec![
                            PoolSource::team("PHX"),
                            PoolSource::team_in("WAS", 9, 30),
                        ],
                        assignment: vec![],
                    },
                    carry: Carry::LeastFavorableUnassigned,
                }],
                outer: SwapSpec {
                    participants: vec![
                        PoolSource::Remainder { index: 0 },
                        PoolSource::team("MEM"),
                        PoolSource::team("ORL"),
                    ],
                    assignment: vec![Some("MEM".into()), Some("MEM".into()), Some("CHA".into())],
                },
            }],
            vec![
                TradeRule::RangeConditional {
                    lo: 31,
                    hi: 42,
                    to: "LAC".into(),
                },
                TradeRule::RangeConditional {
                    lo: 43,
                    hi: 60,
                    to: "POR".into(),
                },
            ],
        ),
    );

    // ATL's seven-team web: UTA takes the two best of CLE/MIN/UTA (UTA's
    // own joins only while it sits in the top eight), SAS takes the better
    // of ATL/SAS, and ATL and CLE split whatever is left.
    registry.teams.insert(
        "ATL".into(),
        team_rules(
            vec![
                TradeRule::CascadingSwap {
                    inner: vec![
                        InnerSwap {
                            swap: SwapSpec {
                                participants: vec![
                                    PoolSource::team("CLE"),
                                    PoolSource::team("MIN"),
                                    PoolSource::team_in("UTA", 1, 8),
                                ],
                                assignment: vec![Some("UTA".into()), Some("UTA".into())],
                            },
                            carry: Carry::LeastFavorableUnassigned,
                        },
                        InnerSwap {
                            swap: SwapSpec {
                                participants: vec![
                                    PoolSource::team("ATL"),
                                    PoolSource::team("SAS"),
                                ],
                                assignment: vec![Some("SAS".into())],
                            },
                            carry: Carry::LeastFavorableUnassigned,
                        },
                    ],
                    outer: SwapSpec {
                        participants: vec![
                            PoolSource::Remainder { index: 0 },
                            PoolSource::Remainder { index: 1 },
                        ],
                        assignment: vec![Some("ATL".into()), Some("CLE".into())],
                    },
                },
                TradeRule::FavorableSwap {
                    swap: SwapSpec {
                        participants: vec![PoolSource::team("NOP"), PoolSource::team("MIL")],
                        assignment: vec![Some("ATL".into()), Some("MIL".into())],
                    },
                },
            ],
            vec![TradeRule::Direct { to: "BKN".into() }],
        ),
    );

    // WAS conveys inside the top eight to MEM; past that the swap above
    // normally takes the pick, with CHA as the fallback destination.
    registry.teams.insert(
        "WAS".into(),
        team_rules(
            vec![
                TradeRule::RangeConditional {
                    lo: 1,
                    hi: 8,
                    to: "MEM".into(),
                },
                TradeRule::RangeConditional {
                    lo: 9,
                    hi: 30,
                    to: "CHA".into(),
                },
            ],
            vec![TradeRule::ConveyIfKeptFirst {
                lo: 1,
                hi: 8,
                to: "NYK".into(),
            }],
        ),
    );

    // PHX carries the same top-8 split as WAS for whichever of the pair
    // stays out of the MEM pool. Its second goes out flat.
    registry.teams.insert(
        "PHX".into(),
        team_rules(
            vec![
                TradeRule::RangeConditional {
                    lo: 1,
                    hi: 8,
                    to: "MEM".into(),
                },
                TradeRule::RangeConditional {
                    lo: 9,
                    hi: 30,
                    to: "CHA".into(),
                },
            ],
            vec![TradeRule::Direct { to: "WAS".into() }],
        ),
    );

    // TOR owes its first outright and the tail of its second.
    registry.teams.insert(
        "TOR".into(),
        team_rules(
            vec![TradeRule::Direct { to: "IND".into() }],
            vec![TradeRule::RangeConditional {
                lo: 56,
                hi: 60,
                to: "IND".into(),
            }],
        ),
    );

    // POR keeps a lottery first, otherwise it goes to CHI.
    registry.teams.insert(
        "POR".into(),
        team_rules(
            vec![TradeRule::RangeConditional {
                lo: 15,
                hi: 30,
                to: "CHI".into(),
            }],
            vec![],
        ),
    );

    // CHA's second conveys by range.
    registry.teams.insert(
        "CHA".into(),
        team_rules(
            vec![],
            vec![
                TradeRule::RangeConditional {
                    lo: 31,
                    hi: 55,
                    to: "SAC".into(),
                },
                TradeRule::RangeConditional {
                    lo: 56,
                    hi: 60,
                    to: "DET".into(),
                },
            ],
        ),
    );

    // Second-round pools.
    registry.teams.insert(
        "DET".into(),
        team_rules(
            vec![],
            vec![TradeRule::Pool {
                participants: vec![
                    PoolSource::team("DET"),
                    PoolSource::team("MIL"),
                    PoolSource::team("ORL"),
                ],
                ranked_assignment: vec!["BOS".into(), "ORL".into(), "NYK".into()],
            }],
        ),
    );
    registry.teams.insert(
        "DAL".into(),
        team_rules(
            vec![],
            vec![TradeRule::Pool {
                participants: vec![
                    PoolSource::team("DAL"),
                    PoolSource::team("OKC"),
                    PoolSource::team("PHI"),
                ],
                ranked_assignment: vec!["OKC".into(), "PHX".into(), "WAS".into()],
            }],
        ),
    );

    // Flat second-round transfers.
    registry.teams.insert(
        "LAL".into(),
        team_rules(vec![], vec![TradeRule::Direct { to: "TOR".into() }]),
    );
    registry.teams.insert(
        "PHI".into(),
        team_rules(vec![], vec![TradeRule::Direct { to: "OKC".into() }]),
    );
    registry.teams.insert(
        "CHI".into(),
        team_rules(vec![], vec![TradeRule::Direct { to: "HOU".into() }]),
    );
    registry.teams.insert(
        "UTA".into(),
        team_rules(vec![], vec![TradeRule::Direct { to: "MIL".into() }]),
    );

    // Second-round swaps.
    registry.teams.insert(
        "DEN".into(),
        team_rules(
            vec![],
            vec![TradeRule::FavorableSwap {
                swap: SwapSpec {
                    participants: vec![PoolSource::team("DEN"), PoolSource::team("GSW")],
                    assignment: vec![Some("CHA".into()), Some("MIN".into())],
                },
            }],
        ),
    );
    // Four-team web: BOS lifts the most favorable of the quartet first,
    // then the pair swaps settle the leftovers.
    registry.teams.insert(
        "MIN".into(),
        team_rules(
            vec![],
            vec![
                TradeRule::Pool {
                    participants: vec![
                        PoolSource::team("MIN"),
                        PoolSource::team("NYK"),
                        PoolSource::team("NOP"),
                        PoolSource::team("POR"),
                    ],
                    ranked_assignment: vec!["BOS".into()],
                },
                TradeRule::FavorableSwap {
                    swap: SwapSpec {
                        participants: vec![PoolSource::team("MIN"), PoolSource::team("NYK")],
                        assignment: vec![None, Some("NYK".into())],
                    },
                },
            ],
        ),
    );
    registry.teams.insert(
        "NOP".into(),
        team_rules(
            vec![],
            vec![
                TradeRule::FavorableSwap {
                    swap: SwapSpec {
                        participants: vec![PoolSource::team("NOP"), PoolSource::team("POR")],
                        assignment: vec![None, Some("SAS".into())],
                    },
                },
                TradeRule::Direct { to: "IND".into() },
            ],
        ),
    );

    // BOS takes the better of IND/MIA into a swap with its own pick.
    registry.teams.insert(
        "BOS".into(),
        team_rules(
            vec![],
            vec![TradeRule::CascadingSwap {
                inner: vec![InnerSwap {
                    swap: SwapSpec {
                        participants: vec![PoolSource::team("IND"), PoolSource::team("MIA")],
                        assignment: vec![],
                    },
                    carry: Carry::MostFavorableUnassigned,
                }],
                outer: SwapSpec {
                    participants: vec![
                        PoolSource::Remainder { index: 0 },
                        PoolSource::team("BOS"),
                    ],
                    assignment: vec![Some("MEM".into()), Some("ATL".into())],
                },
            }],
        ),
    );

    // SAS swaps its own pick against the worse of IND/MIA; the loser of
    // that swap lands with MIN.
    registry.teams.insert(
        "SAS".into(),
        team_rules(
            vec![],
            vec![TradeRule::CascadingSwap {
                inner: vec![InnerSwap {
                    swap: SwapSpec {
                        participants: vec![PoolSource::team("IND"), PoolSource::team("MIA")],
                        assignment: vec![],
                    },
                    carry: Carry::LeastFavorableUnassigned,
                }],
                outer: SwapSpec {
                    participants: vec![
                        PoolSource::Remainder { index: 0 },
                        PoolSource::team("SAS"),
                    ],
                    assignment: vec![Some("SAS".into()), Some("MIN".into())],
                },
            }],
        ),
    );

    // BKN takes the loser of LAC against the best of BOS/IND/MIA, with
    // the winner owed to MEM, and owes the tail of its own second to MIA.
    registry.teams.insert(
        "BKN".into(),
        team_rules(
            vec![],
            vec![
                TradeRule::CascadingSwap {
                    inner: vec![InnerSwap {
                        swap: SwapSpec {
                            participants: vec![
                                PoolSource::team("BOS"),
                                PoolSource::team("IND"),
                                PoolSource::team("MIA"),
                            ],
                            assignment: vec![],
                        },
                        carry: Carry::MostFavorableUnassigned,
                    }],
                    outer: SwapSpec {
                        participants: vec![
                            PoolSource::Remainder { index: 0 },
                            PoolSource::team("LAC"),
                        ],
                        assignment: vec![Some("MEM".into()), Some("BKN".into())],
                    },
                },
                TradeRule::RangeConditional {
                    lo: 56,
                    hi: 60,
                    to: "MIA".into(),
                },
            ],
        ),
    );

    // HOU's second conveys to OKC only after keeping a top-4 first.
    registry.teams.insert(
        "HOU".into(),
        team_rules(
            vec![],
            vec![TradeRule::ConveyIfKeptFirst {
                lo: 1,
                hi: 4,
                to: "OKC".into(),
            }],
        ),
    );

    registry
}
