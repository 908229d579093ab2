// Official post-2019 lottery odds: 1000 combinations split across 14 ranks.

use serde::{Deserialize, Serialize};

/// Combinations held by each lottery rank (rank 1 = worst record).
pub const TOP_PICK_WEIGHTS: [u32; 14] = [140, 140, 140, 125, 105, 90, 75, 60, 45, 30, 20, 15, 10, 5];

/// Total number of combination slots in the drum.
pub const TOTAL_COMBINATIONS: u32 = 1000;

/// The slice of the combination drum owned by one lottery rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotteryRange {
    /// Lottery rank, 1 (worst record) through 14.
    pub rank: u8,
    /// Number of combinations held.
    pub weight: u32,
    /// First owned slot, inclusive (1-based).
    pub start: u32,
    /// Last owned slot, inclusive.
    pub end: u32,
    /// Chance of winning the first overall pick, in percent.
    pub odds_pct: f64,
}

/// Build the contiguous combination ranges for all 14 ranks.
pub fn build_ranges() -> Vec<LotteryRange> {
    let mut ranges = Vec::with_capacity(TOP_PICK_WEIGHTS.len());
    let mut next_start = 1u32;
    for (idx, &weight) in TOP_PICK_WEIGHTS.iter().enumerate() {
        let end = next_start + weight - 1;
        ranges.push(LotteryRange {
            rank: (idx + 1) as u8,
            weight,
            start: next_start,
            end,
            odds_pct: weight as f64 / TOTAL_COMBINATIONS as f64 * 100.0,
        });
        next_start = end + 1;
    }
    ranges
}
