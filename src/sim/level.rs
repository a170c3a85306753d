//! Level catalog
//!
//! Levels are a fixed ordered sequence, numbered from 1. Nothing is generated
//! procedurally; bin positions are the only per-play randomness.

use serde::{Deserialize, Serialize};

/// Immutable description of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// 1-based ordinal
    pub number: u32,
    pub stationary_bins: u32,
    pub moving_bins: u32,
    /// Whether the barrier pen and its gate are active
    pub has_barriers: bool,
    /// Time limit in seconds
    pub time_limit: u32,
}

impl LevelDef {
    pub fn total_bins(&self) -> u32 {
        self.stationary_bins + self.moving_bins
    }
}

/// The four stock levels
pub fn default_levels() -> Vec<LevelDef> {
    vec![
        LevelDef {
            number: 1,
            stationary_bins: 8,
            moving_bins: 0,
            has_barriers: false,
            time_limit: 60,
        },
        LevelDef {
            number: 2,
            stationary_bins: 4,
            moving_bins: 4,
            has_barriers: false,
            time_limit: 120,
        },
        LevelDef {
            number: 3,
            stationary_bins: 4,
            moving_bins: 4,
            has_barriers: true,
            time_limit: 120,
        },
        LevelDef {
            number: 4,
            stationary_bins: 0,
            moving_bins: 8,
            has_barriers: true,
            time_limit: 180,
        },
    ]
}

/// Look up a level by its 1-based number
pub fn level_by_number(levels: &[LevelDef], number: u32) -> Option<&LevelDef> {
    let index = number.checked_sub(1)? as usize;
    levels.get(index)
}
