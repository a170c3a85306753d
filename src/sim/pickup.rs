//! Bin pickup
//!
//! A bin is collected when the truck overlaps it and their vertical centers
//! are close: grazing a bin diagonally with a corner of the truck is not
//! enough.

use super::state::GameState;
use crate::config::GameConfig;

/// Collect every aligned, non-empty bin under the truck.
///
/// Returns the number of bins collected by this pickup.
pub fn pickup(state: &mut GameState, config: &GameConfig) -> u32 {
    if !state.is_playing() {
        return 0;
    }

    state.truck.is_picking_up = true;
    let truck = state.truck.rect(config);
    let tolerance = config.bins.pickup_tolerance;

    let mut collected = 0;
    for bin in &mut state.bins {
        if bin.is_empty {
            continue;
        }
        let rect = bin.rect(config);
        if truck.intersects(&rect) && (truck.center_y() - rect.center_y()).abs() < tolerance {
            bin.is_empty = true;
            bin.is_lifting = true;
            bin.moving = false;
            collected += 1;
        }
    }

    state.score += collected;
    if collected > 0 {
        log::debug!(
            "Picked up {} bin(s), score {}, {} left",
            collected,
            state.score,
            state.bins_remaining()
        );
    }
    collected
}

/// End the lift animation on every bin and lower the truck arm
pub fn clear_lifting(state: &mut GameState) {
    state.truck.is_picking_up = false;
    for bin in &mut state.bins {
        bin.is_lifting = false;
    }
}
