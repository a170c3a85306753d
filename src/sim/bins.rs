//! Moving bin AI
//!
//! Patrolling bins drift along their direction, bounce off arena walls,
//! reverse on barriers and a closed gate, and occasionally wander off in a
//! fresh random direction.

use glam::Vec2;
use rand::Rng;

use super::geom::{Rect, collides_any, max_position};
use super::state::{GameState, TrashBin};
use crate::config::GameConfig;

/// Uniform heading in [-1, 1] x [-1, 1]
pub fn random_direction<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0))
}

/// Advance every moving, non-empty bin by one bin tick
pub fn advance_bins<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    if !state.is_playing() {
        return;
    }

    let barriers = state.active_barriers(config);
    let gate = state.blocking_gate();

    for bin in &mut state.bins {
        advance_bin(bin, barriers, gate.as_ref(), config, rng);
    }
}

/// One tick for a single bin; empty or stationary bins are left alone
pub fn advance_bin<R: Rng>(
    bin: &mut TrashBin,
    barriers: &[Rect],
    closed_gate: Option<&Rect>,
    config: &GameConfig,
    rng: &mut R,
) {
    if !bin.moving || bin.is_empty {
        return;
    }

    let size = config.bins.size;
    let candidate = bin.pos + bin.direction * config.bins.speed;
    let rect = Rect::at(candidate, size);

    let blocked =
        collides_any(&rect, barriers) || closed_gate.is_some_and(|gate| rect.intersects(gate));

    if blocked {
        // Bounce in place
        bin.direction = -bin.direction;
    } else {
        let max = max_position(config.arena, size);
        let mut pos = candidate;
        if pos.x <= 0.0 || pos.x >= max.x {
            bin.direction.x = -bin.direction.x;
            pos.x = pos.x.clamp(0.0, max.x);
        }
        if pos.y <= 0.0 || pos.y >= max.y {
            bin.direction.y = -bin.direction.y;
            pos.y = pos.y.clamp(0.0, max.y);
        }
        bin.pos = pos;
    }

    if rng.random_bool(config.bins.jitter_chance) {
        bin.direction = random_direction(rng);
    }
}
