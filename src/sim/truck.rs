//! Truck motion and gate handling

use super::geom::{Rect, clamp_to_arena, collides_any};
use super::state::{Direction, GameState};
use crate::config::GameConfig;

/// Try to move the truck one step of `step` units in `direction`.
///
/// The gate reacts to the candidate position before the move is judged, so a
/// truck that reaches the gate on this step is let through on the same step.
/// Returns true if the move was accepted.
pub fn move_truck(
    state: &mut GameState,
    config: &GameConfig,
    direction: Direction,
    step: f32,
    now_ms: u64,
) -> bool {
    if !state.is_playing() {
        return false;
    }

    let size = config.truck.size;
    let candidate = clamp_to_arena(state.truck.pos + direction.delta() * step, size, config.arena);
    let rect = Rect::at(candidate, size);

    let near_gate = rect.intersects(&state.gate.rect);
    if near_gate && !state.gate.is_open {
        state.gate.is_open = true;
        log::debug!("Gate opened");
    } else if !near_gate && state.gate.is_open && state.has_barriers {
        state.gate.is_open = false;
        log::debug!("Gate closed");
    }

    let clear = !collides_any(&rect, state.active_barriers(config));
    if clear || (near_gate && state.gate.is_open) {
        state.truck.pos = candidate;
        state.truck.is_moving = true;
        state.truck.last_move_ms = now_ms;
        true
    } else {
        false
    }
}

/// Clear the moving flag once the truck has been idle for `idle_ms`
pub fn decay_moving(state: &mut GameState, now_ms: u64, idle_ms: u64) {
    if now_ms.saturating_sub(state.truck.last_move_ms) > idle_ms {
        state.truck.is_moving = false;
    }
}
