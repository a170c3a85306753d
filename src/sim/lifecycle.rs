//! Game lifecycle state machine and level setup
//!
//! All status changes go through [`GameStatus::transition`]; anything it does
//! not list is rejected.

use glam::Vec2;
use rand::Rng;

use super::bins::random_direction;
use super::geom::{Rect, collides_any, max_position};
use super::level::{LevelDef, level_by_number};
use super::state::{GameState, GameStatus, Truck, TrashBin};
use crate::config::GameConfig;

/// Something that may move the game to another status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Start (or restart) from level 1
    Start,
    /// Proceed from a completed level to the next one
    Continue,
    /// Every bin of the level has been emptied
    AllBinsEmptied { last_level: bool },
    /// The countdown reached zero
    TimeUp,
}

impl GameStatus {
    /// The status reached from `self` on `event`, or `None` if not allowed
    pub fn transition(self, event: LifecycleEvent) -> Option<GameStatus> {
        use GameStatus::*;
        use LifecycleEvent::*;
        match (self, event) {
            (NotStarted | Won | Lost, Start) => Some(Playing),
            (Playing, AllBinsEmptied { last_level: false }) => Some(LevelComplete),
            (Playing, AllBinsEmptied { last_level: true }) => Some(Won),
            (Playing, TimeUp) => Some(Lost),
            (LevelComplete, Continue) => Some(Playing),
            _ => None,
        }
    }
}

fn apply(state: &mut GameState, event: LifecycleEvent) -> bool {
    match state.status.transition(event) {
        Some(next) => {
            log::info!("{:?} -> {:?} ({:?})", state.status, next, event);
            state.status = next;
            true
        }
        None => {
            log::debug!("Ignoring {:?} while {:?}", event, state.status);
            false
        }
    }
}

/// Start a new game at level 1. Valid from `NotStarted`, `Won`, and `Lost`.
pub fn start_game<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> bool {
    let Some(level) = level_by_number(&config.levels, 1).copied() else {
        return false;
    };
    if !apply(state, LifecycleEvent::Start) {
        return false;
    }
    state.current_level = 1;
    initialize_level(state, config, &level, rng);
    true
}

/// Begin the level `current_level` already points at
pub fn continue_to_next_level<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> bool {
    let Some(level) = level_by_number(&config.levels, state.current_level).copied() else {
        log::warn!("No level {} in catalog", state.current_level);
        return false;
    };
    if !apply(state, LifecycleEvent::Continue) {
        return false;
    }
    initialize_level(state, config, &level, rng);
    true
}

/// Finish the level if every bin is empty. Returns true on a status change.
pub fn check_level_complete(state: &mut GameState, config: &GameConfig) -> bool {
    if !state.is_playing() || !state.all_bins_empty() {
        return false;
    }
    let last_level = state.current_level as usize >= config.levels.len();
    if !apply(state, LifecycleEvent::AllBinsEmptied { last_level }) {
        return false;
    }
    if !last_level {
        state.current_level += 1;
    }
    true
}

/// One countdown second. Returns true when time ran out.
pub fn countdown_tick(state: &mut GameState) -> bool {
    if !state.is_playing() {
        return false;
    }
    if state.time_left <= 1 {
        state.time_left = 0;
        apply(state, LifecycleEvent::TimeUp)
    } else {
        state.time_left -= 1;
        false
    }
}

/// Blink the warning while time is low, keep it off otherwise
pub fn warning_tick(state: &mut GameState, threshold_secs: u32) {
    if !state.is_playing() {
        return;
    }
    state.warning = state.time_left <= threshold_secs && !state.warning;
}

/// Build the entity set for `level` and reset the per-level counters
pub fn initialize_level<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    level: &LevelDef,
    rng: &mut R,
) {
    let barriers: &[Rect] = if level.has_barriers {
        &config.barriers
    } else {
        &[]
    };

    let mut bins = Vec::with_capacity(level.total_bins() as usize);
    for _ in 0..level.stationary_bins {
        bins.push(TrashBin::stationary(place_bin(config, barriers, rng)));
    }
    for _ in 0..level.moving_bins {
        let pos = place_bin(config, barriers, rng);
        bins.push(TrashBin::patrolling(pos, random_direction(rng)));
    }

    state.bins = bins;
    state.score = 0;
    state.time_left = level.time_limit;
    state.warning = false;
    state.has_barriers = level.has_barriers;
    state.truck = Truck::new(config.truck.home);
    state.gate.rect = config.gate;
    state.gate.is_open = !level.has_barriers;

    log::info!(
        "Level {}: {} stationary, {} moving, barriers={}, {}s",
        level.number,
        level.stationary_bins,
        level.moving_bins,
        level.has_barriers,
        level.time_limit
    );
}

/// Random bin position clear of `barriers`.
///
/// Rejection sampling is bounded by the configured attempt count; past that
/// the first free cell of a bin-sized grid is used, then the origin.
pub fn place_bin<R: Rng>(config: &GameConfig, barriers: &[Rect], rng: &mut R) -> Vec2 {
    let size = config.bins.size;
    let max = max_position(config.arena, size);

    for _ in 0..config.bins.placement_attempts {
        let pos = Vec2::new(rng.random_range(0.0..=max.x), rng.random_range(0.0..=max.y));
        if !collides_any(&Rect::at(pos, size), barriers) {
            return pos;
        }
    }

    log::warn!(
        "Bin placement gave up after {} attempts, scanning grid",
        config.bins.placement_attempts
    );
    grid_fallback(config, barriers).unwrap_or(Vec2::ZERO)
}

/// First bin-sized grid cell, scanning row by row, that avoids `barriers`
fn grid_fallback(config: &GameConfig, barriers: &[Rect]) -> Option<Vec2> {
    let size = config.bins.size;
    let max = max_position(config.arena, size);
    let cols = (max.x / size.x).floor() as u32;
    let rows = (max.y / size.y).floor() as u32;

    (0..=rows)
        .flat_map(|row| (0..=cols).map(move |col| Vec2::new(col as f32, row as f32) * size))
        .find(|&pos| !collides_any(&Rect::at(pos, size), barriers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_transition_table() {
        use GameStatus::*;
        use LifecycleEvent::*;

        assert_eq!(NotStarted.transition(Start), Some(Playing));
        assert_eq!(Won.transition(Start), Some(Playing));
        assert_eq!(Lost.transition(Start), Some(Playing));
        assert_eq!(Playing.transition(TimeUp), Some(Lost));
        assert_eq!(
            Playing.transition(AllBinsEmptied { last_level: false }),
            Some(LevelComplete)
        );
        assert_eq!(Playing.transition(AllBinsEmptied { last_level: true }), Some(Won));
        assert_eq!(LevelComplete.transition(Continue), Some(Playing));

        assert_eq!(Playing.transition(Start), None);
        assert_eq!(NotStarted.transition(Continue), None);
        assert_eq!(LevelComplete.transition(Start), None);
        assert_eq!(LevelComplete.transition(TimeUp), None);
        assert_eq!(Lost.transition(TimeUp), None);
        assert_eq!(Won.transition(Continue), None);
    }

    #[test]
    fn test_start_initializes_level_one() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&config);

        assert!(start_game(&mut state, &config, &mut rng));
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.time_left, 60);
        assert_eq!(state.bins.len(), 8);
        assert!(state.bins.iter().all(|b| !b.moving && b.direction == Vec2::ZERO));
        assert!(!state.has_barriers);
        assert!(state.gate.is_open);

        // Already playing
        assert!(!start_game(&mut state, &config, &mut rng));
    }

    #[test]
    fn test_stationary_bins_come_first() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&config);
        let level = config.levels[1];

        initialize_level(&mut state, &config, &level, &mut rng);
        let moving: Vec<bool> = state.bins.iter().map(|b| b.moving).collect();
        assert_eq!(moving, [false, false, false, false, true, true, true, true]);
    }

    #[test]
    fn test_barrier_level_placement_and_gate() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut state = GameState::new(&config);
        let level = config.levels[3];

        initialize_level(&mut state, &config, &level, &mut rng);
        assert!(state.has_barriers);
        assert!(!state.gate.is_open);
        for bin in &state.bins {
            assert!(!collides_any(&bin.rect(&config), &config.barriers));
        }
    }

    #[test]
    fn test_level_complete_advances_counter() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&config);
        start_game(&mut state, &config, &mut rng);

        assert!(!check_level_complete(&mut state, &config));
        for bin in &mut state.bins {
            bin.is_empty = true;
        }
        assert!(check_level_complete(&mut state, &config));
        assert_eq!(state.status, GameStatus::LevelComplete);
        assert_eq!(state.current_level, 2);

        assert!(continue_to_next_level(&mut state, &config, &mut rng));
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.time_left, 120);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_level_is_won() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&config);
        start_game(&mut state, &config, &mut rng);
        state.current_level = 4;
        for bin in &mut state.bins {
            bin.is_empty = true;
        }

        assert!(check_level_complete(&mut state, &config));
        assert_eq!(state.status, GameStatus::Won);
        assert_eq!(state.current_level, 4);
        assert!(!continue_to_next_level(&mut state, &config, &mut rng));
    }

    #[test]
    fn test_countdown_runs_out() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.status = GameStatus::Playing;
        state.time_left = 2;

        assert!(!countdown_tick(&mut state));
        assert_eq!(state.time_left, 1);
        assert!(countdown_tick(&mut state));
        assert_eq!(state.time_left, 0);
        assert_eq!(state.status, GameStatus::Lost);

        // Late tick is harmless
        assert!(!countdown_tick(&mut state));
        assert_eq!(state.status, GameStatus::Lost);
    }

    #[test]
    fn test_warning_blinks_only_when_low() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.status = GameStatus::Playing;
        state.time_left = 30;

        warning_tick(&mut state, 10);
        assert!(!state.warning);

        state.time_left = 10;
        warning_tick(&mut state, 10);
        assert!(state.warning);
        warning_tick(&mut state, 10);
        assert!(!state.warning);
    }

    #[test]
    fn test_placement_falls_back_to_grid() {
        let mut config = GameConfig::default();
        config.bins.placement_attempts = 0;
        let mut rng = Pcg32::seed_from_u64(1);
        let wall = [Rect::new(0.0, 0.0, 600.0, 100.0)];

        let pos = place_bin(&config, &wall, &mut rng);
        assert_eq!(pos, Vec2::new(0.0, 120.0));
    }

    #[test]
    fn test_placement_with_no_free_cell_uses_origin() {
        let mut config = GameConfig::default();
        config.bins.placement_attempts = 5;
        let mut rng = Pcg32::seed_from_u64(1);
        let everything = [Rect::new(-1.0, -1.0, 700.0, 500.0)];

        assert_eq!(place_bin(&config, &everything, &mut rng), Vec2::ZERO);
    }
}
