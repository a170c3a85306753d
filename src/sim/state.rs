//! Game state and core simulation types
//!
//! Everything the presentation layer observes lives here. It serializes to
//! JSON so a page can render straight from a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::config::GameConfig;

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the first start command
    #[default]
    NotStarted,
    /// Active gameplay; the only status in which motion and pickup do anything
    Playing,
    /// Level cleared, waiting for the continue command
    LevelComplete,
    /// Last level cleared
    Won,
    /// Ran out of time
    Lost,
}

/// One of the four truck movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen coordinates (y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// The player's truck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub pos: Vec2,
    /// Set by an accepted move, cleared after a short idle period
    pub is_moving: bool,
    /// Arm raised for a pickup
    pub is_picking_up: bool,
    /// Engine clock time of the last accepted move
    #[serde(skip)]
    pub last_move_ms: u64,
}

impl Truck {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            is_moving: false,
            is_picking_up: false,
            last_move_ms: 0,
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::at(self.pos, config.truck.size)
    }
}

/// A collectible trash bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashBin {
    pub pos: Vec2,
    /// Once true, never false again
    pub is_empty: bool,
    /// Lift animation flag, cleared shortly after a pickup
    pub is_lifting: bool,
    /// Patrols the arena when true
    pub moving: bool,
    /// Per-tick heading, scaled by bin speed (zero for stationary bins)
    pub direction: Vec2,
}

impl TrashBin {
    pub fn stationary(pos: Vec2) -> Self {
        Self {
            pos,
            is_empty: false,
            is_lifting: false,
            moving: false,
            direction: Vec2::ZERO,
        }
    }

    pub fn patrolling(pos: Vec2, direction: Vec2) -> Self {
        Self {
            moving: true,
            direction,
            ..Self::stationary(pos)
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::at(self.pos, config.bins.size)
    }
}

/// The openable segment of the barrier pen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub rect: Rect,
    pub is_open: bool,
}

/// Complete observable game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    /// 1-based level number; already advanced while in `LevelComplete`
    pub current_level: u32,
    pub score: u32,
    /// Whole seconds remaining
    pub time_left: u32,
    /// Low-time warning blink state
    pub warning: bool,
    /// Whether the level being played uses the barrier pen
    pub has_barriers: bool,
    pub truck: Truck,
    pub bins: Vec<TrashBin>,
    pub gate: Gate,
}

impl GameState {
    /// Fresh state waiting for the first start
    pub fn new(config: &GameConfig) -> Self {
        Self {
            status: GameStatus::NotStarted,
            current_level: 1,
            score: 0,
            time_left: 0,
            warning: false,
            has_barriers: false,
            truck: Truck::new(config.truck.home),
            bins: Vec::new(),
            gate: Gate {
                rect: config.gate,
                is_open: false,
            },
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Barriers that currently block movement (empty on barrier-free levels)
    pub fn active_barriers<'a>(&self, config: &'a GameConfig) -> &'a [Rect] {
        if self.has_barriers {
            &config.barriers
        } else {
            &[]
        }
    }

    /// The gate rectangle when it currently blocks bins
    pub fn blocking_gate(&self) -> Option<Rect> {
        (self.has_barriers && !self.gate.is_open).then_some(self.gate.rect)
    }

    pub fn all_bins_empty(&self) -> bool {
        self.bins.iter().all(|b| b.is_empty)
    }

    pub fn bins_remaining(&self) -> usize {
        self.bins.iter().filter(|b| !b.is_empty).count()
    }

    /// Countdown as `M:SS`
    pub fn time_display(&self) -> String {
        crate::format_time(self.time_left)
    }

    /// Drop presentation-only flags whose clearing timers were cancelled
    pub fn clear_transient_flags(&mut self) {
        self.truck.is_moving = false;
        self.truck.is_picking_up = false;
        self.warning = false;
        for bin in &mut self.bins {
            bin.is_lifting = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_at_home() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.truck.pos, Vec2::new(200.0, 200.0));
        assert!(state.bins.is_empty());
        assert!(state.active_barriers(&config).is_empty());
    }

    #[test]
    fn test_active_barriers_follow_level_flag() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.has_barriers = true;
        assert_eq!(state.active_barriers(&config).len(), 5);
        assert_eq!(state.blocking_gate(), Some(config.gate));

        state.gate.is_open = true;
        assert_eq!(state.blocking_gate(), None);

        state.has_barriers = false;
        state.gate.is_open = false;
        assert_eq!(state.blocking_gate(), None);
    }

    #[test]
    fn test_direction_deltas_are_single_axis() {
        for dir in Direction::ALL {
            let d = dir.delta();
            assert_eq!(d.x.abs() + d.y.abs(), 1.0);
        }
        assert_eq!(Direction::Up.delta(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.bins.push(TrashBin::patrolling(Vec2::new(1.0, 2.0), Vec2::new(0.5, -0.5)));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"status\":\"NotStarted\""));
        assert!(json.contains("\"moving\":true"));
    }
}
