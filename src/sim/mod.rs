//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Configuration passed in by reference, never read from globals
//! - Seeded RNG only
//! - Stable iteration order (bins in creation order)
//! - No timers, rendering, or platform dependencies

pub mod bins;
pub mod geom;
pub mod level;
pub mod lifecycle;
pub mod pickup;
pub mod state;
pub mod truck;

pub use bins::{advance_bins, random_direction};
pub use geom::{Rect, collides_any, intersects};
pub use level::{LevelDef, default_levels, level_by_number};
pub use lifecycle::{LifecycleEvent, check_level_complete, countdown_tick, start_game};
pub use pickup::{clear_lifting, pickup};
pub use state::{Direction, GameState, GameStatus, Gate, TrashBin, Truck};
pub use truck::{decay_moving, move_truck};
