//! Keyboard and touch input coordination
//!
//! Both sources end up as the same truck moves and pickups. This module only
//! tracks what is held and tells the engine what to do about each event; the
//! engine owns the repeat timers.

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

/// A keyboard key the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Arrow(Direction),
    Pickup,
}

impl Key {
    /// Map a DOM-style key name (`ArrowUp`, `p`, ...) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Arrow(Direction::Up)),
            "ArrowDown" => Some(Key::Arrow(Direction::Down)),
            "ArrowLeft" => Some(Key::Arrow(Direction::Left)),
            "ArrowRight" => Some(Key::Arrow(Direction::Right)),
            "p" | "P" => Some(Key::Pickup),
            _ => None,
        }
    }
}

/// An on-screen touch control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Pad(Direction),
    Pickup,
}

impl Control {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "up" => Some(Control::Pad(Direction::Up)),
            "down" => Some(Control::Pad(Direction::Down)),
            "left" => Some(Control::Pad(Direction::Left)),
            "right" => Some(Control::Pad(Direction::Right)),
            "pickup" => Some(Control::Pickup),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Pad(Direction::Up) => "up",
            Control::Pad(Direction::Down) => "down",
            Control::Pad(Direction::Left) => "left",
            Control::Pad(Direction::Right) => "right",
            Control::Pickup => "pickup",
        }
    }
}

/// What the engine should do in response to an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// First arrow key went down: start the keyboard repeat
    StartKeyRepeat,
    /// Last arrow key came up: stop the keyboard repeat
    StopKeyRepeat,
    /// One pickup (press edge only)
    Pickup,
    /// Touch pad pressed: move once now, then repeat for this direction
    StartTouchRepeat(Direction),
    /// Touch pad released or cancelled
    StopTouchRepeat(Direction),
}

/// Held-input bookkeeping for both sources
#[derive(Debug, Clone, Default)]
pub struct InputCoordinator {
    /// Arrow keys in press order
    held_keys: Vec<Direction>,
    pickup_key_down: bool,
    held_pads: Vec<Direction>,
    pickup_pad_down: bool,
}

impl InputCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) -> InputAction {
        match key {
            Key::Arrow(dir) => {
                if self.held_keys.contains(&dir) {
                    // OS auto-repeat; the engine has its own cadence
                    return InputAction::None;
                }
                self.held_keys.push(dir);
                if self.held_keys.len() == 1 {
                    InputAction::StartKeyRepeat
                } else {
                    InputAction::None
                }
            }
            Key::Pickup => press_edge(&mut self.pickup_key_down),
        }
    }

    pub fn key_up(&mut self, key: Key) -> InputAction {
        match key {
            Key::Arrow(dir) => {
                let before = self.held_keys.len();
                self.held_keys.retain(|&d| d != dir);
                if before > 0 && self.held_keys.is_empty() {
                    InputAction::StopKeyRepeat
                } else {
                    InputAction::None
                }
            }
            Key::Pickup => {
                self.pickup_key_down = false;
                InputAction::None
            }
        }
    }

    pub fn touch_start(&mut self, control: Control) -> InputAction {
        match control {
            Control::Pad(dir) => {
                if self.held_pads.contains(&dir) {
                    return InputAction::None;
                }
                self.held_pads.push(dir);
                InputAction::StartTouchRepeat(dir)
            }
            Control::Pickup => press_edge(&mut self.pickup_pad_down),
        }
    }

    /// Release or cancel of a touch control
    pub fn touch_end(&mut self, control: Control) -> InputAction {
        match control {
            Control::Pad(dir) => {
                if !self.held_pads.contains(&dir) {
                    return InputAction::None;
                }
                self.held_pads.retain(|&d| d != dir);
                InputAction::StopTouchRepeat(dir)
            }
            Control::Pickup => {
                self.pickup_pad_down = false;
                InputAction::None
            }
        }
    }

    /// Arrow keys currently held, in press order
    pub fn held_keys(&self) -> &[Direction] {
        &self.held_keys
    }

    pub fn held_pads(&self) -> &[Direction] {
        &self.held_pads
    }

    pub fn is_pad_held(&self, dir: Direction) -> bool {
        self.held_pads.contains(&dir)
    }

    /// Forget everything held (focus loss, teardown)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

fn press_edge(down: &mut bool) -> InputAction {
    if *down {
        InputAction::None
    } else {
        *down = true;
        InputAction::Pickup
    }
}
