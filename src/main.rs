//! Trash Truck entry point
//!
//! The browser build mounts the engine through `trash_truck::web`. Natively
//! this runs a headless autopilot game and logs what happens:
//!
//! ```text
//! RUST_LOG=info trash-truck [config.json] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use trash_truck::{Engine, GameConfig};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x7A54_7A54_u64);

    log::info!("Trash Truck (native) starting with seed {}", seed);
    let mut engine = match Engine::new(config, seed) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    let summary = autopilot::run(&mut engine);
    println!(
        "{:?} on level {} with score {} ({} left, {} ms simulated)",
        summary.status, summary.level, summary.score, summary.time_left, summary.elapsed_ms
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is trash_truck::web::wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<trash_truck::GameConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(trash_truck::GameConfig::from_json(&json)?)
}

/// A greedy bot that drives toward the nearest full bin
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use trash_truck::sim::geom::clamp_to_arena;
    use trash_truck::{Direction, Engine, GameStatus};

    /// Simulated time per bot decision
    const STEP_MS: u64 = 50;
    /// Give up after this much simulated time
    const MAX_MS: u64 = 30 * 60 * 1000;

    pub struct Summary {
        pub status: GameStatus,
        pub level: u32,
        pub score: u32,
        pub time_left: u32,
        pub elapsed_ms: u64,
    }

    pub fn run(engine: &mut Engine) -> Summary {
        engine.start();

        while engine.now_ms() < MAX_MS {
            match engine.status() {
                GameStatus::Playing => drive(engine),
                GameStatus::LevelComplete => {
                    log::info!("Level cleared, continuing to {}", engine.state().current_level);
                    engine.continue_to_next_level();
                }
                GameStatus::Won | GameStatus::Lost | GameStatus::NotStarted => break,
            }
            engine.advance(STEP_MS);
        }

        let state = engine.state();
        Summary {
            status: state.status,
            level: state.current_level,
            score: state.score,
            time_left: state.time_left,
            elapsed_ms: engine.now_ms(),
        }
    }

    /// Where the truck has to stand to pick up a bin at `bin_pos`
    fn target_for(engine: &Engine, bin_pos: Vec2) -> Vec2 {
        let config = engine.config();
        let offset = (config.truck.size - config.bins.size) / 2.0;
        clamp_to_arena(bin_pos - offset, config.truck.size, config.arena)
    }

    fn drive(engine: &mut Engine) {
        let truck = engine.state().truck.pos;
        let Some(target) = engine
            .state()
            .bins
            .iter()
            .filter(|b| !b.is_empty)
            .map(|b| target_for(engine, b.pos))
            .min_by(|a, b| a.distance_squared(truck).total_cmp(&b.distance_squared(truck)))
        else {
            return;
        };

        let speed = engine.config().truck.speed;
        let delta = target - truck;
        if delta.x.abs() < speed && delta.y.abs() < speed {
            engine.pickup();
            return;
        }

        let horizontal = if delta.x > 0.0 { Direction::Right } else { Direction::Left };
        let vertical = if delta.y > 0.0 { Direction::Down } else { Direction::Up };
        let (first, second) = if delta.x.abs() >= delta.y.abs() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };

        // Slide along whatever wall is in the way
        if !engine.move_truck(first) {
            engine.move_truck(second);
        }
    }
}
