//! Browser mount
//!
//! Exposes the engine to a page through `wasm-bindgen`. The page forwards
//! `keydown`/`keyup` key names and touch control ids, calls `advance` from
//! its animation frame loop, and draws from `state_json`.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::engine::Engine;
use crate::input::{Control, Key};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Trash Truck (web) loaded");
}

#[wasm_bindgen]
pub struct TrashTruckGame {
    engine: Engine,
}

#[wasm_bindgen]
impl TrashTruckGame {
    /// Game with the stock configuration
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> TrashTruckGame {
        Self {
            engine: Engine::with_defaults(seed as u64),
        }
    }

    /// Game from a JSON config (arena size, speeds, levels, ...)
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str, seed: f64) -> Result<TrashTruckGame, JsError> {
        let config = GameConfig::from_json(json)?;
        let engine = Engine::new(config, seed as u64)?;
        Ok(Self { engine })
    }

    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    pub fn restart(&mut self) -> bool {
        self.engine.restart()
    }

    #[wasm_bindgen(js_name = continueToNextLevel)]
    pub fn continue_to_next_level(&mut self) -> bool {
        self.engine.continue_to_next_level()
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.engine.key_down(key);
        }
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.engine.key_up(key);
        }
    }

    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, id: &str) {
        if let Some(control) = Control::from_id(id) {
            self.engine.touch_start(control);
        }
    }

    /// Call for both `touchend` and `touchcancel`
    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self, id: &str) {
        if let Some(control) = Control::from_id(id) {
            self.engine.touch_end(control);
        }
    }

    /// Window blur: forget held keys so the truck does not keep driving
    #[wasm_bindgen(js_name = releaseAll)]
    pub fn release_all(&mut self) {
        self.engine.release_all_input();
    }

    /// Advance the game clock by `elapsed_ms` of wall time
    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms > 0.0 {
            self.engine.advance(elapsed_ms.round() as u64);
        }
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(self.engine.snapshot_json()?)
    }

    #[wasm_bindgen(js_name = barriersJson)]
    pub fn barriers_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.engine.active_barriers())?)
    }

    pub fn status(&self) -> String {
        format!("{:?}", self.engine.status())
    }

    #[wasm_bindgen(js_name = timeDisplay)]
    pub fn time_display(&self) -> String {
        self.engine.time_display()
    }

    pub fn score(&self) -> u32 {
        self.engine.state().score
    }

    #[wasm_bindgen(js_name = currentLevel)]
    pub fn current_level(&self) -> u32 {
        self.engine.state().current_level
    }
}
