//! Game engine: the mount contract
//!
//! Owns configuration, state, the seeded RNG, the timer scheduler, and input
//! bookkeeping. A presentation layer drives it with commands, input events,
//! and [`Engine::advance`], and reads [`Engine::state`] to draw.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{ConfigError, GameConfig, InputSource};
use crate::input::{Control, InputAction, InputCoordinator, Key};
use crate::sim::geom::Rect;
use crate::sim::{self, Direction, GameState, GameStatus, lifecycle};
use crate::timers::{Scheduler, TimerId};

pub struct Engine {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
    seed: u64,
    scheduler: Scheduler,
    input: InputCoordinator,
}

impl Engine {
    /// Validate `config` and build an engine waiting in `NotStarted`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Engine with the stock configuration
    pub fn with_defaults(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            scheduler: Scheduler::new(),
            input: InputCoordinator::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Engine clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Barriers drawn and collided with on the current level
    pub fn active_barriers(&self) -> &[Rect] {
        self.state.active_barriers(&self.config)
    }

    pub fn time_display(&self) -> String {
        self.state.time_display()
    }

    pub fn is_timer_scheduled(&self, id: TimerId) -> bool {
        self.scheduler.is_scheduled(id)
    }

    /// JSON snapshot of the observable state
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    // --- Commands ---

    /// Start at level 1 (from `NotStarted`, `Won`, or `Lost`)
    pub fn start(&mut self) -> bool {
        let started = lifecycle::start_game(&mut self.state, &self.config, &mut self.rng);
        if started {
            self.enter_playing();
        }
        started
    }

    /// Same as [`Engine::start`]; offered after a win or loss
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    pub fn continue_to_next_level(&mut self) -> bool {
        let continued =
            lifecycle::continue_to_next_level(&mut self.state, &self.config, &mut self.rng);
        if continued {
            self.enter_playing();
        }
        continued
    }

    /// One keyboard-speed move
    pub fn move_truck(&mut self, direction: Direction) -> bool {
        self.move_truck_from(direction, InputSource::Keyboard)
    }

    /// One move scaled by the speed multiplier of `source`
    pub fn move_truck_from(&mut self, direction: Direction, source: InputSource) -> bool {
        let step = self.config.truck.speed * self.config.input.speed_multiplier(source);
        let now = self.scheduler.now_ms();
        sim::move_truck(&mut self.state, &self.config, direction, step, now)
    }

    /// Collect bins under the truck. Returns how many were emptied.
    pub fn pickup(&mut self) -> u32 {
        if !self.state.is_playing() {
            return 0;
        }
        let collected = sim::pickup(&mut self.state, &self.config);
        self.scheduler
            .schedule_once(TimerId::LiftingClear, self.config.timing.lifting_ms);
        if sim::check_level_complete(&mut self.state, &self.config) {
            self.leave_playing();
        }
        collected
    }

    // --- Input events ---

    pub fn key_down(&mut self, key: Key) {
        let action = self.input.key_down(key);
        self.apply_input(action);
    }

    pub fn key_up(&mut self, key: Key) {
        let action = self.input.key_up(key);
        self.apply_input(action);
    }

    pub fn touch_start(&mut self, control: Control) {
        let action = self.input.touch_start(control);
        self.apply_input(action);
    }

    /// Touch release or cancel
    pub fn touch_end(&mut self, control: Control) {
        let action = self.input.touch_end(control);
        self.apply_input(action);
    }

    /// Drop all held input and its repeats (e.g. window lost focus)
    pub fn release_all_input(&mut self) {
        self.input.release_all();
        self.scheduler.cancel(TimerId::KeyRepeat);
        for dir in Direction::ALL {
            self.scheduler.cancel(TimerId::TouchRepeat(dir));
        }
    }

    fn apply_input(&mut self, action: InputAction) {
        let repeat = self.config.input.repeat_interval_ms;
        match action {
            InputAction::None => {}
            InputAction::StartKeyRepeat => {
                if self.state.is_playing() {
                    self.scheduler.schedule_every(TimerId::KeyRepeat, repeat);
                }
            }
            InputAction::StopKeyRepeat => self.scheduler.cancel(TimerId::KeyRepeat),
            InputAction::Pickup => {
                self.pickup();
            }
            InputAction::StartTouchRepeat(dir) => {
                self.move_truck_from(dir, InputSource::Touch);
                if self.state.is_playing() {
                    self.scheduler
                        .schedule_every(TimerId::TouchRepeat(dir), repeat);
                }
            }
            InputAction::StopTouchRepeat(dir) => {
                self.scheduler.cancel(TimerId::TouchRepeat(dir));
            }
        }
    }

    // --- Time ---

    /// Run the clock forward `elapsed_ms`, firing every timer that comes due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms() + elapsed_ms;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.fire(id);
        }
        self.scheduler.advance_to(until);
    }

    fn fire(&mut self, id: TimerId) {
        match id {
            TimerId::KeyRepeat => {
                let held = self.input.held_keys().to_vec();
                for dir in held {
                    self.move_truck_from(dir, InputSource::Keyboard);
                }
            }
            TimerId::TouchRepeat(dir) => {
                if self.input.is_pad_held(dir) {
                    self.move_truck_from(dir, InputSource::Touch);
                }
            }
            TimerId::BinTick => sim::advance_bins(&mut self.state, &self.config, &mut self.rng),
            TimerId::Countdown => {
                if sim::countdown_tick(&mut self.state) {
                    self.leave_playing();
                }
            }
            TimerId::MovingDecay => {
                let now = self.scheduler.now_ms();
                sim::decay_moving(&mut self.state, now, self.config.timing.moving_decay_ms);
            }
            TimerId::LiftingClear => sim::clear_lifting(&mut self.state),
            TimerId::WarningFlash => {
                lifecycle::warning_tick(&mut self.state, self.config.timing.warning_threshold_secs)
            }
        }
    }

    /// Arm every `Playing`-scoped timer, resuming repeats for held input
    fn enter_playing(&mut self) {
        let timing = &self.config.timing;
        let repeat = self.config.input.repeat_interval_ms;
        self.scheduler.cancel_all();
        self.scheduler.schedule_every(TimerId::BinTick, timing.bin_tick_ms);
        self.scheduler.schedule_every(TimerId::Countdown, timing.countdown_ms);
        self.scheduler
            .schedule_every(TimerId::MovingDecay, timing.moving_decay_ms);
        self.scheduler
            .schedule_every(TimerId::WarningFlash, timing.warning_flash_ms);

        if !self.input.held_keys().is_empty() {
            self.scheduler.schedule_every(TimerId::KeyRepeat, repeat);
        }
        for &dir in self.input.held_pads() {
            self.scheduler.schedule_every(TimerId::TouchRepeat(dir), repeat);
        }
    }

    fn leave_playing(&mut self) {
        self.scheduler.cancel_all();
        self.state.clear_transient_flags();
    }
}
