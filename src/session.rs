//! Game session: simulation plus the player's durable state
//!
//! The session owns the meta-state, settings, balance, the run state and the
//! storage handle. Simulation events are applied to the meta-state here and
//! persisted immediately; storage failures are logged and play goes on.

use crate::catalog::{ItemKind, MapTheme};
use crate::meta::{DailyError, PlayerMeta, StoreError};
use crate::persistence::{KeyValueStore, load_meta, load_settings, save_meta, save_settings};
use crate::platform::CalendarDate;
use crate::renderer::{DrawCommand, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Playfield, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::Hud;
use crate::{clamp_frame_dt, fit_playfield};

pub struct Session<S: KeyValueStore> {
    meta: PlayerMeta,
    settings: Settings,
    tuning: Tuning,
    state: GameState,
    store: S,
    /// Map the scene is drawn with; equips take effect on the next run
    scene_map: &'static MapTheme,
    autopilot: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the player's state from `store` and sit in the hub
    pub fn new(store: S, tuning: Tuning, field: Playfield, seed: u64) -> Self {
        let meta = load_meta(&store);
        let settings = load_settings(&store);
        let mut state = GameState::new(seed, field, tuning.penguin_radius);
        state.rebuild_scenery(settings.snowflakes(), settings.back_pillar_count());
        let scene_map = meta.map();
        Self {
            meta,
            settings,
            tuning,
            state,
            store,
            scene_map,
            autopilot: false,
        }
    }

    pub fn meta(&self) -> &PlayerMeta {
        &self.meta
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            coins: self.meta.coins(),
            best: self.meta.best_score(),
            skin_name: self.meta.skin().name,
        }
    }

    /// Hub -> Playing
    pub fn play(&mut self) {
        self.scene_map = self.meta.map();
        self.state.start_run();
    }

    /// GameOver -> Playing
    pub fn restart(&mut self) {
        self.play();
    }

    /// Back to the hub, discarding any run in progress
    pub fn menu(&mut self) {
        self.scene_map = self.meta.map();
        self.state.to_hub();
        log::info!("Back to hub");
    }

    /// Flap now; ignored outside a live run
    pub fn flap(&mut self) -> bool {
        self.state.flap(self.tuning.flap_velocity)
    }

    /// Step the simulation and apply what happened
    ///
    /// `dt` is clamped here; the returned events have already been applied.
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = clamp_frame_dt(dt);
        let input = TickInput {
            flap: false,
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input, self.meta.mode(), &self.tuning, dt);

        let events = self.state.drain_events();
        for event in &events {
            match *event {
                GameEvent::Scored { coins, .. } => {
                    self.meta.award_coins(coins);
                }
                GameEvent::GameOver { score } => {
                    if self.meta.record_run(score) {
                        log::info!("New best score: {}", score);
                    }
                }
            }
        }
        if !events.is_empty() {
            self.persist();
        }
        events
    }

    pub fn buy(&mut self, kind: ItemKind, id: &str) -> Result<u32, StoreError> {
        let spent = self.meta.purchase(kind, id)?;
        log::info!("Bought {} '{}' for {} coins", kind.as_str(), id, spent);
        self.persist();
        Ok(spent)
    }

    pub fn equip(&mut self, kind: ItemKind, id: &str) -> Result<(), StoreError> {
        self.meta.equip(kind, id)?;
        log::info!("Equipped {} '{}'", kind.as_str(), id);
        self.persist();
        Ok(())
    }

    pub fn select_mode(&mut self, id: &str) -> Result<(), StoreError> {
        self.meta.select_mode(id)?;
        log::info!("Mode set to '{}'", id);
        self.persist();
        Ok(())
    }

    /// Claim the daily reward for `today`
    pub fn claim_daily(&mut self, today: CalendarDate) -> Result<u32, DailyError> {
        let reward = self.meta.claim_daily(today, self.tuning.daily_reward)?;
        log::info!("Daily reward claimed for {}: +{}", today, reward);
        self.persist();
        Ok(reward)
    }

    /// Change settings, refresh the decorations and save
    pub fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.settings);
        self.state
            .rebuild_scenery(self.settings.snowflakes(), self.settings.back_pillar_count());
        if let Err(e) = save_settings(&mut self.store, &self.settings) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    /// Adopt a new window size (capped to the playfield limits)
    pub fn resize(&mut self, window_w: f32, window_h: f32) -> Playfield {
        let (w, h) = fit_playfield(window_w, window_h);
        let field = Playfield::new(w, h);
        self.state.resize(field);
        field
    }

    /// Display list for the current frame
    pub fn scene(&self) -> Vec<DrawCommand> {
        build_scene(&self.state, self.meta.skin(), self.scene_map, &self.settings)
    }

    fn persist(&mut self) {
        if let Err(e) = save_meta(&mut self.store, &self.meta) {
            log::warn!("Failed to save progress: {}", e);
        }
    }
}
