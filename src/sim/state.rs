//! Game state and core simulation types

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scenery::Scenery;
use crate::consts::*;

/// Current phase of the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No active run, menu showing
    Hub,
    /// Run in progress (including the pre-flap hover)
    Playing,
    /// Run ended, simulation frozen
    GameOver,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A pipe was cleared; `score` is the new score
    Scored { score: u32, coins: u32 },
    /// The run ended with this score (emitted once per run)
    GameOver { score: u32 },
}

/// Visible playfield (logical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y coordinate past which the penguin has hit the ground
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_MARGIN
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(MAX_FIELD_WIDTH, MAX_FIELD_HEIGHT * 0.75)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penguin {
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive is down)
    pub vel: f32,
    pub radius: f32,
    /// Idle bob before the first flap
    pub hovering: bool,
    /// Seconds spent hovering (bob phase)
    pub hover_time: f32,
    /// Centre line of the bob
    pub hover_anchor: f32,
}

impl Penguin {
    pub fn new(field: &Playfield, radius: f32) -> Self {
        let mut penguin = Self {
            pos: Vec2::ZERO,
            vel: 0.0,
            radius,
            hovering: true,
            hover_time: 0.0,
            hover_anchor: 0.0,
        };
        penguin.reset(field);
        penguin
    }

    /// Back to the start position, hovering
    pub fn reset(&mut self, field: &Playfield) {
        self.pos = Vec2::new(field.width * PENGUIN_START_X, field.height * PENGUIN_START_Y);
        self.vel = 0.0;
        self.hovering = true;
        self.hover_time = 0.0;
        self.hover_anchor = self.pos.y;
    }

    /// Set upward velocity and leave hover
    pub fn flap(&mut self, flap_velocity: f32) {
        self.vel = flap_velocity;
        self.hovering = false;
    }

    /// Advance motion by `dt` seconds
    pub fn update(&mut self, dt: f32, gravity: f32) {
        if self.hovering {
            self.hover_time += dt;
            self.pos.y = self.hover_anchor + (self.hover_time * HOVER_RATE).sin() * HOVER_AMPLITUDE;
            return;
        }

        self.vel += gravity * dt;
        self.pos.y += self.vel * dt;

        // Ceiling stops the climb; the floor is handled as a collision
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel = 0.0;
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: f32,
    /// Y of the gap's top edge
    pub gap_top: f32,
    /// Gap height
    pub gap: f32,
    pub width: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Pipe {
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap / 2.0
    }
}

/// Complete per-run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub field: Playfield,
    pub penguin: Penguin,
    /// Oldest (leftmost) first
    pub pipes: VecDeque<Pipe>,
    pub score: u32,
    /// Coins earned this run
    pub run_coins: u32,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Seconds since the state was created (drives cosmetic animation)
    pub time: f32,
    pub scenery: Scenery,
    /// Pending events for the session
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a state sitting in the hub
    pub fn new(seed: u64, field: Playfield, penguin_radius: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scenery = Scenery::new(&field, SNOWFLAKE_COUNT, BACK_PILLAR_COUNT, &mut rng);
        Self {
            phase: GamePhase::Hub,
            field,
            penguin: Penguin::new(&field, penguin_radius),
            pipes: VecDeque::new(),
            score: 0,
            run_coins: 0,
            spawn_timer: 0.0,
            time: 0.0,
            scenery,
            events: Vec::new(),
            rng,
        }
    }

    /// Start a fresh run (Play / Restart)
    pub fn start_run(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        log::info!("Run started");
    }

    /// Abandon any run and go back to the hub
    pub fn to_hub(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Hub;
    }

    fn reset_run(&mut self) {
        self.pipes.clear();
        self.spawn_timer = 0.0;
        self.score = 0;
        self.run_coins = 0;
        self.penguin.reset(&self.field);
    }

    /// Flap if a run is live; returns whether it was applied
    pub fn flap(&mut self, flap_velocity: f32) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.penguin.flap(flap_velocity);
        true
    }

    /// Enter GameOver once; later calls are no-ops
    pub fn enter_game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.penguin.hovering = false;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over at score {}", self.score);
        true
    }

    /// Adopt a new playfield size
    ///
    /// Entities keep their positions; the hover anchor follows the new size
    /// and scenery wraps against it from the next update.
    pub fn resize(&mut self, field: Playfield) {
        self.field = field;
        if self.penguin.hovering {
            self.penguin.pos.x = field.width * PENGUIN_START_X;
            self.penguin.hover_anchor = field.height * PENGUIN_START_Y;
        }
    }

    /// Rebuild decorations with new counts (settings change)
    pub fn rebuild_scenery(&mut self, snowflakes: usize, pillars: usize) {
        self.scenery = Scenery::new(&self.field, snowflakes, pillars, &mut self.rng);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(400.0, 800.0)
    }

    #[test]
    fn test_penguin_starts_hovering_at_start_point() {
        let penguin = Penguin::new(&field(), PENGUIN_RADIUS);
        assert!(penguin.hovering);
        assert_eq!(penguin.pos, Vec2::new(100.0, 320.0));
        assert_eq!(penguin.vel, 0.0);
    }

    #[test]
    fn test_ceiling_clamps_and_stops_climb() {
        let mut penguin = Penguin::new(&field(), PENGUIN_RADIUS);
        penguin.pos.y = 20.0;
        penguin.flap(-360.0);
        penguin.update(0.05, 720.0);
        assert_eq!(penguin.pos.y, PENGUIN_RADIUS);
        assert_eq!(penguin.vel, 0.0);
    }

    #[test]
    fn test_floor_not_clamped() {
        let mut penguin = Penguin::new(&field(), PENGUIN_RADIUS);
        penguin.hovering = false;
        penguin.pos.y = 790.0;
        penguin.vel = 400.0;
        penguin.update(0.05, 720.0);
        assert!(penguin.bottom() > 800.0);
    }

    #[test]
    fn test_flap_only_while_playing() {
        let mut state = GameState::new(1, field(), PENGUIN_RADIUS);
        assert!(!state.flap(-360.0));
        assert!(state.penguin.hovering);
        state.start_run();
        assert!(state.flap(-360.0));
        assert!(!state.penguin.hovering);
        state.enter_game_over();
        state.penguin.vel = 0.0;
        assert!(!state.flap(-360.0));
        assert_eq!(state.penguin.vel, 0.0);
    }

    #[test]
    fn test_game_over_emits_once() {
        let mut state = GameState::new(1, field(), PENGUIN_RADIUS);
        state.start_run();
        state.score = 4;
        assert!(state.enter_game_over());
        assert!(!state.enter_game_over());
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 4 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_start_run_resets() {
        let mut state = GameState::new(1, field(), PENGUIN_RADIUS);
        state.start_run();
        state.score = 10;
        state.spawn_timer = 0.7;
        state.pipes.push_back(Pipe {
            x: 10.0,
            gap_top: 100.0,
            gap: 165.0,
            width: PIPE_WIDTH,
            passed: false,
        });
        state.enter_game_over();
        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_timer, 0.0);
        assert!(state.pipes.is_empty());
        assert!(state.penguin.hovering);
    }

    #[test]
    fn test_resize_moves_hover_anchor() {
        let mut state = GameState::new(1, field(), PENGUIN_RADIUS);
        state.resize(Playfield::new(200.0, 400.0));
        assert_eq!(state.penguin.pos.x, 50.0);
        assert_eq!(state.penguin.hover_anchor, 160.0);
    }
}
