//! Per-frame simulation step
//!
//! Advances the penguin, spawns and scrolls pipes, scores cleared pipes and
//! detects the end of a run. Rewards and game over are reported as events;
//! nothing here touches persistent state.

use rand::Rng;

use super::collision::{hits_ground, hits_pipe};
use super::state::{GameEvent, GamePhase, GameState, Pipe};
use crate::catalog::Mode;
use crate::consts::*;
use crate::tuning::Tuning;

/// Input commands for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space) since the last step
    pub flap: bool,
    /// Demo mode - a simple controller flaps for the player
    pub autopilot: bool,
}

/// Extra distance below the target line before the autopilot flaps
const AUTOPILOT_SLACK: f32 = 30.0;

/// Advance the game state by `dt` seconds
///
/// `dt` is expected to be clamped by the caller (see [`crate::clamp_frame_dt`]).
pub fn tick(state: &mut GameState, input: &TickInput, mode: &Mode, tuning: &Tuning, dt: f32) {
    match state.phase {
        GamePhase::Hub => return,
        GamePhase::GameOver => {
            // Entities freeze but the backdrop keeps drifting
            state.time += dt;
            state.scenery.update(dt, state.time, &state.field, &mut state.rng);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time += dt;

    if input.flap || (input.autopilot && autopilot_wants_flap(state)) {
        state.flap(tuning.flap_velocity);
    }

    state.scenery.update(dt, state.time, &state.field, &mut state.rng);
    state.penguin.update(dt, tuning.gravity);

    // Nothing moves toward the penguin until the first flap
    if state.penguin.hovering {
        return;
    }

    state.spawn_timer += dt;
    if state.spawn_timer > tuning.spawn_interval_at(state.score) {
        state.spawn_timer = 0.0;
        spawn_pipe(state, mode, tuning);
    }

    let speed = tuning.scroll_speed_at(mode.speed, state.score);
    let penguin_x = state.penguin.pos.x;
    let mut crashed = false;
    for pipe in state.pipes.iter_mut() {
        pipe.x -= speed * dt;

        if !pipe.passed && pipe.trailing_edge() < penguin_x {
            pipe.passed = true;
            state.score += 1;
            let coins = tuning.coin_reward(state.score);
            state.run_coins += coins;
            state.events.push(GameEvent::Scored {
                score: state.score,
                coins,
            });
        }

        if hits_pipe(&state.penguin, pipe) {
            crashed = true;
            break;
        }
    }
    if crashed {
        state.enter_game_over();
        return;
    }

    while state
        .pipes
        .front()
        .is_some_and(|p| p.trailing_edge() < PIPE_CULL_X)
    {
        state.pipes.pop_front();
    }

    if hits_ground(&state.penguin, &state.field) {
        state.enter_game_over();
    }
}

/// Push a new pipe just past the right edge
///
/// The gap top is uniform in `[margin, height - margin - gap]`; on a field too
/// short for that range it sits at `margin`.
fn spawn_pipe(state: &mut GameState, mode: &Mode, tuning: &Tuning) {
    let margin = tuning.gap_margin;
    let range = (state.field.height - 2.0 * margin - mode.gap).max(0.0);
    let gap_top = margin + state.rng.random::<f32>() * range;
    state.pipes.push_back(Pipe {
        x: state.field.width + PIPE_SPAWN_OFFSET,
        gap_top,
        gap: mode.gap,
        width: PIPE_WIDTH,
        passed: false,
    });
    log::debug!("Spawned pipe (gap {:.0} at {:.0})", mode.gap, gap_top);
}

/// Simple demo controller: start the run, then flap whenever the penguin
/// sinks below the centre of the next gap while falling
fn autopilot_wants_flap(state: &GameState) -> bool {
    let penguin = &state.penguin;
    if penguin.hovering {
        return true;
    }
    let target = state
        .pipes
        .iter()
        .find(|p| p.trailing_edge() > penguin.pos.x - penguin.radius)
        .map(|p| p.gap_center())
        .unwrap_or(state.field.height * 0.5);
    penguin.vel >= 0.0 && penguin.pos.y > target + AUTOPILOT_SLACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::sim::state::Playfield;
    use proptest::prelude::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, Playfield::new(400.0, 800.0), PENGUIN_RADIUS);
        state.start_run();
        state
    }

    /// Balance with gravity off and spawning disabled, for scripted layouts
    fn still_air() -> Tuning {
        Tuning {
            gravity: 0.0,
            flap_velocity: 0.0,
            spawn_interval: 1_000.0,
            ..Default::default()
        }
    }

    fn pipe(x: f32, gap_top: f32) -> Pipe {
        Pipe {
            x,
            gap_top,
            gap: 165.0,
            width: PIPE_WIDTH,
            passed: false,
        }
    }

    #[test]
    fn test_hub_does_nothing() {
        let mut state = GameState::new(1, Playfield::new(400.0, 800.0), PENGUIN_RADIUS);
        let input = TickInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut state, &input, catalog::mode("normal"), &Tuning::default(), FRAME);
        assert_eq!(state.phase, GamePhase::Hub);
        assert!(state.penguin.hovering);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_clear_three_pipes() {
        let mut state = playing_state();
        let tuning = still_air();
        let mode = catalog::mode("normal");
        state.flap(tuning.flap_velocity);
        // Penguin box spans y 302..338, inside every gap below
        for x in [120.0, 300.0, 480.0] {
            state.pipes.push_back(pipe(x, 240.0));
        }

        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), mode, &tuning, FRAME);
        }

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 3);
        assert_eq!(state.run_coins, 3);
        assert!(state.pipes.is_empty(), "scrolled-off pipes are culled");
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Scored { score: 1, coins: 1 },
                GameEvent::Scored { score: 2, coins: 1 },
                GameEvent::Scored { score: 3, coins: 1 },
            ]
        );
    }

    #[test]
    fn test_idle_penguin_never_dies() {
        let mut state = playing_state();
        let anchor = state.penguin.hover_anchor;
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), catalog::mode("sweaty"), &Tuning::default(), FRAME);
            assert!((state.penguin.pos.y - anchor).abs() <= HOVER_AMPLITUDE + 1e-3);
            assert_eq!(state.penguin.vel, 0.0);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pipes.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_ground_ends_run_once() {
        let mut state = playing_state();
        let tuning = Tuning::default();
        let mode = catalog::mode("normal");
        state.flap(0.0);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), mode, &tuning, FRAME);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 0 }]);

        // Frozen afterwards
        let y = state.penguin.pos.y;
        tick(&mut state, &TickInput { flap: true, ..Default::default() }, mode, &tuning, FRAME);
        assert_eq!(state.penguin.pos.y, y);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_pipe_hit_ends_run() {
        let mut state = playing_state();
        let tuning = still_air();
        state.flap(tuning.flap_velocity);
        // Gap well above the penguin, pipe already overlapping it
        state.pipes.push_back(pipe(90.0, 40.0));
        tick(&mut state, &TickInput::default(), catalog::mode("normal"), &tuning, FRAME);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_spawn_respects_margins_and_mode() {
        // Wide field so no pipe reaches the penguin during the test
        let mut state = GameState::new(12345, Playfield::new(2000.0, 800.0), PENGUIN_RADIUS);
        state.start_run();
        let tuning = Tuning {
            gravity: 0.0,
            flap_velocity: 0.0,
            ..Default::default()
        };
        let normal = catalog::mode("normal");
        state.flap(0.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), normal, &tuning, 0.05);
        }
        assert_eq!(state.pipes.len(), 1);
        let first = state.pipes[0].clone();
        assert_eq!(first.gap, 165.0);
        assert!(first.gap_top >= 40.0 && first.gap_top <= 800.0 - 40.0 - 165.0);

        // Switching mode changes only pipes spawned afterwards
        let sweaty = catalog::mode("sweaty");
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), sweaty, &tuning, 0.05);
        }
        assert_eq!(state.pipes[0].gap, 165.0);
        assert_eq!(state.pipes.back().map(|p| p.gap), Some(145.0));
    }

    #[test]
    fn test_tiny_field_collapses_gap_range() {
        let mut state = GameState::new(7, Playfield::new(400.0, 200.0), PENGUIN_RADIUS);
        state.start_run();
        spawn_pipe(&mut state, catalog::mode("chill"), &Tuning::default());
        assert_eq!(state.pipes[0].gap_top, 40.0);
        assert_eq!(state.pipes[0].x, 440.0);
    }

    #[test]
    fn test_clamped_step_moves_less_than_a_pipe() {
        // Worst case at the frame clamp: fastest mode at the speed cap
        let tuning = Tuning::default();
        let speed = tuning.scroll_speed_at(catalog::mode("sweaty").speed, u32::MAX);
        assert!(speed * crate::clamp_frame_dt(10.0) < PIPE_WIDTH);
    }

    #[test]
    fn test_autopilot_starts_and_steers() {
        let mut state = playing_state();
        let tuning = Tuning::default();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, catalog::mode("normal"), &tuning, FRAME);
        assert!(!state.penguin.hovering);

        // Well below the next gap and falling: flaps
        state.pipes.push_back(pipe(300.0, 100.0));
        state.penguin.pos.y = 500.0;
        state.penguin.vel = 50.0;
        assert!(autopilot_wants_flap(&state));
        // Above the gap centre: lets gravity work
        state.penguin.pos.y = 150.0;
        assert!(!autopilot_wants_flap(&state));
    }

    proptest! {
        #[test]
        fn prop_score_rises_one_at_a_time(
            seed in any::<u64>(),
            flaps in proptest::collection::vec(any::<bool>(), 1..600),
        ) {
            let mut state = GameState::new(seed, Playfield::new(400.0, 800.0), PENGUIN_RADIUS);
            state.start_run();
            let tuning = Tuning::default();
            let mode = catalog::mode("chill");
            let mut last = 0;
            for flap in flaps {
                tick(&mut state, &TickInput { flap, autopilot: false }, mode, &tuning, MAX_FRAME_DT);
                prop_assert!(state.score == last || state.score == last + 1);
                last = state.score;
            }
            let scored = state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count();
            prop_assert_eq!(scored as u32, state.score);
        }

        #[test]
        fn prop_clamped_step_never_skips_a_pipe(raw_dt in any::<f32>(), score in 0u32..100_000) {
            let dt = crate::clamp_frame_dt(raw_dt);
            let speed = Tuning::default().scroll_speed_at(catalog::mode("sweaty").speed, score);
            // A pipe can never jump past the penguin's box in one step
            prop_assert!(speed * dt < PIPE_WIDTH.min(2.0 * PENGUIN_RADIUS));
        }
    }
}
