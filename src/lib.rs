//! Waddle Wings - a one-button penguin flapper
//!
//! Core modules:
//! - `sim`: Frame simulation (penguin, pipes, scenery, collisions, scoring)
//! - `catalog`: Static skin/map/mode tables
//! - `meta`: Durable player progression (coins, best, ownership, daily reward)
//! - `session`: Context object tying the simulation to the meta-state
//! - `app`: Controller translating UI actions into session calls
//! - `ui`: Presentation interface and panel models
//! - `renderer`: Display list and WebGPU pipeline
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key-value storage capability and meta codec
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod catalog;
pub mod meta;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::App;
pub use meta::PlayerMeta;
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame step (seconds) to avoid jumps after a stall
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Playfield caps (logical pixels)
    pub const MAX_FIELD_WIDTH: f32 = 480.0;
    pub const MAX_FIELD_HEIGHT: f32 = 900.0;

    /// Penguin defaults
    pub const PENGUIN_RADIUS: f32 = 18.0;
    /// Start position as a fraction of the playfield
    pub const PENGUIN_START_X: f32 = 0.25;
    pub const PENGUIN_START_Y: f32 = 0.4;
    /// Idle bob (pixels, radians/sec)
    pub const HOVER_AMPLITUDE: f32 = 9.0;
    pub const HOVER_RATE: f32 = 4.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 70.0;
    /// Pipes spawn this far past the right edge
    pub const PIPE_SPAWN_OFFSET: f32 = 40.0;
    /// Pipes are dropped once their trailing edge passes this x
    pub const PIPE_CULL_X: f32 = -80.0;
    /// Distance above the bottom edge that counts as ground contact
    pub const GROUND_MARGIN: f32 = 4.0;

    /// Scenery
    pub const SNOWFLAKE_COUNT: usize = 40;
    pub const BACK_PILLAR_COUNT: usize = 6;
    pub const BACK_PILLAR_WIDTH: f32 = 70.0;
    pub const BACK_PILLAR_SPACING: f32 = 140.0;

    /// Economy
    pub const DAILY_REWARD: u32 = 15;
    /// Every this many points adds one coin to each pipe's reward
    pub const COIN_BONUS_STEP: u32 = 25;

    /// Storage namespace
    pub const STORAGE_PREFIX: &str = "ww_";
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`
///
/// Non-finite deltas (a paused tab can report garbage) are treated as zero.
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, consts::MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Fit a window size into the playfield caps
#[inline]
pub fn fit_playfield(window_w: f32, window_h: f32) -> (f32, f32) {
    (
        window_w.clamp(1.0, consts::MAX_FIELD_WIDTH),
        window_h.clamp(1.0, consts::MAX_FIELD_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.016), 0.016);
        assert_eq!(clamp_frame_dt(3.0), consts::MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(-1.0), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
        assert_eq!(clamp_frame_dt(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_fit_playfield_caps() {
        assert_eq!(fit_playfield(1920.0, 1080.0), (480.0, 900.0));
        assert_eq!(fit_playfield(390.0, 844.0), (390.0, 844.0));
        assert_eq!(fit_playfield(0.0, 0.0), (1.0, 1.0));
    }

    proptest! {
        #[test]
        fn prop_clamped_dt_in_range(dt in any::<f32>()) {
            let clamped = clamp_frame_dt(dt);
            prop_assert!((0.0..=consts::MAX_FRAME_DT).contains(&clamped));
        }
    }
}
