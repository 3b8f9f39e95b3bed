//! Data-driven game balance
//!
//! Physics and economy numbers in one serde struct so a JSON file can
//! override any subset of them. Units are pixels and seconds.

use serde::{Deserialize, Serialize};

use crate::catalog::MODES;
use crate::consts::{COIN_BONUS_STEP, DAILY_REWARD, MAX_FRAME_DT, PENGUIN_RADIUS};

/// Shortest spawn interval as a fraction of the base interval
pub const MIN_SPAWN_INTERVAL_RATIO: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity set by a flap (pixels/s, negative is up)
    pub flap_velocity: f32,
    pub penguin_radius: f32,
    /// Spawn interval with no score (seconds)
    pub spawn_interval: f32,
    /// Most the interval can shrink (seconds)
    pub spawn_interval_max_cut: f32,
    /// Points per second of interval cut
    pub spawn_interval_score_divisor: f32,
    /// Scroll speed bonus per point (pixels/s)
    pub speed_bonus_per_point: f32,
    /// Scroll speed bonus cap (pixels/s)
    pub speed_bonus_cap: f32,
    /// Minimum distance between a gap and the top/bottom edge
    pub gap_margin: f32,
    /// Points per extra coin of pipe reward
    pub coin_bonus_step: u32,
    pub daily_reward: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 720.0,
            flap_velocity: -360.0,
            penguin_radius: PENGUIN_RADIUS,
            spawn_interval: 1.4,
            spawn_interval_max_cut: 0.8,
            spawn_interval_score_divisor: 80.0,
            speed_bonus_per_point: 60.0 / 35.0,
            speed_bonus_cap: 132.0,
            gap_margin: 40.0,
            coin_bonus_step: COIN_BONUS_STEP,
            daily_reward: DAILY_REWARD,
        }
    }
}

impl Tuning {
    /// Parse overrides; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Replace nonsensical values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.spawn_interval > 0.0) {
            self.spawn_interval = defaults.spawn_interval;
        }
        let max_cut = self.spawn_interval * (1.0 - MIN_SPAWN_INTERVAL_RATIO);
        if !(self.spawn_interval_max_cut >= 0.0) {
            self.spawn_interval_max_cut = max_cut.min(defaults.spawn_interval_max_cut);
        }
        self.spawn_interval_max_cut = self.spawn_interval_max_cut.min(max_cut);
        if !(self.spawn_interval_score_divisor > 0.0) {
            self.spawn_interval_score_divisor = defaults.spawn_interval_score_divisor;
        }

        // A clamped step must move a pipe less than the penguin's box
        let fastest = fastest_mode_speed();
        if !(self.penguin_radius * 2.0 > fastest * MAX_FRAME_DT) {
            self.penguin_radius = defaults.penguin_radius;
        }
        if !(self.speed_bonus_per_point >= 0.0) {
            self.speed_bonus_per_point = defaults.speed_bonus_per_point;
        }
        if !(self.speed_bonus_cap >= 0.0) {
            self.speed_bonus_cap = defaults.speed_bonus_cap;
        }
        let max_bonus = self.penguin_radius * 2.0 / MAX_FRAME_DT - fastest - 1.0;
        self.speed_bonus_cap = self.speed_bonus_cap.min(max_bonus.max(0.0));
        if self.coin_bonus_step == 0 {
            self.coin_bonus_step = defaults.coin_bonus_step;
        }
        self
    }

    /// Seconds between spawns at a given score
    ///
    /// Shrinks linearly with score down to `spawn_interval - spawn_interval_max_cut`.
    pub fn spawn_interval_at(&self, score: u32) -> f32 {
        let cut = (score as f32 / self.spawn_interval_score_divisor).min(self.spawn_interval_max_cut);
        self.spawn_interval - cut
    }

    /// Scroll speed at a given score for a mode's base speed
    pub fn scroll_speed_at(&self, base_speed: f32, score: u32) -> f32 {
        base_speed + (score as f32 * self.speed_bonus_per_point).min(self.speed_bonus_cap)
    }

    /// Coins for clearing a pipe, given the score after the clear
    pub fn coin_reward(&self, score: u32) -> u32 {
        1 + score / self.coin_bonus_step
    }
}

fn fastest_mode_speed() -> f32 {
    MODES.iter().map(|m| m.speed).fold(0.0, f32::max)
}
