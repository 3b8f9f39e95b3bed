//! Decorative scenery: falling snow and slow background pillars
//!
//! Purely cosmetic. Nothing here feeds collision or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Playfield;
use crate::consts::{BACK_PILLAR_SPACING, BACK_PILLAR_WIDTH};

/// Sideways sway of falling snow (pixels/s)
const SNOW_SWAY: f32 = 24.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snowflake {
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed (pixels/s)
    pub speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackPillar {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Drift speed (pixels/s)
    pub speed: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub snow: Vec<Snowflake>,
    pub pillars: Vec<BackPillar>,
}

fn pillar_height(field: &Playfield, rng: &mut impl Rng) -> f32 {
    field.height * (0.3 + rng.random::<f32>() * 0.4)
}

impl Scenery {
    pub fn new(field: &Playfield, snowflakes: usize, pillars: usize, rng: &mut impl Rng) -> Self {
        let snow = (0..snowflakes)
            .map(|_| Snowflake {
                pos: Vec2::new(rng.random::<f32>() * field.width, rng.random::<f32>() * field.height),
                radius: rng.random::<f32>() * 1.8 + 0.5,
                speed: rng.random::<f32>() * 15.0 + 15.0,
            })
            .collect();
        let pillars = (0..pillars)
            .map(|i| BackPillar {
                x: i as f32 * BACK_PILLAR_SPACING + rng.random::<f32>() * 40.0,
                width: BACK_PILLAR_WIDTH,
                height: pillar_height(field, rng),
                speed: 10.0 + rng.random::<f32>() * 8.0,
            })
            .collect();
        Self { snow, pillars }
    }

    /// Drift everything and wrap pieces that left the screen
    pub fn update(&mut self, dt: f32, time: f32, field: &Playfield, rng: &mut impl Rng) {
        for flake in &mut self.snow {
            flake.pos.y += flake.speed * dt;
            flake.pos.x += (flake.pos.y * 0.1 + time * 10.0).sin() * SNOW_SWAY * dt;
            if flake.pos.y > field.height + 5.0 {
                flake.pos.y = -10.0;
                flake.pos.x = rng.random::<f32>() * field.width;
            }
        }

        for pillar in &mut self.pillars {
            pillar.x -= pillar.speed * dt;
            if pillar.x + pillar.width < -20.0 {
                pillar.x = field.width + rng.random::<f32>() * 80.0;
                pillar.height = pillar_height(field, rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_counts_follow_request() {
        let field = Playfield::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let scenery = Scenery::new(&field, 12, 4, &mut rng);
        assert_eq!(scenery.snow.len(), 12);
        assert_eq!(scenery.pillars.len(), 4);
        for p in &scenery.pillars {
            assert!(p.height >= 240.0 && p.height <= 560.0);
        }
    }

    #[test]
    fn test_snow_wraps_to_top() {
        let field = Playfield::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut scenery = Scenery::new(&field, 1, 0, &mut rng);
        scenery.snow[0].pos.y = 804.9;
        scenery.snow[0].speed = 30.0;
        scenery.update(0.05, 0.0, &field, &mut rng);
        assert_eq!(scenery.snow[0].pos.y, -10.0);
        assert!(scenery.snow[0].pos.x >= 0.0 && scenery.snow[0].pos.x <= 400.0);
    }

    #[test]
    fn test_pillar_wraps_to_right() {
        let field = Playfield::new(400.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut scenery = Scenery::new(&field, 0, 1, &mut rng);
        scenery.pillars[0].x = -89.9;
        scenery.pillars[0].speed = 10.0;
        scenery.update(0.05, 0.0, &field, &mut rng);
        assert!(scenery.pillars[0].x >= 400.0);
    }
}
