//! Collision detection
//!
//! The penguin is treated as a square of half-size `radius` around its
//! centre. Pipes are a top and bottom slab sharing one horizontal span.

use glam::Vec2;

use super::state::{Penguin, Pipe, Playfield};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square box of half-size `half` around `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(center - Vec2::splat(half), center + Vec2::splat(half))
    }

    /// Open-interval overlap on the x axis (touching edges do not count)
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.max.x > min_x && self.min.x < max_x
    }
}

/// Bounding box of the penguin
pub fn penguin_box(penguin: &Penguin) -> Aabb {
    Aabb::around(penguin.pos, penguin.radius)
}

/// Whether the penguin clips either half of a pipe
///
/// Only matters while the boxes share horizontal extent; then any part of
/// the penguin above the gap top or below the gap bottom is a hit.
pub fn hits_pipe(penguin: &Penguin, pipe: &Pipe) -> bool {
    let bounds = penguin_box(penguin);
    if !bounds.overlaps_x(pipe.x, pipe.trailing_edge()) {
        return false;
    }
    bounds.min.y < pipe.gap_top || bounds.max.y > pipe.gap_bottom()
}

/// Whether the penguin has reached the ground
pub fn hits_ground(penguin: &Penguin, field: &Playfield) -> bool {
    penguin.bottom() > field.ground_y()
}
