//! Shape tessellation for 2D primitives
//!
//! Every draw command becomes a plain triangle list in playfield pixels.

use glam::{Affine2, Vec2};
use std::f32::consts::PI;

use super::scene::{DrawCommand, Rect};
use super::vertex::{Color, Vertex};

/// Segments used for a curve of the given radius
fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(12, 48)
}

/// Triangle list builder with a transform stack
#[derive(Debug)]
pub struct Tessellator {
    vertices: Vec<Vertex>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<Vertex> {
        self.vertices
    }

    fn push_vertex(&mut self, p: Vec2, color: Color) {
        let p = self.transform.transform_point2(p);
        self.vertices.push(Vertex::new(p.x, p.y, color));
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, colors: [Color; 3]) {
        self.push_vertex(a, colors[0]);
        self.push_vertex(b, colors[1]);
        self.push_vertex(c, colors[2]);
    }

    /// Quad from corners in order top-left, top-right, bottom-right, bottom-left
    fn quad(&mut self, corners: [Vec2; 4], colors: [Color; 4]) {
        self.triangle(corners[0], corners[1], corners[2], [colors[0], colors[1], colors[2]]);
        self.triangle(corners[0], corners[2], corners[3], [colors[0], colors[2], colors[3]]);
    }

    fn rect_corners(rect: &Rect) -> [Vec2; 4] {
        [
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.x + rect.w, rect.y),
            Vec2::new(rect.x + rect.w, rect.y + rect.h),
            Vec2::new(rect.x, rect.y + rect.h),
        ]
    }

    /// Fan a convex outline around `center`
    fn fan(&mut self, center: Vec2, outline: &[Vec2], color: Color) {
        for (i, &a) in outline.iter().enumerate() {
            let b = outline[(i + 1) % outline.len()];
            self.triangle(center, a, b, [color; 3]);
        }
    }

    pub fn add(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::LinearGradient { rect, top, bottom } => {
                self.quad(Self::rect_corners(rect), [*top, *top, *bottom, *bottom]);
            }
            DrawCommand::Rect { rect, color } => {
                self.quad(Self::rect_corners(rect), [*color; 4]);
            }
            DrawCommand::RoundedRect { rect, radii, color } => self.rounded_rect(rect, radii, *color),
            DrawCommand::Ellipse {
                center,
                radii,
                rotation,
                color,
            } => self.ellipse(*center, *radii, *rotation, *color),
            DrawCommand::Circle { center, radius, color } => {
                self.ellipse(*center, Vec2::splat(*radius), 0.0, *color)
            }
            DrawCommand::Triangle { points, color } => {
                self.triangle(points[0], points[1], points[2], [*color; 3]);
            }
            DrawCommand::PushTransform(t) => {
                self.stack.push(self.transform);
                self.transform = self.transform * *t;
            }
            DrawCommand::PopTransform => {
                self.transform = self.stack.pop().unwrap_or(Affine2::IDENTITY);
            }
        }
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color) {
        let segments = segments_for(radii.max_element());
        let rot = Vec2::from_angle(rotation);
        let outline: Vec<Vec2> = (0..segments)
            .map(|i| {
                let theta = (i as f32 / segments as f32) * 2.0 * PI;
                center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()))
            })
            .collect();
        self.fan(center, &outline, color);
    }

    fn rounded_rect(&mut self, rect: &Rect, radii: &[f32; 4], color: Color) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let max_r = rect.w.min(rect.h) * 0.5;
        let r = radii.map(|r| r.clamp(0.0, max_r));
        // Corner centres, clockwise from top-left, with each arc's start angle
        let corners = [
            (Vec2::new(rect.x + r[0], rect.y + r[0]), r[0], PI),
            (Vec2::new(rect.x + rect.w - r[1], rect.y + r[1]), r[1], 1.5 * PI),
            (Vec2::new(rect.x + rect.w - r[2], rect.y + rect.h - r[2]), r[2], 0.0),
            (Vec2::new(rect.x + r[3], rect.y + rect.h - r[3]), r[3], 0.5 * PI),
        ];

        let mut outline = Vec::new();
        for (center, radius, start) in corners {
            if radius <= 0.0 {
                outline.push(center);
                continue;
            }
            let steps = segments_for(radius) / 4;
            for s in 0..=steps {
                let theta = start + (s as f32 / steps as f32) * 0.5 * PI;
                outline.push(center + Vec2::new(theta.cos(), theta.sin()) * radius);
            }
        }
        let middle = Vec2::new(rect.x + rect.w * 0.5, rect.y + rect.h * 0.5);
        self.fan(middle, &outline, color);
    }
}

/// Tessellate a whole display list
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut tess = Tessellator::new();
    for command in commands {
        tess.add(command);
    }
    tess.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let vertices = tessellate(&[DrawCommand::Rect {
            rect: Rect::new(10.0, 20.0, 30.0, 40.0),
            color: RED,
        }]);
        assert_eq!(vertices.len(), 6);
        let (lo, hi) = bounds(&vertices);
        assert_eq!(lo, Vec2::new(10.0, 20.0));
        assert_eq!(hi, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_gradient_colors_top_and_bottom() {
        let top = [0.0, 0.0, 1.0, 1.0];
        let vertices = tessellate(&[DrawCommand::LinearGradient {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            top,
            bottom: RED,
        }]);
        for v in &vertices {
            let expected = if v.position[1] == 0.0 { top } else { RED };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let vertices = tessellate(&[DrawCommand::Circle {
            center: Vec2::new(50.0, 50.0),
            radius: 10.0,
            color: RED,
        }]);
        assert_eq!(vertices.len() % 3, 0);
        assert!(vertices.len() >= 12 * 3);
        for v in &vertices {
            assert!(Vec2::from(v.position).distance(Vec2::new(50.0, 50.0)) <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_rounded_rect_fits_its_box() {
        let vertices = tessellate(&[DrawCommand::RoundedRect {
            rect: Rect::new(0.0, 0.0, 70.0, 300.0),
            radii: [0.0, 0.0, 18.0, 18.0],
            color: RED,
        }]);
        let (lo, hi) = bounds(&vertices);
        assert!(lo.x >= -1e-4 && lo.y >= -1e-4);
        assert!(hi.x <= 70.0 + 1e-4 && hi.y <= 300.0 + 1e-4);
        // Square corners stay square
        assert!(vertices.iter().any(|v| v.position == [0.0, 0.0]));
    }

    #[test]
    fn test_empty_rounded_rect_is_skipped() {
        let vertices = tessellate(&[DrawCommand::RoundedRect {
            rect: Rect::new(0.0, 0.0, 70.0, 0.0),
            radii: [18.0; 4],
            color: RED,
        }]);
        assert!(vertices.is_empty());
    }

    #[test]
    fn test_transform_stack() {
        let tri = DrawCommand::Triangle {
            points: [Vec2::ZERO, Vec2::X, Vec2::Y],
            color: RED,
        };
        let vertices = tessellate(&[
            DrawCommand::PushTransform(Affine2::from_translation(Vec2::new(100.0, 0.0))),
            DrawCommand::PushTransform(Affine2::from_scale(Vec2::splat(2.0))),
            tri.clone(),
            DrawCommand::PopTransform,
            DrawCommand::PopTransform,
            tri,
        ]);
        assert_eq!(vertices[1].position, [102.0, 0.0]);
        assert_eq!(vertices[2].position, [100.0, 2.0]);
        assert_eq!(vertices[4].position, [1.0, 0.0]);
    }
}
