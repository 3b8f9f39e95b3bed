//! Display list construction
//!
//! Turns the simulation state into an ordered list of logical shapes:
//! background, decorations, pipes, then the penguin. Coordinates are
//! playfield pixels with y pointing down.

use glam::{Affine2, Vec2};

use super::vertex::{Color, colors, rgb};
use crate::catalog::{MapTheme, Skin};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Penguin, Pipe};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Vertical gradient filling `rect`
    LinearGradient { rect: Rect, top: Color, bottom: Color },
    Rect { rect: Rect, color: Color },
    /// Corner radii in order top-left, top-right, bottom-right, bottom-left
    RoundedRect { rect: Rect, radii: [f32; 4], color: Color },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Color,
    },
    Circle { center: Vec2, radius: f32, color: Color },
    Triangle { points: [Vec2; 3], color: Color },
    /// Compose a transform onto the current one until the matching pop
    PushTransform(Affine2),
    PopTransform,
}

/// Radians of tilt per pixel/s of vertical speed
const TILT_PER_SPEED: f32 = 0.002;
const TILT_MIN: f32 = -0.4;
const TILT_MAX: f32 = 0.6;
/// Wing flutter (radians/s, pixels)
const WING_RATE: f32 = 8.3;
const WING_TRAVEL: f32 = 3.0;
/// Preview size relative to the in-run penguin
const HUB_SCALE: f32 = 1.2;
const PIPE_CAP_RADIUS: f32 = 18.0;
const PIPE_LIP_INSET: f32 = 6.0;
const PIPE_LIP_HEIGHT: f32 = 10.0;
const BACK_PILLAR_RADIUS: f32 = 30.0;
/// Back pillars extend below the bottom edge so only their tops are rounded
const BACK_PILLAR_OVERHANG: f32 = 40.0;

/// Body tilt for a vertical velocity, clamped so the penguin never flips
pub fn penguin_tilt(vel: f32) -> f32 {
    (vel * TILT_PER_SPEED).clamp(TILT_MIN, TILT_MAX)
}

/// Build the full frame for the current phase
pub fn build_scene(state: &GameState, skin: &Skin, map: &MapTheme, settings: &Settings) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(64 + state.scenery.snow.len() + state.pipes.len() * 4);
    let (w, h) = (state.field.width, state.field.height);

    out.push(DrawCommand::LinearGradient {
        rect: Rect::new(0.0, 0.0, w, h),
        top: rgb(map.sky[0], 1.0),
        bottom: rgb(map.sky[1], 1.0),
    });

    for pillar in &state.scenery.pillars {
        out.push(DrawCommand::RoundedRect {
            rect: Rect::new(pillar.x, h - pillar.height, pillar.width, pillar.height + BACK_PILLAR_OVERHANG),
            radii: [BACK_PILLAR_RADIUS; 4],
            color: colors::BACK_PILLAR,
        });
    }

    for flake in &state.scenery.snow {
        out.push(DrawCommand::Circle {
            center: flake.pos,
            radius: flake.radius,
            color: colors::SNOW,
        });
    }

    if state.phase == GamePhase::Hub {
        push_hub_penguin(&mut out, skin, Vec2::new(w * 0.5, h * 0.5));
        return out;
    }

    for pipe in &state.pipes {
        push_pipe(&mut out, pipe, h, rgb(map.pillar, 1.0));
    }

    push_run_penguin(&mut out, &state.penguin, skin, state.time, settings);
    out
}

fn push_pipe(out: &mut Vec<DrawCommand>, pipe: &Pipe, height: f32, color: Color) {
    let bottom_y = pipe.gap_bottom();
    out.push(DrawCommand::RoundedRect {
        rect: Rect::new(pipe.x, 0.0, pipe.width, pipe.gap_top),
        radii: [0.0, 0.0, PIPE_CAP_RADIUS, PIPE_CAP_RADIUS],
        color,
    });
    out.push(DrawCommand::RoundedRect {
        rect: Rect::new(pipe.x, bottom_y, pipe.width, height - bottom_y),
        radii: [PIPE_CAP_RADIUS, PIPE_CAP_RADIUS, 0.0, 0.0],
        color,
    });

    let lip_x = pipe.x + PIPE_LIP_INSET;
    let lip_w = pipe.width - 2.0 * PIPE_LIP_INSET;
    out.push(DrawCommand::Rect {
        rect: Rect::new(lip_x, pipe.gap_top - PIPE_LIP_HEIGHT, lip_w, PIPE_LIP_HEIGHT),
        color: colors::PIPE_LIP,
    });
    out.push(DrawCommand::Rect {
        rect: Rect::new(lip_x, bottom_y, lip_w, PIPE_LIP_HEIGHT),
        color: colors::PIPE_LIP,
    });
}

fn push_run_penguin(out: &mut Vec<DrawCommand>, penguin: &Penguin, skin: &Skin, time: f32, settings: &Settings) {
    let (tilt, wing) = if settings.animate_penguin() {
        (penguin_tilt(penguin.vel), (time * WING_RATE).sin() * WING_TRAVEL)
    } else {
        (0.0, 0.0)
    };
    out.push(DrawCommand::PushTransform(Affine2::from_angle_translation(tilt, penguin.pos)));
    push_penguin_body(out, skin, wing);
    out.push(DrawCommand::PopTransform);
}

/// Static preview of a skin at hub scale
pub fn push_hub_penguin(out: &mut Vec<DrawCommand>, skin: &Skin, center: Vec2) {
    out.push(DrawCommand::PushTransform(Affine2::from_scale_angle_translation(
        Vec2::splat(HUB_SCALE),
        0.0,
        center,
    )));
    push_penguin_body(out, skin, 0.0);
    out.push(DrawCommand::PopTransform);
}

/// Penguin parts in local coordinates (origin at the body centre, facing +x)
fn push_penguin_body(out: &mut Vec<DrawCommand>, skin: &Skin, wing_offset: f32) {
    let body = rgb(skin.body, 1.0);
    let wing = rgb(skin.wing, 1.0);
    let beak = rgb(skin.beak, 1.0);

    out.push(DrawCommand::Ellipse {
        center: Vec2::ZERO,
        radii: Vec2::new(20.0, 25.0),
        rotation: 0.0,
        color: body,
    });
    out.push(DrawCommand::Ellipse {
        center: Vec2::new(-2.0, 3.0),
        radii: Vec2::new(14.0, 18.0),
        rotation: 0.0,
        color: colors::BELLY,
    });
    out.push(DrawCommand::Circle {
        center: Vec2::new(6.0, -7.0),
        radius: 5.0,
        color: colors::EYE,
    });
    out.push(DrawCommand::Circle {
        center: Vec2::new(7.5, -7.0),
        radius: 2.1,
        color: colors::PUPIL,
    });
    out.push(DrawCommand::Triangle {
        points: [Vec2::new(9.0, -1.0), Vec2::new(22.0, 3.0), Vec2::new(9.0, 7.0)],
        color: beak,
    });
    out.push(DrawCommand::Ellipse {
        center: Vec2::new(-5.0, 6.0 + wing_offset),
        radii: Vec2::new(8.0, 14.0),
        rotation: -0.5,
        color: wing,
    });
    for foot_x in [-6.0, 2.0] {
        out.push(DrawCommand::Ellipse {
            center: Vec2::new(foot_x, 22.0),
            radii: Vec2::new(6.0, 4.0),
            rotation: 0.0,
            color: beak,
        });
    }
}
