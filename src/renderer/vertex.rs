//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, components in `0..=1`
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert a `0xRRGGBB` catalog colour
pub fn rgb(hex: u32, alpha: f32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Fixed colours shared by every skin and map
pub mod colors {
    use super::Color;

    pub const CLEAR: Color = [0.02, 0.02, 0.05, 1.0];
    pub const SNOW: Color = [1.0, 1.0, 1.0, 0.9];
    /// Background pillars: black at 0.4 inside a 0.26 layer
    pub const BACK_PILLAR: Color = [0.0, 0.0, 0.0, 0.4 * 0.26];
    pub const PIPE_LIP: Color = [1.0, 1.0, 1.0, 0.2];
    pub const BELLY: Color = [1.0, 1.0, 1.0, 1.0];
    pub const EYE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: Color = [0.067, 0.067, 0.067, 1.0];
}
