//! WebGPU rendering module
//!
//! The scene is described as a display list of logical shapes, tessellated
//! on the CPU into a single triangle list per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, Rect, build_scene};
pub use shapes::tessellate;
pub use vertex::{Color, Vertex};
