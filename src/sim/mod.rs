//! Simulation module
//!
//! All gameplay logic lives here. The module stays free of rendering,
//! storage and platform dependencies:
//! - Seeded RNG only
//! - Pipes kept oldest-first
//! - Rewards and run end reported as events, never applied directly

pub mod collision;
pub mod scenery;
pub mod state;
pub mod tick;

pub use collision::{Aabb, hits_ground, hits_pipe, penguin_box};
pub use scenery::{BackPillar, Scenery, Snowflake};
pub use state::{GameEvent, GamePhase, GameState, Penguin, Pipe, Playfield};
pub use tick::{TickInput, tick};
