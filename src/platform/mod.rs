//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events
//! - Calendar date (daily reward)
//! - Storage (LocalStorage on web, a JSON file on native)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Action, InputEvent, action_for};
pub use time::{CalendarDate, DateParseError, today};
