//! Input event mapping
//!
//! Every activation source collapses into a single flap.

/// A raw event from the host
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed on the canvas
    PointerDown,
    /// Finger touched the canvas
    TouchStart,
    /// Key pressed, identified by its physical code (e.g. `"Space"`)
    KeyDown { code: String },
    /// Window resized (CSS pixels)
    Resize { width: f32, height: f32 },
}

/// What the game does in response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Flap,
    Resize { width: f32, height: f32 },
}

/// Key codes that flap
pub const FLAP_KEYS: [&str; 1] = ["Space"];

/// Map a host event to a game action, `None` for events the game ignores
pub fn action_for(event: &InputEvent) -> Option<Action> {
    match event {
        InputEvent::PointerDown | InputEvent::TouchStart => Some(Action::Flap),
        InputEvent::KeyDown { code } if FLAP_KEYS.contains(&code.as_str()) => Some(Action::Flap),
        InputEvent::KeyDown { .. } => None,
        InputEvent::Resize { width, height } => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
    }
}

/// Whether the host should suppress its default handling (page scroll on space)
pub fn should_prevent_default(event: &InputEvent) -> bool {
    match event {
        InputEvent::TouchStart => true,
        InputEvent::KeyDown { code } => FLAP_KEYS.contains(&code.as_str()),
        _ => false,
    }
}
