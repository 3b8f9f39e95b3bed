//! Presentation interface
//!
//! The game core talks to whatever UI the host provides through
//! [`Presenter`]. The web build implements it with DOM calls; tests record
//! the calls.

pub mod html;
pub mod panels;

pub use panels::{Block, Button, ButtonStyle, ListItem, Panel, PanelAction, PanelKind};

/// Heads-up display contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub coins: u32,
    pub best: u32,
    /// Equipped skin's display name (shown in the hub)
    pub skin_name: &'static str,
}

/// Capabilities the core needs from a UI layer
pub trait Presenter {
    /// Open (or replace) the modal panel
    fn show_panel(&mut self, panel: &Panel);
    fn hide_panel(&mut self);
    fn show_hub(&mut self);
    fn hide_hub(&mut self);
    fn show_game_over(&mut self, score: u32, best: u32);
    fn hide_game_over(&mut self);
    fn update_hud(&mut self, hud: &Hud);
    /// Short blocking message (rejected purchases)
    fn notify(&mut self, message: &str);
}

/// Presenter that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn show_panel(&mut self, panel: &Panel) {
        log::info!("[panel] {}", panel.title);
    }

    fn hide_panel(&mut self) {}

    fn show_hub(&mut self) {
        log::info!("[hub]");
    }

    fn hide_hub(&mut self) {}

    fn show_game_over(&mut self, score: u32, best: u32) {
        log::info!("[game over] score {} best {}", score, best);
    }

    fn hide_game_over(&mut self) {}

    fn update_hud(&mut self, hud: &Hud) {
        log::debug!("[hud] score {} coins {} best {}", hud.score, hud.coins, hud.best);
    }

    fn notify(&mut self, message: &str) {
        log::info!("[notice] {}", message);
    }
}
