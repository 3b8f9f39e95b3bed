//! Controller between the UI and the session
//!
//! Hub buttons and panel buttons arrive as [`UiCommand`]s; the app applies
//! them to the [`Session`] and tells the [`Presenter`] what to show.

use crate::catalog::ItemKind;
use crate::meta::StoreError;
use crate::persistence::KeyValueStore;
use crate::platform::{self, CalendarDate};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase};
use crate::ui::{Panel, PanelAction, PanelKind, Presenter, panels};

/// Something the player clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Play,
    Restart,
    Menu,
    OpenStore,
    OpenSkins,
    OpenMaps,
    OpenModes,
    OpenMissions,
    ClaimDaily,
    OpenSettings,
    ClosePanel,
    Panel(PanelAction),
}

impl UiCommand {
    /// Command for a hub/card button by its element id
    pub fn from_element_id(id: &str) -> Option<Self> {
        Some(match id {
            "btn-play" => UiCommand::Play,
            "btn-restart" => UiCommand::Restart,
            "btn-menu" => UiCommand::Menu,
            "btn-store" => UiCommand::OpenStore,
            "btn-skins" => UiCommand::OpenSkins,
            "btn-maps" => UiCommand::OpenMaps,
            "btn-modes" => UiCommand::OpenModes,
            "btn-missions" => UiCommand::OpenMissions,
            "btn-daily" => UiCommand::ClaimDaily,
            "btn-settings" => UiCommand::OpenSettings,
            "panel-close" => UiCommand::ClosePanel,
            _ => return None,
        })
    }

    /// Element ids that map to a command
    pub const ELEMENT_IDS: [&'static str; 11] = [
        "btn-play",
        "btn-restart",
        "btn-menu",
        "btn-store",
        "btn-skins",
        "btn-maps",
        "btn-modes",
        "btn-missions",
        "btn-daily",
        "btn-settings",
        "panel-close",
    ];
}

pub struct App<S: KeyValueStore, P: Presenter> {
    session: Session<S>,
    presenter: P,
    open_panel: Option<PanelKind>,
    clock: fn() -> CalendarDate,
}

impl<S: KeyValueStore, P: Presenter> App<S, P> {
    /// Start in the hub with the HUD filled in
    pub fn new(session: Session<S>, presenter: P) -> Self {
        let mut app = Self {
            session,
            presenter,
            open_panel: None,
            clock: platform::today,
        };
        app.presenter.hide_game_over();
        app.presenter.show_hub();
        app.refresh_hud();
        app
    }

    /// Replace the date source used by the daily reward
    pub fn with_clock(mut self, clock: fn() -> CalendarDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn open_panel(&self) -> Option<PanelKind> {
        self.open_panel
    }

    pub fn flap(&mut self) -> bool {
        self.session.flap()
    }

    /// Advance one animation frame
    pub fn frame(&mut self, dt: f32) {
        let events = self.session.advance(dt);
        if events.is_empty() {
            return;
        }
        self.refresh_hud();
        for event in events {
            if let GameEvent::GameOver { score } = event {
                let best = self.session.meta().best_score();
                self.presenter.show_game_over(score, best);
            }
        }
    }

    pub fn handle(&mut self, command: UiCommand) {
        log::debug!("UI command: {:?}", command);
        match command {
            UiCommand::Play => {
                self.close_panel();
                self.presenter.hide_hub();
                self.presenter.hide_game_over();
                self.session.play();
            }
            UiCommand::Restart => {
                self.presenter.hide_game_over();
                self.session.restart();
            }
            UiCommand::Menu => {
                self.presenter.hide_game_over();
                self.session.menu();
                self.presenter.show_hub();
            }
            UiCommand::OpenStore => self.open(panels::store(self.session.meta())),
            UiCommand::OpenSkins => self.open(panels::skins(self.session.meta())),
            UiCommand::OpenMaps => self.open(panels::maps(self.session.meta())),
            UiCommand::OpenModes => self.open(panels::modes(self.session.meta())),
            UiCommand::OpenMissions => self.open(panels::missions(self.session.meta())),
            UiCommand::ClaimDaily => {
                let today = (self.clock)();
                let panel = match self.session.claim_daily(today) {
                    Ok(reward) => panels::daily_claimed(reward),
                    Err(e) => panels::daily_rejected(&e.to_string()),
                };
                self.open(panel);
            }
            UiCommand::OpenSettings => self.open(panels::settings(self.session.settings())),
            UiCommand::ClosePanel => self.close_panel(),
            UiCommand::Panel(action) => self.apply(action),
        }
        self.refresh_hud();
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::BuySkin(id) => {
                let result = self.session.buy(ItemKind::Skin, &id).map(|_| ());
                self.store_action(result);
            }
            PanelAction::BuyMap(id) => {
                let result = self.session.buy(ItemKind::Map, &id).map(|_| ());
                self.store_action(result);
            }
            PanelAction::EquipSkin(id) => {
                let result = self.session.equip(ItemKind::Skin, &id);
                self.store_action(result);
            }
            PanelAction::EquipMap(id) => {
                let result = self.session.equip(ItemKind::Map, &id);
                self.store_action(result);
            }
            PanelAction::SetMode(id) => {
                if let Err(e) = self.session.select_mode(&id) {
                    log::warn!("Mode change refused: {}", e);
                }
                self.open(panels::modes(self.session.meta()));
            }
            PanelAction::CycleQuality => self.change_settings(|s| s.quality = s.quality.next()),
            PanelAction::ToggleSnow => self.change_settings(|s| s.snow = !s.snow),
            PanelAction::TogglePillars => self.change_settings(|s| s.back_pillars = !s.back_pillars),
            PanelAction::ToggleMotion => self.change_settings(|s| s.reduced_motion = !s.reduced_motion),
        }
    }

    /// Refresh the store after a successful buy/equip; tell the player why not otherwise
    fn store_action(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => self.open(panels::store(self.session.meta())),
            Err(e) => {
                log::info!("Store action refused: {}", e);
                self.presenter.notify(&e.to_string());
            }
        }
    }

    fn change_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        self.session.update_settings(change);
        self.open(panels::settings(self.session.settings()));
    }

    fn open(&mut self, panel: Panel) {
        self.open_panel = Some(panel.kind);
        self.presenter.show_panel(&panel);
    }

    fn close_panel(&mut self) {
        if self.open_panel.take().is_some() {
            self.presenter.hide_panel();
        }
    }

    fn refresh_hud(&mut self) {
        let hud = self.session.hud();
        self.presenter.update_hud(&hud);
    }

    /// Whether the simulation is running a live run (for input routing)
    pub fn is_playing(&self) -> bool {
        self.session.phase() == GamePhase::Playing
    }
}
