//! Panel models for the hub's icon buttons
//!
//! Each builder reads the current meta-state and returns a plain data
//! description; presenters decide how to show it.

use crate::catalog::{ItemKind, MAPS, MODES, SKINS};
use crate::meta::PlayerMeta;
use crate::settings::Settings;

const OWNED_MARK: &str = "\u{2714}\u{fe0e} ";
const ACTIVE_MARK: &str = "\u{2605} ";
const SEP: &str = " \u{2022} ";

/// Which panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Store,
    Skins,
    Maps,
    Modes,
    Missions,
    Daily,
    Settings,
}

/// An action bound to a panel button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    BuySkin(String),
    EquipSkin(String),
    BuyMap(String),
    EquipMap(String),
    SetMode(String),
    CycleQuality,
    ToggleSnow,
    TogglePillars,
    ToggleMotion,
}

impl PanelAction {
    /// Parse the `data-action` / `data-id` pair of a button
    pub fn parse(action: &str, id: Option<&str>) -> Option<Self> {
        let id = || id.filter(|s| !s.is_empty()).map(str::to_string);
        match action {
            "buy-skin" => id().map(PanelAction::BuySkin),
            "equip-skin" => id().map(PanelAction::EquipSkin),
            "buy-map" => id().map(PanelAction::BuyMap),
            "equip-map" => id().map(PanelAction::EquipMap),
            "set-mode" => id().map(PanelAction::SetMode),
            "cycle-quality" => Some(PanelAction::CycleQuality),
            "toggle-snow" => Some(PanelAction::ToggleSnow),
            "toggle-pillars" => Some(PanelAction::TogglePillars),
            "toggle-motion" => Some(PanelAction::ToggleMotion),
            _ => None,
        }
    }

    /// Action name as written to `data-action`
    pub fn name(&self) -> &'static str {
        match self {
            PanelAction::BuySkin(_) => "buy-skin",
            PanelAction::EquipSkin(_) => "equip-skin",
            PanelAction::BuyMap(_) => "buy-map",
            PanelAction::EquipMap(_) => "equip-map",
            PanelAction::SetMode(_) => "set-mode",
            PanelAction::CycleQuality => "cycle-quality",
            PanelAction::ToggleSnow => "toggle-snow",
            PanelAction::TogglePillars => "toggle-pillars",
            PanelAction::ToggleMotion => "toggle-motion",
        }
    }

    /// Target id, for actions that carry one
    pub fn id(&self) -> Option<&str> {
        match self {
            PanelAction::BuySkin(id)
            | PanelAction::EquipSkin(id)
            | PanelAction::BuyMap(id)
            | PanelAction::EquipMap(id)
            | PanelAction::SetMode(id) => Some(id),
            _ => None,
        }
    }
}

/// Visual state of a list button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Plain,
    Owned,
    /// Current choice; shown disabled
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub style: ButtonStyle,
    /// `None` for disabled buttons
    pub action: Option<PanelAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub title: String,
    pub detail: String,
    pub button: Option<Button>,
}

/// Building blocks of a panel body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Label(String),
    List(Vec<ListItem>),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Panel {
    fn new(kind: PanelKind, title: &str, blocks: Vec<Block>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            blocks,
        }
    }

    /// Every enabled button's action, in display order
    pub fn actions(&self) -> impl Iterator<Item = &PanelAction> {
        self.blocks.iter().flat_map(|block| match block {
            Block::List(items) => items
                .iter()
                .filter_map(|item| item.button.as_ref()?.action.as_ref())
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }
}

/// Catalog row shared by skins and maps
struct Entry {
    id: &'static str,
    name: &'static str,
    desc: &'static str,
    cost: u32,
}

fn entries(kind: ItemKind) -> Vec<Entry> {
    match kind {
        ItemKind::Skin => SKINS
            .iter()
            .map(|s| Entry {
                id: s.id,
                name: s.name,
                desc: s.desc,
                cost: s.cost,
            })
            .collect(),
        ItemKind::Map => MAPS
            .iter()
            .map(|m| Entry {
                id: m.id,
                name: m.name,
                desc: m.desc,
                cost: m.cost,
            })
            .collect(),
    }
}

fn title_with_mark(owned: bool, name: &str) -> String {
    if owned {
        format!("{}{}", OWNED_MARK, name)
    } else {
        name.to_string()
    }
}

fn store_list(meta: &PlayerMeta, kind: ItemKind) -> Vec<ListItem> {
    let equipped = meta.equipped(kind);
    entries(kind)
        .into_iter()
        .map(|e| {
            let owned = meta.owns(kind, e.id);
            let is_equipped = e.id == equipped;
            let status = match (owned, is_equipped) {
                (true, true) => format!("{}Equipped", SEP),
                (true, false) => format!("{}Owned", SEP),
                (false, _) if e.cost > 0 => format!("{}Cost: {} coins", SEP, e.cost),
                (false, _) => format!("{}Free", SEP),
            };

            let button = if !owned && e.cost > 0 {
                Button {
                    label: format!("Buy {}", e.cost),
                    style: ButtonStyle::Plain,
                    action: Some(match kind {
                        ItemKind::Skin => PanelAction::BuySkin(e.id.to_string()),
                        ItemKind::Map => PanelAction::BuyMap(e.id.to_string()),
                    }),
                }
            } else if is_equipped {
                Button {
                    label: "Equipped".to_string(),
                    style: ButtonStyle::Selected,
                    action: None,
                }
            } else {
                Button {
                    label: "Equip".to_string(),
                    style: ButtonStyle::Owned,
                    action: Some(match kind {
                        ItemKind::Skin => PanelAction::EquipSkin(e.id.to_string()),
                        ItemKind::Map => PanelAction::EquipMap(e.id.to_string()),
                    }),
                }
            };

            ListItem {
                title: title_with_mark(owned, e.name),
                detail: format!("{}{}", e.desc, status),
                button: Some(button),
            }
        })
        .collect()
}

fn ownership_list(meta: &PlayerMeta, kind: ItemKind) -> Vec<ListItem> {
    entries(kind)
        .into_iter()
        .map(|e| ListItem {
            title: title_with_mark(meta.owns(kind, e.id), e.name),
            detail: e.desc.to_string(),
            button: None,
        })
        .collect()
}

/// Skins and maps with buy/equip buttons
pub fn store(meta: &PlayerMeta) -> Panel {
    Panel::new(
        PanelKind::Store,
        "Store",
        vec![
            Block::Label("Skins".into()),
            Block::List(store_list(meta, ItemKind::Skin)),
            Block::Label("Maps".into()),
            Block::List(store_list(meta, ItemKind::Map)),
            Block::Label("Why coins matter".into()),
            Block::Paragraph(
                "The further you go, the more coins each pipe is worth. Unlock loud skins & \
                 distracting skies to flex on your future nerfed self."
                    .into(),
            ),
        ],
    )
}

pub fn skins(meta: &PlayerMeta) -> Panel {
    Panel::new(
        PanelKind::Skins,
        "Skins",
        vec![Block::Label("Skins".into()), Block::List(ownership_list(meta, ItemKind::Skin))],
    )
}

pub fn maps(meta: &PlayerMeta) -> Panel {
    Panel::new(
        PanelKind::Maps,
        "Maps",
        vec![Block::Label("Maps".into()), Block::List(ownership_list(meta, ItemKind::Map))],
    )
}

pub fn modes(meta: &PlayerMeta) -> Panel {
    let items = MODES
        .iter()
        .map(|m| {
            let active = m.id == meta.mode_id();
            ListItem {
                title: if active {
                    format!("{}{}", ACTIVE_MARK, m.name)
                } else {
                    m.name.to_string()
                },
                detail: m.desc.to_string(),
                button: Some(if active {
                    Button {
                        label: "Selected".into(),
                        style: ButtonStyle::Selected,
                        action: None,
                    }
                } else {
                    Button {
                        label: "Select".into(),
                        style: ButtonStyle::Plain,
                        action: Some(PanelAction::SetMode(m.id.to_string())),
                    }
                }),
            }
        })
        .collect();
    Panel::new(
        PanelKind::Modes,
        "Modes",
        vec![Block::Label("Modes".into()), Block::List(items)],
    )
}

pub fn missions(meta: &PlayerMeta) -> Panel {
    let runs = meta.runs_played();
    let msg = if runs == 0 {
        "You haven't faceplanted yet. Go play a round.".to_string()
    } else {
        format!(
            "You've played {} run{}. Keep going \u{2013} the game quietly gets faster the longer you survive.",
            runs,
            if runs == 1 { "" } else { "s" }
        )
    };
    Panel::new(
        PanelKind::Missions,
        "Missions (WIP)",
        vec![
            Block::Paragraph(msg),
            Block::Paragraph(
                "Long-term plan: daily missions, silly titles, more reasons to stay up too late.".into(),
            ),
        ],
    )
}

pub fn daily_claimed(reward: u32) -> Panel {
    Panel::new(
        PanelKind::Daily,
        "Daily Reward",
        vec![
            Block::Paragraph(format!("You grabbed +{} coins.", reward)),
            Block::Paragraph("Now go waste them on a shiny penguin.".into()),
        ],
    )
}

/// Shown when today's reward was already taken; `message` comes from the error
pub fn daily_rejected(message: &str) -> Panel {
    Panel::new(PanelKind::Daily, "Daily Reward", vec![Block::Paragraph(message.to_string())])
}

fn toggle_item(title: &str, on: bool, action: PanelAction) -> ListItem {
    ListItem {
        title: title.to_string(),
        detail: if on { "On" } else { "Off" }.to_string(),
        button: Some(Button {
            label: if on { "Turn off" } else { "Turn on" }.to_string(),
            style: if on { ButtonStyle::Owned } else { ButtonStyle::Plain },
            action: Some(action),
        }),
    }
}

pub fn settings(settings: &Settings) -> Panel {
    let quality = ListItem {
        title: "Quality".into(),
        detail: format!(
            "{}{}{} snowflakes",
            settings.quality.as_str(),
            SEP,
            settings.quality.snowflake_count()
        ),
        button: Some(Button {
            label: "Cycle".into(),
            style: ButtonStyle::Plain,
            action: Some(PanelAction::CycleQuality),
        }),
    };
    Panel::new(
        PanelKind::Settings,
        "Settings",
        vec![
            Block::Label("Display".into()),
            Block::List(vec![
                quality,
                toggle_item("Snow", settings.snow, PanelAction::ToggleSnow),
                toggle_item("Background pillars", settings.back_pillars, PanelAction::TogglePillars),
                toggle_item("Reduced motion", settings.reduced_motion, PanelAction::ToggleMotion),
            ]),
            Block::Paragraph("Changes apply right away and stick on this device.".into()),
        ],
    )
}
