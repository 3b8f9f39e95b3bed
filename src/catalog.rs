//! Static catalog of skins, maps and difficulty modes
//!
//! Colours are `0xRRGGBB` values; the renderer converts them to RGBA.

/// What kind of catalog entry an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Skin,
    Map,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Skin => "skin",
            ItemKind::Map => "map",
        }
    }
}

/// A penguin colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub body: u32,
    pub wing: u32,
    /// Beak and feet
    pub beak: u32,
    /// Coin cost (0 = owned by default)
    pub cost: u32,
}

/// A background theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    /// Sky gradient, top to bottom
    pub sky: [u32; 2],
    /// Pipe colour
    pub pillar: u32,
    pub cost: u32,
}

/// A difficulty preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mode {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    /// Base scroll speed (pixels/sec)
    pub speed: f32,
    /// Vertical gap between pipe halves (pixels)
    pub gap: f32,
}

pub const DEFAULT_SKIN: &str = "classic";
pub const DEFAULT_MAP: &str = "day";
pub const DEFAULT_MODE: &str = "normal";

pub const SKINS: [Skin; 4] = [
    Skin {
        id: "classic",
        name: "Classic Penguin",
        desc: "Default bean-shaped hero.",
        body: 0x23374d,
        wing: 0x2f4f60,
        beak: 0xffb54a,
        cost: 0,
    },
    Skin {
        id: "neon",
        name: "Neon Cyber",
        desc: "Glows like a dodgy arcade sign.",
        body: 0x00e5ff,
        wing: 0x00b0ff,
        beak: 0xffe066,
        cost: 120,
    },
    Skin {
        id: "red",
        name: "Red Rebel",
        desc: "Looks faster. Definitely isn't.",
        body: 0xe53935,
        wing: 0xb71c1c,
        beak: 0xffcc80,
        cost: 60,
    },
    Skin {
        id: "gold",
        name: "Golden Waddle",
        desc: "For people who tap too much.",
        body: 0xd4af37,
        wing: 0xb08a2e,
        beak: 0xfff59d,
        cost: 200,
    },
];

pub const MAPS: [MapTheme; 3] = [
    MapTheme {
        id: "day",
        name: "Soft Morning",
        desc: "Chill blue sky and sleepy snow.",
        sky: [0x87ceeb, 0xe0f7fa],
        pillar: 0xb0bec5,
        cost: 0,
    },
    MapTheme {
        id: "sunset",
        name: "Toxic Sunset",
        desc: "Glowing orange, bad decisions.",
        sky: [0xff7043, 0xffcc80],
        pillar: 0x6d4c41,
        cost: 80,
    },
    MapTheme {
        id: "night",
        name: "Northern Night",
        desc: "Deep teal with tiny stars.",
        sky: [0x001b30, 0x003f5c],
        pillar: 0x263238,
        cost: 100,
    },
];

pub const MODES: [Mode; 3] = [
    Mode {
        id: "chill",
        name: "Chill",
        desc: "Good for humans",
        speed: 156.0,
        gap: 190.0,
    },
    Mode {
        id: "normal",
        name: "Normal",
        desc: "Good for rage",
        speed: 192.0,
        gap: 165.0,
    },
    Mode {
        id: "sweaty",
        name: "Sweaty",
        desc: "Good for TikTok clips",
        speed: 228.0,
        gap: 145.0,
    },
];

/// Look up a skin, falling back to the first entry for unknown ids
pub fn skin(id: &str) -> &'static Skin {
    find_skin(id).unwrap_or(&SKINS[0])
}

/// Look up a map, falling back to the first entry for unknown ids
pub fn map(id: &str) -> &'static MapTheme {
    find_map(id).unwrap_or(&MAPS[0])
}

/// Look up a mode, falling back to `normal` for unknown ids
pub fn mode(id: &str) -> &'static Mode {
    find_mode(id).unwrap_or(&MODES[1])
}

pub fn find_skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

pub fn find_map(id: &str) -> Option<&'static MapTheme> {
    MAPS.iter().find(|m| m.id == id)
}

pub fn find_mode(id: &str) -> Option<&'static Mode> {
    MODES.iter().find(|m| m.id == id)
}

/// Cost of a skin or map, `None` if the id is not in the catalog
pub fn cost_of(kind: ItemKind, id: &str) -> Option<u32> {
    match kind {
        ItemKind::Skin => find_skin(id).map(|s| s.cost),
        ItemKind::Map => find_map(id).map(|m| m.cost),
    }
}

/// Whether an id names a catalog entry of the given kind
pub fn exists(kind: ItemKind, id: &str) -> bool {
    cost_of(kind, id).is_some()
}
