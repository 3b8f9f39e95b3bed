//! Meta-state and settings codec
//!
//! Integers are stored as decimal strings, id sets as JSON arrays, dates as
//! `YYYY-MM-DD`, settings as a JSON object. Every read falls back to its
//! default when the value is missing or does not parse.

use serde::de::DeserializeOwned;

use super::{KeyValueStore, StorageError};
use crate::catalog::{DEFAULT_MAP, DEFAULT_MODE, DEFAULT_SKIN};
use crate::meta::{MetaRecord, PlayerMeta};
use crate::platform::CalendarDate;
use crate::settings::Settings;

/// Storage keys (all under the `ww_` namespace)
pub mod keys {
    pub const COINS: &str = "ww_coins";
    pub const BEST: &str = "ww_best";
    pub const RUNS: &str = "ww_runs";
    pub const OWNED_SKINS: &str = "ww_owned_skins";
    pub const OWNED_MAPS: &str = "ww_owned_maps";
    pub const SKIN: &str = "ww_skin";
    pub const MAP: &str = "ww_map";
    pub const MODE: &str = "ww_mode";
    pub const DAILY: &str = "ww_daily";
    pub const SETTINGS: &str = "ww_settings";

    pub const ALL: [&str; 10] = [
        COINS,
        BEST,
        RUNS,
        OWNED_SKINS,
        OWNED_MAPS,
        SKIN,
        MAP,
        MODE,
        DAILY,
        SETTINGS,
    ];
}

fn load_u32<S: KeyValueStore + ?Sized>(store: &S, key: &str, fallback: u32) -> u32 {
    match store.load(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed {} = {:?}", key, raw);
            fallback
        }),
        None => fallback,
    }
}

fn load_json<S: KeyValueStore + ?Sized, T: DeserializeOwned>(store: &S, key: &str, fallback: T) -> T {
    match store.load(key) {
        Some(raw) if !raw.is_empty() => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed {}: {}", key, e);
            fallback
        }),
        _ => fallback,
    }
}

fn load_id<S: KeyValueStore + ?Sized>(store: &S, key: &str, fallback: &str) -> String {
    store
        .load(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn load_date<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<CalendarDate> {
    let raw = store.load(key).filter(|v| !v.is_empty())?;
    match raw.parse() {
        Ok(date) => Some(date),
        Err(e) => {
            log::warn!("Ignoring malformed {} = {:?}: {}", key, raw, e);
            None
        }
    }
}

/// Read the meta-state, substituting defaults for anything missing or corrupt
pub fn load_meta<S: KeyValueStore + ?Sized>(store: &S) -> PlayerMeta {
    let record = MetaRecord {
        coins: load_u32(store, keys::COINS, 0),
        best_score: load_u32(store, keys::BEST, 0),
        runs_played: load_u32(store, keys::RUNS, 0),
        owned_skins: load_json(store, keys::OWNED_SKINS, vec![DEFAULT_SKIN.to_string()]),
        owned_maps: load_json(store, keys::OWNED_MAPS, vec![DEFAULT_MAP.to_string()]),
        equipped_skin: load_id(store, keys::SKIN, DEFAULT_SKIN),
        equipped_map: load_id(store, keys::MAP, DEFAULT_MAP),
        mode: load_id(store, keys::MODE, DEFAULT_MODE),
        last_daily: load_date(store, keys::DAILY),
    };
    let meta = PlayerMeta::from_record(record);
    log::info!(
        "Loaded meta: {} coins, best {}, {} runs",
        meta.coins(),
        meta.best_score(),
        meta.runs_played()
    );
    meta
}

/// Write every meta field
///
/// All keys are attempted even if one fails; the first error is returned.
pub fn save_meta<S: KeyValueStore + ?Sized>(store: &mut S, meta: &PlayerMeta) -> Result<(), StorageError> {
    let record = meta.to_record();
    let owned_skins =
        serde_json::to_string(&record.owned_skins).map_err(|e| StorageError::Encode(e.to_string()))?;
    let owned_maps =
        serde_json::to_string(&record.owned_maps).map_err(|e| StorageError::Encode(e.to_string()))?;

    let mut entries = vec![
        (keys::COINS, record.coins.to_string()),
        (keys::BEST, record.best_score.to_string()),
        (keys::RUNS, record.runs_played.to_string()),
        (keys::OWNED_SKINS, owned_skins),
        (keys::OWNED_MAPS, owned_maps),
        (keys::SKIN, record.equipped_skin),
        (keys::MAP, record.equipped_map),
        (keys::MODE, record.mode),
    ];
    if let Some(date) = record.last_daily {
        entries.push((keys::DAILY, date.to_string()));
    }

    let mut first_err = None;
    for (key, value) in entries {
        if let Err(e) = store.save(key, &value) {
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> Settings {
    load_json(store, keys::SETTINGS, Settings::default())
}

pub fn save_settings<S: KeyValueStore + ?Sized>(store: &mut S, settings: &Settings) -> Result<(), StorageError> {
    let json = serde_json::to_string(settings).map_err(|e| StorageError::Encode(e.to_string()))?;
    store.save(keys::SETTINGS, &json)?;
    log::info!("Settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemKind;
    use crate::consts::STORAGE_PREFIX;
    use crate::persistence::MemoryStore;
    use crate::settings::QualityPreset;

    #[test]
    fn test_keys_share_namespace() {
        assert!(keys::ALL.iter().all(|k| k.starts_with(STORAGE_PREFIX)));
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let meta = load_meta(&MemoryStore::new());
        assert_eq!(meta, PlayerMeta::default());
        assert_eq!(load_settings(&MemoryStore::new()), Settings::default());
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let store = MemoryStore::new()
            .with(keys::COINS, "lots")
            .with(keys::BEST, "-4")
            .with(keys::RUNS, " 12 ")
            .with(keys::OWNED_SKINS, "{not json")
            .with(keys::OWNED_MAPS, r#"["night"]"#)
            .with(keys::SKIN, "neon")
            .with(keys::MAP, "night")
            .with(keys::DAILY, "last tuesday")
            .with(keys::SETTINGS, "[]");
        let meta = load_meta(&store);
        assert_eq!(meta.coins(), 0);
        assert_eq!(meta.best_score(), 0);
        assert_eq!(meta.runs_played(), 12);
        assert_eq!(meta.equipped(ItemKind::Skin), "classic");
        assert_eq!(meta.equipped(ItemKind::Map), "night");
        assert!(meta.owns(ItemKind::Map, "day"));
        assert_eq!(meta.last_daily(), None);
        assert_eq!(load_settings(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut meta = PlayerMeta::default();
        meta.award_coins(300);
        meta.purchase(ItemKind::Skin, "gold").unwrap();
        meta.select_mode("chill").unwrap();
        meta.record_run(9);
        meta.claim_daily("2026-10-17".parse().unwrap(), 15).unwrap();

        let mut store = MemoryStore::new();
        save_meta(&mut store, &meta).unwrap();
        assert_eq!(store.get(keys::COINS), Some("115"));
        assert_eq!(store.get(keys::OWNED_SKINS), Some(r#"["classic","gold"]"#));
        assert_eq!(store.get(keys::DAILY), Some("2026-10-17"));
        assert_eq!(load_meta(&store), meta);
    }

    #[test]
    fn test_daily_absent_until_claimed() {
        let mut store = MemoryStore::new();
        save_meta(&mut store, &PlayerMeta::default()).unwrap();
        assert_eq!(store.get(keys::DAILY), None);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            quality: QualityPreset::Low,
            reduced_motion: true,
            ..Default::default()
        };
        save_settings(&mut store, &settings).unwrap();
        assert_eq!(load_settings(&store), settings);
    }
}
