//! Durable player progression
//!
//! Coins, best score, ownership and equips. Every mutation goes through a
//! method here so the ownership invariants hold after each call:
//! - owned sets always contain the default skin/map
//! - equipped ids are always owned
//! - the coin balance never goes below zero

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::{self, DEFAULT_MAP, DEFAULT_MODE, DEFAULT_SKIN, ItemKind, MapTheme, Mode, Skin};
use crate::platform::CalendarDate;

/// Why a store action was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Balance below the item's cost
    InsufficientCoins {
        kind: ItemKind,
        cost: u32,
        balance: u32,
    },
    /// Buying something already in the owned set
    AlreadyOwned { kind: ItemKind, id: String },
    /// Equipping something never bought
    NotOwned { kind: ItemKind, id: String },
    /// Id not present in the catalog
    UnknownItem(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InsufficientCoins {
                kind: ItemKind::Skin,
                ..
            } => write!(f, "Not enough coins. Touch grass, then come back."),
            StoreError::InsufficientCoins {
                kind: ItemKind::Map,
                ..
            } => write!(f, "Not enough coins. Hit more pipes, gain more trauma."),
            StoreError::AlreadyOwned { kind, id } => {
                write!(f, "You already own the {} '{}'.", kind.as_str(), id)
            }
            StoreError::NotOwned { kind, id } => {
                write!(f, "Buy the {} '{}' before equipping it.", kind.as_str(), id)
            }
            StoreError::UnknownItem(id) => write!(f, "No such item: '{}'.", id),
        }
    }
}

impl std::error::Error for StoreError {}

/// Why a daily reward claim was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyError {
    AlreadyClaimed(CalendarDate),
}

impl fmt::Display for DailyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyError::AlreadyClaimed(_) => {
                write!(f, "Already claimed today. Touch grass, return tomorrow.")
            }
        }
    }
}

impl std::error::Error for DailyError {}

/// Plain, unvalidated view of the persisted fields
///
/// Whatever storage hands back goes through [`PlayerMeta::from_record`],
/// which repairs anything that breaks an invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaRecord {
    pub coins: u32,
    pub best_score: u32,
    pub runs_played: u32,
    pub owned_skins: Vec<String>,
    pub owned_maps: Vec<String>,
    pub equipped_skin: String,
    pub equipped_map: String,
    pub mode: String,
    pub last_daily: Option<CalendarDate>,
}

/// Player progression independent of any single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMeta {
    coins: u32,
    best_score: u32,
    runs_played: u32,
    owned_skins: BTreeSet<String>,
    owned_maps: BTreeSet<String>,
    equipped_skin: String,
    equipped_map: String,
    mode: String,
    last_daily: Option<CalendarDate>,
}

impl Default for PlayerMeta {
    fn default() -> Self {
        Self {
            coins: 0,
            best_score: 0,
            runs_played: 0,
            owned_skins: BTreeSet::from([DEFAULT_SKIN.to_string()]),
            owned_maps: BTreeSet::from([DEFAULT_MAP.to_string()]),
            equipped_skin: DEFAULT_SKIN.to_string(),
            equipped_map: DEFAULT_MAP.to_string(),
            mode: DEFAULT_MODE.to_string(),
            last_daily: None,
        }
    }
}

impl PlayerMeta {
    /// Rebuild from stored fields, dropping unknown ids and re-equipping
    /// defaults where the stored equip is not owned
    pub fn from_record(record: MetaRecord) -> Self {
        let mut owned_skins: BTreeSet<String> = record
            .owned_skins
            .into_iter()
            .filter(|id| catalog::exists(ItemKind::Skin, id))
            .collect();
        owned_skins.insert(DEFAULT_SKIN.to_string());

        let mut owned_maps: BTreeSet<String> = record
            .owned_maps
            .into_iter()
            .filter(|id| catalog::exists(ItemKind::Map, id))
            .collect();
        owned_maps.insert(DEFAULT_MAP.to_string());

        let equipped_skin = if owned_skins.contains(&record.equipped_skin) {
            record.equipped_skin
        } else {
            if !record.equipped_skin.is_empty() {
                log::warn!("Equipped skin '{}' not owned, using default", record.equipped_skin);
            }
            DEFAULT_SKIN.to_string()
        };
        let equipped_map = if owned_maps.contains(&record.equipped_map) {
            record.equipped_map
        } else {
            if !record.equipped_map.is_empty() {
                log::warn!("Equipped map '{}' not owned, using default", record.equipped_map);
            }
            DEFAULT_MAP.to_string()
        };
        let mode = if catalog::find_mode(&record.mode).is_some() {
            record.mode
        } else {
            DEFAULT_MODE.to_string()
        };

        Self {
            coins: record.coins,
            best_score: record.best_score,
            runs_played: record.runs_played,
            owned_skins,
            owned_maps,
            equipped_skin,
            equipped_map,
            mode,
            last_daily: record.last_daily,
        }
    }

    /// Snapshot for persistence
    pub fn to_record(&self) -> MetaRecord {
        MetaRecord {
            coins: self.coins,
            best_score: self.best_score,
            runs_played: self.runs_played,
            owned_skins: self.owned_skins.iter().cloned().collect(),
            owned_maps: self.owned_maps.iter().cloned().collect(),
            equipped_skin: self.equipped_skin.clone(),
            equipped_map: self.equipped_map.clone(),
            mode: self.mode.clone(),
            last_daily: self.last_daily,
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn runs_played(&self) -> u32 {
        self.runs_played
    }

    pub fn last_daily(&self) -> Option<CalendarDate> {
        self.last_daily
    }

    pub fn equipped(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Skin => &self.equipped_skin,
            ItemKind::Map => &self.equipped_map,
        }
    }

    pub fn mode_id(&self) -> &str {
        &self.mode
    }

    pub fn skin(&self) -> &'static Skin {
        catalog::skin(&self.equipped_skin)
    }

    pub fn map(&self) -> &'static MapTheme {
        catalog::map(&self.equipped_map)
    }

    pub fn mode(&self) -> &'static Mode {
        catalog::mode(&self.mode)
    }

    fn owned_set(&self, kind: ItemKind) -> &BTreeSet<String> {
        match kind {
            ItemKind::Skin => &self.owned_skins,
            ItemKind::Map => &self.owned_maps,
        }
    }

    pub fn owns(&self, kind: ItemKind, id: &str) -> bool {
        self.owned_set(kind).contains(id)
    }

    pub fn owned(&self, kind: ItemKind) -> impl Iterator<Item = &str> {
        self.owned_set(kind).iter().map(String::as_str)
    }

    /// Buy an item and equip it
    ///
    /// Returns the coins spent. On error nothing changes.
    pub fn purchase(&mut self, kind: ItemKind, id: &str) -> Result<u32, StoreError> {
        let cost = catalog::cost_of(kind, id).ok_or_else(|| StoreError::UnknownItem(id.to_string()))?;
        if self.owns(kind, id) {
            return Err(StoreError::AlreadyOwned {
                kind,
                id: id.to_string(),
            });
        }
        if self.coins < cost {
            return Err(StoreError::InsufficientCoins {
                kind,
                cost,
                balance: self.coins,
            });
        }

        self.coins -= cost;
        match kind {
            ItemKind::Skin => {
                self.owned_skins.insert(id.to_string());
                self.equipped_skin = id.to_string();
            }
            ItemKind::Map => {
                self.owned_maps.insert(id.to_string());
                self.equipped_map = id.to_string();
            }
        }
        Ok(cost)
    }

    /// Equip an owned item
    pub fn equip(&mut self, kind: ItemKind, id: &str) -> Result<(), StoreError> {
        if !catalog::exists(kind, id) {
            return Err(StoreError::UnknownItem(id.to_string()));
        }
        if !self.owns(kind, id) {
            return Err(StoreError::NotOwned {
                kind,
                id: id.to_string(),
            });
        }
        match kind {
            ItemKind::Skin => self.equipped_skin = id.to_string(),
            ItemKind::Map => self.equipped_map = id.to_string(),
        }
        Ok(())
    }

    /// Switch the difficulty preset
    pub fn select_mode(&mut self, id: &str) -> Result<(), StoreError> {
        if catalog::find_mode(id).is_none() {
            return Err(StoreError::UnknownItem(id.to_string()));
        }
        self.mode = id.to_string();
        Ok(())
    }

    /// Credit coins earned in play
    pub fn award_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Close out a run: bump the run counter, commit the best score
    ///
    /// Returns true when `score` set a new best.
    pub fn record_run(&mut self, score: u32) -> bool {
        self.runs_played = self.runs_played.saturating_add(1);
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Grant the daily reward once per calendar date
    pub fn claim_daily(&mut self, today: CalendarDate, reward: u32) -> Result<u32, DailyError> {
        if self.last_daily == Some(today) {
            return Err(DailyError::AlreadyClaimed(today));
        }
        self.last_daily = Some(today);
        self.award_coins(reward);
        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn meta_with_coins(coins: u32) -> PlayerMeta {
        let mut meta = PlayerMeta::default();
        meta.award_coins(coins);
        meta
    }

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_fresh_meta_owns_defaults() {
        let meta = PlayerMeta::default();
        assert!(meta.owns(ItemKind::Skin, "classic"));
        assert!(meta.owns(ItemKind::Map, "day"));
        assert_eq!(meta.equipped(ItemKind::Skin), "classic");
        assert_eq!(meta.equipped(ItemKind::Map), "day");
        assert_eq!(meta.mode_id(), "normal");
        assert_eq!(meta.coins(), 0);
    }

    #[test]
    fn test_purchase_rejected_when_short() {
        let mut meta = meta_with_coins(50);
        let before = meta.clone();
        let err = meta.purchase(ItemKind::Skin, "red").unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientCoins {
                kind: ItemKind::Skin,
                cost: 60,
                balance: 50
            }
        );
        assert_eq!(meta, before);
        assert_eq!(err.to_string(), "Not enough coins. Touch grass, then come back.");
    }

    #[test]
    fn test_purchase_exact_balance_equips() {
        let mut meta = meta_with_coins(120);
        assert_eq!(meta.purchase(ItemKind::Skin, "neon"), Ok(120));
        assert_eq!(meta.coins(), 0);
        assert!(meta.owns(ItemKind::Skin, "neon"));
        assert_eq!(meta.equipped(ItemKind::Skin), "neon");
    }

    #[test]
    fn test_purchase_map_message() {
        let mut meta = meta_with_coins(10);
        let err = meta.purchase(ItemKind::Map, "sunset").unwrap_err();
        assert_eq!(err.to_string(), "Not enough coins. Hit more pipes, gain more trauma.");
    }

    #[test]
    fn test_purchase_twice_is_refused() {
        let mut meta = meta_with_coins(500);
        meta.purchase(ItemKind::Map, "night").unwrap();
        let coins = meta.coins();
        assert!(matches!(
            meta.purchase(ItemKind::Map, "night"),
            Err(StoreError::AlreadyOwned { .. })
        ));
        assert_eq!(meta.coins(), coins);
    }

    #[test]
    fn test_purchase_unknown_item() {
        let mut meta = meta_with_coins(500);
        assert_eq!(
            meta.purchase(ItemKind::Skin, "night"),
            Err(StoreError::UnknownItem("night".to_string()))
        );
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut meta = meta_with_coins(500);
        assert!(matches!(
            meta.equip(ItemKind::Skin, "gold"),
            Err(StoreError::NotOwned { .. })
        ));
        meta.purchase(ItemKind::Skin, "gold").unwrap();
        meta.equip(ItemKind::Skin, "classic").unwrap();
        assert_eq!(meta.equipped(ItemKind::Skin), "classic");
        meta.equip(ItemKind::Skin, "gold").unwrap();
        assert_eq!(meta.skin().name, "Golden Waddle");
    }

    #[test]
    fn test_select_mode() {
        let mut meta = PlayerMeta::default();
        meta.select_mode("sweaty").unwrap();
        assert_eq!(meta.mode().gap, 145.0);
        assert!(meta.select_mode("impossible").is_err());
        assert_eq!(meta.mode_id(), "sweaty");
    }

    #[test]
    fn test_record_run_commits_best() {
        let mut meta = PlayerMeta::default();
        assert!(meta.record_run(3));
        assert!(!meta.record_run(2));
        assert_eq!(meta.best_score(), 3);
        assert_eq!(meta.runs_played(), 2);
    }

    #[test]
    fn test_daily_once_per_date() {
        let mut meta = PlayerMeta::default();
        assert_eq!(meta.claim_daily(date("2026-10-17"), 15), Ok(15));
        assert_eq!(meta.coins(), 15);
        let err = meta.claim_daily(date("2026-10-17"), 15).unwrap_err();
        assert_eq!(err, DailyError::AlreadyClaimed(date("2026-10-17")));
        assert_eq!(meta.coins(), 15);
        assert_eq!(meta.claim_daily(date("2026-10-18"), 15), Ok(15));
        assert_eq!(meta.coins(), 30);
    }

    #[test]
    fn test_from_record_repairs_invariants() {
        let meta = PlayerMeta::from_record(MetaRecord {
            coins: 7,
            owned_skins: vec!["neon".into(), "bogus".into()],
            owned_maps: vec![],
            equipped_skin: "gold".into(),
            equipped_map: "night".into(),
            mode: "???".into(),
            ..Default::default()
        });
        assert!(meta.owns(ItemKind::Skin, "classic"));
        assert!(meta.owns(ItemKind::Skin, "neon"));
        assert!(!meta.owns(ItemKind::Skin, "bogus"));
        assert_eq!(meta.equipped(ItemKind::Skin), "classic");
        assert_eq!(meta.equipped(ItemKind::Map), "day");
        assert_eq!(meta.mode_id(), "normal");
        assert_eq!(meta.coins(), 7);
    }

    #[test]
    fn test_record_round_trip_keeps_equips() {
        let mut meta = meta_with_coins(300);
        meta.purchase(ItemKind::Skin, "gold").unwrap();
        meta.purchase(ItemKind::Map, "sunset").unwrap();
        let restored = PlayerMeta::from_record(meta.to_record());
        assert_eq!(restored, meta);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Award(u32),
        Buy(ItemKind, usize),
        Equip(ItemKind, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        let kind = prop_oneof![Just(ItemKind::Skin), Just(ItemKind::Map)];
        prop_oneof![
            (0u32..150).prop_map(Op::Award),
            (kind.clone(), 0usize..5).prop_map(|(k, i)| Op::Buy(k, i)),
            (kind, 0usize..5).prop_map(|(k, i)| Op::Equip(k, i)),
        ]
    }

    fn id_for(kind: ItemKind, index: usize) -> &'static str {
        match kind {
            ItemKind::Skin => catalog::SKINS.get(index).map(|s| s.id).unwrap_or("nope"),
            ItemKind::Map => catalog::MAPS.get(index).map(|m| m.id).unwrap_or("nope"),
        }
    }

    proptest! {
        #[test]
        fn prop_store_invariants(ops in proptest::collection::vec(op(), 0..40)) {
            let mut meta = PlayerMeta::default();
            let mut bought: BTreeSet<(&'static str, &'static str)> = BTreeSet::new();
            for op in ops {
                let coins_before = meta.coins();
                match op {
                    Op::Award(n) => meta.award_coins(n),
                    Op::Buy(kind, i) => {
                        let id = id_for(kind, i);
                        match meta.purchase(kind, id) {
                            Ok(cost) => {
                                prop_assert_eq!(meta.coins(), coins_before - cost);
                                bought.insert((kind.as_str(), id));
                            }
                            Err(_) => {
                                prop_assert_eq!(meta.coins(), coins_before);
                            }
                        }
                    }
                    Op::Equip(kind, i) => {
                        let _ = meta.equip(kind, id_for(kind, i));
                    }
                }
                for kind in [ItemKind::Skin, ItemKind::Map] {
                    prop_assert!(meta.owns(kind, meta.equipped(kind)));
                    for id in meta.owned(kind) {
                        let default = matches!(id, DEFAULT_SKIN | DEFAULT_MAP);
                        let was_bought = bought.iter().any(|(k, b)| *k == kind.as_str() && *b == id);
                        prop_assert!(default || was_bought);
                    }
                }
            }
        }
    }
}
