//! Game settings and preferences
//!
//! Persisted separately from the meta-state under its own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::{BACK_PILLAR_COUNT, SNOWFLAKE_COUNT};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset, wrapping High back to Low
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Snowflakes on screen for this preset
    pub fn snowflake_count(&self) -> usize {
        match self {
            QualityPreset::Low => SNOWFLAKE_COUNT / 3,
            QualityPreset::Medium => SNOWFLAKE_COUNT,
            QualityPreset::High => SNOWFLAKE_COUNT * 2,
        }
    }

    /// Background pillars for this preset
    pub fn back_pillar_count(&self) -> usize {
        match self {
            QualityPreset::Low => BACK_PILLAR_COUNT / 2,
            QualityPreset::Medium | QualityPreset::High => BACK_PILLAR_COUNT,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Falling snow
    pub snow: bool,
    /// Slow background pillars
    pub back_pillars: bool,
    /// Reduced motion (no wing flutter, no body tilt)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            snow: true,
            back_pillars: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective snowflake count (respects the snow toggle)
    pub fn snowflakes(&self) -> usize {
        if self.snow { self.quality.snowflake_count() } else { 0 }
    }

    /// Effective pillar count (respects the pillar toggle)
    pub fn back_pillar_count(&self) -> usize {
        if self.back_pillars {
            self.quality.back_pillar_count()
        } else {
            0
        }
    }

    /// Wing flutter and velocity tilt on the penguin
    pub fn animate_penguin(&self) -> bool {
        !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_cycle() {
        let mut q = QualityPreset::Low;
        for _ in 0..3 {
            q = q.next();
        }
        assert_eq!(q, QualityPreset::Low);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_toggles_zero_counts() {
        let mut settings = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        assert_eq!(settings.snowflakes(), SNOWFLAKE_COUNT * 2);
        settings.snow = false;
        settings.back_pillars = false;
        assert_eq!(settings.snowflakes(), 0);
        assert_eq!(settings.back_pillar_count(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"snow":false}"#).unwrap();
        assert!(!settings.snow);
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.animate_penguin());
    }
}
