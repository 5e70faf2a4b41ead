//! Builder configuration
//!
//! Every size range, retry budget and switch the builder reads lives here.
//! Configs load from JSON; any field left out takes its default.

use std::path::Path;

use bitflags::bitflags;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::area::AreaKind;
use crate::error::ConfigError;

bitflags! {
    /// Debug rendering switches for the tile flush
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct DebugFlags: u8 {
        /// Stamp marks with one marker tile per terminal state
        const MARK_TILES = 0x01;
        /// Write per-shape wall variants instead of plain dungeon wall
        const SHAPE_WALLS = 0x02;
    }
}

// Manual serde impl for DebugFlags
impl Serialize for DebugFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DebugFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(DebugFlags::from_bits_truncate(bits))
    }
}

/// Production weights, one per [`AreaKind`]
///
/// A build only starts when the weights add up to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaWeights([u8; AreaKind::COUNT]);

impl AreaWeights {
    /// All weights zero
    pub const fn zeroed() -> Self {
        Self([0; AreaKind::COUNT])
    }

    /// Only the listed kinds weighted, the rest zero
    pub fn only(entries: &[(AreaKind, u8)]) -> Self {
        let mut weights = Self::zeroed();
        for &(kind, weight) in entries {
            weights.set(kind, weight);
        }
        weights
    }

    pub fn get(&self, kind: AreaKind) -> u8 {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: AreaKind, weight: u8) {
        self.0[kind.index()] = weight;
    }

    /// Sum over every kind
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&w| u32::from(w)).sum()
    }

    /// (kind, weight) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (AreaKind, u8)> + '_ {
        AreaKind::iter().map(move |kind| (kind, self.get(kind)))
    }
}

impl Default for AreaWeights {
    fn default() -> Self {
        Self::only(&[
            (AreaKind::RectangularRoom, 30),
            (AreaKind::LinearCorridor, 30),
            (AreaKind::CylindricityRoom, 10),
            (AreaKind::QuadrantCorridor, 10),
            (AreaKind::Cross, 2),
            (AreaKind::PillarHall, 2),
            (AreaKind::Octagon, 2),
            (AreaKind::Crypt, 2),
            (AreaKind::Vestibule, 2),
            (AreaKind::Diamond, 1),
            (AreaKind::Shrine, 1),
            (AreaKind::Cloister, 1),
            (AreaKind::Gallery, 1),
            (AreaKind::Ziggurat, 1),
            (AreaKind::Rotunda, 1),
            (AreaKind::Armory, 1),
            (AreaKind::Barracks, 1),
            (AreaKind::Sanctum, 1),
            (AreaKind::Chapel, 1),
        ])
    }
}

// Weights travel as a map keyed by kind name; kinds left out weigh zero.
impl Serialize for AreaWeights {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(AreaKind::COUNT))?;
        for (kind, weight) in self.iter() {
            map.serialize_entry(&kind, &weight)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AreaWeights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = hashbrown::HashMap::<AreaKind, u8>::deserialize(deserializer)?;
        let mut weights = AreaWeights::zeroed();
        for (kind, weight) in entries {
            weights.set(kind, weight);
        }
        Ok(weights)
    }
}

/// Tunable limits for one builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Rectangular room side length, walls included
    pub room_min_size: u8,
    pub room_max_size: u8,

    /// Linear corridor floor width
    pub corridor_min_width: u8,
    pub corridor_max_width: u8,

    /// Linear corridor length, end walls included
    pub corridor_min_length: u8,
    pub corridor_max_length: u8,

    pub cylinder_min_radius: u8,
    pub cylinder_max_radius: u8,

    /// Quadrant corridors keep their inner radius at or above the minimum
    /// and their outer radius at or below the maximum; the band between the
    /// two is at least four cells wide
    pub quadrant_min_radius: u8,
    pub quadrant_max_radius: u8,

    /// Attempts per ordinary mark
    pub mark_retries: u8,
    /// Attempts per mark at the far end of a corridor
    pub corridor_end_retries: u8,
    /// Attempts for the seed mark
    pub seed_retries: u8,

    pub max_marks_per_area: u8,

    /// Percentage of the region that must be devoured for a pass to stand
    pub devoured_area_bottom_limit: u8,

    /// Chance that an unclipped corridor forces its continuation kind
    pub corridor_continuation_percent: u8,
    /// Chance that a linear corridor opens a side branch
    pub corridor_branch_percent: u8,

    /// Kind forced on the seed mark
    pub startup_kind: AreaKind,

    /// Whole-pass restarts before giving up; 0 means never give up
    pub max_passes: u32,

    pub debug: DebugFlags,

    pub weights: AreaWeights,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            room_min_size: 5,
            room_max_size: 12,
            corridor_min_width: 1,
            corridor_max_width: 2,
            corridor_min_length: 4,
            corridor_max_length: 14,
            cylinder_min_radius: 3,
            cylinder_max_radius: 6,
            quadrant_min_radius: 2,
            quadrant_max_radius: 8,
            mark_retries: 8,
            corridor_end_retries: 12,
            seed_retries: 30,
            max_marks_per_area: 4,
            devoured_area_bottom_limit: 35,
            corridor_continuation_percent: 35,
            corridor_branch_percent: 20,
            startup_kind: AreaKind::RectangularRoom,
            max_passes: 500,
            debug: DebugFlags::empty(),
            weights: AreaWeights::default(),
        }
    }
}

fn check_range(field: &'static str, min: u8, max: u8) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("minimum {} exceeds maximum {}", min, max),
        });
    }
    Ok(())
}

fn check_at_least(field: &'static str, value: u8, floor: u8) -> Result<(), ConfigError> {
    if value < floor {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{} is below {}", value, floor),
        });
    }
    Ok(())
}

fn check_percent(field: &'static str, value: u8) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{} is not a percentage", value),
        });
    }
    Ok(())
}

impl BuilderConfig {
    /// Load a config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse a config from JSON text and validate it
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON form, suitable for `from_json_str`
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check that every limit can actually produce a shape.
    ///
    /// The weight sum is not checked here; the builder reports it separately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_at_least("room_min_size", self.room_min_size, 3)?;
        check_range("room_size", self.room_min_size, self.room_max_size)?;

        check_at_least("corridor_min_width", self.corridor_min_width, 1)?;
        check_range(
            "corridor_width",
            self.corridor_min_width,
            self.corridor_max_width,
        )?;
        check_at_least("corridor_min_length", self.corridor_min_length, 3)?;
        check_range(
            "corridor_length",
            self.corridor_min_length,
            self.corridor_max_length,
        )?;

        check_at_least("cylinder_min_radius", self.cylinder_min_radius, 2)?;
        check_range(
            "cylinder_radius",
            self.cylinder_min_radius,
            self.cylinder_max_radius,
        )?;

        check_at_least("quadrant_min_radius", self.quadrant_min_radius, 1)?;
        check_range(
            "quadrant_radius",
            self.quadrant_min_radius.saturating_add(4),
            self.quadrant_max_radius,
        )?;

        check_at_least("mark_retries", self.mark_retries, 1)?;
        check_at_least("corridor_end_retries", self.corridor_end_retries, 1)?;
        check_at_least("seed_retries", self.seed_retries, 1)?;
        check_at_least("max_marks_per_area", self.max_marks_per_area, 1)?;

        check_percent("devoured_area_bottom_limit", self.devoured_area_bottom_limit)?;
        check_percent(
            "corridor_continuation_percent",
            self.corridor_continuation_percent,
        )?;
        check_percent("corridor_branch_percent", self.corridor_branch_percent)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BuilderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.sum(), 100);
        assert_eq!(config.startup_kind, AreaKind::RectangularRoom);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BuilderConfig::from_json_str(r#"{ "room_max_size": 9, "debug": 3 }"#).unwrap();
        assert_eq!(config.room_max_size, 9);
        assert_eq!(config.room_min_size, 5);
        assert!(config.debug.contains(DebugFlags::MARK_TILES | DebugFlags::SHAPE_WALLS));
        assert_eq!(config.weights, AreaWeights::default());
    }

    #[test]
    fn test_weights_as_named_map() {
        let config = BuilderConfig::from_json_str(
            r#"{ "weights": { "RectangularRoom": 70, "LinearCorridor": 30 } }"#,
        )
        .unwrap();
        assert_eq!(config.weights.get(AreaKind::RectangularRoom), 70);
        assert_eq!(config.weights.get(AreaKind::LinearCorridor), 30);
        assert_eq!(config.weights.get(AreaKind::Cloister), 0);
        assert_eq!(config.weights.sum(), 100);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = BuilderConfig::default();
        config.debug = DebugFlags::MARK_TILES;
        config.weights.set(AreaKind::Chapel, 7);
        let json = config.to_json_string().unwrap();
        let back = BuilderConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let mut config = BuilderConfig::default();
        config.room_min_size = 10;
        config.room_max_size = 6;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "room_size", .. })
        ));

        let mut config = BuilderConfig::default();
        config.quadrant_min_radius = 6;
        config.quadrant_max_radius = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "quadrant_radius", .. })
        ));

        let mut config = BuilderConfig::default();
        config.devoured_area_bottom_limit = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            BuilderConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            BuilderConfig::from_json_str(r#"{ "weights": { "Spaceship": 5 } }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            BuilderConfig::load_from_file(Path::new("/nonexistent/delve.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
