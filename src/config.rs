//! Pipeline configuration and user-input shaping.
//!
//! The user layer supplies a categorical terrain selection plus an intensity
//! percentage; both are folded into the single height scaling factor the
//! pipeline consumes.

use std::str::FromStr;

use crate::core::error::Error;

/// Categorical terrain selector exposed to the user layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainKind {
    Lowlands,
    Midlands,
    Highlands,
}

impl TerrainKind {
    /// Base height scaling for this kind, before the intensity percentage.
    pub fn base_scaling(self) -> f64 {
        match self {
            TerrainKind::Lowlands => 0.5,
            TerrainKind::Midlands => 1.0,
            TerrainKind::Highlands => 2.0,
        }
    }
}

impl FromStr for TerrainKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "lowlands" => Ok(TerrainKind::Lowlands),
            "midlands" => Ok(TerrainKind::Midlands),
            "highlands" => Ok(TerrainKind::Highlands),
            other => Err(Error::InvalidTerrainKind(other.to_string())),
        }
    }
}

/// What subset of the world the caller wants emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Every chunk and every tree, unfiltered.
    World,
    /// Only the viewer's occupied chunk, its neighbors, and their trees.
    Vicinity,
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "world" => Ok(DisplayMode::World),
            "vicinity" => Ok(DisplayMode::Vicinity),
            other => Err(Error::InvalidDisplayMode(other.to_string())),
        }
    }
}

/// Configuration for one world generation run.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Height scaling factor: multiplies the brightness-derived voxel fill
    /// threshold and sets the color band cutoffs.
    pub height_scaling: f64,
    /// Seed for the color blend and tree placement RNG.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            height_scaling: 1.0,
            seed: 12345,
        }
    }
}

impl WorldConfig {
    /// Derive the scaling factor from a categorical terrain selection.
    ///
    /// `intensity` is a percentage in [0, 100] sweeping the kind's band;
    /// 0% keeps half the base scaling so the world never flattens to sea.
    pub fn from_terrain(kind: TerrainKind, intensity: u32, seed: u64) -> Self {
        let t = intensity.min(100) as f64 / 100.0;
        Self {
            height_scaling: kind.base_scaling() * (0.5 + 0.5 * t),
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_kind_parse() {
        assert_eq!("lowlands".parse::<TerrainKind>().unwrap(), TerrainKind::Lowlands);
        assert_eq!("midlands".parse::<TerrainKind>().unwrap(), TerrainKind::Midlands);
        assert_eq!("highlands".parse::<TerrainKind>().unwrap(), TerrainKind::Highlands);
    }

    #[test]
    fn test_terrain_kind_parse_unknown_is_descriptive() {
        let err = "wetlands".parse::<TerrainKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("wetlands"));
        assert!(msg.contains("lowlands"));
        assert!(msg.contains("highlands"));
    }

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("world".parse::<DisplayMode>().unwrap(), DisplayMode::World);
        assert_eq!("vicinity".parse::<DisplayMode>().unwrap(), DisplayMode::Vicinity);
        assert!("everything".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_from_terrain_scaling() {
        let full = WorldConfig::from_terrain(TerrainKind::Midlands, 100, 1);
        assert!((full.height_scaling - 1.0).abs() < 1e-9);

        let zero = WorldConfig::from_terrain(TerrainKind::Midlands, 0, 1);
        assert!((zero.height_scaling - 0.5).abs() < 1e-9);

        // Out-of-range intensity clamps rather than overshooting the band.
        let over = WorldConfig::from_terrain(TerrainKind::Highlands, 250, 1);
        assert!((over.height_scaling - 2.0).abs() < 1e-9);
    }
}
