//! # Generation Module
//!
//! Procedural map generation for Lettervale.
//!
//! A map is fully determined by its [`GenerationConfig`]: the seed string feeds
//! a [`SeededRng`], and the generator consumes that stream in a fixed order.
//! Two runs with the same configuration produce identical grids.

pub mod terrain;

pub use terrain::*;

use crate::config::{DEFAULT_MAP_SIZE, MAX_MAP_SIZE};
use crate::game::{Biome, Grid, Terrain};
use crate::utils::SeededRng;
use crate::{ValeError, ValeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// River and lake parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverConfig {
    /// Probability that a column's water band is two tiles wide
    pub double_band_chance: f64,
    /// Probability per column of stamping a lake
    pub lake_chance: f64,
    pub lake_radius_min: u32,
    pub lake_radius_max: u32,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            double_band_chance: 0.45,
            lake_chance: 0.08,
            lake_radius_min: 1,
            lake_radius_max: 2,
        }
    }
}

/// One family of biome patches, painted after the river.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomePatch {
    pub biome: Biome,
    /// Number of patch centres drawn
    pub attempts: u32,
    pub radius: u32,
    /// Chance that each qualifying cell in the disc is painted
    pub probability: f64,
}

impl BiomePatch {
    pub fn new(biome: Biome, attempts: u32, radius: u32, probability: f64) -> Self {
        Self {
            biome,
            attempts,
            radius,
            probability,
        }
    }
}

/// Configuration for map generation.
///
/// Patches are applied in order, so later entries overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Shareable seed string
    pub seed: String,
    /// Edge length of the square map
    pub size: usize,
    pub river: RiverConfig,
    pub patches: Vec<BiomePatch>,
}

impl GenerationConfig {
    /// Creates the standard configuration for a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::GenerationConfig;
    ///
    /// let config = GenerationConfig::new("2024-01-01");
    /// assert_eq!(config.size, 54);
    /// assert_eq!(config.patches.len(), 3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            size: DEFAULT_MAP_SIZE,
            river: RiverConfig::default(),
            patches: vec![
                BiomePatch::new(Biome::Forest, 12, 2, 0.7),
                BiomePatch::new(Biome::Hill, 10, 2, 0.6),
                BiomePatch::new(Biome::Thicket, 5, 2, 0.9),
            ],
        }
    }

    /// Creates a small map configuration for tests.
    pub fn for_testing(seed: impl Into<String>) -> Self {
        Self {
            size: 16,
            ..Self::new(seed)
        }
    }

    /// Returns a copy with a different map size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn load_from_path(path: impl AsRef<Path>) -> ValeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GenerationConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ValeResult<()> {
        if self.size < 3 {
            return Err(ValeError::InvalidConfig(format!(
                "map size {} is below the minimum of 3",
                self.size
            )));
        }
        if self.size > MAX_MAP_SIZE {
            return Err(ValeError::InvalidConfig(format!(
                "map size {} exceeds the maximum of {}",
                self.size, MAX_MAP_SIZE
            )));
        }
        let probabilities = [
            ("double_band_chance", self.river.double_band_chance),
            ("lake_chance", self.river.lake_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValeError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.river.lake_radius_min > self.river.lake_radius_max {
            return Err(ValeError::InvalidConfig(
                "lake_radius_min exceeds lake_radius_max".to_string(),
            ));
        }
        if self.river.lake_radius_max as usize > self.size {
            return Err(ValeError::InvalidConfig(format!(
                "lake_radius_max {} exceeds the map size {}",
                self.river.lake_radius_max, self.size
            )));
        }
        for patch in &self.patches {
            if !(0.0..=1.0).contains(&patch.probability) {
                return Err(ValeError::InvalidConfig(format!(
                    "{} patch probability must be within [0, 1]",
                    patch.biome.name()
                )));
            }
            if patch.radius as usize > self.size {
                return Err(ValeError::InvalidConfig(format!(
                    "{} patch radius {} exceeds the map size {}",
                    patch.biome.name(),
                    patch.radius,
                    self.size
                )));
            }
            if patch.attempts as usize > self.size * self.size {
                return Err(ValeError::InvalidConfig(format!(
                    "{} patch attempts exceed one per tile",
                    patch.biome.name()
                )));
            }
            if matches!(patch.biome, Biome::Meadow | Biome::Marsh) {
                return Err(ValeError::InvalidConfig(format!(
                    "{} cannot be painted as a patch",
                    patch.biome.name()
                )));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new("lettervale")
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random stream.
    fn generate(&self, config: &GenerationConfig, rng: &mut SeededRng) -> ValeResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> ValeResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates the seeded random stream for a configuration.
    pub fn create_rng(config: &GenerationConfig) -> SeededRng {
        SeededRng::from_seed_str(&config.seed)
    }

    /// Checks the structural invariants of a freshly generated grid.
    pub fn validate_grid(grid: &Grid, config: &GenerationConfig) -> ValeResult<()> {
        if grid.size() != config.size || grid.len() != config.size * config.size {
            return Err(ValeError::GenerationFailed(format!(
                "expected {0}x{0} tiles, found {1}",
                config.size,
                grid.len()
            )));
        }
        let bad_water = grid
            .tiles()
            .iter()
            .any(|tile| tile.terrain() == Terrain::Water && tile.biome() != Biome::Meadow);
        if bad_water {
            return Err(ValeError::GenerationFailed(
                "water tile carries a land biome".to_string(),
            ));
        }
        if grid.count_terrain(Terrain::Road) + grid.count_terrain(Terrain::Bridge) > 0 {
            return Err(ValeError::GenerationFailed(
                "generated map contains paving".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates a grid for `config` with the standard terrain generator.
///
/// # Examples
///
/// ```
/// use lettervale::{generate_map, GenerationConfig};
///
/// let config = GenerationConfig::for_testing("pebble");
/// let a = generate_map(&config).unwrap();
/// let b = generate_map(&config).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_map(config: &GenerationConfig) -> ValeResult<Grid> {
    config.validate()?;
    let generator = TerrainGenerator::new();
    let mut rng = utils::create_rng(config);
    let grid = generator.generate(config, &mut rng)?;
    generator.validate(&grid, config)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new("abc");
        assert_eq!(config.seed, "abc");
        assert_eq!(config.size, 54);
        assert_eq!(config.patches[0], BiomePatch::new(Biome::Forest, 12, 2, 0.7));
        assert_eq!(config.patches[2].biome, Biome::Thicket);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GenerationConfig::new("x").with_size(2).validate().is_err());

        let mut config = GenerationConfig::new("x");
        config.river.lake_chance = 1.5;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new("x");
        config.river.lake_radius_min = 3;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new("x");
        config.patches.push(BiomePatch::new(Biome::Marsh, 1, 1, 0.5));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_sizes_and_radii() {
        assert!(GenerationConfig::new("x").with_size(100_000).validate().is_err());
        assert!(GenerationConfig::new("x").with_size(MAX_MAP_SIZE).validate().is_ok());

        let mut config = GenerationConfig::new("x");
        config.river.lake_radius_min = 50_000;
        config.river.lake_radius_max = 50_000;
        config.river.lake_chance = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ValeError::InvalidConfig(_))
        ));
        assert!(generate_map(&config).is_err());

        let mut config = GenerationConfig::new("x");
        config.patches[0].radius = u32::MAX;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing("x");
        config.patches[1].attempts = u32::MAX;
        assert!(config.validate().is_err());

        // Radius equal to the map edge is still allowed
        let mut config = GenerationConfig::for_testing("x");
        config.river.lake_radius_max = config.size as u32;
        config.patches[0].radius = config.size as u32;
        assert!(generate_map(&config).is_ok());
    }

    #[test]
    fn test_utils_rng_creation() {
        let config = GenerationConfig::new("abc");
        let mut a = utils::create_rng(&config);
        let mut b = SeededRng::from_seed_str("abc");
        assert_eq!(a.next_state(), b.next_state());
    }

    #[test]
    fn test_validate_grid_checks_size() {
        let config = GenerationConfig::for_testing("x");
        assert!(utils::validate_grid(&Grid::new(16), &config).is_ok());
        assert!(utils::validate_grid(&Grid::new(15), &config).is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": "meadow", "size": 20 }"#).unwrap();
        assert_eq!(config.size, 20);
        assert_eq!(config.river, RiverConfig::default());
        assert_eq!(config.patches.len(), 3);
    }
}
