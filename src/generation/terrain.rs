//! # Terrain Generation
//!
//! River-valley map generation.
//!
//! The generator runs in three passes over an all-meadow grid:
//! 1. A river walks left to right, one or two tiles wide, with occasional lakes
//! 2. Biome patches (forest, hill, thicket by default) are stamped as discs
//! 3. Meadow land bordering water turns to marsh
//!
//! Every random draw comes from one [`SeededRng`] in a fixed order, so the
//! draw sequence is part of the map format: reordering any draw changes every
//! map for every seed.

use crate::game::{Biome, Grid, Position, Terrain};
use crate::generation::{utils, BiomePatch, GenerationConfig, Generator};
use crate::utils::{disc_offsets, SeededRng};
use crate::ValeResult;
use log::debug;

/// Standard river-valley generator.
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator;

impl TerrainGenerator {
    /// Creates a new terrain generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::{GenerationConfig, Generator, TerrainGenerator, Terrain};
    ///
    /// let config = GenerationConfig::for_testing("creek");
    /// let mut rng = lettervale::generation::utils::create_rng(&config);
    /// let grid = TerrainGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(grid.count_terrain(Terrain::Water) >= config.size);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Draws the river's starting row from the middle third of the map.
    pub fn river_start_row(size: usize, rng: &mut SeededRng) -> usize {
        let third = size / 3;
        clamp_row(third as i64 + rng.below(third) as i64, size)
    }

    /// Carves the river and its lakes. Returns the walk's row for each column.
    pub fn carve_river(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut SeededRng,
    ) -> Vec<usize> {
        let size = grid.size();
        let river = &config.river;
        let mut row = Self::river_start_row(size, rng) as i64;
        let mut path = Vec::with_capacity(size);

        for x in 0..size {
            path.push(row as usize);

            let width = if rng.next_f64() < 1.0 - river.double_band_chance {
                1
            } else {
                2
            };
            for y in row..row + width {
                if let Some(index) = grid.index_of(Position::new(x as i32, y as i32)) {
                    grid.set_terrain(index, Terrain::Water);
                }
            }

            if rng.chance(river.lake_chance) {
                let span = (river.lake_radius_max - river.lake_radius_min + 1) as usize;
                let radius = river.lake_radius_min as usize + rng.below(span);
                let centre = Position::new(x as i32, row as i32);
                for (dx, dy) in disc_offsets(radius as i32) {
                    if let Some(index) = grid.index_of(centre.offset(dx, dy)) {
                        grid.set_terrain(index, Terrain::Water);
                    }
                }
                debug!("Lake of radius {} at {}", radius, centre);
            }

            row = clamp_row(row + rng.below(3) as i64 - 1, size) as i64;
        }

        path
    }

    /// Stamps one patch disc around `centre`, painting each in-bounds land cell
    /// with the patch's probability. Returns the number of cells painted.
    pub fn stamp_patch(
        &self,
        grid: &mut Grid,
        centre: Position,
        patch: &BiomePatch,
        rng: &mut SeededRng,
    ) -> usize {
        let mut painted = 0;
        for (dx, dy) in disc_offsets(patch.radius as i32) {
            let Some(index) = grid.index_of(centre.offset(dx, dy)) else {
                continue;
            };
            let is_water = grid
                .tile(index)
                .map_or(true, |tile| tile.terrain() == Terrain::Water);
            if is_water {
                continue;
            }
            if rng.chance(patch.probability) {
                grid.set_biome(index, patch.biome);
                painted += 1;
            }
        }
        painted
    }

    /// Runs every patch family in configured order.
    pub fn paint_biomes(&self, grid: &mut Grid, config: &GenerationConfig, rng: &mut SeededRng) {
        let size = grid.size();
        for patch in &config.patches {
            let mut painted = 0;
            for _ in 0..patch.attempts {
                let x = rng.below(size) as i32;
                let y = rng.below(size) as i32;
                painted += self.stamp_patch(grid, Position::new(x, y), patch, rng);
            }
            debug!("Painted {} {} cells", painted, patch.biome.name());
        }
    }

    /// Turns meadow land with a water 4-neighbour into marsh.
    pub fn derive_marsh(&self, grid: &mut Grid) {
        let marsh: Vec<usize> = (0..grid.len())
            .filter(|&index| {
                grid.tile(index).is_some_and(|tile| {
                    tile.terrain() != Terrain::Water && tile.biome() == Biome::Meadow
                }) && grid.neighbors4(index).into_iter().any(|neighbor| {
                    grid.tile(neighbor)
                        .is_some_and(|tile| tile.terrain() == Terrain::Water)
                })
            })
            .collect();
        debug!("Derived {} marsh cells", marsh.len());
        for index in marsh {
            grid.set_biome(index, Biome::Marsh);
        }
    }
}

fn clamp_row(row: i64, size: usize) -> usize {
    let upper = size.saturating_sub(2).max(1) as i64;
    row.clamp(1, upper) as usize
}

impl Generator<Grid> for TerrainGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut SeededRng) -> ValeResult<Grid> {
        config.validate()?;
        debug!(
            "Generating {0}x{0} map for seed '{1}'",
            config.size, config.seed
        );

        let mut grid = Grid::new(config.size);
        self.carve_river(&mut grid, config, rng);
        self.paint_biomes(&mut grid, config, rng);
        self.derive_marsh(&mut grid);

        self.validate(&grid, config)?;
        Ok(grid)
    }

    fn validate(&self, grid: &Grid, config: &GenerationConfig) -> ValeResult<()> {
        utils::validate_grid(grid, config)
    }

    fn generator_type(&self) -> &'static str {
        "TerrainGenerator"
    }
}
