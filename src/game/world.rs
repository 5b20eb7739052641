//! # World Module
//!
//! The square tile grid, its terrain and biomes, and the table of placed
//! structures.
//!
//! Tiles are stored row-major (`index = y * size + x`). A placed building is a
//! single [`Structure`] record; every tile it covers points at it by
//! [`StructureId`], so counting structures never double counts large
//! footprints.

use crate::game::{BuildingId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Passable/buildable state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Grass,
    Water,
    Road,
    Bridge,
}

impl Terrain {
    /// Road and bridge tiles can carry buildings.
    pub fn is_paved(self) -> bool {
        matches!(self, Terrain::Road | Terrain::Bridge)
    }

    /// Water and bridges both count as water for adjacency rules.
    pub fn is_wet(self) -> bool {
        matches!(self, Terrain::Water | Terrain::Bridge)
    }
}

/// Ground classification assigned during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Meadow,
    Forest,
    Hill,
    Marsh,
    Thicket,
}

impl Biome {
    /// Thicket blocks paving and building.
    pub fn is_impassable(self) -> bool {
        self == Biome::Thicket
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Meadow => "meadow",
            Biome::Forest => "forest",
            Biome::Hill => "hill",
            Biome::Marsh => "marsh",
            Biome::Thicket => "thicket",
        }
    }
}

/// Identifier of a placed structure instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(pub u32);

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One cell of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    terrain: Terrain,
    biome: Biome,
    structure: Option<StructureId>,
}

impl Tile {
    /// Plain meadow grass.
    pub fn grass() -> Self {
        Self {
            terrain: Terrain::Grass,
            biome: Biome::Meadow,
            structure: None,
        }
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn structure(&self) -> Option<StructureId> {
        self.structure
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::grass()
    }
}

/// A building placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub building: BuildingId,
    /// Starts at 1 and increases with upgrades
    pub level: u32,
    /// Tile index the footprint was anchored at
    pub anchor: usize,
    /// Every tile index covered by the footprint, anchor included
    pub cells: Vec<usize>,
}

/// The authoritative map.
///
/// # Examples
///
/// ```
/// use lettervale::{Grid, Position, Terrain};
///
/// let grid = Grid::new(4);
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid.index_of(Position::new(1, 2)), Some(9));
/// assert_eq!(grid.position_of(9), Some(Position::new(1, 2)));
/// assert_eq!(grid.tile(9).map(|t| t.terrain()), Some(Terrain::Grass));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
    structures: BTreeMap<StructureId, Structure>,
    next_structure: u32,
}

impl Grid {
    /// Creates a `size × size` grid of meadow grass.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tiles: vec![Tile::grass(); size * size],
            structures: BTreeMap::new(),
            next_structure: 1,
        }
    }

    /// Edge length in tiles.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Row-major index of an in-grid position.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    /// Position of an in-grid index.
    pub fn position_of(&self, index: usize) -> Option<Position> {
        if index < self.tiles.len() {
            Some(Position::new(
                (index % self.size) as i32,
                (index / self.size) as i32,
            ))
        } else {
            None
        }
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.index_of(pos).and_then(|index| self.tile(index))
    }

    /// In-grid 4-neighbours of a tile (N, W, E, S order).
    pub fn neighbors4(&self, index: usize) -> Vec<usize> {
        match self.position_of(index) {
            Some(pos) => pos
                .cardinal_adjacent_positions()
                .into_iter()
                .filter_map(|adjacent| self.index_of(adjacent))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Tile indices covered by `offsets` anchored at `anchor`, or `None` if any
    /// cell falls outside the grid. An empty footprint covers nothing and is
    /// also `None`.
    pub fn footprint(&self, anchor: usize, offsets: &[(i32, i32)]) -> Option<Vec<usize>> {
        if offsets.is_empty() {
            return None;
        }
        let origin = self.position_of(anchor)?;
        offsets
            .iter()
            .map(|&(dx, dy)| self.index_of(origin.offset(dx, dy)))
            .collect()
    }

    /// True if any of `cells` has a water or bridge 4-neighbour.
    pub fn touches_water(&self, cells: &[usize]) -> bool {
        cells.iter().any(|&cell| {
            self.neighbors4(cell).into_iter().any(|neighbor| {
                self.tiles[neighbor].terrain.is_wet() && !cells.contains(&neighbor)
            })
        })
    }

    pub fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(&id)
    }

    /// The structure covering a tile, if any.
    pub fn structure_at(&self, index: usize) -> Option<&Structure> {
        self.tile(index)
            .and_then(|tile| tile.structure)
            .and_then(|id| self.structures.get(&id))
    }

    /// Placed structures in placement order.
    pub fn structures(&self) -> impl Iterator<Item = &Structure> {
        self.structures.values()
    }

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    /// Number of tiles with the given terrain.
    pub fn count_terrain(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|tile| tile.terrain == terrain).count()
    }

    /// Number of tiles with the given biome.
    pub fn count_biome(&self, biome: Biome) -> usize {
        self.tiles.iter().filter(|tile| tile.biome == biome).count()
    }

    pub(crate) fn set_terrain(&mut self, index: usize, terrain: Terrain) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.terrain = terrain;
        }
    }

    pub(crate) fn set_biome(&mut self, index: usize, biome: Biome) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.biome = biome;
        }
    }

    /// Records a structure over `cells`. Callers validate the footprint first.
    pub(crate) fn insert_structure(
        &mut self,
        building: BuildingId,
        level: u32,
        anchor: usize,
        cells: Vec<usize>,
    ) -> StructureId {
        let id = StructureId(self.next_structure);
        self.next_structure += 1;
        for &cell in &cells {
            if let Some(tile) = self.tiles.get_mut(cell) {
                tile.structure = Some(id);
            }
        }
        self.structures.insert(
            id,
            Structure {
                id,
                building,
                level,
                anchor,
                cells,
            },
        );
        id
    }

    /// Clears a structure from every tile it covers. Terrain is untouched.
    pub(crate) fn remove_structure(&mut self, id: StructureId) -> Option<Structure> {
        let structure = self.structures.remove(&id)?;
        for &cell in &structure.cells {
            if let Some(tile) = self.tiles.get_mut(cell) {
                if tile.structure == Some(id) {
                    tile.structure = None;
                }
            }
        }
        Some(structure)
    }

    pub(crate) fn set_structure_level(&mut self, id: StructureId, level: u32) {
        if let Some(structure) = self.structures.get_mut(&id) {
            structure.level = level;
        }
    }
}
