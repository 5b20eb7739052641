//! Shared setup for integration tests.

#![allow(dead_code)]

use lettervale::{
    Catalog, GameState, GenerationConfig, Grid, PlaceRoad, RulesConfig, Terrain, ValeResult,
    WordList,
};

/// A full-size session with plenty of resources.
pub fn rich_state(seed: &str) -> ValeResult<GameState> {
    GameState::new(
        GenerationConfig::new(seed),
        RulesConfig::for_testing(),
        Catalog::standard()?,
        Box::new(WordList::fallback()),
    )
}

/// First anchor whose footprint lies on unpaved, passable, unbuilt land.
pub fn find_open_land(grid: &Grid, offsets: &[(i32, i32)], near_water: bool) -> Option<usize> {
    (0..grid.len()).find(|&anchor| {
        let Some(cells) = grid.footprint(anchor, offsets) else {
            return false;
        };
        let open = cells.iter().all(|&cell| {
            grid.tile(cell).is_some_and(|tile| {
                tile.terrain() == Terrain::Grass
                    && !tile.biome().is_impassable()
                    && tile.structure().is_none()
            })
        });
        open && (!near_water || grid.touches_water(&cells))
    })
}

/// Paves every cell as road, panicking on refusal.
pub fn pave(state: &mut GameState, cells: &[usize]) {
    for &index in cells {
        state
            .apply(&PlaceRoad {
                index,
                bridge_mode: false,
            })
            .unwrap_or_else(|rejection| panic!("could not pave {}: {}", index, rejection));
    }
}

pub const SQUARE_2X2: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
