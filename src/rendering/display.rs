//! # Text Display
//!
//! ASCII map and status panels.
//!
//! | glyph | meaning |
//! |-------|---------|
//! | `~` | water |
//! | `=` | bridge |
//! | `#` | road |
//! | `.` `T` `^` `,` `%` | meadow, forest, hill, marsh, thicket grass |
//! | `A`-`Z` | building, by the first letter of its id |

use crate::game::{Biome, Catalog, GameState, Grid, Terrain, Tile};
use crate::input::COMMAND_HELP;
use std::fmt::Write;

/// Glyph for a single tile.
pub fn tile_glyph(grid: &Grid, tile: &Tile) -> char {
    if let Some(structure) = tile.structure().and_then(|id| grid.structure(id)) {
        return structure
            .building
            .as_str()
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase());
    }
    match tile.terrain() {
        Terrain::Water => '~',
        Terrain::Bridge => '=',
        Terrain::Road => '#',
        Terrain::Grass => match tile.biome() {
            Biome::Meadow => '.',
            Biome::Forest => 'T',
            Biome::Hill => '^',
            Biome::Marsh => ',',
            Biome::Thicket => '%',
        },
    }
}

/// Renders the grid, one text row per map row.
///
/// # Examples
///
/// ```
/// use lettervale::{render_map, Grid};
///
/// assert_eq!(render_map(&Grid::new(2)), "..\n..\n");
/// ```
pub fn render_map(grid: &Grid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * (size + 1));
    for row in grid.tiles().chunks(size.max(1)) {
        out.extend(row.iter().map(|tile| tile_glyph(grid, tile)));
        out.push('\n');
    }
    out
}

/// Resources, rack, city progress and the latest messages.
pub fn render_status(state: &GameState) -> String {
    let progress = state.progress();
    let mut out = String::new();
    let _ = writeln!(out, "Seed:      {}  (tick {})", state.seed(), state.tick_count());
    let _ = writeln!(out, "Resources: {}", state.resources());
    let _ = writeln!(out, "Rack:      {}", state.rack());
    let _ = writeln!(
        out,
        "Town:      tier {}, population {}/{}, happiness {}",
        progress.tier, progress.population, progress.housing, progress.happiness
    );
    let _ = writeln!(
        out,
        "Milestones: {}/3, min word length {}",
        progress.milestones.count(),
        state.rules().min_word_length(progress.tier)
    );

    let recent: Vec<_> = state.messages().collect();
    for message in recent.iter().rev().take(5).rev() {
        let _ = writeln!(out, "  > {}", message.text);
    }
    out
}

/// Catalog listing with lock markers for tiers above `tier`.
pub fn render_catalog(catalog: &Catalog, tier: u8) -> String {
    let mut out = String::new();
    for def in catalog.iter() {
        let lock = if def.tier > tier { " (locked)" } else { "" };
        let _ = writeln!(
            out,
            "{:<12} tier {} cost {}{}",
            def.id, def.tier, def.cost, lock
        );
    }
    out
}

pub fn render_help() -> String {
    let mut out = String::new();
    for (usage, summary) in COMMAND_HELP {
        let _ = writeln!(out, "{:<12} {}", usage, summary);
    }
    out
}
