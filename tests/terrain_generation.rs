//! Map generation properties across seeds.

use lettervale::{
    generate_map, Biome, GenerationConfig, Position, SeededRng, Terrain, TerrainGenerator,
    ValeResult,
};
use proptest::prelude::*;

#[test]
fn test_default_map_shape() -> ValeResult<()> {
    let grid = generate_map(&GenerationConfig::new("2024-01-01"))?;
    assert_eq!(grid.size(), 54);
    assert_eq!(grid.len(), 54 * 54);
    assert_eq!(grid.count_terrain(Terrain::Road), 0);
    assert_eq!(grid.count_terrain(Terrain::Bridge), 0);
    assert_eq!(grid.structure_count(), 0);
    Ok(())
}

#[test]
fn test_every_patch_biome_appears() -> ValeResult<()> {
    let grid = generate_map(&GenerationConfig::new("lettervale"))?;
    for biome in [Biome::Forest, Biome::Hill, Biome::Thicket, Biome::Marsh] {
        assert!(grid.count_biome(biome) > 0, "no {} on the map", biome.name());
    }
    Ok(())
}

#[test]
fn test_marsh_only_on_banks() -> ValeResult<()> {
    let grid = generate_map(&GenerationConfig::new("banks"))?;
    for index in 0..grid.len() {
        let tile = grid.tile(index).unwrap();
        if tile.biome() == Biome::Marsh {
            let wet = grid
                .neighbors4(index)
                .into_iter()
                .any(|n| grid.tile(n).unwrap().terrain() == Terrain::Water);
            assert!(wet, "marsh at {} away from water", index);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_same_seed_same_map(seed in "[a-z0-9-]{1,16}") {
        let config = GenerationConfig::for_testing(seed);
        let first = generate_map(&config).unwrap();
        let second = generate_map(&config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_river_crosses_every_column(seed in "[a-z0-9-]{1,16}") {
        let config = GenerationConfig::new(seed);
        let grid = generate_map(&config).unwrap();
        let size = grid.size() as i32;
        for x in 0..size {
            let wet = (0..size).any(|y| {
                grid.tile_at(Position::new(x, y)).unwrap().terrain() == Terrain::Water
            });
            prop_assert!(wet, "column {} is dry", x);
        }
    }

    #[test]
    fn test_river_starts_in_middle_third(seed in ".{0,24}") {
        let mut rng = SeededRng::from_seed_str(&seed);
        let row = TerrainGenerator::river_start_row(54, &mut rng);
        prop_assert!((18..36).contains(&row));
    }

    #[test]
    fn test_water_stays_meadow(seed in "[a-z]{1,8}") {
        let grid = generate_map(&GenerationConfig::for_testing(seed)).unwrap();
        prop_assert!(grid
            .tiles()
            .iter()
            .filter(|tile| tile.terrain() == Terrain::Water)
            .all(|tile| tile.biome() == Biome::Meadow));
    }
}
