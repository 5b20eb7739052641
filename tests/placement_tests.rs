//! Building placement against generated maps.

mod common;

use common::{find_open_land, pave, rich_state, SQUARE_2X2};
use lettervale::{
    BuildingId, GameEvent, PlaceBuilding, Rejection, Remove, Terrain, Upgrade, ValeResult,
};

fn place(building: &str, anchor: usize) -> PlaceBuilding {
    PlaceBuilding {
        anchor,
        building: BuildingId::from(building),
        level: 1,
    }
}

#[test]
fn test_unpaved_cell_blocks_whole_footprint() -> ValeResult<()> {
    let mut state = rich_state("placement-blocked")?;
    let anchor = find_open_land(state.grid(), &SQUARE_2X2, true).expect("no open land by water");
    let cells = state.grid().footprint(anchor, &SQUARE_2X2).unwrap();

    // Three of four cells paved; the last stays grass
    pave(&mut state, &cells[..3]);
    let before = *state.resources();

    let result = state.apply(&place("sawmill", anchor));
    assert_eq!(
        result,
        Err(Rejection::FootprintBlocked { index: cells[3] })
    );
    assert_eq!(*state.resources(), before);
    assert_eq!(state.grid().structure_count(), 0);
    assert!(cells
        .iter()
        .all(|&cell| state.grid().tile(cell).unwrap().structure().is_none()));
    Ok(())
}

#[test]
fn test_successful_placement_charges_once() -> ValeResult<()> {
    let mut state = rich_state("placement-ok")?;
    let anchor = find_open_land(state.grid(), &SQUARE_2X2, true).expect("no open land by water");
    let cells = state.grid().footprint(anchor, &SQUARE_2X2).unwrap();
    pave(&mut state, &cells);

    let cost = state.catalog().get("sawmill").unwrap().cost_at_level(1);
    let before = *state.resources();
    let event = state.apply(&place("sawmill", anchor)).unwrap();

    let GameEvent::BuildingPlaced { structure, .. } = event else {
        panic!("unexpected event {:?}", event);
    };
    let mut expected = before;
    assert!(expected.try_spend(&cost).is_ok());
    assert_eq!(*state.resources(), expected);

    for &cell in &cells {
        let tile = state.grid().tile(cell).unwrap();
        assert_eq!(tile.structure(), Some(structure));
        assert_eq!(tile.terrain(), Terrain::Road);
    }
    assert_eq!(state.statistics().buildings_placed, 1);
    Ok(())
}

#[test]
fn test_higher_level_placement_charges_scaled_cost() -> ValeResult<()> {
    let mut state = rich_state("placement-level")?;
    let anchor = find_open_land(state.grid(), &SQUARE_2X2, true).expect("no open land by water");
    let cells = state.grid().footprint(anchor, &SQUARE_2X2).unwrap();
    pave(&mut state, &cells);

    let sawmill = state.catalog().get("sawmill").unwrap().clone();
    let before = *state.resources();
    state
        .apply(&PlaceBuilding {
            level: 2,
            ..place("sawmill", anchor)
        })
        .unwrap();

    assert_eq!(sawmill.cost_at_level(2), sawmill.cost.scaled(2));
    assert_eq!(*state.resources() + sawmill.cost_at_level(2), before);
    assert_eq!(state.grid().structure_at(cells[3]).unwrap().level, 2);
    Ok(())
}

#[test]
fn test_overlap_is_refused() -> ValeResult<()> {
    let mut state = rich_state("placement-overlap")?;
    let anchor = find_open_land(state.grid(), &SQUARE_2X2, false).expect("no open land");
    let cells = state.grid().footprint(anchor, &SQUARE_2X2).unwrap();
    pave(&mut state, &cells);

    state.apply(&place("cottage", cells[3])).unwrap();
    let before = *state.resources();
    let result = state.apply(&place("market", cells[2]));
    assert_eq!(result, Err(Rejection::FootprintOccupied { index: cells[3] }));
    assert_eq!(*state.resources(), before);
    Ok(())
}

#[test]
fn test_upgrade_then_remove() -> ValeResult<()> {
    let mut state = rich_state("placement-upgrade")?;
    let anchor = find_open_land(state.grid(), &[(0, 0)], false).expect("no open land");
    pave(&mut state, &[anchor]);
    state.apply(&place("cottage", anchor)).unwrap();

    let before = *state.resources();
    let upgraded = state.apply(&Upgrade { index: anchor }).unwrap();
    assert!(matches!(upgraded, GameEvent::BuildingUpgraded { level: 2, .. }));
    assert_eq!(state.grid().structure_at(anchor).unwrap().level, 2);
    let cost = state.catalog().get("cottage").unwrap().cost_at_level(2);
    assert_eq!(*state.resources() + cost, before);

    state.apply(&Upgrade { index: anchor }).unwrap();
    let capped = state.apply(&Upgrade { index: anchor });
    assert_eq!(capped.unwrap_err().code(), "max_level");

    let removed = state.apply(&Remove { index: anchor }).unwrap();
    assert!(matches!(removed, GameEvent::StructureRemoved { .. }));
    // Demolishing keeps the road underneath
    assert_eq!(state.grid().tile(anchor).unwrap().terrain(), Terrain::Road);
    assert_eq!(state.grid().structure_count(), 0);
    Ok(())
}

#[test]
fn test_tier_locked_building() -> ValeResult<()> {
    let mut state = rich_state("placement-tier")?;
    let anchor = find_open_land(state.grid(), &SQUARE_2X2, false).expect("no open land");
    let cells = state.grid().footprint(anchor, &SQUARE_2X2).unwrap();
    pave(&mut state, &cells);

    let result = state.apply(&place("library", anchor));
    assert_eq!(result.unwrap_err().code(), "tier_locked");
    Ok(())
}
