//! Town growth and tier advancement over ticks.

mod common;

use common::{find_open_land, pave, rich_state};
use lettervale::{BuildingId, GameState, PlaceBuilding, Resources, ValeResult};

fn build(state: &mut GameState, building: &str, anchor: usize) {
    state
        .apply(&PlaceBuilding {
            anchor,
            building: BuildingId::from(building),
            level: 1,
        })
        .unwrap_or_else(|rejection| panic!("could not place {}: {}", building, rejection));
}

#[test]
fn test_hamlet_grows_into_tier_two() -> ValeResult<()> {
    let mut state = rich_state("progression")?;
    let row: Vec<(i32, i32)> = (0..6).map(|dx| (dx, 0)).collect();
    let anchor = find_open_land(state.grid(), &row, false).expect("no open row");
    let cells = state.grid().footprint(anchor, &row).unwrap();
    pave(&mut state, &cells);

    build(&mut state, "cottage", cells[0]);
    build(&mut state, "cottage", cells[1]);
    build(&mut state, "cottage", cells[2]);
    build(&mut state, "garden", cells[3]);
    build(&mut state, "market", cells[4]);

    assert_eq!(state.progress().housing, 12);
    assert!(state.progress().happiness >= 50);

    let reports: Vec<_> = (0..4).map(|_| state.tick()).collect();
    let populations: Vec<u32> = reports.iter().map(|r| r.population).collect();
    assert_eq!(populations, vec![3, 6, 9, 12]);
    assert_eq!(reports[2].tier_advanced, None);
    assert_eq!(reports[3].tier_advanced, Some(2));
    assert_eq!(state.progress().tier, 2);

    // Housing is full, so the next tick holds steady
    let steady = state.tick();
    assert_eq!(steady.population, 12);
    assert_eq!(steady.population_change, 0);

    // Tier two raises the minimum word length to 4
    assert_eq!(state.rules().min_word_length(state.progress().tier), 4);
    state.set_rack("ANTSTONE");
    assert_eq!(state.submit_word("ANT").unwrap_err().code(), "too_short");
    Ok(())
}

#[test]
fn test_upkeep_shortfall_is_reported() -> ValeResult<()> {
    let mut state = GameState::with_defaults("progression-upkeep")?;
    state.grant(&Resources::new(0, 0, 10, 0, 0));
    let row: Vec<(i32, i32)> = vec![(0, 0), (1, 0)];
    let anchor = find_open_land(state.grid(), &row, false).expect("no open row");
    let cells = state.grid().footprint(anchor, &row).unwrap();
    pave(&mut state, &cells);
    build(&mut state, "market", anchor);

    // Spend the coin down so the market's upkeep cannot be met
    let coin = state.resources().coin;
    let mut drained = None;
    for _ in 0..=coin {
        let report = state.tick();
        if !report.upkeep_unpaid.is_zero() {
            drained = Some(report);
            break;
        }
    }
    let report = drained.expect("upkeep never fell short");
    assert_eq!(report.upkeep_unpaid, Resources::new(1, 0, 0, 0, 0));
    assert_eq!(state.resources().coin, 0);
    Ok(())
}
