//! Word submission through a full session.

use lettervale::{
    Catalog, GameEvent, GameState, GenerationConfig, Milestone, Mood, Rejection, Resources,
    RulesConfig, ValeResult, WordList, WordYield,
};
use proptest::prelude::*;

#[test]
fn test_stone_pays_and_refills_rack() -> ValeResult<()> {
    let mut state = GameState::with_defaults("words-stone")?;
    state.set_rack("STONEABC");
    let before = *state.resources();
    assert_eq!(state.progress().happiness, 50);

    let event = state.submit_word("stone").unwrap();
    let GameEvent::WordAccepted {
        word,
        payout,
        drawn,
        milestones,
    } = event
    else {
        panic!("unexpected event");
    };

    assert_eq!(word, "STONE");
    assert_eq!(payout.total, Resources::new(2, 1, 0, 1, 0));
    assert_eq!(*state.resources(), before + Resources::new(2, 1, 0, 1, 0));
    assert!(milestones.is_empty());

    let letters = state.rack().letters();
    assert_eq!(letters.len(), 8);
    assert_eq!(&letters[..3], &['A', 'B', 'C']);
    assert_eq!(&letters[3..], drawn.as_slice());
    assert_eq!(state.statistics().words_accepted, 1);
    Ok(())
}

#[test]
fn test_short_word_changes_nothing() -> ValeResult<()> {
    let mut state = GameState::with_defaults("words-short")?;
    state.set_rack("ABSTONEC");
    let resources = *state.resources();
    let rack = state.rack().clone();

    let result = state.submit_word("AB");
    assert_eq!(result, Err(Rejection::TooShort { length: 2, min: 3 }));
    assert_eq!(*state.resources(), resources);
    assert_eq!(*state.rack(), rack);
    assert_eq!(state.statistics().words_rejected, 1);
    Ok(())
}

#[test]
fn test_gates_run_in_order() -> ValeResult<()> {
    let mut state = GameState::with_defaults("words-gates")?;
    state.set_rack("QQQQXXXX");
    assert_eq!(state.submit_word("STONE").unwrap_err().code(), "cannot_form");

    state.set_rack("QXZSTONE");
    assert_eq!(state.submit_word("TONQ").unwrap_err().code(), "not_in_dictionary");
    Ok(())
}

#[test]
fn test_milestone_recorded_once() -> ValeResult<()> {
    let mut state = GameState::new(
        GenerationConfig::for_testing("words-moon"),
        RulesConfig::default(),
        Catalog::standard()?,
        Box::new(WordList::from_words(["MOON", "BOON"])),
    )?;

    state.set_rack("MOONBOON");
    let first = state.submit_word("MOON").unwrap();
    assert!(matches!(
        first,
        GameEvent::WordAccepted { ref milestones, .. } if milestones == &vec![Milestone::DoubledVowel]
    ));

    state.set_rack("MOONBOON");
    let second = state.submit_word("BOON").unwrap();
    assert!(matches!(
        second,
        GameEvent::WordAccepted { ref milestones, .. } if milestones.is_empty()
    ));
    assert!(state.progress().milestones.has(Milestone::DoubledVowel));
    Ok(())
}

proptest! {
    #[test]
    fn test_mood_orders_payouts(word in "[A-Z]{3,12}", coin in 0u32..20) {
        let bonus = Resources::new(coin, 0, 0, 0, 0);
        let gloomy = WordYield::compute(&word, bonus, 10);
        let content = WordYield::compute(&word, bonus, 50);
        let cheerful = WordYield::compute(&word, bonus, 95);

        prop_assert_eq!(gloomy.mood, Mood::Gloomy);
        prop_assert_eq!(cheerful.mood, Mood::Cheerful);
        prop_assert_eq!(content.total, content.base + bonus);
        prop_assert!(gloomy.total.total() <= content.total.total());
        prop_assert!(content.total.total() <= cheerful.total.total());
    }
}
