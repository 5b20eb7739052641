//! Loading rules, catalogs, generation settings and word lists from disk.

use lettervale::{
    Catalog, GenerationConfig, PopulationPolicy, RulesConfig, ValeError, ValeResult, WordList,
    WordSource,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_rules_fill_defaults() -> ValeResult<()> {
    let file = write_temp(
        r#"{
            "rack_size": 10,
            "population_policy": { "kind": "decline", "below": 30, "amount": 2 }
        }"#,
    );
    let rules = RulesConfig::load_from_path(file.path())?;

    assert_eq!(rules.rack_size, 10);
    assert_eq!(
        rules.population_policy,
        PopulationPolicy::Decline {
            below: 30,
            amount: 2
        }
    );
    assert_eq!(rules.baseline_happiness, RulesConfig::default().baseline_happiness);
    Ok(())
}

#[test]
fn test_invalid_rules_rejected() {
    let file = write_temp(r#"{ "rack_size": 0 }"#);
    assert!(matches!(
        RulesConfig::load_from_path(file.path()),
        Err(ValeError::InvalidConfig(_))
    ));

    let garbage = write_temp("not json");
    assert!(matches!(
        RulesConfig::load_from_path(garbage.path()),
        Err(ValeError::Serde(_))
    ));
}

#[test]
fn test_catalog_round_trips_through_disk() -> ValeResult<()> {
    let standard = Catalog::standard()?;
    let defs: Vec<_> = standard.iter().cloned().collect();
    let file = write_temp(&serde_json::to_string_pretty(&defs)?);

    let loaded = Catalog::load_from_path(file.path())?;
    assert_eq!(loaded.len(), standard.len());
    assert_eq!(loaded.get("sawmill"), standard.get("sawmill"));
    Ok(())
}

#[test]
fn test_generation_config_from_disk() -> ValeResult<()> {
    let file = write_temp(r#"{ "seed": "from-disk", "size": 24 }"#);
    let config = GenerationConfig::load_from_path(file.path())?;
    assert_eq!(config.seed, "from-disk");
    assert_eq!(config.size, 24);
    assert_eq!(config.patches, GenerationConfig::default().patches);
    Ok(())
}

#[test]
fn test_missing_files() {
    assert!(matches!(
        RulesConfig::load_from_path("/nonexistent/rules.json"),
        Err(ValeError::Io(_))
    ));
    let words = WordList::load_or_fallback("/nonexistent/words.txt");
    assert_eq!(words.len(), WordList::fallback().len());
}

#[test]
fn test_word_list_file() -> ValeResult<()> {
    let file = write_temp("river\nStone\nab\n\nmeadow\n");
    let words = WordList::load(file.path())?;
    assert_eq!(words.word_count(), 3);
    assert!(words.has_word("RIVER"));
    assert!(!words.has_word("AB"));
    Ok(())
}
