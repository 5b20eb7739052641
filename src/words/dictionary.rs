//! # Dictionary
//!
//! Word lookup for submissions. The game only needs [`WordSource::has_word`];
//! [`WordList`] is the stock implementation backed by a newline-separated file.

use crate::ValeResult;
use log::{debug, warn};
use std::collections::HashSet;
use std::path::Path;

/// Words the fallback list always knows.
const FALLBACK_WORDS: &[&str] = &[
    "ABLE", "ACE", "ACORN", "AIR", "ALE", "ANT", "ARC", "ART", "BAKE", "BARN", "BEAN", "BEE",
    "BELL", "BIRD", "BOAT", "BREAD", "BRICK", "BROOK", "CAT", "CART", "CEDAR", "CITY", "CLAY",
    "COAL", "COIN", "CORN", "COVE", "DAM", "DEN", "DOG", "DOOR", "DUSK", "EAR", "EARTH", "EAST",
    "EAT", "ELM", "FARM", "FERN", "FIELD", "FIRE", "FISH", "FOG", "FORD", "GATE", "GOAT", "GRAIN",
    "HAY", "HEARTH", "HILL", "HIVE", "HOME", "INN", "IRON", "JAM", "JAR", "KEY", "KILN", "LAKE",
    "LAMP", "LANE", "LEAF", "LOG", "LOOM", "MAP", "MARSH", "MILL", "MOON", "MOSS", "NEST", "NET",
    "OAK", "OAT", "ORE", "OVEN", "OWL", "PATH", "PEAR", "PIE", "POND", "QUAY", "QUILT", "RAIN",
    "REED", "RIVER", "ROAD", "ROOF", "ROSE", "SAND", "SEED", "SHEEP", "SNOW", "STAR", "STONE",
    "SUN", "TEA", "TOWN", "TREE", "VALE", "VINE", "WALL", "WELL", "WHEAT", "WIND", "WOOD",
    "WOOL", "YARD", "YARN", "ZEST",
];

/// A lookup capability for submitted words.
///
/// Words passed in are already normalized to uppercase A-Z.
pub trait WordSource {
    fn has_word(&self, word: &str) -> bool;

    /// Number of known words, for status display.
    fn word_count(&self) -> usize;
}

/// In-memory set of uppercase words.
///
/// # Examples
///
/// ```
/// use lettervale::{WordList, WordSource};
///
/// let list = WordList::from_text("stone\nAB\nriver bank\nOAK\n");
/// assert!(list.has_word("STONE"));
/// assert!(list.has_word("OAK"));
/// assert!(!list.has_word("AB"));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Builds a list from words, keeping only entries of three or more ASCII
    /// letters.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_ascii_uppercase())
            .filter(|word| word.len() >= 3 && word.chars().all(|c| c.is_ascii_uppercase()))
            .collect();
        Self { words }
    }

    /// Parses one word per line.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// The built-in list used when no dictionary can be loaded.
    pub fn fallback() -> Self {
        Self::from_words(FALLBACK_WORDS.iter())
    }

    /// Reads a word-per-line file.
    pub fn load(path: impl AsRef<Path>) -> ValeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Reads a word-per-line file, substituting [`WordList::fallback`] if the
    /// file cannot be read or holds no usable words.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(list) if !list.is_empty() => {
                debug!("Loaded {} words from {}", list.len(), path.display());
                list
            }
            Ok(_) => {
                warn!(
                    "Dictionary {} has no usable words, using fallback list",
                    path.display()
                );
                Self::fallback()
            }
            Err(e) => {
                warn!(
                    "Could not read dictionary {}: {}, using fallback list",
                    path.display(),
                    e
                );
                Self::fallback()
            }
        }
    }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim().to_ascii_uppercase();
        if word.len() >= 3 && word.chars().all(|c| c.is_ascii_uppercase()) {
            self.words.insert(word)
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for WordList {
    fn has_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn word_count(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fallback_contains_common_words() {
        let list = WordList::fallback();
        assert!(list.has_word("STONE"));
        assert!(list.has_word("RIVER"));
        assert_eq!(list.len(), FALLBACK_WORDS.len());
    }

    #[test]
    fn test_from_text_filters_lines() {
        let list = WordList::from_text("  cat \r\nDO\nx-ray\n\nLANTERN\n");
        assert!(list.has_word("CAT"));
        assert!(list.has_word("LANTERN"));
        assert!(!list.has_word("DO"));
        assert!(!list.has_word("XRAY"));
        assert_eq!(list.word_count(), 2);
    }

    #[test]
    fn test_insert() {
        let mut list = WordList::default();
        assert!(list.insert("ember"));
        assert!(!list.insert("EMBER"));
        assert!(!list.insert("ok"));
        assert!(list.has_word("EMBER"));
    }

    #[test]
    fn test_load_or_fallback_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "LANTERN\nCOBBLE").unwrap();
        let list = WordList::load_or_fallback(file.path());
        assert_eq!(list.len(), 2);
        assert!(list.has_word("COBBLE"));
        assert!(!list.has_word("STONE"));
    }

    #[test]
    fn test_load_or_fallback_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let list = WordList::load_or_fallback(dir.path().join("missing.txt"));
        assert_eq!(list, WordList::fallback());
    }

    #[test]
    fn test_load_or_fallback_on_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let list = WordList::load_or_fallback(file.path());
        assert_eq!(list, WordList::fallback());
    }

    #[test]
    fn test_load_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WordList::load(dir.path().join("missing.txt")).is_err());
    }
}
