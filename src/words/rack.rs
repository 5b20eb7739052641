//! # Letter Rack
//!
//! Weighted letter drawing and the fixed-size rack of letters a player spells
//! from.

use crate::{ValeError, ValeResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// English tile frequencies.
pub const STANDARD_LETTER_WEIGHTS: [(char, u32); 26] = [
    ('A', 9),
    ('B', 2),
    ('C', 2),
    ('D', 4),
    ('E', 12),
    ('F', 2),
    ('G', 3),
    ('H', 2),
    ('I', 9),
    ('J', 1),
    ('K', 1),
    ('L', 4),
    ('M', 2),
    ('N', 6),
    ('O', 8),
    ('P', 2),
    ('Q', 1),
    ('R', 6),
    ('S', 4),
    ('T', 6),
    ('U', 4),
    ('V', 2),
    ('W', 2),
    ('X', 1),
    ('Y', 2),
    ('Z', 1),
];

/// Weighted letter distribution.
///
/// Draws are sampled with [`WeightedIndex`], so any [`Rng`] works; the game
/// passes its seeded rack stream.
#[derive(Debug, Clone)]
pub struct LetterBag {
    letters: Vec<char>,
    distribution: WeightedIndex<u32>,
}

impl LetterBag {
    /// Builds a bag from `(letter, weight)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::{LetterBag, SeededRng};
    ///
    /// let bag = LetterBag::from_weights(&[('Q', 1)]).unwrap();
    /// let mut rng = SeededRng::from_seed_str("q");
    /// assert_eq!(bag.draw(&mut rng), 'Q');
    /// ```
    pub fn from_weights(weights: &[(char, u32)]) -> ValeResult<Self> {
        if let Some((letter, _)) = weights.iter().find(|(c, _)| !c.is_ascii_uppercase()) {
            return Err(ValeError::InvalidConfig(format!(
                "letter bag contains '{}', expected A-Z",
                letter
            )));
        }
        let letters = weights.iter().map(|&(letter, _)| letter).collect();
        let distribution = WeightedIndex::new(weights.iter().map(|&(_, weight)| weight))
            .map_err(|e| ValeError::InvalidConfig(format!("letter weights: {}", e)))?;
        Ok(Self {
            letters,
            distribution,
        })
    }

    /// Bag with [`STANDARD_LETTER_WEIGHTS`].
    pub fn standard() -> ValeResult<Self> {
        Self::from_weights(&STANDARD_LETTER_WEIGHTS)
    }

    /// Draws one letter.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.letters[self.distribution.sample(rng)]
    }
}

/// The letters a player can spell from.
///
/// # Examples
///
/// ```
/// use lettervale::Rack;
///
/// let mut rack = Rack::from_letters("STONEABC".chars(), 8);
/// assert!(rack.can_form("STONE"));
/// assert!(!rack.can_form("TOOTS"));
/// assert!(rack.consume("STONE"));
/// assert_eq!(rack.letters(), &['A', 'B', 'C']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    letters: Vec<char>,
    capacity: usize,
}

impl Rack {
    /// Empty rack holding up to `capacity` letters.
    pub fn new(capacity: usize) -> Self {
        Self {
            letters: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rack with the given letters, truncated to `capacity`.
    pub fn from_letters(letters: impl IntoIterator<Item = char>, capacity: usize) -> Self {
        let letters = letters
            .into_iter()
            .map(|c| c.to_ascii_uppercase())
            .take(capacity)
            .collect();
        Self { letters, capacity }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.letters.len() >= self.capacity
    }

    /// Tops the rack up to capacity. Returns the letters drawn, in order.
    pub fn fill<R: Rng + ?Sized>(&mut self, bag: &LetterBag, rng: &mut R) -> Vec<char> {
        let mut drawn = Vec::new();
        while !self.is_full() {
            let letter = bag.draw(rng);
            self.letters.push(letter);
            drawn.push(letter);
        }
        drawn
    }

    /// True if every letter of `word` is on the rack often enough.
    pub fn can_form(&self, word: &str) -> bool {
        let mut available = [0usize; 26];
        for letter in &self.letters {
            if let Some(slot) = letter_slot(*letter) {
                available[slot] += 1;
            }
        }
        word.chars().all(|letter| match letter_slot(letter) {
            Some(slot) if available[slot] > 0 => {
                available[slot] -= 1;
                true
            }
            _ => false,
        })
    }

    /// Removes the first matching rack letter for each letter of `word`.
    ///
    /// Leaves the rack untouched and returns false if the word cannot be formed.
    pub fn consume(&mut self, word: &str) -> bool {
        if !self.can_form(word) {
            return false;
        }
        for letter in word.chars() {
            if let Some(position) = self.letters.iter().position(|&c| c == letter) {
                self.letters.remove(position);
            }
        }
        true
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: Vec<String> = self.letters.iter().map(char::to_string).collect();
        f.write_str(&letters.join(" "))
    }
}

fn letter_slot(letter: char) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some((letter as u8 - b'A') as usize)
    } else {
        None
    }
}
