//! # Word Scoring
//!
//! Turns an accepted word into a resource yield.
//!
//! The arithmetic is integer-only. The base yield comes from the word's shape,
//! building bonuses are added, then the happiness band scales all five
//! components by the same fraction, floored.

use crate::game::{Milestone, Resources};
use crate::utils::scale_floor;
use serde::{Deserialize, Serialize};

/// Letters counted as vowels. `Y` is a consonant.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Letters that pay out magic.
pub const RARE_LETTERS: [char; 6] = ['J', 'Q', 'X', 'Z', 'K', 'V'];

/// Words this long or longer earn the long-word milestone.
pub const LONG_WORD_LENGTH: usize = 8;

/// Uppercases and strips everything but ASCII letters.
///
/// # Examples
///
/// ```
/// use lettervale::normalize;
///
/// assert_eq!(normalize(" st-One! "), "STONE");
/// assert_eq!(normalize("123"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn is_vowel(letter: char) -> bool {
    VOWELS.contains(&letter)
}

pub fn is_rare(letter: char) -> bool {
    RARE_LETTERS.contains(&letter)
}

/// Letter counts of a normalized word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordShape {
    pub length: usize,
    pub vowels: usize,
    pub consonants: usize,
    pub rare: usize,
}

impl WordShape {
    pub fn of(word: &str) -> Self {
        let length = word.chars().count();
        let vowels = word.chars().filter(|&c| is_vowel(c)).count();
        let rare = word.chars().filter(|&c| is_rare(c)).count();
        Self {
            length,
            vowels,
            consonants: length - vowels,
            rare,
        }
    }

    /// Yield before bonuses and happiness.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::{Resources, WordShape};
    ///
    /// let shape = WordShape::of("STONE");
    /// assert_eq!(shape.base_yield(), Resources::new(2, 1, 0, 1, 0));
    /// ```
    pub fn base_yield(&self) -> Resources {
        Resources::new(
            to_u32(self.length / 2),
            to_u32(self.consonants / 3),
            to_u32(self.consonants / 4),
            to_u32(self.vowels / 2),
            to_u32(self.rare),
        )
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Happiness bands that scale word yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Happiness 80 and up, ×6/5
    Cheerful,
    /// ×1
    Content,
    /// Happiness 20 and below, ×4/5
    Gloomy,
}

impl Mood {
    pub fn from_happiness(happiness: u8) -> Self {
        if happiness >= 80 {
            Mood::Cheerful
        } else if happiness <= 20 {
            Mood::Gloomy
        } else {
            Mood::Content
        }
    }

    /// Multiplier as `(numerator, denominator)`.
    pub fn factor(self) -> (u32, u32) {
        match self {
            Mood::Cheerful => (6, 5),
            Mood::Content => (1, 1),
            Mood::Gloomy => (4, 5),
        }
    }

    /// Scales every component by this mood's factor, flooring each.
    pub fn apply(self, amounts: &Resources) -> Resources {
        let (numerator, denominator) = self.factor();
        amounts.map(|value| scale_floor(value, numerator, denominator))
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Cheerful => "cheerful",
            Mood::Content => "content",
            Mood::Gloomy => "gloomy",
        }
    }
}

/// Breakdown of a word's payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordYield {
    pub base: Resources,
    pub bonus: Resources,
    pub mood: Mood,
    /// What is actually credited
    pub total: Resources,
}

impl WordYield {
    /// Computes the payout for a normalized word.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::{Resources, WordYield};
    ///
    /// let payout = WordYield::compute("STONE", Resources::zero(), 90);
    /// assert_eq!(payout.total, Resources::new(2, 1, 0, 1, 0));
    /// ```
    pub fn compute(word: &str, bonus: Resources, happiness: u8) -> Self {
        let base = WordShape::of(word).base_yield();
        let mood = Mood::from_happiness(happiness);
        let total = mood.apply(&(base + bonus));
        Self {
            base,
            bonus,
            mood,
            total,
        }
    }
}

/// True if the word has two identical vowels side by side, as in "MOON".
pub fn has_doubled_vowel(word: &str) -> bool {
    let letters: Vec<char> = word.chars().collect();
    letters
        .windows(2)
        .any(|pair| pair[0] == pair[1] && is_vowel(pair[0]))
}

/// Milestones a word qualifies for.
pub fn milestones_in(word: &str) -> Vec<Milestone> {
    let mut earned = Vec::new();
    if word.chars().count() >= LONG_WORD_LENGTH {
        earned.push(Milestone::LongWord);
    }
    if word.chars().any(is_rare) {
        earned.push(Milestone::RareLetter);
    }
    if has_doubled_vowel(word) {
        earned.push(Milestone::DoubledVowel);
    }
    earned
}
