//! # City Progression
//!
//! Derived city statistics: housing, happiness, population growth and tier.
//!
//! Everything here is recomputed from the grid on demand, and structures are
//! counted once per instance no matter how many tiles they cover. Population,
//! tier and milestones are the only accumulated state.

use crate::config::{MAX_HAPPINESS, MAX_TIER};
use crate::game::{BuildingId, Catalog, Grid, PopulationPolicy, Resources, RulesConfig};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One-way progress flags toward the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// Spelled a word of eight or more letters
    LongWord,
    /// Spelled a word with J, Q, X, Z, K or V
    RareLetter,
    /// Spelled a word with two identical vowels in a row
    DoubledVowel,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [
        Milestone::LongWord,
        Milestone::RareLetter,
        Milestone::DoubledVowel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Milestone::LongWord => "long word",
            Milestone::RareLetter => "rare letter",
            Milestone::DoubledVowel => "doubled vowel",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Earned milestone flags. Flags are only ever set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    long_word: bool,
    rare_letter: bool,
    doubled_vowel: bool,
}

impl Milestones {
    pub fn has(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::LongWord => self.long_word,
            Milestone::RareLetter => self.rare_letter,
            Milestone::DoubledVowel => self.doubled_vowel,
        }
    }

    /// Sets a flag. Returns true if it was not set before.
    pub fn record(&mut self, milestone: Milestone) -> bool {
        let flag = match milestone {
            Milestone::LongWord => &mut self.long_word,
            Milestone::RareLetter => &mut self.rare_letter,
            Milestone::DoubledVowel => &mut self.doubled_vowel,
        };
        let newly = !*flag;
        *flag = true;
        newly
    }

    pub fn count(&self) -> usize {
        Milestone::ALL.iter().filter(|&&m| self.has(m)).count()
    }

    pub fn all(&self) -> bool {
        self.count() == Milestone::ALL.len()
    }
}

/// Totals gathered from the placed structures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySurvey {
    pub housing: u32,
    pub happiness_delta: i32,
    pub growth: u32,
    pub distinct_buildings: usize,
    pub upkeep: Resources,
    pub aura: Resources,
}

impl CitySurvey {
    /// Surveys every structure once. Structures whose building is missing from
    /// the catalog are skipped.
    pub fn take(grid: &Grid, catalog: &Catalog) -> Self {
        let mut survey = CitySurvey::default();
        let mut kinds: BTreeSet<&BuildingId> = BTreeSet::new();

        for structure in grid.structures() {
            let Some(def) = catalog.get_by_id(&structure.building) else {
                debug!("Skipping unknown building '{}'", structure.building);
                continue;
            };
            kinds.insert(&structure.building);
            survey.housing = survey.housing.saturating_add(def.housing(structure.level));
            survey.happiness_delta += def.happiness_delta();
            survey.growth = survey.growth.saturating_add(def.growth());
            survey.upkeep += def.upkeep.scaled(structure.level);
            survey.aura += def.aura(structure.level);
        }

        survey.distinct_buildings = kinds.len();
        survey
    }
}

/// Happiness from baseline, building deltas and overcrowding, clamped to
/// `0..=100`.
///
/// # Examples
///
/// ```
/// use lettervale::compute_happiness;
///
/// assert_eq!(compute_happiness(50, 12, 0, 10, 10), 62);
/// // 25 residents over capacity costs 2 points
/// assert_eq!(compute_happiness(50, 0, 35, 10, 10), 48);
/// assert_eq!(compute_happiness(50, 90, 0, 0, 10), 100);
/// ```
pub fn compute_happiness(
    baseline: u8,
    delta: i32,
    population: u32,
    housing: u32,
    overcrowding_divisor: u32,
) -> u8 {
    let overcrowded = population.saturating_sub(housing);
    let penalty = if overcrowding_divisor == 0 {
        0
    } else {
        i64::from(overcrowded / overcrowding_divisor)
    };
    let raw = i64::from(baseline) + i64::from(delta) - penalty;
    raw.clamp(0, i64::from(MAX_HAPPINESS)) as u8
}

/// Accumulated city progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityProgress {
    pub population: u32,
    pub housing: u32,
    pub happiness: u8,
    pub tier: u8,
    pub milestones: Milestones,
}

impl CityProgress {
    /// A brand-new hamlet.
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            population: 0,
            housing: 0,
            happiness: rules.baseline_happiness,
            tier: 1,
            milestones: Milestones::default(),
        }
    }

    /// Recomputes housing and happiness from a survey.
    pub fn refresh(&mut self, survey: &CitySurvey, rules: &RulesConfig) {
        self.housing = survey.housing;
        self.happiness = compute_happiness(
            rules.baseline_happiness,
            survey.happiness_delta,
            self.population,
            self.housing,
            rules.overcrowding_divisor,
        );
    }

    /// Applies one tick of growth or decline. Returns the population change.
    ///
    /// Growth never lifts population above housing, and never lowers a
    /// population that is already above it.
    pub fn update_population(&mut self, growth: u32, rules: &RulesConfig) -> i64 {
        let before = self.population;
        if self.happiness >= rules.growth_threshold {
            let grown = self.population.saturating_add(growth.max(1));
            self.population = self.population.max(grown.min(self.housing));
        } else if let PopulationPolicy::Decline { below, amount } = rules.population_policy {
            if self.happiness < below {
                self.population = self.population.saturating_sub(amount);
            }
        }
        i64::from(self.population) - i64::from(before)
    }

    /// Raises the tier to the highest rule currently met. Tiers never drop.
    ///
    /// Returns the new tier if it changed.
    pub fn advance_tier(&mut self, distinct_buildings: usize, rules: &RulesConfig) -> Option<u8> {
        let reached = rules
            .tier_rules
            .iter()
            .filter(|rule| {
                self.population >= rule.population
                    && distinct_buildings >= rule.distinct_buildings
                    && (!rule.requires_all_milestones || self.milestones.all())
            })
            .map(|rule| rule.tier)
            .max()
            .unwrap_or(1)
            .min(MAX_TIER);

        if reached > self.tier {
            self.tier = reached;
            Some(reached)
        } else {
            None
        }
    }

    /// Records every milestone in `earned`. Returns the ones newly set.
    pub fn record_milestones(&mut self, earned: &[Milestone]) -> Vec<Milestone> {
        earned
            .iter()
            .copied()
            .filter(|&milestone| self.milestones.record(milestone))
            .collect()
    }
}

/// Summary of one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub upkeep_paid: Resources,
    /// Upkeep that could not be paid
    pub upkeep_unpaid: Resources,
    pub aura: Resources,
    pub population_change: i64,
    pub population: u32,
    pub happiness: u8,
    pub tier: u8,
    pub tier_advanced: Option<u8>,
}
