//! # Rules Configuration
//!
//! Tunable economy and progression numbers. Every field has a default, so a
//! JSON rules file only needs to name what it changes.

use crate::config::{BASELINE_HAPPINESS, DEFAULT_RACK_SIZE, MAX_HAPPINESS, MAX_TIER};
use crate::game::{Biome, ResourceKind, Resources};
use crate::{ValeError, ValeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens to population while the town is unhappy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopulationPolicy {
    /// Population never shrinks
    #[default]
    GrowOnly,
    /// Lose `amount` residents per tick while happiness is below `below`
    Decline { below: u8, amount: u32 },
}

/// Requirements for reaching a city tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub tier: u8,
    pub population: u32,
    pub distinct_buildings: usize,
    #[serde(default)]
    pub requires_all_milestones: bool,
}

/// Minimum word length from a given tier upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLengthStep {
    pub from_tier: u8,
    pub min_length: usize,
}

/// Extra road cost per biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeSurcharges {
    pub forest: Resources,
    pub hill: Resources,
    pub marsh: Resources,
}

impl BiomeSurcharges {
    /// Surcharge for paving a tile of `biome`.
    pub fn for_biome(&self, biome: Biome) -> Resources {
        match biome {
            Biome::Forest => self.forest,
            Biome::Hill => self.hill,
            Biome::Marsh => self.marsh,
            Biome::Meadow | Biome::Thicket => Resources::zero(),
        }
    }
}

impl Default for BiomeSurcharges {
    fn default() -> Self {
        Self {
            forest: Resources::of(ResourceKind::Lumber, 1),
            hill: Resources::of(ResourceKind::Stone, 1),
            marsh: Resources::of(ResourceKind::Stone, 1),
        }
    }
}

/// Economy and progression rules for a session.
///
/// # Examples
///
/// ```
/// use lettervale::RulesConfig;
///
/// let rules = RulesConfig::default();
/// assert_eq!(rules.rack_size, 8);
/// assert_eq!(rules.min_word_length(1), 3);
/// assert_eq!(rules.min_word_length(2), 4);
/// assert_eq!(rules.min_word_length(4), 5);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub rack_size: usize,
    /// Permit buildings on bare (non-thicket) grass
    pub allow_grass_buildings: bool,
    pub population_policy: PopulationPolicy,
    pub baseline_happiness: u8,
    /// Population grows only at or above this happiness
    pub growth_threshold: u8,
    /// One happiness point lost per this many residents over capacity
    pub overcrowding_divisor: u32,
    pub starting_resources: Resources,
    pub road_cost: Resources,
    pub bridge_cost: Resources,
    pub biome_surcharges: BiomeSurcharges,
    /// Share of the base paving cost returned on removal
    pub refund_percent: u32,
    pub tier_rules: Vec<TierRule>,
    pub word_length_steps: Vec<WordLengthStep>,
    pub message_log_limit: usize,
    /// `(letter, weight)` pairs replacing the default letter distribution
    pub letter_weights: Option<Vec<(char, u32)>>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rack_size: DEFAULT_RACK_SIZE,
            allow_grass_buildings: false,
            population_policy: PopulationPolicy::GrowOnly,
            baseline_happiness: BASELINE_HAPPINESS,
            growth_threshold: 50,
            overcrowding_divisor: 10,
            starting_resources: Resources::new(30, 12, 8, 0, 0),
            road_cost: Resources::of(ResourceKind::Coin, 1),
            bridge_cost: Resources::new(2, 2, 0, 0, 0),
            biome_surcharges: BiomeSurcharges::default(),
            refund_percent: 50,
            tier_rules: vec![
                TierRule {
                    tier: 2,
                    population: 10,
                    distinct_buildings: 3,
                    requires_all_milestones: false,
                },
                TierRule {
                    tier: 3,
                    population: 30,
                    distinct_buildings: 5,
                    requires_all_milestones: false,
                },
                TierRule {
                    tier: 4,
                    population: 60,
                    distinct_buildings: 7,
                    requires_all_milestones: true,
                },
            ],
            word_length_steps: vec![
                WordLengthStep {
                    from_tier: 1,
                    min_length: 3,
                },
                WordLengthStep {
                    from_tier: 2,
                    min_length: 4,
                },
                WordLengthStep {
                    from_tier: 4,
                    min_length: 5,
                },
            ],
            message_log_limit: 50,
            letter_weights: None,
        }
    }
}

impl RulesConfig {
    /// Rules with a generous purse, handy for tests and demos.
    pub fn for_testing() -> Self {
        Self {
            starting_resources: Resources::new(500, 500, 500, 100, 20),
            ..Self::default()
        }
    }

    /// Loads rules from a JSON file and validates them.
    pub fn load_from_path(path: impl AsRef<Path>) -> ValeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let rules: RulesConfig = serde_json::from_str(&text)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Minimum word length at `tier`: the last step whose `from_tier` has been
    /// reached, or 1 if none applies.
    pub fn min_word_length(&self, tier: u8) -> usize {
        self.word_length_steps
            .iter()
            .filter(|step| step.from_tier <= tier)
            .max_by_key(|step| step.from_tier)
            .map(|step| step.min_length)
            .unwrap_or(1)
    }

    pub fn validate(&self) -> ValeResult<()> {
        let invalid = |reason: String| Err(ValeError::InvalidConfig(reason));

        if self.rack_size == 0 {
            return invalid("rack_size must be at least 1".to_string());
        }
        if self.baseline_happiness > MAX_HAPPINESS || self.growth_threshold > MAX_HAPPINESS {
            return invalid("happiness values must be at most 100".to_string());
        }
        if self.overcrowding_divisor == 0 {
            return invalid("overcrowding_divisor must be positive".to_string());
        }
        if self.refund_percent > 100 {
            return invalid("refund_percent must be at most 100".to_string());
        }
        if self.message_log_limit == 0 {
            return invalid("message_log_limit must be at least 1".to_string());
        }
        if let PopulationPolicy::Decline { below, .. } = self.population_policy {
            if below > MAX_HAPPINESS {
                return invalid("decline threshold must be at most 100".to_string());
            }
        }
        for rule in &self.tier_rules {
            if rule.tier < 2 || rule.tier > MAX_TIER {
                return invalid(format!("tier rule for unknown tier {}", rule.tier));
            }
        }
        if self.word_length_steps.is_empty() {
            return invalid("word_length_steps must not be empty".to_string());
        }
        if let Some(weights) = &self.letter_weights {
            if weights.iter().any(|(letter, _)| !letter.is_ascii_uppercase()) {
                return invalid("letter weights must use uppercase A-Z".to_string());
            }
            if weights.iter().all(|&(_, weight)| weight == 0) {
                return invalid("letter weights must not all be zero".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rules_validate() {
        assert!(RulesConfig::default().validate().is_ok());
        assert!(RulesConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_min_word_length_steps() {
        let rules = RulesConfig::default();
        assert_eq!(rules.min_word_length(1), 3);
        assert_eq!(rules.min_word_length(3), 4);
        assert_eq!(rules.min_word_length(4), 5);
        assert_eq!(rules.min_word_length(0), 1);
    }

    #[test]
    fn test_surcharges() {
        let surcharges = BiomeSurcharges::default();
        assert_eq!(
            surcharges.for_biome(Biome::Forest),
            Resources::of(ResourceKind::Lumber, 1)
        );
        assert_eq!(
            surcharges.for_biome(Biome::Marsh),
            Resources::of(ResourceKind::Stone, 1)
        );
        assert!(surcharges.for_biome(Biome::Meadow).is_zero());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut rules = RulesConfig::default();
        rules.refund_percent = 150;
        assert!(rules.validate().is_err());

        let mut rules = RulesConfig::default();
        rules.tier_rules[0].tier = 5;
        assert!(rules.validate().is_err());

        let mut rules = RulesConfig::default();
        rules.letter_weights = Some(vec![('a', 3)]);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "rack_size": 7, "allow_grass_buildings": true,
                 "population_policy": {{ "kind": "decline", "below": 30, "amount": 2 }} }}"#
        )
        .unwrap();

        let rules = RulesConfig::load_from_path(file.path()).unwrap();
        assert_eq!(rules.rack_size, 7);
        assert!(rules.allow_grass_buildings);
        assert_eq!(
            rules.population_policy,
            PopulationPolicy::Decline {
                below: 30,
                amount: 2
            }
        );
        assert_eq!(rules.refund_percent, 50);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rack_size": 0 }}"#).unwrap();
        assert!(matches!(
            RulesConfig::load_from_path(file.path()),
            Err(ValeError::InvalidConfig(_))
        ));
    }
}
