//! # Building Catalog
//!
//! Static building definitions. Every definition is a closed tagged variant
//! checked once when the catalog is built, so the rest of the game can trust
//! footprints, costs and role payloads without re-checking them.

use crate::config::{MAX_BUILDING_TIER, MAX_FOOTPRINT_SPAN};
use crate::game::{ResourceKind, Resources};
use crate::{ValeError, ValeResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

/// Identifier of a catalog entry, e.g. `"cottage"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(String);

impl BuildingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BuildingId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Cells a building covers relative to its anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Footprint {
    /// Dense rectangle extending right and down from the anchor
    Rect { width: u32, height: u32 },
    /// Explicit offsets for irregular shapes
    Shape { cells: Vec<(i32, i32)> },
}

impl Footprint {
    /// Offsets of every covered cell, anchor-relative, row by row.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::Footprint;
    ///
    /// let rect = Footprint::Rect { width: 2, height: 2 };
    /// assert_eq!(rect.offsets(), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    ///
    /// A rectangle too large to address in `i32` has no offsets, which no grid
    /// will accept as a footprint.
    pub fn offsets(&self) -> Vec<(i32, i32)> {
        match self {
            Footprint::Rect { width, height } => {
                let (Ok(width), Ok(height)) = (i32::try_from(*width), i32::try_from(*height))
                else {
                    return Vec::new();
                };
                (0..height)
                    .flat_map(|dy| (0..width).map(move |dx| (dx, dy)))
                    .collect()
            }
            Footprint::Shape { cells } => cells.clone(),
        }
    }

    pub fn cell_count(&self) -> usize {
        match self {
            Footprint::Rect { width, height } => (*width as usize) * (*height as usize),
            Footprint::Shape { cells } => cells.len(),
        }
    }
}

/// Extra requirement a footprint must meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementConstraint {
    #[default]
    None,
    /// Some footprint cell must border water or a bridge
    AdjacentToWater,
}

/// What a building contributes once placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildingRole {
    /// Houses residents and speeds growth
    Housing { capacity: u32, growth: u32 },
    /// Pays `output × level` every tick
    Workshop { output: Resources },
    /// Adds happiness on top of the building's own delta
    Amenity { happiness: i32 },
    /// Adds `amount × level` of `resource` to words of at least
    /// `min_word_length` letters
    WordBonus {
        resource: ResourceKind,
        amount: u32,
        min_word_length: usize,
    },
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingDef {
    pub id: BuildingId,
    pub name: String,
    /// Lowest city tier that may build this (1 to 3)
    pub tier: u8,
    pub footprint: Footprint,
    /// Cost of a level 1 building
    pub cost: Resources,
    /// Drained every tick, per level
    #[serde(default)]
    pub upkeep: Resources,
    #[serde(default)]
    pub happiness: i32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default)]
    pub constraint: PlacementConstraint,
    pub role: BuildingRole,
}

fn default_max_level() -> u32 {
    3
}

impl BuildingDef {
    /// Cost of building (or upgrading to) `level`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::{Catalog, Resources};
    ///
    /// let catalog = Catalog::standard().unwrap();
    /// let cottage = catalog.get("cottage").unwrap();
    /// assert_eq!(cottage.cost_at_level(2), cottage.cost.scaled(2));
    /// ```
    pub fn cost_at_level(&self, level: u32) -> Resources {
        self.cost.scaled(level)
    }

    /// Housing capacity at `level`.
    pub fn housing(&self, level: u32) -> u32 {
        match self.role {
            BuildingRole::Housing { capacity, .. } => capacity.saturating_mul(level),
            _ => 0,
        }
    }

    /// Growth bonus; not level-scaled.
    pub fn growth(&self) -> u32 {
        match self.role {
            BuildingRole::Housing { growth, .. } => growth,
            _ => 0,
        }
    }

    /// Total happiness delta: the building's own plus any amenity bonus.
    pub fn happiness_delta(&self) -> i32 {
        match self.role {
            BuildingRole::Amenity { happiness } => self.happiness + happiness,
            _ => self.happiness,
        }
    }

    /// Per-tick workshop output at `level`.
    pub fn aura(&self, level: u32) -> Resources {
        match &self.role {
            BuildingRole::Workshop { output } => output.scaled(level),
            _ => Resources::zero(),
        }
    }

    /// Extra yield this building adds to a word of `word_len` letters.
    pub fn word_bonus(&self, level: u32, word_len: usize) -> Resources {
        match self.role {
            BuildingRole::WordBonus {
                resource,
                amount,
                min_word_length,
            } if word_len >= min_word_length => {
                Resources::of(resource, amount.saturating_mul(level))
            }
            _ => Resources::zero(),
        }
    }

    fn validate(&self) -> ValeResult<()> {
        let invalid = |reason: &str| {
            Err(ValeError::InvalidCatalog(format!(
                "building '{}': {}",
                self.id, reason
            )))
        };

        if self.id.as_str().is_empty() {
            return Err(ValeError::InvalidCatalog("empty building id".to_string()));
        }
        if self.tier == 0 || self.tier > MAX_BUILDING_TIER {
            return invalid("tier must be between 1 and 3");
        }
        if self.max_level == 0 {
            return invalid("max_level must be at least 1");
        }
        match &self.footprint {
            Footprint::Rect { width, height } => {
                if *width == 0 || *height == 0 {
                    return invalid("footprint is empty");
                }
                if *width > MAX_FOOTPRINT_SPAN || *height > MAX_FOOTPRINT_SPAN {
                    return invalid("footprint is wider than 16 tiles");
                }
            }
            Footprint::Shape { cells } => {
                if cells.is_empty() {
                    return invalid("footprint is empty");
                }
                let unique: HashSet<_> = cells.iter().collect();
                if unique.len() != cells.len() {
                    return invalid("footprint repeats an offset");
                }
                if !cells.contains(&(0, 0)) {
                    return invalid("footprint does not cover its anchor");
                }
                if cells.iter().any(|&(dx, dy)| {
                    dx.unsigned_abs() >= MAX_FOOTPRINT_SPAN || dy.unsigned_abs() >= MAX_FOOTPRINT_SPAN
                }) {
                    return invalid("footprint offset is more than 15 tiles from its anchor");
                }
            }
        }
        match &self.role {
            BuildingRole::Housing { capacity, .. } if *capacity == 0 => {
                invalid("housing capacity is zero")
            }
            BuildingRole::Workshop { output } if output.is_zero() => {
                invalid("workshop output is empty")
            }
            BuildingRole::Amenity { happiness } if *happiness == 0 => {
                invalid("amenity happiness is zero")
            }
            BuildingRole::WordBonus { amount, .. } if *amount == 0 => {
                invalid("word bonus amount is zero")
            }
            _ => Ok(()),
        }
    }
}

/// Validated set of building definitions, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    defs: BTreeMap<BuildingId, BuildingDef>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and malformed entries.
    pub fn new(defs: Vec<BuildingDef>) -> ValeResult<Self> {
        if defs.is_empty() {
            return Err(ValeError::InvalidCatalog(
                "catalog has no buildings".to_string(),
            ));
        }
        let mut map = BTreeMap::new();
        for def in defs {
            def.validate()?;
            let id = def.id.clone();
            if map.insert(id.clone(), def).is_some() {
                return Err(ValeError::InvalidCatalog(format!(
                    "duplicate building id '{}'",
                    id
                )));
            }
        }
        Ok(Self { defs: map })
    }

    /// Parses a JSON array of definitions.
    pub fn from_json(json: &str) -> ValeResult<Self> {
        let defs: Vec<BuildingDef> = serde_json::from_str(json)?;
        Self::new(defs)
    }

    /// Loads a JSON catalog file.
    pub fn load_from_path(path: impl AsRef<Path>) -> ValeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The built-in catalog.
    pub fn standard() -> ValeResult<Self> {
        Self::new(standard_buildings())
    }

    pub fn get(&self, id: &str) -> Option<&BuildingDef> {
        self.defs.get(&BuildingId::from(id))
    }

    pub fn get_by_id(&self, id: &BuildingId) -> Option<&BuildingDef> {
        self.defs.get(id)
    }

    /// Definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingDef> {
        self.defs.values()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

fn rect(width: u32, height: u32) -> Footprint {
    Footprint::Rect { width, height }
}

fn building(
    id: &str,
    name: &str,
    tier: u8,
    footprint: Footprint,
    cost: Resources,
    role: BuildingRole,
) -> BuildingDef {
    BuildingDef {
        id: BuildingId::from(id),
        name: name.to_string(),
        tier,
        footprint,
        cost,
        upkeep: Resources::zero(),
        happiness: 0,
        max_level: default_max_level(),
        constraint: PlacementConstraint::None,
        role,
    }
}

fn standard_buildings() -> Vec<BuildingDef> {
    vec![
        BuildingDef {
            happiness: 2,
            ..building(
                "cottage",
                "Cottage",
                1,
                rect(1, 1),
                Resources::new(5, 4, 0, 0, 0),
                BuildingRole::Housing {
                    capacity: 4,
                    growth: 1,
                },
            )
        },
        building(
            "garden",
            "Garden",
            1,
            rect(1, 1),
            Resources::new(3, 1, 0, 0, 0),
            BuildingRole::Amenity { happiness: 5 },
        ),
        BuildingDef {
            upkeep: Resources::of(ResourceKind::Coin, 1),
            ..building(
                "market",
                "Market",
                1,
                rect(2, 1),
                Resources::new(8, 4, 2, 0, 0),
                BuildingRole::WordBonus {
                    resource: ResourceKind::Coin,
                    amount: 2,
                    min_word_length: 3,
                },
            )
        },
        BuildingDef {
            constraint: PlacementConstraint::AdjacentToWater,
            happiness: -2,
            ..building(
                "sawmill",
                "Sawmill",
                1,
                rect(2, 2),
                Resources::new(6, 2, 4, 0, 0),
                BuildingRole::Workshop {
                    output: Resources::of(ResourceKind::Lumber, 2),
                },
            )
        },
        BuildingDef {
            upkeep: Resources::of(ResourceKind::Coin, 1),
            happiness: 1,
            ..building(
                "library",
                "Library",
                2,
                rect(2, 2),
                Resources::new(12, 6, 6, 2, 0),
                BuildingRole::WordBonus {
                    resource: ResourceKind::Knowledge,
                    amount: 2,
                    min_word_length: 6,
                },
            )
        },
        BuildingDef {
            happiness: 1,
            ..building(
                "townhouse",
                "Townhouse",
                2,
                Footprint::Shape {
                    cells: vec![(0, 0), (0, 1), (1, 1)],
                },
                Resources::new(10, 8, 6, 0, 0),
                BuildingRole::Housing {
                    capacity: 10,
                    growth: 2,
                },
            )
        },
        BuildingDef {
            upkeep: Resources::of(ResourceKind::Coin, 1),
            happiness: -3,
            ..building(
                "quarry",
                "Quarry",
                2,
                rect(2, 2),
                Resources::new(10, 6, 0, 0, 0),
                BuildingRole::Workshop {
                    output: Resources::of(ResourceKind::Stone, 2),
                },
            )
        },
        BuildingDef {
            upkeep: Resources::new(2, 0, 0, 1, 0),
            max_level: 2,
            ..building(
                "observatory",
                "Observatory",
                3,
                rect(2, 3),
                Resources::new(20, 10, 14, 8, 2),
                BuildingRole::WordBonus {
                    resource: ResourceKind::Magic,
                    amount: 1,
                    min_word_length: 7,
                },
            )
        },
        BuildingDef {
            constraint: PlacementConstraint::AdjacentToWater,
            max_level: 2,
            ..building(
                "fountain",
                "Fountain",
                3,
                rect(1, 1),
                Resources::new(15, 0, 10, 0, 1),
                BuildingRole::Amenity { happiness: 10 },
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.len(), 9);
        for id in [
            "cottage",
            "garden",
            "market",
            "sawmill",
            "library",
            "townhouse",
            "quarry",
            "observatory",
            "fountain",
        ] {
            assert!(catalog.get(id).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn test_rect_and_shape_offsets() {
        assert_eq!(rect(2, 1).offsets(), vec![(0, 0), (1, 0)]);
        let townhouse = Catalog::standard().unwrap().get("townhouse").cloned().unwrap();
        assert_eq!(townhouse.footprint.offsets(), vec![(0, 0), (0, 1), (1, 1)]);
        assert_eq!(townhouse.footprint.cell_count(), 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let garden = standard_buildings().remove(1);
        let result = Catalog::new(vec![garden.clone(), garden]);
        assert!(matches!(result, Err(ValeError::InvalidCatalog(_))));
    }

    #[test]
    fn test_malformed_entries_rejected() {
        let base = standard_buildings().remove(0);

        let mut bad_tier = base.clone();
        bad_tier.tier = 4;
        assert!(Catalog::new(vec![bad_tier]).is_err());

        let mut empty_rect = base.clone();
        empty_rect.footprint = rect(0, 2);
        assert!(Catalog::new(vec![empty_rect]).is_err());

        let mut repeated = base.clone();
        repeated.footprint = Footprint::Shape {
            cells: vec![(0, 0), (0, 0)],
        };
        assert!(Catalog::new(vec![repeated]).is_err());

        let mut floating = base.clone();
        floating.footprint = Footprint::Shape {
            cells: vec![(1, 0)],
        };
        assert!(Catalog::new(vec![floating]).is_err());

        let mut no_capacity = base;
        no_capacity.role = BuildingRole::Housing {
            capacity: 0,
            growth: 1,
        };
        assert!(Catalog::new(vec![no_capacity]).is_err());

        assert!(Catalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_role_helpers() {
        let catalog = Catalog::standard().unwrap();
        let cottage = catalog.get("cottage").unwrap();
        assert_eq!(cottage.housing(2), 8);
        assert_eq!(cottage.growth(), 1);

        let garden = catalog.get("garden").unwrap();
        assert_eq!(garden.happiness_delta(), 5);

        let sawmill = catalog.get("sawmill").unwrap();
        assert_eq!(sawmill.aura(3), Resources::of(ResourceKind::Lumber, 6));

        let library = catalog.get("library").unwrap();
        assert!(library.word_bonus(1, 5).is_zero());
        assert_eq!(
            library.word_bonus(2, 6),
            Resources::of(ResourceKind::Knowledge, 4)
        );
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let json = r#"[
            {
                "id": "well",
                "name": "Well",
                "tier": 1,
                "footprint": { "kind": "rect", "width": 1, "height": 1 },
                "cost": { "stone": 3 },
                "constraint": "adjacent_to_water",
                "role": { "kind": "amenity", "happiness": 3 }
            }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let well = catalog.get("well").unwrap();
        assert_eq!(well.max_level, 3);
        assert_eq!(well.upkeep, Resources::zero());
        assert_eq!(well.constraint, PlacementConstraint::AdjacentToWater);
        assert_eq!(well.cost, Resources::of(ResourceKind::Stone, 3));
    }

    #[test]
    fn test_oversized_footprints_rejected() {
        let json = r#"[
            {
                "id": "ghost",
                "name": "Ghost",
                "tier": 1,
                "footprint": { "kind": "rect", "width": 3000000000, "height": 1 },
                "cost": { "coin": 1 },
                "role": { "kind": "amenity", "happiness": 50 }
            }
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(ValeError::InvalidCatalog(_))
        ));

        let base = standard_buildings().remove(0);
        let mut wide = base.clone();
        wide.footprint = rect(17, 1);
        assert!(Catalog::new(vec![wide]).is_err());

        let mut widest_allowed = base.clone();
        widest_allowed.footprint = rect(16, 16);
        assert!(Catalog::new(vec![widest_allowed]).is_ok());

        let mut far = base;
        far.footprint = Footprint::Shape {
            cells: vec![(0, 0), (i32::MAX, 0)],
        };
        assert!(Catalog::new(vec![far]).is_err());

        assert!(rect(3_000_000_000, 1).offsets().is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(ValeError::Serde(_))
        ));
    }
}
