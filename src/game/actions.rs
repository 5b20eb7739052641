//! # Actions
//!
//! Player actions against a [`GameState`].
//!
//! Every action validates against the current state first and writes only once
//! all checks pass, so a refused action leaves the grid, resources and rack
//! exactly as they were. Refusals are ordinary values ([`Rejection`]) with a
//! stable reason code for frontends.

use crate::game::{
    BuildingId, Catalog, GameState, Grid, Milestone, PlacementConstraint, Resources, StructureId,
    Terrain, TickReport,
};
use crate::words::{milestones_in, normalize, WordYield};
use serde::{Deserialize, Serialize};

/// Outcome of an action: the accepted event or the reason it was refused.
pub type ActionResult = Result<GameEvent, Rejection>;

/// Why an action was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Tile {index} is outside the map")]
    OutOfBounds { index: usize },

    #[error("Thicket is impassable")]
    Impassable,

    #[error("Water needs bridge mode")]
    NeedsBridgeMode,

    #[error("Tile is already paved")]
    AlreadyPaved,

    #[error("A building stands on tile {index}")]
    TileOccupied { index: usize },

    #[error("Not enough resources, short by {missing}")]
    InsufficientResources { missing: Resources },

    #[error("No building called '{0}'")]
    UnknownBuilding(String),

    #[error("{building} needs a tier {required} city")]
    TierLocked { building: String, required: u8 },

    #[error("Level {level} is not between 1 and {max}")]
    InvalidLevel { level: u32, max: u32 },

    #[error("Footprint does not fit on the map")]
    FootprintOutOfBounds,

    #[error("Tile {index} is not paved")]
    FootprintBlocked { index: usize },

    #[error("Tile {index} is already built on")]
    FootprintOccupied { index: usize },

    #[error("{building} must be placed next to water")]
    ConstraintUnmet { building: String },

    #[error("Nothing to remove here")]
    NothingToRemove,

    #[error("No building on this tile")]
    NoStructure,

    #[error("{building} is already at its highest level ({level})")]
    MaxLevel { building: String, level: u32 },

    #[error("Words need at least {min} letters")]
    TooShort { length: usize, min: usize },

    #[error("Cannot spell {word} with the rack")]
    CannotForm { word: String },

    #[error("{word} is not in the dictionary")]
    NotInDictionary { word: String },
}

impl Rejection {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::OutOfBounds { .. } => "out_of_bounds",
            Rejection::Impassable => "impassable",
            Rejection::NeedsBridgeMode => "needs_bridge_mode",
            Rejection::AlreadyPaved => "already_paved",
            Rejection::TileOccupied { .. } => "tile_occupied",
            Rejection::InsufficientResources { .. } => "insufficient_resources",
            Rejection::UnknownBuilding(_) => "unknown_building",
            Rejection::TierLocked { .. } => "tier_locked",
            Rejection::InvalidLevel { .. } => "invalid_level",
            Rejection::FootprintOutOfBounds => "footprint_out_of_bounds",
            Rejection::FootprintBlocked { .. } => "footprint_blocked",
            Rejection::FootprintOccupied { .. } => "footprint_occupied",
            Rejection::ConstraintUnmet { .. } => "constraint_unmet",
            Rejection::NothingToRemove => "nothing_to_remove",
            Rejection::NoStructure => "no_structure",
            Rejection::MaxLevel { .. } => "max_level",
            Rejection::TooShort { .. } => "too_short",
            Rejection::CannotForm { .. } => "cannot_form",
            Rejection::NotInDictionary { .. } => "not_in_dictionary",
        }
    }
}

/// Accepted outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoadPlaced {
        index: usize,
        terrain: Terrain,
        cost: Resources,
    },
    PavingRemoved {
        index: usize,
        refund: Resources,
    },
    StructureRemoved {
        index: usize,
        structure: StructureId,
        building: BuildingId,
    },
    BuildingPlaced {
        structure: StructureId,
        building: BuildingId,
        anchor: usize,
        level: u32,
        cost: Resources,
    },
    BuildingUpgraded {
        structure: StructureId,
        building: BuildingId,
        level: u32,
        cost: Resources,
    },
    WordAccepted {
        word: String,
        payout: WordYield,
        drawn: Vec<char>,
        milestones: Vec<Milestone>,
    },
    TickCompleted(TickReport),
    TierAdvanced {
        tier: u8,
    },
    MapRegenerated {
        seed: String,
        size: usize,
    },
}

impl GameEvent {
    /// Player-facing status line.
    pub fn message(&self) -> String {
        match self {
            GameEvent::RoadPlaced { terrain, cost, .. } => {
                let what = if *terrain == Terrain::Bridge {
                    "Bridge"
                } else {
                    "Road"
                };
                format!("{} built for {}", what, cost)
            }
            GameEvent::PavingRemoved { refund, .. } => {
                format!("Paving removed, refunded {}", refund)
            }
            GameEvent::StructureRemoved { building, .. } => format!("Demolished {}", building),
            GameEvent::BuildingPlaced {
                building,
                level,
                cost,
                ..
            } => format!("Built {} (level {}) for {}", building, level, cost),
            GameEvent::BuildingUpgraded {
                building,
                level,
                cost,
                ..
            } => format!("Upgraded {} to level {} for {}", building, level, cost),
            GameEvent::WordAccepted {
                word,
                payout,
                milestones,
                ..
            } => {
                let mut message = format!("{} earned {}", word, payout.total);
                for milestone in milestones {
                    message.push_str(&format!(", milestone: {}", milestone));
                }
                message
            }
            GameEvent::TickCompleted(report) => format!(
                "Tick {}: population {}, happiness {}",
                report.tick, report.population, report.happiness
            ),
            GameEvent::TierAdvanced { tier } => format!("The town reached tier {}!", tier),
            GameEvent::MapRegenerated { seed, size } => {
                format!("New {0}x{0} map from seed '{1}'", size, seed)
            }
        }
    }
}

/// Trait for actions that can be applied to a session.
pub trait Action {
    /// Validates and applies the action. A rejection leaves the state as it was.
    fn execute(&self, state: &mut GameState) -> ActionResult;

    /// Short name for logging.
    fn action_type(&self) -> &'static str;
}

/// Paves grass as road, or water as bridge in bridge mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRoad {
    pub index: usize,
    pub bridge_mode: bool,
}

impl Action for PlaceRoad {
    fn execute(&self, state: &mut GameState) -> ActionResult {
        let index = self.index;
        let tile = *state
            .grid
            .tile(index)
            .ok_or(Rejection::OutOfBounds { index })?;
        if tile.structure().is_some() {
            return Err(Rejection::TileOccupied { index });
        }

        let (terrain, cost) = match tile.terrain() {
            Terrain::Road | Terrain::Bridge => return Err(Rejection::AlreadyPaved),
            Terrain::Water if !self.bridge_mode => return Err(Rejection::NeedsBridgeMode),
            Terrain::Water => (Terrain::Bridge, state.rules.bridge_cost),
            Terrain::Grass if tile.biome().is_impassable() => return Err(Rejection::Impassable),
            Terrain::Grass => (
                Terrain::Road,
                state.rules.road_cost + state.rules.biome_surcharges.for_biome(tile.biome()),
            ),
        };

        spend(&mut state.resources, &cost)?;
        state.grid.set_terrain(index, terrain);
        Ok(GameEvent::RoadPlaced {
            index,
            terrain,
            cost,
        })
    }

    fn action_type(&self) -> &'static str {
        "place_road"
    }
}

/// Demolishes a structure, or strips paving back to grass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remove {
    pub index: usize,
}

impl Action for Remove {
    fn execute(&self, state: &mut GameState) -> ActionResult {
        let index = self.index;
        let tile = *state
            .grid
            .tile(index)
            .ok_or(Rejection::OutOfBounds { index })?;

        if let Some(id) = tile.structure() {
            let structure = state
                .grid
                .remove_structure(id)
                .ok_or(Rejection::NoStructure)?;
            return Ok(GameEvent::StructureRemoved {
                index,
                structure: id,
                building: structure.building,
            });
        }

        let base = match tile.terrain() {
            Terrain::Road => state.rules.road_cost,
            Terrain::Bridge => state.rules.bridge_cost,
            Terrain::Grass | Terrain::Water => return Err(Rejection::NothingToRemove),
        };
        let refund = base.percent(state.rules.refund_percent);
        state.grid.set_terrain(index, Terrain::Grass);
        state.resources.deposit(&refund);
        Ok(GameEvent::PavingRemoved { index, refund })
    }

    fn action_type(&self) -> &'static str {
        "remove"
    }
}

/// Places a catalog building with its footprint anchored at `anchor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceBuilding {
    pub anchor: usize,
    pub building: BuildingId,
    pub level: u32,
}

impl Action for PlaceBuilding {
    fn execute(&self, state: &mut GameState) -> ActionResult {
        let def = state
            .catalog
            .get_by_id(&self.building)
            .ok_or_else(|| Rejection::UnknownBuilding(self.building.to_string()))?;
        if def.tier > state.progress.tier {
            return Err(Rejection::TierLocked {
                building: def.name.clone(),
                required: def.tier,
            });
        }
        if self.level == 0 || self.level > def.max_level {
            return Err(Rejection::InvalidLevel {
                level: self.level,
                max: def.max_level,
            });
        }
        if state.grid.tile(self.anchor).is_none() {
            return Err(Rejection::OutOfBounds { index: self.anchor });
        }

        let cells = state
            .grid
            .footprint(self.anchor, &def.footprint.offsets())
            .ok_or(Rejection::FootprintOutOfBounds)?;
        check_footprint(&state.grid, &cells, state.rules.allow_grass_buildings)?;
        if def.constraint == PlacementConstraint::AdjacentToWater
            && !state.grid.touches_water(&cells)
        {
            return Err(Rejection::ConstraintUnmet {
                building: def.name.clone(),
            });
        }

        let cost = def.cost_at_level(self.level);
        spend(&mut state.resources, &cost)?;
        let structure =
            state
                .grid
                .insert_structure(self.building.clone(), self.level, self.anchor, cells);
        Ok(GameEvent::BuildingPlaced {
            structure,
            building: self.building.clone(),
            anchor: self.anchor,
            level: self.level,
            cost,
        })
    }

    fn action_type(&self) -> &'static str {
        "place_building"
    }
}

/// Raises the level of the structure covering `index` by one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    pub index: usize,
}

impl Action for Upgrade {
    fn execute(&self, state: &mut GameState) -> ActionResult {
        if state.grid.tile(self.index).is_none() {
            return Err(Rejection::OutOfBounds { index: self.index });
        }
        let structure = state
            .grid
            .structure_at(self.index)
            .ok_or(Rejection::NoStructure)?;
        let (id, building, level) = (structure.id, structure.building.clone(), structure.level);
        let def = state
            .catalog
            .get_by_id(&building)
            .ok_or_else(|| Rejection::UnknownBuilding(building.to_string()))?;
        if level >= def.max_level {
            return Err(Rejection::MaxLevel {
                building: def.name.clone(),
                level,
            });
        }

        let cost = def.cost_at_level(level + 1);
        spend(&mut state.resources, &cost)?;
        state.grid.set_structure_level(id, level + 1);
        Ok(GameEvent::BuildingUpgraded {
            structure: id,
            building,
            level: level + 1,
            cost,
        })
    }

    fn action_type(&self) -> &'static str {
        "upgrade"
    }
}

/// Spells a word from the rack for resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitWord {
    pub text: String,
}

impl Action for SubmitWord {
    fn execute(&self, state: &mut GameState) -> ActionResult {
        let word = normalize(&self.text);
        let min = state.rules.min_word_length(state.progress.tier);
        if word.len() < min {
            return Err(Rejection::TooShort {
                length: word.len(),
                min,
            });
        }
        if !state.rack.can_form(&word) {
            return Err(Rejection::CannotForm { word });
        }
        if !state.dictionary.has_word(&word) {
            return Err(Rejection::NotInDictionary { word });
        }

        let bonus = word_bonus(&state.grid, &state.catalog, word.len());
        let payout = WordYield::compute(&word, bonus, state.progress.happiness);

        state.resources.deposit(&payout.total);
        state.rack.consume(&word);
        let drawn = state.rack.fill(&state.bag, &mut state.rack_rng);
        let milestones = state.progress.record_milestones(&milestones_in(&word));

        Ok(GameEvent::WordAccepted {
            word,
            payout,
            drawn,
            milestones,
        })
    }

    fn action_type(&self) -> &'static str {
        "submit_word"
    }
}

/// Any action, for queuing and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcreteAction {
    PlaceRoad(PlaceRoad),
    PlaceBuilding(PlaceBuilding),
    Remove(Remove),
    Upgrade(Upgrade),
    SubmitWord(SubmitWord),
}

impl Action for ConcreteAction {
    fn execute(&self, state: &mut GameState) -> ActionResult {
        match self {
            ConcreteAction::PlaceRoad(action) => action.execute(state),
            ConcreteAction::PlaceBuilding(action) => action.execute(state),
            ConcreteAction::Remove(action) => action.execute(state),
            ConcreteAction::Upgrade(action) => action.execute(state),
            ConcreteAction::SubmitWord(action) => action.execute(state),
        }
    }

    fn action_type(&self) -> &'static str {
        match self {
            ConcreteAction::PlaceRoad(action) => action.action_type(),
            ConcreteAction::PlaceBuilding(action) => action.action_type(),
            ConcreteAction::Remove(action) => action.action_type(),
            ConcreteAction::Upgrade(action) => action.action_type(),
            ConcreteAction::SubmitWord(action) => action.action_type(),
        }
    }
}

/// Word-bonus aura of every structure for a word of `word_len` letters.
pub fn word_bonus(grid: &Grid, catalog: &Catalog, word_len: usize) -> Resources {
    grid.structures()
        .filter_map(|structure| {
            catalog
                .get_by_id(&structure.building)
                .map(|def| def.word_bonus(structure.level, word_len))
        })
        .fold(Resources::zero(), |total, bonus| total + bonus)
}

fn spend(resources: &mut Resources, cost: &Resources) -> Result<(), Rejection> {
    resources
        .try_spend(cost)
        .map_err(|missing| Rejection::InsufficientResources { missing })
}

fn check_footprint(grid: &Grid, cells: &[usize], allow_grass: bool) -> Result<(), Rejection> {
    for &index in cells {
        let Some(tile) = grid.tile(index) else {
            return Err(Rejection::FootprintOutOfBounds);
        };
        let buildable = tile.terrain().is_paved()
            || (allow_grass && tile.terrain() == Terrain::Grass && !tile.biome().is_impassable());
        if !buildable {
            return Err(Rejection::FootprintBlocked { index });
        }
    }
    if let Some(&index) = cells
        .iter()
        .find(|&&index| grid.tile(index).is_some_and(|tile| tile.structure().is_some()))
    {
        return Err(Rejection::FootprintOccupied { index });
    }
    Ok(())
}
