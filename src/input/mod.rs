//! # Input Module
//!
//! Tool state and player input dispatch.
//!
//! Frontends translate clicks and key presses into [`PlayerInput`]; the
//! [`InputHandler`] keeps the current tool selection and forwards everything
//! else to the [`GameState`].

pub mod commands;

pub use commands::*;

use crate::game::{
    ActionResult, BuildingId, ConcreteAction, GameEvent, GameState, PlaceBuilding, PlaceRoad,
    Position, Remove, TickReport, Upgrade,
};
use crate::ValeResult;
use serde::{Deserialize, Serialize};

/// The tool a tile activation uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Pave roads (or bridges in bridge mode)
    #[default]
    Road,
    /// Place a level 1 building
    Building(BuildingId),
    /// Upgrade the structure under the cursor
    Upgrade,
}

/// Current tool selection and mode toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    pub selection: Selection,
    pub bridge_mode: bool,
    pub remove_mode: bool,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The action activating `index` performs. Remove mode overrides the
    /// selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::{Action, ConcreteAction, Remove, ToolState};
    ///
    /// let mut tools = ToolState::new();
    /// assert_eq!(tools.action_for(3).action_type(), "place_road");
    /// tools.remove_mode = true;
    /// assert_eq!(tools.action_for(3), ConcreteAction::Remove(Remove { index: 3 }));
    /// ```
    pub fn action_for(&self, index: usize) -> ConcreteAction {
        if self.remove_mode {
            return ConcreteAction::Remove(Remove { index });
        }
        match &self.selection {
            Selection::Road => ConcreteAction::PlaceRoad(PlaceRoad {
                index,
                bridge_mode: self.bridge_mode,
            }),
            Selection::Building(building) => ConcreteAction::PlaceBuilding(PlaceBuilding {
                anchor: index,
                building: building.clone(),
                level: 1,
            }),
            Selection::Upgrade => ConcreteAction::Upgrade(Upgrade { index }),
        }
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Use the current tool on a tile
    Activate(Position),
    /// Spell a word from the rack
    SubmitWord(String),
    /// Switch tools
    Select(Selection),
    ToggleBridgeMode,
    ToggleRemoveMode,
    /// Advance the simulation this many ticks
    Tick(u32),
    /// Regenerate the map, optionally from a given seed
    NewMap(Option<String>),
    ShowMap,
    ShowStatus,
    ShowCatalog,
    Help,
    Quit,
}

/// Most ticks a single input may advance.
pub const MAX_TICKS_PER_INPUT: u32 = 1000;

/// What handling an input produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Action(ActionResult),
    /// Activation outside the map
    OffMap(Position),
    ToolChanged(ToolState),
    Ticked(Vec<TickReport>),
    MapRegenerated(GameEvent),
    /// A read-only view was requested; the frontend draws it
    Show(PlayerInput),
    Quit,
}

/// Input handler for processing player commands.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    tools: ToolState,
}

impl InputHandler {
    /// Creates a new input handler with the road tool selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Applies an input to the tool state or the session.
    pub fn handle(&mut self, input: PlayerInput, state: &mut GameState) -> ValeResult<InputOutcome> {
        let outcome = match input {
            PlayerInput::Activate(position) => match state.grid().index_of(position) {
                Some(index) => InputOutcome::Action(state.on_tile_activated(index, &self.tools)),
                None => InputOutcome::OffMap(position),
            },
            PlayerInput::SubmitWord(text) => InputOutcome::Action(state.submit_word(&text)),
            PlayerInput::Select(selection) => {
                self.tools.selection = selection;
                self.tools.remove_mode = false;
                InputOutcome::ToolChanged(self.tools.clone())
            }
            PlayerInput::ToggleBridgeMode => {
                self.tools.bridge_mode = !self.tools.bridge_mode;
                InputOutcome::ToolChanged(self.tools.clone())
            }
            PlayerInput::ToggleRemoveMode => {
                self.tools.remove_mode = !self.tools.remove_mode;
                InputOutcome::ToolChanged(self.tools.clone())
            }
            PlayerInput::Tick(count) => InputOutcome::Ticked(
                (0..count.min(MAX_TICKS_PER_INPUT))
                    .map(|_| state.tick())
                    .collect(),
            ),
            PlayerInput::NewMap(seed) => {
                InputOutcome::MapRegenerated(state.new_map(seed.as_deref())?)
            }
            PlayerInput::Quit => InputOutcome::Quit,
            view @ (PlayerInput::ShowMap
            | PlayerInput::ShowStatus
            | PlayerInput::ShowCatalog
            | PlayerInput::Help) => InputOutcome::Show(view),
        };
        Ok(outcome)
    }
}
