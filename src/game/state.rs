//! # Game State Module
//!
//! Central session state and the entry points frontends call.
//!
//! [`GameState`] owns everything a session mutates: grid, resources, rack,
//! progress and the status log. Frontends read it through accessors and feed
//! it events (tile activations, word submissions, ticks); nothing runs on its
//! own.

use crate::game::{
    Action, ActionResult, Catalog, CityProgress, CitySurvey, ConcreteAction, GameEvent, Grid,
    Rejection, Resources, RulesConfig, SubmitWord, TickReport,
};
use crate::generation::{generate_map, GenerationConfig};
use crate::input::ToolState;
use crate::utils::SeededRng;
use crate::words::{LetterBag, Rack, WordList, WordSource};
use crate::ValeResult;
use log::{debug, info};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Importance level for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageImportance {
    Info,
    Success,
    Warning,
}

/// One line of the status log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub importance: MessageImportance,
    /// Tick count when the message was logged
    pub tick: u64,
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub words_accepted: u32,
    pub words_rejected: u32,
    pub longest_word: String,
    pub roads_laid: u32,
    pub buildings_placed: u32,
    pub buildings_upgraded: u32,
    pub structures_removed: u32,
    pub ticks: u64,
    /// Everything words have paid out
    pub word_yield: Resources,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoadPlaced { .. } => self.roads_laid += 1,
            GameEvent::BuildingPlaced { .. } => self.buildings_placed += 1,
            GameEvent::BuildingUpgraded { .. } => self.buildings_upgraded += 1,
            GameEvent::StructureRemoved { .. } => self.structures_removed += 1,
            GameEvent::WordAccepted { word, payout, .. } => {
                self.words_accepted += 1;
                self.word_yield += payout.total;
                if word.len() > self.longest_word.len() {
                    self.longest_word = word.clone();
                }
            }
            GameEvent::TickCompleted(_) => self.ticks += 1,
            _ => {}
        }
    }

    /// Counts a refused word submission.
    pub fn record_rejection(&mut self, rejection: &Rejection) {
        if matches!(
            rejection,
            Rejection::TooShort { .. }
                | Rejection::CannotForm { .. }
                | Rejection::NotInDictionary { .. }
        ) {
            self.words_rejected += 1;
        }
    }
}

/// Serializable view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: String,
    pub tick: u64,
    pub grid: Grid,
    pub resources: Resources,
    pub rack: Vec<char>,
    pub progress: CityProgress,
    pub statistics: GameStatistics,
}

/// One play session.
pub struct GameState {
    pub(crate) generation: GenerationConfig,
    pub(crate) grid: Grid,
    pub(crate) resources: Resources,
    pub(crate) rack: Rack,
    pub(crate) bag: LetterBag,
    pub(crate) rack_rng: SeededRng,
    pub(crate) progress: CityProgress,
    pub(crate) catalog: Catalog,
    pub(crate) rules: RulesConfig,
    pub(crate) dictionary: Box<dyn WordSource>,
    pub(crate) statistics: GameStatistics,
    pub(crate) messages: VecDeque<StatusMessage>,
    pub(crate) tick_count: u64,
}

impl GameState {
    /// Creates a session: generates the map and deals the opening rack.
    pub fn new(
        generation: GenerationConfig,
        rules: RulesConfig,
        catalog: Catalog,
        dictionary: Box<dyn WordSource>,
    ) -> ValeResult<Self> {
        rules.validate()?;
        let grid = generate_map(&generation)?;
        let bag = match &rules.letter_weights {
            Some(weights) => LetterBag::from_weights(weights)?,
            None => LetterBag::standard()?,
        };

        let mut state = Self {
            rack: Rack::new(rules.rack_size),
            rack_rng: rack_rng_for(&generation.seed),
            resources: rules.starting_resources,
            progress: CityProgress::new(&rules),
            generation,
            grid,
            bag,
            catalog,
            rules,
            dictionary,
            statistics: GameStatistics::new(),
            messages: VecDeque::new(),
            tick_count: 0,
        };
        state.rack.fill(&state.bag, &mut state.rack_rng);
        info!(
            "Started session on seed '{}' ({} words known)",
            state.generation.seed,
            state.dictionary.word_count()
        );
        Ok(state)
    }

    /// Creates a session with the standard map, rules, catalog and the
    /// fallback word list.
    ///
    /// # Examples
    ///
    /// ```
    /// use lettervale::GameState;
    ///
    /// let state = GameState::with_defaults("2024-01-01").unwrap();
    /// assert_eq!(state.grid().size(), 54);
    /// assert_eq!(state.rack().len(), 8);
    /// assert_eq!(state.progress().tier, 1);
    /// ```
    pub fn with_defaults(seed: &str) -> ValeResult<Self> {
        Self::new(
            GenerationConfig::new(seed),
            RulesConfig::default(),
            Catalog::standard()?,
            Box::new(WordList::fallback()),
        )
    }

    /// Applies whatever the current tool does to a tile.
    pub fn on_tile_activated(&mut self, index: usize, tools: &ToolState) -> ActionResult {
        let action = tools.action_for(index);
        self.apply(&action)
    }

    /// Validates and scores a word from the rack.
    pub fn submit_word(&mut self, text: &str) -> ActionResult {
        self.apply(&ConcreteAction::SubmitWord(SubmitWord {
            text: text.to_string(),
        }))
    }

    /// Runs an action and logs its outcome.
    pub fn apply(&mut self, action: &dyn Action) -> ActionResult {
        let result = action.execute(self);
        match &result {
            Ok(event) => {
                self.refresh_progress();
                self.record(event.clone(), MessageImportance::Success);
            }
            Err(rejection) => {
                debug!(
                    "{} rejected: {} ({})",
                    action.action_type(),
                    rejection,
                    rejection.code()
                );
                self.statistics.record_rejection(rejection);
                self.push_message(rejection.to_string(), MessageImportance::Warning);
            }
        }
        result
    }

    /// Advances the simulation one step.
    ///
    /// Order: drain upkeep, pay workshop output, recompute housing and
    /// happiness, grow or shrink population, then advance the tier.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;
        let survey = CitySurvey::take(&self.grid, &self.catalog);

        let upkeep_paid = self.resources.drain(&survey.upkeep);
        let upkeep_unpaid = upkeep_paid.shortfall(&survey.upkeep);
        self.resources.deposit(&survey.aura);

        self.progress.refresh(&survey, &self.rules);
        let population_change = self.progress.update_population(survey.growth, &self.rules);
        let tier_advanced = self
            .progress
            .advance_tier(survey.distinct_buildings, &self.rules);

        let report = TickReport {
            tick: self.tick_count,
            upkeep_paid,
            upkeep_unpaid,
            aura: survey.aura,
            population_change,
            population: self.progress.population,
            happiness: self.progress.happiness,
            tier: self.progress.tier,
            tier_advanced,
        };
        debug!("Tick {}: {:?}", self.tick_count, report);

        self.record(GameEvent::TickCompleted(report.clone()), MessageImportance::Info);
        if let Some(tier) = tier_advanced {
            info!("Town advanced to tier {}", tier);
            self.record(GameEvent::TierAdvanced { tier }, MessageImportance::Success);
        }
        report
    }

    /// Regenerates the map from `seed`, or a freshly drawn one, and resets the
    /// town to its starting values.
    pub fn new_map(&mut self, seed: Option<&str>) -> ValeResult<GameEvent> {
        let seed = match seed {
            Some(seed) => seed.to_string(),
            None => fresh_seed(),
        };
        let generation = GenerationConfig {
            seed: seed.clone(),
            ..self.generation.clone()
        };
        let grid = generate_map(&generation)?;
        info!("Regenerated map with seed '{}'", seed);

        self.generation = generation;
        self.grid = grid;
        self.resources = self.rules.starting_resources;
        self.progress = CityProgress::new(&self.rules);
        self.statistics = GameStatistics::new();
        self.tick_count = 0;
        self.rack_rng = rack_rng_for(&seed);
        self.rack = Rack::new(self.rules.rack_size);
        self.rack.fill(&self.bag, &mut self.rack_rng);

        let event = GameEvent::MapRegenerated {
            seed,
            size: self.grid.size(),
        };
        self.record(event.clone(), MessageImportance::Info);
        Ok(event)
    }

    pub fn seed(&self) -> &str {
        &self.generation.seed
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn progress(&self) -> &CityProgress {
        &self.progress
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn dictionary(&self) -> &dyn WordSource {
        self.dictionary.as_ref()
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    /// Status log, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &StatusMessage> {
        self.messages.iter()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Owned copy of everything a renderer draws.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seed: self.generation.seed.clone(),
            tick: self.tick_count,
            grid: self.grid.clone(),
            resources: self.resources,
            rack: self.rack.letters().to_vec(),
            progress: self.progress.clone(),
            statistics: self.statistics.clone(),
        }
    }

    /// Serializes [`GameState::snapshot`] as JSON.
    pub fn snapshot_json(&self) -> ValeResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Replaces the rack letters. Scripted scenarios and tests only; not part
    /// of the gameplay API.
    #[doc(hidden)]
    pub fn set_rack(&mut self, letters: &str) {
        self.rack = Rack::from_letters(letters.chars(), self.rules.rack_size);
    }

    /// Adds resources outside the normal economy. Scripted scenarios and
    /// tests only.
    #[doc(hidden)]
    pub fn grant(&mut self, amount: &Resources) {
        self.resources.deposit(amount);
    }

    fn refresh_progress(&mut self) {
        let survey = CitySurvey::take(&self.grid, &self.catalog);
        self.progress.refresh(&survey, &self.rules);
    }

    fn record(&mut self, event: GameEvent, importance: MessageImportance) {
        self.statistics.update_from_event(&event);
        self.push_message(event.message(), importance);
    }

    fn push_message(&mut self, text: String, importance: MessageImportance) {
        self.messages.push_back(StatusMessage {
            text,
            importance,
            tick: self.tick_count,
        });
        while self.messages.len() > self.rules.message_log_limit {
            self.messages.pop_front();
        }
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("seed", &self.generation.seed)
            .field("size", &self.grid.size())
            .field("resources", &self.resources)
            .field("rack", &self.rack)
            .field("progress", &self.progress)
            .field("tick_count", &self.tick_count)
            .field("dictionary_words", &self.dictionary.word_count())
            .finish()
    }
}

fn rack_rng_for(seed: &str) -> SeededRng {
    SeededRng::from_seed_str(&format!("{}#rack", seed))
}

fn fresh_seed() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}
