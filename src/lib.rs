//! # Lettervale
//!
//! Simulation core for a cozy city builder where words pay for the town.
//!
//! ## Architecture Overview
//!
//! - **Generation**: a seeded generator carves a river, lakes and biome patches
//!   over a square tile grid. The same seed string always yields the same map.
//! - **Game State**: one [`GameState`] owns the grid, resources, letter rack and
//!   city progression for a session. Every operation goes through it.
//! - **Actions**: placement, removal, upgrades and word submissions are atomic.
//!   They either apply fully or come back as a [`Rejection`] with a reason code.
//! - **Words**: rack management, dictionary lookup and the yield engine.
//! - **Input / Rendering**: thin tool-state and text views used by the terminal
//!   driver. Graphical frontends consume [`GameState::snapshot`] instead.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;
pub mod words;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;
pub use words::*;

/// Core error type for construction and loading.
///
/// Gameplay refusals (unaffordable roads, unknown words, ...) are not errors;
/// they are reported as [`Rejection`] values.
#[derive(thiserror::Error, Debug)]
pub enum ValeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Building catalog failed validation
    #[error("Invalid building catalog: {0}")]
    InvalidCatalog(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Lettervale codebase.
pub type ValeResult<T> = Result<T, ValeError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default map edge length in tiles
    pub const DEFAULT_MAP_SIZE: usize = 54;

    /// Default number of letters on the rack
    pub const DEFAULT_RACK_SIZE: usize = 8;

    /// Happiness before any building contributes
    pub const BASELINE_HAPPINESS: u8 = 50;

    /// Upper bound on happiness
    pub const MAX_HAPPINESS: u8 = 100;

    /// Highest city tier
    pub const MAX_TIER: u8 = 4;

    /// Highest tier a catalog building may require
    pub const MAX_BUILDING_TIER: u8 = 3;

    /// Largest footprint extent, in tiles, along either axis
    pub const MAX_FOOTPRINT_SPAN: u32 = 16;

    /// Largest map edge length in tiles
    pub const MAX_MAP_SIZE: usize = 512;
}
