//! # Words Module
//!
//! The letter side of the economy: the weighted letter bag, the player's rack,
//! dictionary lookup and the yield arithmetic for accepted words.

pub mod dictionary;
pub mod rack;
pub mod scoring;

pub use dictionary::*;
pub use rack::*;
pub use scoring::*;
