//! # Utilities Module
//!
//! Deterministic randomness and small integer helpers shared by generation and
//! the economy.

pub mod math;
pub mod rng;

pub use math::*;
pub use rng::*;
