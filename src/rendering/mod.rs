//! # Rendering Module
//!
//! Plain-text views of a session for the terminal driver. Graphical frontends
//! read [`crate::GameState::snapshot`] and draw it themselves.

pub mod display;

pub use display::*;
