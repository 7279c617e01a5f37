//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Raw key
//! codes never cross into the core.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
