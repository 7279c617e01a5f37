//! Driver module - gravity timing and single-writer access to a game
//!
//! - [`gravity`]: converts frame time into gravity steps
//! - [`session`]: mutex-guarded current state with per-update outcomes

pub mod gravity;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use gravity::GravityClock;
pub use session::{Outcome, Session};
