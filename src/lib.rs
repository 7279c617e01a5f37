//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the pieces shared
//! by both binaries: environment configuration and log setup.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_scores as scores;
pub use blockfall_term as term;
pub use blockfall_types as types;
