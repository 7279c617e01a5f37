//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and the state machine. It has no
//! dependencies on terminals, networking, or clocks, so it runs the same in
//! the terminal front end, in headless tests, and in benchmarks.
//!
//! # Module Structure
//!
//! - [`shape`]: occupancy matrices and clockwise rotation
//! - [`pieces`]: the seven canonical shapes, colors and spawn positions
//! - [`board`]: 10x20 grid with collision checks and row clearing
//! - [`placement`]: moving, rotating (with wall kicks) and dropping a piece
//! - [`rng`]: seeded, uniform piece generation
//! - [`scoring`]: line clear points, levels and gravity interval
//! - [`game_state`]: the immutable state machine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameAction;
//!
//! let game = GameState::new(12345).start();
//! let game = game.apply(GameAction::MoveRight);
//! let game = game.apply(GameAction::HardDrop);
//!
//! // Hard drop awards two points per row travelled.
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! The core has no notion of time. A driver calls
//! [`GameState::tick`](game_state::GameState::tick) once every
//! [`GameState::drop_interval_ms`](game_state::GameState::drop_interval_ms)
//! (1000ms at level 0, 75ms faster per level, never below 100ms).

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Phase};
pub use pieces::{color_of, shape_of, spawn_position};
pub use placement::{ActivePiece, WALL_KICKS};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{drop_interval_ms, hard_drop_bonus, level_for_lines, score_delta};
pub use shape::Shape;
pub use snapshot::GameSnapshot;
