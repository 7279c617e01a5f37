//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer of styled characters, and the renderer flushes that buffer to
//! the terminal. Each board cell is two characters wide so the well keeps a
//! roughly square aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_scores as scores;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, PANEL_SCORES};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
