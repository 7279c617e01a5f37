//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! used by the rules core, the terminal renderer and the score service alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Pieces may extend above row 0 while spawning; those cells are never stored.
//!
//! # Timing And Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver polling interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 0 |
//! | `DROP_STEP_MS` | 75 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//! | `HARD_DROP_POINTS_PER_CELL` | 2 | Hard drop bonus per cell |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(Color::rgb(0xf0, 0xa0, 0x00).to_hex(), "#f0a000");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Driver polling interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u32 = 75;

/// Fastest gravity interval
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per cell travelled by a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Line clear scoring table
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven piece kinds
///
/// Each kind has a fixed shape and color (see the catalog in `blockfall-core`):
/// - **I**: cyan bar
/// - **O**: yellow square
/// - **T**: purple T
/// - **S**: green S
/// - **Z**: red Z
/// - **J**: blue J
/// - **L**: orange L
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Kind at `index` in catalog order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`. An out-of-range index is a caller bug, not a
    /// gameplay condition.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::ALL.len(), "piece index {index} out of range");
        Self::ALL[index]
    }

    /// Position of this kind in catalog order.
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter used in logs and the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Opaque 24-bit color token stored in filled cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(&self) -> u8 {
        self.0 as u8
    }

    /// CSS-style `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// A cell on the game board
///
/// - `None`: empty cell
/// - `Some(Color)`: cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Grid coordinate of a piece anchor (top-left of its shape matrix).
///
/// `y` may be negative while a piece hangs above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Position shifted by (dx, dy), or `None` if a coordinate leaves `i8`.
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

/// Commands accepted by the game state machine.
///
/// Produced by the input binder and the gravity driver; no raw key codes
/// cross into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks the piece when it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Drop piece to its resting position and lock it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Start a fresh game (from any phase)
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Summary of the most recent lock, recorded by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Line clear points (excludes any hard drop bonus).
    pub line_clear_score: u32,
    /// Level used to score this clear (the level before the clear).
    pub level_before: u32,
    pub level_after: u32,
}

impl LockEvent {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}
