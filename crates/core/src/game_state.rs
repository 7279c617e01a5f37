//! Game state module - the phase-tagged state machine
//!
//! This module ties together all core components: board, placement, RNG and
//! scoring. Every transition takes `&self` and returns a new `GameState`;
//! the whole state is a plain `Copy` value, so earlier snapshots held by a
//! renderer or a history buffer are never affected by later moves.
//!
//! Rejected moves are not errors: the returned state simply equals the input.

use log::{debug, info};

use crate::board::Board;
use crate::placement::{self, ActivePiece};
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_ms, hard_drop_bonus, level_for_lines, score_delta};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, LockEvent, PieceKind, Position};

/// Where the game is in its lifecycle
///
/// Spawning and locking are instantaneous steps inside a transition and never
/// observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not started yet (or waiting for a spawn while setting up a scenario)
    Idle,
    /// A piece is falling; `paused` suspends every piece-affecting command
    Active { piece: ActivePiece, paused: bool },
    /// A spawned piece did not fit. Terminal until restart.
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    phase: Phase,
    next: PieceKind,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    locked: u32,
    last_lock: Option<LockEvent>,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let next = generator.next_kind();
        Self {
            board: Board::new(),
            phase: Phase::Idle,
            next,
            generator,
            score: 0,
            lines: 0,
            locked: 0,
            last_lock: None,
        }
    }

    /// Start a fresh game and spawn the first piece
    ///
    /// Valid from any phase; the piece sequence continues from this state's
    /// generator, so a restart does not replay the previous game.
    #[must_use]
    pub fn start(&self) -> Self {
        let mut generator = self.generator;
        let next = generator.next_kind();
        let fresh = Self {
            board: Board::new(),
            phase: Phase::Idle,
            next,
            generator,
            score: 0,
            lines: 0,
            locked: 0,
            last_lock: None,
        };
        debug!("game started (next {})", next.as_str());
        fresh.spawn()
    }

    /// Materialize the held next piece at its spawn position
    ///
    /// Only acts while idle. If the piece does not fit, the game is over and
    /// no piece becomes active.
    #[must_use]
    pub fn spawn(&self) -> Self {
        if self.phase != Phase::Idle {
            return *self;
        }

        let piece = ActivePiece::spawn(self.next);
        if !piece.fits(&self.board) {
            info!(
                "game over: {} blocked at spawn (score {}, lines {}, level {})",
                self.next.as_str(),
                self.score,
                self.lines,
                self.level()
            );
            return Self {
                phase: Phase::GameOver,
                ..*self
            };
        }

        let mut generator = self.generator;
        let next = generator.next_kind();
        Self {
            phase: Phase::Active {
                piece,
                paused: false,
            },
            next,
            generator,
            ..*self
        }
    }

    /// Move the active piece by (dx, dy)
    ///
    /// A blocked downward move locks the piece; any other blocked move is
    /// ignored. No-op unless a piece is active and the game is not paused.
    #[must_use]
    pub fn move_piece(&self, dx: i8, dy: i8) -> Self {
        let Some(piece) = self.controllable_piece() else {
            return *self;
        };

        match placement::translate(&self.board, &piece, dx, dy) {
            Some(moved) => self.with_active_piece(moved),
            None if dy > 0 => self.lock(piece),
            None => *self,
        }
    }

    #[must_use]
    pub fn move_left(&self) -> Self {
        self.move_piece(-1, 0)
    }

    #[must_use]
    pub fn move_right(&self) -> Self {
        self.move_piece(1, 0)
    }

    /// Move down one row, locking if the piece is resting
    #[must_use]
    pub fn soft_drop(&self) -> Self {
        self.move_piece(0, 1)
    }

    /// One gravity step (same rules as a soft drop)
    #[must_use]
    pub fn tick(&self) -> Self {
        self.move_piece(0, 1)
    }

    /// Rotate the active piece clockwise with wall kicks
    #[must_use]
    pub fn rotate(&self) -> Self {
        let Some(piece) = self.controllable_piece() else {
            return *self;
        };

        match placement::rotate(&self.board, &piece) {
            Some(rotated) => self.with_active_piece(rotated),
            None => *self,
        }
    }

    /// Drop the active piece to its resting row, award the bonus and lock it
    #[must_use]
    pub fn hard_drop(&self) -> Self {
        let Some(piece) = self.controllable_piece() else {
            return *self;
        };

        let (rested, cells) = placement::drop_to_floor(&self.board, &piece);
        let with_bonus = Self {
            score: self.score.saturating_add(hard_drop_bonus(cells)),
            ..*self
        };
        with_bonus.lock(rested)
    }

    /// Toggle pause. Only an active game can be paused or resumed.
    #[must_use]
    pub fn toggle_pause(&self) -> Self {
        match self.phase {
            Phase::Active { piece, paused } => Self {
                phase: Phase::Active {
                    piece,
                    paused: !paused,
                },
                ..*self
            },
            Phase::Idle | Phase::GameOver => *self,
        }
    }

    /// Apply a game action
    #[must_use]
    pub fn apply(&self, action: GameAction) -> Self {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.start(),
        }
    }

    /// Stamp `piece`, sweep full rows, update counters, then spawn the next piece
    fn lock(&self, piece: ActivePiece) -> Self {
        let stamped = self.board.stamp(&piece.shape, piece.position, piece.color);
        let (board, cleared) = stamped.sweep_completed_rows();

        // Clears are scored at the level in effect before they count.
        let level_before = self.level();
        let line_clear_score = score_delta(cleared, level_before);
        let lines = self.lines.saturating_add(cleared as u32);
        let event = LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            line_clear_score,
            level_before,
            level_after: level_for_lines(lines),
        };

        if cleared > 0 {
            debug!(
                "locked {} at ({}, {}): cleared {} (+{}), lines {}",
                piece.kind.as_str(),
                piece.position.x,
                piece.position.y,
                cleared,
                line_clear_score,
                lines
            );
        }
        if event.leveled_up() {
            info!("level up: {} -> {}", event.level_before, event.level_after);
        }

        Self {
            board,
            phase: Phase::Idle,
            score: self.score.saturating_add(line_clear_score),
            lines,
            locked: self.locked.saturating_add(1),
            last_lock: Some(event),
            ..*self
        }
        .spawn()
    }

    fn controllable_piece(&self) -> Option<ActivePiece> {
        match self.phase {
            Phase::Active {
                piece,
                paused: false,
            } => Some(piece),
            _ => None,
        }
    }

    fn with_active_piece(&self, piece: ActivePiece) -> Self {
        Self {
            phase: Phase::Active {
                piece,
                paused: false,
            },
            ..*self
        }
    }

    /// Replace the grid as-is (scenario setup for tests, puzzles and tools)
    #[must_use]
    pub fn with_board(&self, board: Board) -> Self {
        Self { board, ..*self }
    }

    /// Replace the held next piece (scenario setup)
    #[must_use]
    pub fn with_next_kind(&self, next: PieceKind) -> Self {
        Self { next, ..*self }
    }

    /// Make `piece` the active, unpaused piece (scenario setup)
    #[must_use]
    pub fn with_active(&self, piece: ActivePiece) -> Self {
        self.with_active_piece(piece)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> Option<ActivePiece> {
        match self.phase {
            Phase::Active { piece, .. } => Some(piece),
            _ => None,
        }
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines)
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Active { paused: true, .. })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// A piece is falling and accepts commands
    pub fn is_playable(&self) -> bool {
        self.controllable_piece().is_some()
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level())
    }

    /// Resting position of the active piece, if any
    pub fn ghost_position(&self) -> Option<Position> {
        self.active()
            .map(|piece| placement::ghost_position(&self.board, &piece))
    }

    /// Number of pieces locked since the game started
    pub fn pieces_locked(&self) -> u32 {
        self.locked
    }

    /// Summary of the most recent lock in this game
    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
