//! Snapshot module - read-only view of a game for renderers
//!
//! A `GameSnapshot` is a plain `Copy` value; consumers cannot reach back into
//! the state machine through it.

use crate::board::Board;
use crate::game_state::GameState;
use crate::placement::ActivePiece;
use crate::types::{PieceKind, Position};

/// Everything a view needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<ActivePiece>,
    /// Resting position of the active piece; hidden while paused
    pub ghost: Option<Position>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub idle: bool,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// A piece is falling and the game is not paused
    pub fn playable(&self) -> bool {
        self.active.is_some() && !self.paused
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let paused = state.is_paused();
        Self {
            board: *state.board(),
            active: state.active(),
            ghost: if paused { None } else { state.ghost_position() },
            next: state.next_kind(),
            score: state.score(),
            level: state.level(),
            lines: state.lines(),
            idle: state.is_idle(),
            paused,
            game_over: state.is_game_over(),
            drop_interval_ms: state.drop_interval_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_of_idle_game() {
        let snap = GameState::new(9).snapshot();
        assert!(snap.idle);
        assert!(!snap.playable());
        assert!(snap.active.is_none());
        assert!(snap.ghost.is_none());
        assert_eq!(snap.drop_interval_ms, 1000);
    }

    #[test]
    fn test_snapshot_hides_ghost_while_paused() {
        let running = GameState::new(9).start();
        assert!(running.snapshot().ghost.is_some());

        let paused = running.toggle_pause().snapshot();
        assert!(paused.paused);
        assert!(paused.active.is_some());
        assert!(paused.ghost.is_none());
        assert!(!paused.playable());
    }
}
