//! Session - single-writer wrapper around the current game state
//!
//! Input handling and gravity may live on different threads in some hosts.
//! `Session` makes "read current, compute next, store next" one step under a
//! mutex and reports what the step did.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::core::GameState;
use crate::gravity::GravityClock;
use crate::types::{GameAction, LockEvent};

/// Result of one state update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// State after the update
    pub state: GameState,
    /// False when the command was rejected or had no effect
    pub changed: bool,
    /// The update ended the game
    pub game_over_entered: bool,
    /// Set when the update locked a piece
    pub lock: Option<LockEvent>,
}

impl Outcome {
    fn between(before: &GameState, after: &GameState) -> Self {
        let locked = after.pieces_locked() > before.pieces_locked();
        Self {
            state: *after,
            changed: before != after,
            game_over_entered: !before.is_game_over() && after.is_game_over(),
            lock: if locked { after.last_lock() } else { None },
        }
    }
}

/// Shared handle to one game. Clones refer to the same game.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Arc<Mutex<GameState>>,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy of the current state
    pub fn current(&self) -> GameState {
        *self.guard()
    }

    /// Apply a player command
    pub fn apply(&self, action: GameAction) -> Outcome {
        let outcome = self.update(|state| state.apply(action));
        if !outcome.changed {
            debug!("{} had no effect", action.as_str());
        }
        outcome
    }

    /// Apply a single gravity step
    pub fn tick(&self) -> Outcome {
        self.update(GameState::tick)
    }

    /// Let `clock` apply whatever gravity is due after `elapsed_ms`
    pub fn advance(&self, clock: &mut GravityClock, elapsed_ms: u32) -> Outcome {
        self.update(|state| clock.drive(state, elapsed_ms))
    }

    /// Replace the state wholesale (e.g. a fresh game with a new seed)
    pub fn replace(&self, state: GameState) -> Outcome {
        self.update(|_| state)
    }

    fn update(&self, f: impl FnOnce(&GameState) -> GameState) -> Outcome {
        let mut guard = self.guard();
        let before = *guard;
        let after = f(&before);
        *guard = after;
        Outcome::between(&before, &after)
    }

    // A panic elsewhere cannot leave a half-written GameState behind: the
    // value is replaced in one assignment.
    fn guard(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
