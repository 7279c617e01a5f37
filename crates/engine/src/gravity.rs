//! Gravity clock - turns elapsed wall time into gravity steps
//!
//! The core has no notion of time. A host calls [`GravityClock::drive`] once
//! per frame with the milliseconds since the previous frame; the clock
//! accumulates them and applies one `tick` per elapsed drop interval.

use crate::core::GameState;

/// Accumulates frame time between gravity steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityClock {
    accumulated_ms: u32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time carried toward the next step
    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    /// Add `elapsed_ms` and return how many gravity steps are due
    ///
    /// The interval is re-read from `state` on every call, so a level-up takes
    /// effect on the next frame. Nothing accumulates unless a piece is falling
    /// and the game is not paused.
    pub fn advance(&mut self, state: &GameState, elapsed_ms: u32) -> u32 {
        if !state.is_playable() {
            self.reset();
            return 0;
        }

        let interval = state.drop_interval_ms().max(1);
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        let steps = self.accumulated_ms / interval;
        self.accumulated_ms %= interval;
        steps
    }

    /// Advance and apply the due steps to `state`
    ///
    /// Stops at the first step that locks a piece and restarts the clock, so
    /// each new piece gets a full interval before its first fall.
    pub fn drive(&mut self, state: &GameState, elapsed_ms: u32) -> GameState {
        let steps = self.advance(state, elapsed_ms);
        let mut current = *state;

        for _ in 0..steps {
            let next = current.tick();
            let locked = next.pieces_locked() != current.pieces_locked();
            current = next;
            if locked {
                self.reset();
                break;
            }
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn playing() -> GameState {
        GameState::new(1).with_next_kind(PieceKind::O).spawn()
    }

    #[test]
    fn test_accumulates_until_interval() {
        let state = playing();
        let mut clock = GravityClock::new();

        assert_eq!(clock.advance(&state, 400), 0);
        assert_eq!(clock.advance(&state, 400), 0);
        assert_eq!(clock.advance(&state, 400), 1);
        assert_eq!(clock.accumulated_ms(), 200);
    }

    #[test]
    fn test_long_frame_yields_several_steps() {
        let state = playing();
        let mut clock = GravityClock::new();
        assert_eq!(clock.advance(&state, 3500), 3);
        assert_eq!(clock.accumulated_ms(), 500);
    }

    #[test]
    fn test_nothing_accumulates_when_not_playable() {
        let mut clock = GravityClock::new();

        let idle = GameState::new(1);
        assert_eq!(clock.advance(&idle, 5000), 0);
        assert_eq!(clock.accumulated_ms(), 0);

        let paused = playing().toggle_pause();
        assert_eq!(clock.advance(&paused, 5000), 0);
        assert_eq!(clock.accumulated_ms(), 0);
    }

    #[test]
    fn test_pause_discards_partial_interval() {
        let state = playing();
        let mut clock = GravityClock::new();
        clock.advance(&state, 900);
        clock.advance(&state.toggle_pause(), 16);
        assert_eq!(clock.advance(&state, 200), 0);
    }

    #[test]
    fn test_drive_moves_piece_down() {
        let state = playing();
        let mut clock = GravityClock::new();
        let after = clock.drive(&state, 2000);
        assert_eq!(after.active().unwrap().position.y, 2);
    }

    #[test]
    fn test_drive_stops_at_lock_and_resets() {
        // O spawns at y=0 and rests at y=18: 19 steps lock it.
        let state = playing();
        let mut clock = GravityClock::new();
        let after = clock.drive(&state, 25_000);

        assert_eq!(after.pieces_locked(), 1);
        assert_eq!(after.active().unwrap().position.y, 0);
        assert_eq!(clock.accumulated_ms(), 0);
    }
}
