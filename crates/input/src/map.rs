//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Letters are matched case-insensitively. Ctrl-C is reserved for quitting
/// and never maps to an action.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Esc => Some(GameAction::Pause),

        // Start / restart
        KeyCode::Enter | KeyCode::Char('r') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
