//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action. Letters are case-insensitive.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(GameAction::SoftDrop),

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') | KeyCode::Char('x') => {
            Some(GameAction::RotateCw)
        }
        KeyCode::Char('z') | KeyCode::Char('y') => Some(GameAction::RotateCcw),

        // Ctrl-C quits, see `should_quit`.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(' ') | KeyCode::Char('c') => Some(GameAction::HardDrop),

        KeyCode::Char('r') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
