//! Key mapping from terminal events to game commands.
//!
//! Letter keys match regardless of case, and the Cyrillic keys sitting on the
//! WASD positions of a ЙЦУКЕН layout (ф ы в ц) work the same as their Latin
//! counterparts.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game commands.
///
/// Key releases are ignored so terminals that report them do not fire twice.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::RotateCw),
        KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Char(c) => char_command(c),
        _ => None,
    }
}

fn char_command(c: char) -> Option<Command> {
    match c.to_lowercase().next()? {
        'a' | 'ф' => Some(Command::MoveLeft),
        'd' | 'в' => Some(Command::MoveRight),
        's' | 'ы' => Some(Command::SoftDrop),
        'w' | 'ц' => Some(Command::RotateCw),
        'z' | 'я' => Some(Command::RotateCcw),
        ' ' => Some(Command::HardDrop),
        'p' | 'з' => Some(Command::TogglePause),
        'r' | 'к' => Some(Command::Reset),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return key.code == KeyCode::Char('c');
    }
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('й') | KeyCode::Char('Й')
    )
}

/// Check if key cycles the colour theme.
pub fn is_theme_key(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && matches!(
            key.code,
            KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Char('е') | KeyCode::Char('Е')
        )
}
