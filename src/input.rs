//! Input mapping from key events to actions
//!
//! Edge-triggered: each key press maps to at most one action, and nothing
//! auto-repeats. The engine never sees keys, only actions; quitting is a
//! driver concern and never reaches the reducer.

use crate::game::{Action, GameState};
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the driver should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Feed an action to the reducer
    Dispatch(Action),
    /// Tear down and exit
    Quit,
}

/// Key bindings resolved to key codes - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct InputMap {
    move_left: Vec<KeyCode>,
    move_right: Vec<KeyCode>,
    soft_drop: Vec<KeyCode>,
    hard_drop: Vec<KeyCode>,
    rotate_cw: Vec<KeyCode>,
    rotate_ccw: Vec<KeyCode>,
    hold: Vec<KeyCode>,
    pause: Vec<KeyCode>,
    restart: Vec<KeyCode>,
    quit: Vec<KeyCode>,
}

impl InputMap {
    /// Build the map from the settings file's key strings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            move_left: parse_keys(&keys.move_left),
            move_right: parse_keys(&keys.move_right),
            soft_drop: parse_keys(&keys.soft_drop),
            hard_drop: parse_keys(&keys.hard_drop),
            rotate_cw: parse_keys(&keys.rotate_cw),
            rotate_ccw: parse_keys(&keys.rotate_ccw),
            hold: parse_keys(&keys.hold),
            pause: parse_keys(&keys.pause),
            restart: parse_keys(&keys.restart),
            quit: parse_keys(&keys.quit),
        }
    }

    /// Resolve one key press to at most one command.
    ///
    /// The pause key toggles: it dispatches Resume when the snapshot is
    /// paused and Pause otherwise. Everything else maps statically.
    pub fn command_for(&self, key: KeyEvent, state: &GameState) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);

        let action = if self.move_left.contains(&code) {
            Action::MoveLeft
        } else if self.move_right.contains(&code) {
            Action::MoveRight
        } else if self.soft_drop.contains(&code) {
            Action::MoveDown
        } else if self.hard_drop.contains(&code) {
            Action::HardDrop
        } else if self.rotate_cw.contains(&code) {
            Action::Rotate
        } else if self.rotate_ccw.contains(&code) {
            Action::RotateCcw
        } else if self.hold.contains(&code) {
            Action::Hold
        } else if self.pause.contains(&code) {
            if state.paused {
                Action::Resume
            } else {
                Action::Pause
            }
        } else if self.restart.contains(&code) {
            Action::Restart
        } else if self.quit.contains(&code) {
            return Some(Command::Quit);
        } else {
            return None;
        };

        Some(Command::Dispatch(action))
    }
}

impl Default for InputMap {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Parse a key string into a KeyCode
fn parse_key(s: &str) -> KeyCode {
    match s.to_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        s if s.chars().count() == 1 => KeyCode::Char(s.chars().next().unwrap()),
        _ => KeyCode::Null,
    }
}

/// Parse a list of key strings into KeyCodes
fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
    keys.iter().map(|s| parse_key(s)).collect()
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
