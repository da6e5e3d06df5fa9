//! Key-name to action resolution.
//!
//! Config files name keys with the same identifiers the original pygame
//! setup used (`RIGHT`, `PAGEDOWN`, `KP_PLUS`, single characters, ...);
//! this module maps those names onto crossterm key codes and builds the
//! lookup table the event loop consults.

use std::collections::HashMap;

use crossterm::event::KeyCode;
use stagecue_core::Action;

use crate::config::KeyBindings;

/// Translate a configured key name to a crossterm key code.
///
/// Terminals do not distinguish keypad keys, so `KP_PLUS`/`KP_MINUS`
/// collapse onto the plain characters. Unknown names yield `None`.
pub fn key_code_for_name(name: &str) -> Option<KeyCode> {
    match name {
        "RIGHT" => Some(KeyCode::Right),
        "LEFT" => Some(KeyCode::Left),
        "UP" => Some(KeyCode::Up),
        "DOWN" => Some(KeyCode::Down),
        "SPACE" => Some(KeyCode::Char(' ')),
        "PAGEUP" => Some(KeyCode::PageUp),
        "PAGEDOWN" => Some(KeyCode::PageDown),
        "ESCAPE" => Some(KeyCode::Esc),
        "RETURN" | "ENTER" => Some(KeyCode::Enter),
        "TAB" => Some(KeyCode::Tab),
        "HOME" => Some(KeyCode::Home),
        "END" => Some(KeyCode::End),
        "PLUS" | "KP_PLUS" => Some(KeyCode::Char('+')),
        "MINUS" | "KP_MINUS" => Some(KeyCode::Char('-')),
        "EQUALS" => Some(KeyCode::Char('=')),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Resolved key-to-action lookup table.
#[derive(Debug, Default)]
pub struct KeyMap {
    map: HashMap<KeyCode, Action>,
}

impl KeyMap {
    /// Build the table from configured bindings.
    ///
    /// Unknown key names are skipped with a warning; a later binding for
    /// the same key wins.
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let groups: [(&[String], Action); 9] = [
            (&bindings.next_page, Action::NextPage),
            (&bindings.prev_page, Action::PrevPage),
            (&bindings.next_song, Action::NextSong),
            (&bindings.prev_song, Action::PrevSong),
            (&bindings.first_page, Action::FirstPage),
            (&bindings.last_page, Action::LastPage),
            (&bindings.quit, Action::Quit),
            (&bindings.zoom_in, Action::ZoomIn),
            (&bindings.zoom_out, Action::ZoomOut),
        ];

        let mut map = HashMap::new();
        for (names, action) in groups {
            for name in names {
                match key_code_for_name(name) {
                    Some(code) => {
                        map.insert(code, action);
                    }
                    None => log::warn!("unknown key name in config: {name}"),
                }
            }
        }
        Self { map }
    }

    /// Look up the action bound to a key code.
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        self.map.get(&code).copied()
    }
}
