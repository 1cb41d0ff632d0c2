//! Key mapping and action dispatch system for dirpilot
//!
//! Maps keys to an [Action], parsing the key strings from the config.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Every action reachable from the browsing view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Open,
    Back,
    Delete,
    Rename,
    Copy,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built from the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        bind(keys.quit(),      Action::Quit,     &mut map);
        bind(keys.up(),        Action::MoveUp,   &mut map);
        bind(keys.down(),      Action::MoveDown, &mut map);
        bind(keys.page_up(),   Action::PageUp,   &mut map);
        bind(keys.page_down(), Action::PageDown, &mut map);
        bind(keys.open(),      Action::Open,     &mut map);
        bind(keys.parent(),    Action::Back,     &mut map);
        bind(keys.delete(),    Action::Delete,   &mut map);
        bind(keys.rename(),    Action::Rename,   &mut map);
        bind(keys.copy(),      Action::Copy,     &mut map);

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }

    /// True if `key` triggers [Action::Quit].
    pub fn is_quit(&self, key: KeyEvent) -> bool {
        self.lookup(key) == Some(Action::Quit)
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    if input == " " {
        return Some(Key {
            code: KeyCode::Char(' '),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings() {
        let keymap = Keymap::from_config(&Config::default());
        assert_eq!(keymap.lookup(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(keymap.lookup(press(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(keymap.lookup(press(KeyCode::PageDown)), Some(Action::PageDown));
        assert_eq!(keymap.lookup(press(KeyCode::Enter)), Some(Action::Open));
        assert_eq!(keymap.lookup(press(KeyCode::Right)), Some(Action::Open));
        assert_eq!(keymap.lookup(press(KeyCode::Backspace)), Some(Action::Back));
        assert_eq!(keymap.lookup(press(KeyCode::Left)), Some(Action::Back));
        assert_eq!(keymap.lookup(press(KeyCode::Char('u'))), Some(Action::Back));
        assert_eq!(keymap.lookup(press(KeyCode::Char('d'))), Some(Action::Delete));
        assert_eq!(keymap.lookup(press(KeyCode::Char('r'))), Some(Action::Rename));
        assert_eq!(keymap.lookup(press(KeyCode::Char('c'))), Some(Action::Copy));
        assert_eq!(keymap.lookup(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn parse_key_variants() {
        assert_eq!(
            parse_key("Ctrl+d"),
            Some(Key {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(
            parse_key("<c-x>"),
            Some(Key {
                code: KeyCode::Char('x'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(parse_key("F5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("PgUp").map(|k| k.code), Some(KeyCode::PageUp));
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn shift_falls_back_to_plain_char() {
        let keymap = Keymap::from_config(&Config::default());
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::SHIFT);
        assert!(keymap.is_quit(key));
    }
}
