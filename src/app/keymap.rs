//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the table view. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing sensible defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization
//!
//! Form and modal input is handled directly by the update loop; only the
//! table-view actions below are rebindable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Re-fetch the record list from the backend.
    Refresh,
    /// Open the form in create mode.
    NewUser,
    /// Open the form in edit mode, pre-filled from the selected record.
    EditUser,
    /// Ask for confirmation, then delete the selected record.
    DeleteUser,
    /// Display the help reference.
    OpenHelp,
    /// Move up in the record list.
    MoveUp,
    /// Move down in the record list.
    MoveDown,
    /// Move to the previous page of records.
    PageUp,
    /// Move to the next page of records.
    PageDown,
    /// Ignore this key (used for keys that shouldn't trigger anything).
    Ignore,
}

/// Manages keybinding configuration and key-to-action resolution.
///
/// The keymap uses a canonical mapping from `(KeyModifiers, KeyCode)` pairs
/// to [`KeyAction`]s. Multiple key combinations can map to the same action.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditUser);
        bindings.insert((M::NONE, Enter), KeyAction::EditUser);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteUser);
        bindings.insert((M::NONE, KeyCode::Delete), KeyAction::DeleteUser);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Some terminals report '?' with the SHIFT modifier set
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        // Vim-like keys
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);
        // Page keys
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load a keymap from a file, or create defaults if the file doesn't exist.
    ///
    /// If the path is missing, a fresh default keymap is written there for
    /// future customization.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        let _ = km.write_file(path);
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// The file uses the format `<Action> = <KeySpec>`. The method starts
    /// from defaults and overrides with user-specified bindings.
    ///
    /// Returns `Some(keymap)` if the file exists and is readable; `None` otherwise.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        Some(map)
    }

    /// Write the current keymap to a configuration file in a human-readable format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usrapi-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Up, Down, Left, Right, PageUp, PageDown, Delete, n, e, d, r, j, k\n");
        buf.push_str("# Actions: Quit, Refresh, NewUser, EditUser, DeleteUser, OpenHelp, MoveUp, MoveDown, PageUp, PageDown, Ignore\n\n");

        // Emit a stable, readable subset of current bindings
        let dump = [
            ("q", KeyAction::Quit),
            ("Esc", KeyAction::Ignore),
            ("r", KeyAction::Refresh),
            ("n", KeyAction::NewUser),
            ("e", KeyAction::EditUser),
            ("Enter", KeyAction::EditUser),
            ("d", KeyAction::DeleteUser),
            ("Delete", KeyAction::DeleteUser),
            ("?", KeyAction::OpenHelp),
            ("Up", KeyAction::MoveUp),
            ("Down", KeyAction::MoveDown),
            ("k", KeyAction::MoveUp),
            ("j", KeyAction::MoveDown),
            ("h", KeyAction::PageUp),
            ("l", KeyAction::PageDown),
            ("PageUp", KeyAction::PageUp),
            ("PageDown", KeyAction::PageDown),
        ];
        for (k, a) in dump {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its corresponding action, if one is bound.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+q".
    #[allow(dead_code)]
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Esc" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Delete" => Delete,
        other => {
            let mut chars = other.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Char(c)
        }
    };
    Some((mods, code))
}

fn parse_action(name: &str) -> Option<KeyAction> {
    let action = match name {
        "Quit" => KeyAction::Quit,
        "Refresh" => KeyAction::Refresh,
        "NewUser" => KeyAction::NewUser,
        "EditUser" => KeyAction::EditUser,
        "DeleteUser" => KeyAction::DeleteUser,
        "OpenHelp" => KeyAction::OpenHelp,
        "MoveUp" => KeyAction::MoveUp,
        "MoveDown" => KeyAction::MoveDown,
        "PageUp" => KeyAction::PageUp,
        "PageDown" => KeyAction::PageDown,
        "Ignore" => KeyAction::Ignore,
        _ => return None,
    };
    Some(action)
}

fn format_action(action: KeyAction) -> &'static str {
    match action {
        KeyAction::Quit => "Quit",
        KeyAction::Refresh => "Refresh",
        KeyAction::NewUser => "NewUser",
        KeyAction::EditUser => "EditUser",
        KeyAction::DeleteUser => "DeleteUser",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_resolve_core_actions() {
        let km = Keymap::default();
        let resolve = |code| km.resolve(&KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(resolve(KeyCode::Char('q')), Some(KeyAction::Quit));
        assert_eq!(resolve(KeyCode::Char('n')), Some(KeyAction::NewUser));
        assert_eq!(resolve(KeyCode::Enter), Some(KeyAction::EditUser));
        assert_eq!(resolve(KeyCode::Char('d')), Some(KeyAction::DeleteUser));
        assert_eq!(resolve(KeyCode::Char('j')), Some(KeyAction::MoveDown));
        assert_eq!(resolve(KeyCode::Char('x')), None);
    }

    #[test]
    fn parse_key_handles_named_keys_and_ctrl() {
        assert_eq!(
            parse_key("Enter"),
            Some((KeyModifiers::NONE, KeyCode::Enter))
        );
        assert_eq!(
            parse_key("Ctrl+q"),
            Some((KeyModifiers::CONTROL, KeyCode::Char('q')))
        );
        assert_eq!(parse_key("nope"), None);
    }

    #[test]
    fn format_key_roundtrips_through_parse() {
        assert_eq!(
            Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('q')),
            "Ctrl+q"
        );
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::Enter), "Enter");
        assert_eq!(
            parse_key(&Keymap::format_key(KeyModifiers::NONE, KeyCode::PageUp)),
            Some((KeyModifiers::NONE, KeyCode::PageUp))
        );
    }

    #[test]
    fn file_overrides_defaults() {
        let mut path = std::env::temp_dir();
        path.push(format!("uam_keys_{}.conf", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        std::fs::write(&path, "# comment\nQuit = Ctrl+q\n").unwrap();

        let km = Keymap::from_file(&path_str).expect("readable file");
        std::fs::remove_file(&path).ok();

        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(&ev), Some(KeyAction::Quit));
        // Defaults are kept underneath the override
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&ev), Some(KeyAction::Quit));
    }
}
