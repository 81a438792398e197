//! Application state types and entry glue.
//!
//! Defines enums and structs that model the TUI state, as well as helpers
//! to construct defaults and to run the application loop (re-exported as `run`).
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::time::Instant;

use crate::api::{UserDraft, UserRecord};

/// Which part of the screen receives key input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Form,
    Modal,
}

/// Whether submitting the form creates a new record or updates an existing one.
///
/// Replaces a nullable "currently editing" pointer: the record being edited
/// travels inside the variant, so there is nothing to null-check.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Create,
    Editing(UserRecord),
}

impl Mode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing(_))
    }
}

/// Form field currently receiving keystrokes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Email,
}

/// Scratch buffer bound to the two form inputs.
///
/// Cleared after a successful submit or a cancel; pre-filled from the
/// selected record when editing starts.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub focus: FormField,
}

impl FormState {
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.focus = FormField::Name;
    }

    pub fn fill_from(&mut self, user: &UserRecord) {
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.focus = FormField::Name;
    }

    /// Presence check only; anything beyond that is the server's business.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Name,
        };
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,
}

impl Theme {
    /// Dark default theme.
    #[allow(dead_code)]
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error_fg: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            // text & neutrals
            text: Color::Rgb(0xcd, 0xd6, 0xf4),   // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),  // overlay1
            // accents and chrome
            title: Color::Rgb(0xcb, 0xa6, 0xf7),     // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),    // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44), // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe), // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4), // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),  // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error_fg" => theme.error_fg = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or special names: "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = if let Some(h) = lower.strip_prefix('#') { h } else { lower.as_str() };
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        // Minimal header
        buf.push_str("# usrapi-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // For named colors, emit a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error_fg", self.error_fg);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the current default theme and return it.
    /// If present, load from it; on parse errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        let _ = t.write_file(path);
        t
    }
}

/// Modal dialog states.
#[derive(Clone, Debug)]
pub enum ModalState {
    /// Yes/No confirmation before a DELETE request goes out.
    ConfirmDelete { user: UserRecord, selected: usize },
    Help { scroll: u16 },
}

pub struct AppState {
    pub started_at: Instant,
    /// Backend base URL, shown in the header.
    pub backend: String,
    /// The record list, in server order. Owned exclusively by this store;
    /// mutated only through the store operations below.
    pub users: Vec<UserRecord>,
    pub form: FormState,
    pub mode: Mode,
    pub input_mode: InputMode,
    pub loading: bool,
    /// Most recent error banner text, if any. No history is kept.
    pub error: Option<String>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub modal: Option<ModalState>,
}

impl AppState {
    /// Create an `AppState` with an empty record list and the given config.
    pub fn new(theme: Theme, keymap: keymap::Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            backend: crate::api::DEFAULT_BASE_URL.to_string(),
            users: Vec::new(),
            form: FormState::default(),
            mode: Mode::Create,
            input_mode: InputMode::Table,
            loading: false,
            error: None,
            selected_index: 0,
            rows_per_page: 10,
            theme,
            keymap,
            modal: None,
        }
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users.get(self.selected_index)
    }

    // Store operations. The list is patched from mutation responses instead
    // of re-fetched; this assumes the server response is authoritative and
    // no other client mutates the same data concurrently. The refresh action
    // is the escape hatch when that assumption does not hold.

    /// Replace the whole list with the server's response, preserving its order.
    pub fn set_users(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.selected_index = 0;
    }

    /// Append a freshly created record at the end of the list.
    pub fn append_user(&mut self, user: UserRecord) {
        self.users.push(user);
    }

    /// Replace the record with the same id in place (same position).
    /// No-op if the id is not present.
    pub fn replace_user(&mut self, user: UserRecord) {
        if let Some(slot) = self.users.iter_mut().find(|u| u.id == user.id) {
            *slot = user;
        }
    }

    /// Remove the record with the given id and clamp the selection cursor.
    pub fn remove_user(&mut self, id: u64) {
        self.users.retain(|u| u.id != id);
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        if self.selected_index >= self.users.len() {
            self.selected_index = self.users.len().saturating_sub(1);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), keymap::Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
