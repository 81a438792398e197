//! The create/edit form panel.
//!
//! Mirrors the two text inputs of the record form: title and hints switch
//! with the current [`Mode`](crate::app::Mode).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, FormField, InputMode};

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.input_mode == InputMode::Form;
    let editing = app.mode.is_editing();

    let title = if editing { "Edit User" } else { "Add New User" };
    let border = if active {
        Style::default().fg(app.theme.title)
    } else {
        Style::default().fg(app.theme.border)
    };

    let field_line = |label: &str, value: &str, focused: bool| {
        let marker = if active && focused { "▶ " } else { "  " };
        let value_style = if active && focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Line::from(vec![
            Span::raw(format!("{}{:<7}", marker, label)),
            Span::styled(value.to_string(), value_style),
        ])
    };

    let hint = if active {
        if editing {
            "Enter: update  Tab: switch field  Esc: cancel"
        } else {
            "Enter: add  Tab: switch field  Esc: back"
        }
    } else {
        "n: new user  e/Enter: edit selected"
    };

    let lines = vec![
        field_line("Name:", &app.form.name, app.form.focus == FormField::Name),
        field_line("Email:", &app.form.email, app.form.focus == FormField::Email),
        Line::from(Span::styled(
            format!("  {}", hint),
            Style::default().fg(app.theme.muted),
        )),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(p, area);
}
