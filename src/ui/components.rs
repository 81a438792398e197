//! Shared UI components (status bar, error banner, modal helpers).
//!
//! Contains small building blocks reused by the main screen.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, ModalState, Mode};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Table => "TABLE",
        InputMode::Form => match app.mode {
            Mode::Create => "FORM(create)",
            Mode::Editing(_) => "FORM(edit)",
        },
        InputMode::Modal => "MODAL",
    };
    let msg = format!(
        "mode: {mode}  users:{}  rows/page:{}",
        app.users.len(),
        app.rows_per_page
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Render the most recent error as a banner below the header.
pub fn render_error_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(message) = &app.error else { return };
    let p = Paragraph::new(message.clone())
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.error_fg))
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error_fg)),
        );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the Yes/No confirmation shown before a record is deleted.
pub fn render_confirm_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::ConfirmDelete { user, selected } = state {
        let rect = centered_rect(50, 7, area);
        let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
        let no = if *selected == 1 { "[No]" } else { " No  " };
        let body = format!(
            "Delete user '{}' (id {})?\n\n  {}    {}",
            user.name, user.id, yes, no
        );
        let p = Paragraph::new(body).block(
            Block::default()
                .title("Confirm delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Render the help modal with important usage information and key tips.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(50);
    let height = 18u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Help",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    lines.push(Line::from(vec![
        Span::raw("Navigation: "),
        Span::styled("Arrow keys / j k, PageUp/PageDown", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("New user: "),
        Span::styled("n", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Edit selected: "),
        Span::styled("e / Enter", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Delete selected: "),
        Span::styled("d / Delete", italic),
        Span::raw(" (asks for confirmation)"),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Refresh from backend: "),
        Span::styled("r", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Quit: "),
        Span::styled("q", italic),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Form",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::raw("Switch field: "),
        Span::styled("Tab", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Submit: "),
        Span::styled("Enter", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Cancel: "),
        Span::styled("Esc", italic),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Keybindings can be changed in "),
        Span::styled("keybinds.conf", italic),
        Span::raw("; colors in "),
        Span::styled("theme.conf", italic),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Close help: "),
        Span::styled("Esc / Enter", italic),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
