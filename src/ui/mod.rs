pub mod components;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let mut constraints = vec![Constraint::Length(3)];
    if app.error.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(6));
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut next = 0usize;
    render_header(f, chunks[next], app);
    next += 1;
    if app.error.is_some() {
        components::render_error_banner(f, chunks[next], app);
        next += 1;
    }
    form::render_form(f, chunks[next], app);
    next += 1;
    users::render_users_table(f, chunks[next], app);
    next += 1;
    components::render_status_bar(f, chunks[next], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let p = Paragraph::new(format!(
        "usrapi-manager ({})  users:{}  — n: new; Enter: edit; d: delete; r: refresh; ?: help; q: quit",
        app.backend,
        app.users.len()
    ))
    .block(
        Block::default()
            .title("usrapi-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::ConfirmDelete { .. } => {
                components::render_confirm_modal(f, area, app, &state);
            }
            ModalState::Help { scroll } => {
                components::render_help_modal(f, area, app, scroll);
            }
        }
    }
}
