use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::app::{AppState, InputMode, ModalState, Mode};
use crate::app::keymap::KeyAction;
use crate::error::failure_banner;
use crate::ui;

/// Run the TUI event loop until the operator quits.
///
/// Each key event or completed HTTP call runs to completion before the next
/// is processed; API calls block the loop for their duration.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    client: &ApiClient,
    mut app: AppState,
) -> Result<()> {
    // Show the loading indicator before blocking on the initial fetch.
    app.loading = true;
    terminal.draw(|f| {
        ui::render(f, &mut app);
    })?;
    fetch_users(&mut app, client);

    loop {
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.input_mode {
                        InputMode::Table => {
                            match app.keymap.resolve(&key) {
                                Some(KeyAction::Quit) => break,
                                Some(KeyAction::Refresh) => fetch_users(&mut app, client),
                                Some(KeyAction::NewUser) => begin_create(&mut app),
                                Some(KeyAction::EditUser) => begin_edit(&mut app),
                                Some(KeyAction::DeleteUser) => request_delete(&mut app),
                                Some(KeyAction::OpenHelp) => {
                                    app.modal = Some(ModalState::Help { scroll: 0 });
                                    app.input_mode = InputMode::Modal;
                                }
                                Some(KeyAction::MoveUp) => {
                                    if app.selected_index > 0 {
                                        app.selected_index -= 1;
                                    }
                                }
                                Some(KeyAction::MoveDown) => {
                                    if app.selected_index + 1 < app.users.len() {
                                        app.selected_index += 1;
                                    }
                                }
                                Some(KeyAction::PageUp) => {
                                    let rpp = app.rows_per_page.max(1);
                                    app.selected_index = app.selected_index.saturating_sub(rpp);
                                }
                                Some(KeyAction::PageDown) => {
                                    let rpp = app.rows_per_page.max(1);
                                    let new_idx = app.selected_index.saturating_add(rpp);
                                    app.selected_index =
                                        new_idx.min(app.users.len().saturating_sub(1));
                                }
                                Some(KeyAction::Ignore) | None => {}
                            }
                        }
                        InputMode::Form => {
                            handle_form_key(&mut app, client, key.code);
                        }
                        InputMode::Modal => {
                            handle_modal_key(&mut app, client, key.code);
                        }
                    }
                }
            }
        }

        let _uptime = app.started_at.elapsed();
    }

    Ok(())
}

/// Fetch the record list and replace the store's copy.
///
/// The loading flag is surfaced only around list fetches; mutations keep
/// the UI label unchanged for their (short) blocking duration.
pub fn fetch_users(app: &mut AppState, client: &ApiClient) {
    app.loading = true;
    info!(url = %client.base_url(), "refreshing user list");
    match client.list_users() {
        Ok(users) => {
            app.set_users(users);
            app.error = None;
        }
        Err(e) => {
            warn!(error = %e, "list fetch failed");
            app.error = Some(failure_banner("fetch users", &e));
        }
    }
    app.loading = false;
}

/// Open the form empty, in create mode.
pub fn begin_create(app: &mut AppState) {
    app.mode = Mode::Create;
    app.form.clear();
    app.input_mode = InputMode::Form;
}

/// Open the form pre-filled from the selected record, in edit mode.
pub fn begin_edit(app: &mut AppState) {
    if let Some(user) = app.selected_user().cloned() {
        debug!(id = user.id, "editing user");
        app.form.fill_from(&user);
        app.mode = Mode::Editing(user);
        app.input_mode = InputMode::Form;
    }
}

/// Leave the form without submitting: back to create mode, form cleared.
pub fn cancel_edit(app: &mut AppState) {
    app.mode = Mode::Create;
    app.form.clear();
    app.input_mode = InputMode::Table;
}

/// Submit the form: create or update depending on the current mode.
///
/// Both fields must be non-empty; otherwise a validation banner is set and
/// no request is issued. On success the store is patched from the response
/// body, the form is cleared, and the mode returns to create.
pub fn submit_form(app: &mut AppState, client: &ApiClient) {
    if !app.form.is_complete() {
        app.error = Some("Please fill in all fields".to_string());
        return;
    }

    let draft = app.form.draft();
    match app.mode.clone() {
        Mode::Create => match client.create_user(&draft) {
            Ok(created) => {
                info!(id = created.id, "created user");
                app.append_user(created);
                app.form.clear();
                app.error = None;
                app.input_mode = InputMode::Table;
            }
            Err(e) => {
                warn!(error = %e, "create failed");
                app.error = Some(failure_banner("create user", &e));
            }
        },
        Mode::Editing(user) => match client.update_user(user.id, &draft) {
            Ok(updated) => {
                info!(id = updated.id, "updated user");
                app.replace_user(updated);
                app.mode = Mode::Create;
                app.form.clear();
                app.error = None;
                app.input_mode = InputMode::Table;
            }
            Err(e) => {
                warn!(error = %e, "update failed");
                app.error = Some(failure_banner("update user", &e));
            }
        },
    }
}

/// Open the delete confirmation dialog for the selected record.
///
/// "No" is pre-selected; the DELETE request only goes out from
/// [`confirm_delete`] once the operator picks "Yes".
pub fn request_delete(app: &mut AppState) {
    if let Some(user) = app.selected_user().cloned() {
        app.modal = Some(ModalState::ConfirmDelete { user, selected: 1 });
        app.input_mode = InputMode::Modal;
    }
}

/// Issue the DELETE for the record in the open confirmation dialog.
pub fn confirm_delete(app: &mut AppState, client: &ApiClient) {
    if let Some(ModalState::ConfirmDelete { user, .. }) = app.modal.clone() {
        match client.delete_user(user.id) {
            Ok(()) => {
                info!(id = user.id, "deleted user");
                app.remove_user(user.id);
                app.error = None;
            }
            Err(e) => {
                warn!(error = %e, "delete failed");
                app.error = Some(failure_banner("delete user", &e));
            }
        }
    }
    close_modal(app);
}

/// Key handling while the form has focus.
pub fn handle_form_key(app: &mut AppState, client: &ApiClient, code: KeyCode) {
    match code {
        KeyCode::Esc => cancel_edit(app),
        KeyCode::Tab | KeyCode::BackTab => app.form.toggle_focus(),
        KeyCode::Enter => submit_form(app, client),
        KeyCode::Backspace => {
            app.form.focused_value_mut().pop();
        }
        KeyCode::Char(c) => {
            app.form.focused_value_mut().push(c);
        }
        _ => {}
    }
}

/// Key handling while a modal dialog is open.
pub fn handle_modal_key(app: &mut AppState, client: &ApiClient, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::ConfirmDelete { selected, .. }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Left | KeyCode::Right => {
                *selected = if *selected == 0 { 1 } else { 0 };
            }
            KeyCode::Enter => {
                if *selected == 0 {
                    confirm_delete(app, client);
                } else {
                    close_modal(app);
                }
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => close_modal(app),
            KeyCode::Up | KeyCode::Char('k') => {
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        },
        None => {}
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Table;
}
