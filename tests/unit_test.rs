// Unit tests for usrapi-manager
// These tests work with the public API without modifying the main codebase

#[cfg(test)]
mod api_client_tests {
    use usrapi_manager::api::ApiClient;
    use usrapi_manager::error::ApiError;

    #[test]
    fn test_valid_urls_accepted() {
        assert!(ApiClient::new("http://localhost:8080/api").is_ok());
        assert!(ApiClient::new("https://users.example.com/api").is_ok());
    }

    #[test]
    fn test_invalid_urls_rejected() {
        for bad in ["", "not-a-url", "ftp://example.com", "example.com/api"] {
            match ApiClient::new(bad) {
                Err(ApiError::InvalidUrl(_)) => {}
                other => panic!("expected InvalidUrl for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/api/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }
}

#[cfg(test)]
mod state_machine_tests {
    use usrapi_manager::api::{ApiClient, UserRecord};
    use usrapi_manager::app::update::{begin_create, begin_edit, cancel_edit, submit_form};
    use usrapi_manager::app::{AppState, FormField, InputMode, Mode};

    fn mk_user(id: u64, name: &str, email: &str) -> UserRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "email": email,
            "created_at": "2024-01-01T00:00:00Z",
        }))
        .expect("valid record")
    }

    #[test]
    fn test_initial_state_is_create_mode() {
        let app = AppState::default();
        assert_eq!(app.mode, Mode::Create);
        assert_eq!(app.input_mode, InputMode::Table);
        assert!(app.form.name.is_empty());
        assert!(app.form.email.is_empty());
        assert!(app.error.is_none());
        assert!(!app.loading);
    }

    #[test]
    fn test_begin_edit_prefills_form_from_selected_record() {
        let mut app = AppState::default();
        app.set_users(vec![
            mk_user(1, "alice", "alice@x.com"),
            mk_user(2, "bob", "bob@x.com"),
        ]);
        app.selected_index = 1;

        begin_edit(&mut app);

        assert!(app.mode.is_editing());
        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(app.form.name, "bob");
        assert_eq!(app.form.email, "bob@x.com");
        assert_eq!(app.form.focus, FormField::Name);
    }

    #[test]
    fn test_edit_then_cancel_restores_create_mode_with_empty_form() {
        let mut app = AppState::default();
        app.set_users(vec![mk_user(1, "alice", "alice@x.com")]);

        begin_edit(&mut app);
        assert!(app.mode.is_editing());

        cancel_edit(&mut app);
        assert_eq!(app.mode, Mode::Create);
        assert_eq!(app.input_mode, InputMode::Table);
        assert!(app.form.name.is_empty());
        assert!(app.form.email.is_empty());
    }

    #[test]
    fn test_begin_edit_on_empty_list_is_a_noop() {
        let mut app = AppState::default();
        begin_edit(&mut app);
        assert_eq!(app.mode, Mode::Create);
        assert_eq!(app.input_mode, InputMode::Table);
    }

    #[test]
    fn test_begin_create_clears_previous_form_contents() {
        let mut app = AppState::default();
        app.form.name = "left".to_string();
        app.form.email = "over@x.com".to_string();

        begin_create(&mut app);

        assert_eq!(app.mode, Mode::Create);
        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.form.name.is_empty());
        assert!(app.form.email.is_empty());
    }

    #[test]
    fn test_submit_with_missing_field_sets_validation_banner() {
        // Validation runs before any transport work, so a client pointed at a
        // default address is never contacted here.
        let client = ApiClient::new("http://localhost:8080/api").expect("client");
        let mut app = AppState::default();
        app.form.name = "alice".to_string();
        // email left empty

        submit_form(&mut app, &client);

        assert_eq!(app.error.as_deref(), Some("Please fill in all fields"));
        assert!(app.users.is_empty());
        assert_eq!(app.mode, Mode::Create);
    }
}

#[cfg(test)]
mod error_tests {
    use usrapi_manager::error::{ApiError, failure_banner};

    #[test]
    fn test_connection_refused_message_names_port() {
        let err = ApiError::ConnectionRefused { port: 8080 };
        assert_eq!(
            err.to_string(),
            "Backend server is not running on port 8080"
        );
    }

    #[test]
    fn test_status_message_contains_code_and_body() {
        let err = ApiError::Status {
            status: 500,
            body: "database down".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("database down"));
    }

    #[test]
    fn test_banner_combines_action_and_kind() {
        let err = ApiError::Status {
            status: 404,
            body: "no such user".to_string(),
        };
        assert_eq!(
            failure_banner("delete user", &err),
            "Failed to delete user: Server error 404: no such user"
        );
    }
}

#[cfg(test)]
mod render_tests {
    use ratatui::{Terminal, backend::TestBackend};
    use usrapi_manager::api::UserRecord;
    use usrapi_manager::app::{AppState, InputMode, ModalState};
    use usrapi_manager::ui::render;

    fn mk_user(id: u64, name: &str, email: &str) -> UserRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "email": email,
            "created_at": "2024-01-01T00:00:00Z",
        }))
        .expect("valid record")
    }

    #[test]
    fn test_ui_render_smoke() {
        // Render a basic AppState into a TestBackend and ensure it doesn't panic
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::default();
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame");
    }

    #[test]
    fn test_ui_render_with_records_error_and_loading() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::default();
        app.set_users(vec![
            mk_user(1, "alice", "alice@x.com"),
            mk_user(2, "bob", "bob@x.com"),
        ]);
        app.error = Some("Failed to fetch users: Server error 500: boom".to_string());
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame with error banner");

        app.loading = true;
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame while loading");
    }

    #[test]
    fn test_ui_render_with_modals() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::default();
        app.set_users(vec![mk_user(1, "alice", "alice@x.com")]);

        app.modal = Some(ModalState::ConfirmDelete {
            user: mk_user(1, "alice", "alice@x.com"),
            selected: 1,
        });
        app.input_mode = InputMode::Modal;
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render confirm modal");

        app.modal = Some(ModalState::Help { scroll: 0 });
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render help modal");
    }
}
