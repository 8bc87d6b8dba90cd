use report_core::{
    update, AppState, Effect, LoadFailure, Msg, StatusView, UserRecord, ViewSettings,
    DEFAULT_SOURCE_URL, PLACEHOLDER,
};

fn init_logging() {
    report_logging::initialize_for_tests();
}

fn user(id: &str, name: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: String::new(),
        phone: String::new(),
        company_name: PLACEHOLDER.to_string(),
    }
}

fn fetch_request(effects: &[Effect]) -> (u64, String) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchRecords { request_id, url } => Some((*request_id, url.clone())),
            _ => None,
        })
        .expect("fetch effect")
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(input.to_string()));
    update(state, Msg::UrlSubmitted)
}

#[test]
fn startup_fetches_configured_source() {
    init_logging();
    let state = AppState::with_settings(ViewSettings {
        source_url: "https://dummyjson.com/users".to_string(),
        page_size: 10,
        ..ViewSettings::default()
    });
    let (state, effects) = update(state, Msg::AppStarted);

    let (_, url) = fetch_request(&effects);
    assert_eq!(url, "https://dummyjson.com/users");
    assert!(state.is_loading());
    assert_eq!(state.view().status, StatusView::Loading);
    assert!(!state.view().show_table);
}

#[test]
fn url_edits_do_not_fetch_until_submitted() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::UrlInputChanged("https://dummyjson.com/us".to_string()),
    );
    assert!(effects.is_empty());
    assert_eq!(state.url_input(), "https://dummyjson.com/us");
    assert_eq!(state.view_state().source_url, DEFAULT_SOURCE_URL);

    let (state, effects) = submit_url(state, "  https://dummyjson.com/users  ");
    let (_, url) = fetch_request(&effects);
    assert_eq!(url, "https://dummyjson.com/users");
    assert_eq!(state.view_state().source_url, "https://dummyjson.com/users");
}

#[test]
fn blank_url_submission_is_ignored() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "   ");

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.view_state().source_url, DEFAULT_SOURCE_URL);
}

#[test]
fn successful_fetch_replaces_store_wholesale() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AppStarted);
    let (first_id, _) = fetch_request(&effects);
    let (state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: first_id,
            result: Ok(vec![user("1", "Bob"), user("2", "Alice")]),
        },
    );
    let (state, _) = update(state, Msg::NextPage);

    let (state, effects) = update(state, Msg::RefreshRequested);
    let (second_id, _) = fetch_request(&effects);
    assert_ne!(first_id, second_id);
    let (state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: second_id,
            result: Ok(vec![user("7", "Zed")]),
        },
    );

    assert_eq!(state.records(), &[user("7", "Zed")]);
    assert_eq!(state.view_state().current_page, 1);
    assert!(!state.is_loading());
    assert!(state.view().show_table);
}

#[test]
fn http_failure_keeps_records_and_shows_banner() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AppStarted);
    let (id, _) = fetch_request(&effects);
    let (state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: id,
            result: Ok(vec![user("1", "Alice")]),
        },
    );

    let (state, effects) = update(state, Msg::RefreshRequested);
    let (id, _) = fetch_request(&effects);
    let (mut state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: id,
            result: Err(LoadFailure::Failed("http status 500".to_string())),
        },
    );

    assert!(state.consume_dirty());
    assert!(!state.is_loading());
    assert_eq!(state.records(), &[user("1", "Alice")]);
    let view = state.view();
    match view.status {
        StatusView::Error(banner) => assert_eq!(banner.detail, "http status 500"),
        other => panic!("expected error banner, got {other:?}"),
    }
    assert!(!view.show_table);

    let (state, _) = update(state, Msg::DismissNotice);
    assert!(state.view().show_table);
}

#[test]
fn superseded_fetch_result_is_dropped() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "https://slow.example.com/users");
    let (slow_id, _) = fetch_request(&effects);
    let (state, effects) = submit_url(state, "https://fast.example.com/users");
    let (fast_id, _) = fetch_request(&effects);

    let (mut state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: fast_id,
            result: Ok(vec![user("2", "Fast")]),
        },
    );
    assert!(state.consume_dirty());
    let (mut state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: slow_id,
            result: Ok(vec![user("1", "Slow")]),
        },
    );

    assert!(!state.consume_dirty());
    assert_eq!(state.records(), &[user("2", "Fast")]);
}

#[test]
fn cancelled_fetch_is_not_an_error() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AppStarted);
    let (id, _) = fetch_request(&effects);
    let (state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: id,
            result: Err(LoadFailure::Cancelled),
        },
    );

    assert_eq!(state.error(), None);
    assert!(!state.is_loading());
    assert_eq!(state.view().status, StatusView::Ready);
}

#[test]
fn cancellation_of_replaced_fetch_keeps_loading_state() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AppStarted);
    let (old_id, _) = fetch_request(&effects);
    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, _) = update(
        state,
        Msg::RecordsLoaded {
            request_id: old_id,
            result: Err(LoadFailure::Cancelled),
        },
    );

    assert!(state.is_loading());
    assert_eq!(state.error(), None);
}
