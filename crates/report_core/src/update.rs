use report_logging::{report_debug, report_info};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted | Msg::RefreshRequested => {
            let url = state.view_state().source_url.clone();
            start_fetch(&mut state, url)
        }
        Msg::SearchChanged(text) => {
            if state.set_search_text(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlInputChanged(text) => {
            if state.set_url_input(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlSubmitted => match state.activate_url_input() {
            Some(url) => start_fetch(&mut state, url),
            None => Vec::new(),
        },
        Msg::SortToggled(column) => {
            state.toggle_sort(column);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PageChanged(page) => {
            if state.go_to_page(page) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NextPage => {
            let next = state.view_state().current_page.saturating_add(1);
            if state.go_to_page(next) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PrevPage => {
            let prev = state.view_state().current_page.saturating_sub(1);
            if state.go_to_page(prev) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ColumnToggled(column) => {
            state.toggle_column(column);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.is_exporting() {
                return (state, Vec::new());
            }
            let (records, columns) = state.begin_export();
            report_info!(
                "Export requested rows={} columns={:?}",
                records.len(),
                columns
            );
            state.mark_dirty();
            vec![Effect::ExportPdf { records, columns }]
        }
        Msg::ExportFinished(result) => {
            state.finish_export(result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ThemeToggled => {
            let theme = state.theme().toggled();
            state.set_theme(theme);
            state.mark_dirty();
            vec![Effect::PersistTheme(theme)]
        }
        Msg::ThemeRestored(theme) => {
            if state.set_theme(theme) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RecordsLoaded { request_id, result } => {
            if state.apply_loaded(request_id, result) {
                state.mark_dirty();
            } else {
                report_debug!("Dropped stale fetch result request_id={}", request_id);
            }
            Vec::new()
        }
        Msg::DismissNotice => {
            if state.dismiss_notice() {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn start_fetch(state: &mut AppState, url: String) -> Vec<Effect> {
    let request_id = state.begin_fetch();
    state.mark_dirty();
    vec![Effect::FetchRecords { request_id, url }]
}
