use crate::gate::PasswordGate;
use crate::pages::PageResolution;
use crate::state::AppState;
use crate::types::{InputMode, LoadingState, PageState, PanelFocus, PreviewField, UrlInputField};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Every state change the UI and the background tasks can make
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation actions
    NavigateUp,
    NavigateDown,
    TogglePanelFocus,

    // Scrolling actions
    ScrollUp,
    ScrollDown,

    // URL modal
    EnterUrlInputMode {
        api_url: Option<String>,
        public_api_url: Option<String>,
    },
    ExitUrlInputMode,
    ToggleUrlField,
    AppendToUrlInput(String),
    BackspaceUrlInput,
    ClearUrlInput,
    DeleteWordUrlInput,
    SetUrlError(String),

    // Path modal
    EnterPathInputMode,
    ExitPathInputMode,
    AppendToPathInput(String),
    BackspacePathInput,
    ClearPathInput,

    // Preview modal
    EnterPreviewInputMode,
    ExitPreviewInputMode,
    TogglePreviewField,
    AppendToPreviewInput(String),
    BackspacePreviewInput,

    // Password gate
    EnterPasswordMode,
    ExitPasswordMode,
    AppendToPassword(String),
    BackspacePassword,
    ClearPassword,

    // Pages list
    SetPagesLoading,
    SetPages(Vec<String>),
    SetPagesError(String),

    // Page panel
    SetPageLoading(String),
    SetPageResolved {
        path: String,
        resolution: PageResolution,
    },
    SetPageError {
        path: String,
        message: String,
    },
}

/// Apply an action to the application state
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::NavigateUp => {
            state.ui.selected_index = state.ui.selected_index.saturating_sub(1);
        }
        AppAction::NavigateDown => {
            let last = state.data.pages.len().saturating_sub(1);
            state.ui.selected_index = (state.ui.selected_index + 1).min(last);
        }
        AppAction::TogglePanelFocus => {
            state.ui.panel_focus = match state.ui.panel_focus {
                PanelFocus::PagesList => PanelFocus::Page,
                PanelFocus::Page => PanelFocus::PagesList,
            };
        }

        // Scrolling
        AppAction::ScrollUp => {
            state.ui.page_scroll = state.ui.page_scroll.saturating_sub(5);
        }
        AppAction::ScrollDown => {
            state.ui.page_scroll = state.ui.page_scroll.saturating_add(5);
        }

        // URL modal
        AppAction::EnterUrlInputMode {
            api_url,
            public_api_url,
        } => {
            state.input.mode = InputMode::EnteringUrl;
            state.input.api_url_input = api_url.unwrap_or_default();
            state.input.public_api_url_input = public_api_url.unwrap_or_default();
            state.input.active_url_field = UrlInputField::ApiUrl;
            state.input.url_error = None;
        }
        AppAction::ExitUrlInputMode => {
            state.input.mode = InputMode::Normal;
            state.input.api_url_input.clear();
            state.input.public_api_url_input.clear();
            state.input.url_error = None;
        }
        AppAction::ToggleUrlField => {
            state.input.active_url_field = match state.input.active_url_field {
                UrlInputField::ApiUrl => UrlInputField::PublicApiUrl,
                UrlInputField::PublicApiUrl => UrlInputField::ApiUrl,
            };
        }
        AppAction::AppendToUrlInput(text) => {
            active_url_input(state).push_str(&text);
        }
        AppAction::BackspaceUrlInput => {
            active_url_input(state).pop();
        }
        AppAction::ClearUrlInput => {
            active_url_input(state).clear();
        }
        AppAction::DeleteWordUrlInput => {
            delete_word(active_url_input(state));
        }
        AppAction::SetUrlError(message) => {
            state.input.url_error = Some(message);
        }

        // Path modal
        AppAction::EnterPathInputMode => {
            state.input.mode = InputMode::EnteringPath;
            state.input.path_input.clear();
        }
        AppAction::ExitPathInputMode => {
            state.input.mode = InputMode::Normal;
            state.input.path_input.clear();
        }
        AppAction::AppendToPathInput(text) => {
            state.input.path_input.push_str(&text);
        }
        AppAction::BackspacePathInput => {
            state.input.path_input.pop();
        }
        AppAction::ClearPathInput => {
            state.input.path_input.clear();
        }

        // Preview modal
        AppAction::EnterPreviewInputMode => {
            state.input.mode = InputMode::EnteringPreview;
            state.input.active_preview_field = PreviewField::ContentType;
        }
        AppAction::ExitPreviewInputMode => {
            state.input.mode = InputMode::Normal;
        }
        AppAction::TogglePreviewField => {
            state.input.active_preview_field = match state.input.active_preview_field {
                PreviewField::ContentType => PreviewField::Token,
                PreviewField::Token => PreviewField::ContentType,
            };
        }
        AppAction::AppendToPreviewInput(text) => match state.input.active_preview_field {
            PreviewField::ContentType => state.input.preview_content_type.push_str(&text),
            PreviewField::Token => state.input.preview_token.push_str(&text),
        },
        AppAction::BackspacePreviewInput => {
            match state.input.active_preview_field {
                PreviewField::ContentType => state.input.preview_content_type.pop(),
                PreviewField::Token => state.input.preview_token.pop(),
            };
        }

        // Password gate
        AppAction::EnterPasswordMode => {
            if state.gate_locked() {
                state.input.mode = InputMode::EnteringPassword;
                state.ui.panel_focus = PanelFocus::Page;
            }
        }
        AppAction::ExitPasswordMode => {
            state.input.mode = InputMode::Normal;
        }
        AppAction::AppendToPassword(text) => {
            if let Some(gate) = state.gate.as_mut() {
                gate.push_str(&text);
            }
        }
        AppAction::BackspacePassword => {
            if let Some(gate) = state.gate.as_mut() {
                gate.backspace();
            }
        }
        AppAction::ClearPassword => {
            if let Some(gate) = state.gate.as_mut() {
                gate.clear_password();
            }
        }

        // Pages list
        AppAction::SetPagesLoading => {
            state.data.loading_state = LoadingState::Fetching;
        }
        AppAction::SetPages(pages) => {
            state.ui.selected_index = state.ui.selected_index.min(pages.len().saturating_sub(1));
            state.data.pages = pages;
            state.data.loading_state = LoadingState::Complete;
            state.data.retry_count = 0;
        }
        AppAction::SetPagesError(message) => {
            state.data.loading_state = LoadingState::Error(message);
            state.data.retry_count += 1;
        }

        // Page panel
        AppAction::SetPageLoading(path) => {
            state.page = PageState::Loading(path);
            state.gate = None;
            state.ui.page_scroll = 0;
        }
        AppAction::SetPageResolved { path, resolution } => {
            if !is_loading(state, &path) {
                debug!(%path, "dropping stale page result");
                return;
            }
            state.ui.page_scroll = 0;
            match resolution {
                PageResolution::Page(page) => {
                    debug!(%path, component = %page.component_name, "page loaded");
                    state.page = PageState::Loaded { path, page };
                    state.gate = None;
                }
                PageResolution::PasswordRequired(props) => {
                    info!(%path, "password required");
                    state.page = PageState::Protected { path };
                    state.gate = Some(PasswordGate::new(props));
                    state.input.mode = InputMode::EnteringPassword;
                    state.ui.panel_focus = PanelFocus::Page;
                }
                PageResolution::Redirect(redirect) => {
                    state.page = PageState::Redirect { path, redirect };
                    state.gate = None;
                }
                PageResolution::NotFound => {
                    state.page = PageState::NotFound(path);
                    state.gate = None;
                }
            }
        }
        AppAction::SetPageError { path, message } => {
            if !is_loading(state, &path) {
                debug!(%path, "dropping stale page error");
                return;
            }
            state.page = PageState::Failed { path, message };
            state.gate = None;
        }
    }
}

/// Apply a single action through the shared lock
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Apply multiple actions under one lock
pub fn apply_many(state: &Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    if let Ok(mut s) = state.write() {
        for action in actions {
            apply_action(action, &mut s);
        }
    }
}

/// Only the most recently requested page may land in the panel
fn is_loading(state: &AppState, path: &str) -> bool {
    matches!(&state.page, PageState::Loading(loading) if loading == path)
}

fn active_url_input(state: &mut AppState) -> &mut String {
    match state.input.active_url_field {
        UrlInputField::ApiUrl => &mut state.input.api_url_input,
        UrlInputField::PublicApiUrl => &mut state.input.public_api_url_input,
    }
}

/// Delete back to the previous `/` or whitespace (Ctrl+W behavior)
fn delete_word(s: &mut String) {
    let is_separator = |c: char| c == '/' || c.is_whitespace();

    let trimmed_len = s.trim_end_matches(is_separator).len();
    s.truncate(trimmed_len);

    match s.rfind(is_separator) {
        Some(pos) => s.truncate(pos + 1),
        None => s.clear(),
    }
}
