//! Modal dialog handlers
//!
//! This module handles user input for the modal dialogs and the password
//! form. Each handler returns the [`Command`] to run when a dialog is
//! submitted.

use super::helpers::snapshot;
use crate::actions::{apply, apply_many, AppAction};
use crate::config::{self, ServerConfig};
use crate::state::AppState;
use crate::types::{Command, InputMode, UrlSubmission};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Open the URL modal prefilled with the current configuration
pub fn handle_url_dialog(state: &Arc<RwLock<AppState>>, server: &ServerConfig) {
    apply(
        state,
        AppAction::EnterUrlInputMode {
            api_url: server.api_url.clone(),
            public_api_url: server.public_api_url.clone(),
        },
    );
    debug!("entering URL input mode");
}

/// Typed (or pasted) text for whichever field the current mode edits
pub fn insert_text(state: &Arc<RwLock<AppState>>, text: String) {
    let Some(mode) = snapshot(state, |s| s.input.mode.clone()) else {
        return;
    };

    let action = match mode {
        InputMode::EnteringUrl => AppAction::AppendToUrlInput(text),
        InputMode::EnteringPath => AppAction::AppendToPathInput(text),
        InputMode::EnteringPreview => AppAction::AppendToPreviewInput(text),
        InputMode::EnteringPassword => AppAction::AppendToPassword(text),
        InputMode::Normal => return,
    };
    apply(state, action);
}

/// Handle the URL configuration modal
pub fn handle_url_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Tab => apply(state, AppAction::ToggleUrlField),
        KeyCode::Esc => {
            apply(state, AppAction::ExitUrlInputMode);
            debug!("URL input cancelled");
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceUrlInput),
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::DeleteWordUrlInput);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearUrlInput);
        }
        KeyCode::Char(c) => insert_text(state, c.to_string()),
        KeyCode::Enter => return submit_urls(state),
        _ => {}
    }
    None
}

fn submit_urls(state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let (api_url, public_api_url) = snapshot(state, |s| {
        (
            s.input.api_url_input.trim().to_string(),
            s.input.public_api_url_input.trim().to_string(),
        )
    })?;

    if let Err(e) = config::validate_url(&api_url) {
        debug!(error = %e, "invalid API URL");
        apply(state, AppAction::SetUrlError(format!("API URL: {e}")));
        return None;
    }

    if !public_api_url.is_empty() {
        if let Err(e) = config::validate_url(&public_api_url) {
            debug!(error = %e, "invalid public API URL");
            apply(state, AppAction::SetUrlError(format!("Public API URL: {e}")));
            return None;
        }
    }

    apply(state, AppAction::ExitUrlInputMode);

    let submission = UrlSubmission {
        api_url,
        public_api_url: Some(public_api_url).filter(|url| !url.is_empty()),
    };
    debug!(api_url = %submission.api_url, public_api_url = ?submission.public_api_url, "URLs submitted");

    Some(Command::SaveUrls(submission))
}

/// Handle the "open page by path" modal
pub fn handle_path_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::ExitPathInputMode),
        KeyCode::Backspace => apply(state, AppAction::BackspacePathInput),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearPathInput);
        }
        KeyCode::Char(c) => insert_text(state, c.to_string()),
        KeyCode::Enter => {
            let path = snapshot(state, |s| s.input.path_input.trim().to_string())?;
            if path.is_empty() {
                return None;
            }

            apply(state, AppAction::ExitPathInputMode);
            let path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
            return Some(Command::OpenPage(path));
        }
        _ => {}
    }
    None
}

/// Handle the preview modal
pub fn handle_preview_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Tab => apply(state, AppAction::TogglePreviewField),
        KeyCode::Esc => apply(state, AppAction::ExitPreviewInputMode),
        KeyCode::Backspace => apply(state, AppAction::BackspacePreviewInput),
        KeyCode::Char(c) => insert_text(state, c.to_string()),
        KeyCode::Enter => {
            let (content_type, token) = snapshot(state, |s| {
                (
                    s.input.preview_content_type.trim().to_string(),
                    s.input.preview_token.trim().to_string(),
                )
            })?;

            if content_type.is_empty() || token.is_empty() {
                // Move to the missing field instead of submitting
                apply(state, AppAction::TogglePreviewField);
                return None;
            }

            apply(state, AppAction::ExitPreviewInputMode);
            return Some(Command::FetchPreview {
                content_type,
                token,
            });
        }
        _ => {}
    }
    None
}

/// Handle the password form of a protected page
pub fn handle_password_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::ExitPasswordMode),
        KeyCode::Backspace => apply(state, AppAction::BackspacePassword),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearPassword);
        }
        KeyCode::Char(c) => insert_text(state, c.to_string()),
        KeyCode::Enter => {
            let ready = snapshot(state, |s| {
                s.gate
                    .as_ref()
                    .is_some_and(|gate| !gate.is_revealed() && !gate.is_submitting())
            })?;
            if ready {
                return Some(Command::SubmitPassword);
            }
        }
        KeyCode::Tab => apply_many(
            state,
            vec![AppAction::ExitPasswordMode, AppAction::TogglePanelFocus],
        ),
        _ => {}
    }
    None
}
