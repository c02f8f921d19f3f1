//! Event handling
//!
//! This module processes user input and translates it into state-changing
//! actions. It handles the input modes:
//! - Normal: navigation and commands
//! - EnteringUrl: modal for configuring the API URLs
//! - EnteringPath: modal for opening a page by path
//! - EnteringPreview: modal for loading a page preview
//! - EnteringPassword: the password form of a protected page
//!
//! Input generates [`AppAction`]s applied through `actions::apply`. Work
//! that needs the network is handed back to the app as a [`Command`].
//! Locks on the shared state are taken per action and never held while
//! waiting for input.

mod helpers;
mod modals;

use crate::actions::{apply, AppAction};
use crate::config::ServerConfig;
use crate::state::AppState;
use crate::types::{Command, InputMode, PageState, PanelFocus};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use helpers::{collect_paste_batch, snapshot};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one terminal event and dispatch it
    pub fn handle_events(
        &mut self,
        state: &Arc<RwLock<AppState>>,
        server: &ServerConfig,
    ) -> Result<Option<Command>> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        // Batch plain characters typed into a text field so pastes are fast
        let typing = snapshot(state, |s| s.input.mode != InputMode::Normal).unwrap_or(false);
        if typing {
            if let KeyCode::Char(c) = key.code {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    let (text, next) = collect_paste_batch(c);
                    modals::insert_text(state, text);
                    return Ok(next.and_then(|next| self.handle_key(next, state, server)));
                }
            }
        }

        Ok(self.handle_key(key, state, server))
    }

    /// Dispatch a key according to the current input mode
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &Arc<RwLock<AppState>>,
        server: &ServerConfig,
    ) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        let mode = snapshot(state, |s| s.input.mode.clone())?;

        match mode {
            InputMode::EnteringUrl => modals::handle_url_input(key, state),
            InputMode::EnteringPath => modals::handle_path_input(key, state),
            InputMode::EnteringPreview => modals::handle_preview_input(key, state),
            InputMode::EnteringPassword => modals::handle_password_input(key, state),
            InputMode::Normal => self.handle_normal(key, state, server),
        }
    }

    fn handle_normal(
        &mut self,
        key: KeyEvent,
        state: &Arc<RwLock<AppState>>,
        server: &ServerConfig,
    ) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => apply(state, AppAction::TogglePanelFocus),
            KeyCode::Char('1') => set_focus(state, PanelFocus::PagesList),
            KeyCode::Char('2') => set_focus(state, PanelFocus::Page),

            // Scrolling the page panel works from either panel
            KeyCode::Char('d') if ctrl => apply(state, AppAction::ScrollDown),
            KeyCode::Char('u') if ctrl => apply(state, AppAction::ScrollUp),

            KeyCode::Char('j') | KeyCode::Down => {
                let action = match focus(state)? {
                    PanelFocus::PagesList => AppAction::NavigateDown,
                    PanelFocus::Page => AppAction::ScrollDown,
                };
                apply(state, action);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let action = match focus(state)? {
                    PanelFocus::PagesList => AppAction::NavigateUp,
                    PanelFocus::Page => AppAction::ScrollUp,
                };
                apply(state, action);
            }

            KeyCode::Enter => return handle_enter(state),

            KeyCode::Char('r') | KeyCode::F(5) => return Some(Command::RefreshPages),
            KeyCode::Char('o') => apply(state, AppAction::EnterPathInputMode),
            KeyCode::Char('p') => apply(state, AppAction::EnterPreviewInputMode),
            KeyCode::Char('i') => apply(state, AppAction::EnterPasswordMode),
            KeyCode::Char(',') => modals::handle_url_dialog(state, server),
            _ => {}
        }
        None
    }
}

/// Enter opens the selected page, follows a relative redirect or returns to
/// the password form
fn handle_enter(state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let (focus, selected, redirect_to, gate_locked) = snapshot(state, |s| {
        let redirect_to = match &s.page {
            PageState::Redirect { redirect, .. } if redirect.redirect_url.starts_with('/') => {
                Some(redirect.redirect_url.clone())
            }
            _ => None,
        };
        (
            s.ui.panel_focus.clone(),
            s.selected_path().map(str::to_string),
            redirect_to,
            s.gate_locked(),
        )
    })?;

    match focus {
        PanelFocus::PagesList => selected.map(Command::OpenPage),
        PanelFocus::Page => {
            if let Some(to) = redirect_to {
                debug!(%to, "following redirect");
                return Some(Command::OpenPage(to));
            }
            if gate_locked {
                apply(state, AppAction::EnterPasswordMode);
            }
            None
        }
    }
}

fn focus(state: &Arc<RwLock<AppState>>) -> Option<PanelFocus> {
    snapshot(state, |s| s.ui.panel_focus.clone())
}

fn set_focus(state: &Arc<RwLock<AppState>>, target: PanelFocus) {
    if focus(state).is_some_and(|current| current != target) {
        apply(state, AppAction::TogglePanelFocus);
    }
}
