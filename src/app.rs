use crate::actions::{apply, apply_many, AppAction};
use crate::api::CmsClient;
use crate::config::Config;
use crate::registry::StaticRegistry;
use crate::state::AppState;
use crate::tasks;
use crate::types::{Command, InputMode, UrlSubmission};
use crate::ui::{draw, EventHandler};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    list_state: ListState,
    config: Config,
    client: Option<CmsClient>,
    registry: StaticRegistry,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: EventHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let registry = StaticRegistry::with_props_views(config.components.names.iter().cloned());
        let state = Arc::new(RwLock::new(AppState::default()));

        let client = match config.client_config() {
            Ok(client_config) => client_config.map(CmsClient::new),
            Err(e) => {
                warn!(error = %e, "configured API URL is invalid");
                apply(&state, AppAction::SetUrlError(e.to_string()));
                None
            }
        };

        let app = Self {
            state,
            list_state: ListState::default(),
            config,
            client,
            registry,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: EventHandler::new(),
        };

        // Show URL modal if no usable config
        if app.client.is_none() {
            app.open_url_modal();
        }

        app
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        if let Some(client) = &self.client {
            tasks::fetch_pages_background(Arc::clone(&self.state), client.clone());
        }

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            if let Some(command) = self
                .event_handler
                .handle_events(&self.state, &self.config.server)?
            {
                self.dispatch(command);
            }
        }

        info!("quitting");
        Ok(())
    }

    /// Start the work a command asks for. Failures end up in the state, never here.
    fn dispatch(&mut self, command: Command) {
        if let Command::SaveUrls(submission) = command {
            self.save_urls(submission);
            return;
        }

        let Some(client) = self.client.clone() else {
            self.open_url_modal();
            return;
        };
        let state = Arc::clone(&self.state);

        match command {
            Command::RefreshPages => {
                tasks::fetch_pages_background(state, client);
            }
            Command::OpenPage(path) => {
                info!(%path, "opening page");
                tasks::open_page_background(state, client, path);
            }
            Command::FetchPreview {
                content_type,
                token,
            } => {
                info!(%content_type, "loading preview");
                tasks::fetch_preview_background(state, client, content_type, token);
            }
            Command::SubmitPassword => {
                tasks::submit_password_background(state, client);
            }
            Command::SaveUrls(_) => {}
        }
    }

    fn save_urls(&mut self, submission: UrlSubmission) {
        if let Err(e) = self
            .config
            .set_urls(submission.api_url, submission.public_api_url)
        {
            // The new URLs are still used for this session
            warn!(error = %e, "failed to save config");
        }

        match self.config.client_config() {
            Ok(Some(client_config)) => {
                info!(api_url = %client_config.api_base_url, "API configured");
                let client = CmsClient::new(client_config);
                tasks::fetch_pages_background(Arc::clone(&self.state), client.clone());
                self.client = Some(client);
            }
            Ok(None) => self.open_url_modal(),
            Err(e) => {
                warn!(error = %e, "rejected API URL");
                self.open_url_modal();
                apply(&self.state, AppAction::SetUrlError(e.to_string()));
            }
        }
    }

    fn open_url_modal(&self) {
        let url_error = self.state.read().ok().and_then(|s| s.input.url_error.clone());

        let mut actions = vec![AppAction::EnterUrlInputMode {
            api_url: self.config.server.api_url.clone(),
            public_api_url: self.config.server.public_api_url.clone(),
        }];
        if let Some(message) = url_error {
            actions.push(AppAction::SetUrlError(message));
        }
        apply_many(&self.state, actions);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        // Create main layout: Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[1]);

        let display_url = self
            .config
            .server
            .api_url
            .as_deref()
            .unwrap_or("No URL configured");

        draw::render_header(
            frame,
            main_chunks[0],
            display_url,
            &state.data.loading_state,
            state.data.pages.len(),
        );

        draw::render_pages_panel(
            frame,
            body_chunks[0],
            &state,
            self.spinner_index,
            &mut self.list_state,
        );
        draw::render_page_panel(
            frame,
            body_chunks[1],
            &state,
            &self.registry,
            self.spinner_index,
        );

        draw::render_footer(frame, main_chunks[2], &state.input.mode, &state.ui.panel_focus);

        // Render modals LAST - after everything else
        match state.input.mode {
            InputMode::EnteringUrl => draw::render_url_input_modal(frame, &state),
            InputMode::EnteringPath => draw::render_path_input_modal(frame, &state),
            InputMode::EnteringPreview => draw::render_preview_input_modal(frame, &state),
            InputMode::Normal | InputMode::EnteringPassword => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_starts_in_url_modal_without_config() {
        let mut app = App::new(Config::default());
        assert!(app.client.is_none());
        assert_eq!(
            app.state.read().unwrap().input.mode,
            InputMode::EnteringUrl
        );

        let text = screen(&mut app);
        assert!(text.contains("No URL configured"));
        assert!(text.contains("Configure CMS API"));
    }

    #[test]
    fn test_invalid_configured_url_is_reported() {
        let mut config = Config::default();
        config.server.api_url = Some("not a url".to_string());

        let app = App::new(config);
        let s = app.state.read().unwrap();
        assert_eq!(s.input.mode, InputMode::EnteringUrl);
        assert_eq!(s.input.api_url_input, "not a url");
        assert!(s.input.url_error.is_some());
    }

    #[test]
    fn test_configured_app_shows_panels() {
        let mut config = Config::default();
        config.server.api_url = Some("http://localhost:8000/api".to_string());

        let mut app = App::new(config);
        assert!(app.client.is_some());
        assert_eq!(app.state.read().unwrap().input.mode, InputMode::Normal);
        assert_eq!(
            app.registry.names(),
            vec!["ArticlePage", "BasePage", "HomePage", "NotFoundPage"]
        );

        let text = screen(&mut app);
        assert!(text.contains("http://localhost:8000/api"));
        assert!(text.contains("[1] Pages"));
        assert!(text.contains("[2] Page"));
    }
}
