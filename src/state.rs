use crate::gate::PasswordGate;
use crate::types::{
    InputMode, LoadingState, PageState, PanelFocus, PreviewField, UrlInputField,
};

/// Data fetched from the backend
#[derive(Debug, Clone)]
pub struct DataState {
    pub pages: Vec<String>,
    pub loading_state: LoadingState,
    pub retry_count: u32,
}

/// Text typed into the modals
#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub api_url_input: String,
    pub public_api_url_input: String,
    /// track which field is active
    pub active_url_field: UrlInputField,
    /// Validation message shown in the URL modal
    pub url_error: Option<String>,
    pub path_input: String,
    pub preview_content_type: String,
    pub preview_token: String,
    pub active_preview_field: PreviewField,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub panel_focus: PanelFocus,
    pub selected_index: usize,
    /// Scroll offset for the page panel (lines)
    pub page_scroll: u16,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub data: DataState,
    pub input: InputState,
    pub ui: UiState,
    pub page: PageState,
    /// Password gate of the current page, if it is protected
    pub gate: Option<PasswordGate>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            data: DataState {
                pages: Vec::new(),
                loading_state: LoadingState::Idle,
                retry_count: 0,
            },
            input: InputState {
                mode: InputMode::Normal,
                api_url_input: String::new(),
                public_api_url_input: String::new(),
                active_url_field: UrlInputField::ApiUrl,
                url_error: None,
                path_input: String::new(),
                preview_content_type: String::new(),
                preview_token: String::new(),
                active_preview_field: PreviewField::ContentType,
            },
            ui: UiState {
                panel_focus: PanelFocus::PagesList,
                selected_index: 0,
                page_scroll: 0,
            },
            page: PageState::Empty,
            gate: None,
        }
    }
}

impl AppState {
    /// Path of the highlighted entry in the pages list
    pub fn selected_path(&self) -> Option<&str> {
        self.data
            .pages
            .get(self.ui.selected_index)
            .map(String::as_str)
    }

    /// True while the gate waits for a password (not revealed)
    pub fn gate_locked(&self) -> bool {
        self.gate.as_ref().is_some_and(|gate| !gate.is_revealed())
    }
}
