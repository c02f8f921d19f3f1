use crate::pages::{PageData, Redirect};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Fetching,
    Complete,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EnteringUrl,
    EnteringPath,
    EnteringPreview,
    EnteringPassword,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UrlInputField {
    ApiUrl,
    PublicApiUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewField {
    ContentType,
    Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlSubmission {
    pub api_url: String,
    pub public_api_url: Option<String>,
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, PartialEq)]
pub enum PanelFocus {
    PagesList, // Left panel
    Page,      // Right panel
}

/// What the page panel is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Empty,
    Loading(String),
    Loaded { path: String, page: PageData },
    /// Behind a password gate; the gate itself lives in `AppState::gate`
    Protected { path: String },
    Redirect { path: String, redirect: Redirect },
    NotFound(String),
    Failed { path: String, message: String },
}

/// Work the event loop hands back to the app
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RefreshPages,
    OpenPage(String),
    SubmitPassword,
    FetchPreview { content_type: String, token: String },
    SaveUrls(UrlSubmission),
}
