//! Background fetches
//!
//! Each function marks the state as loading, spawns the request on the tokio
//! runtime and writes the outcome back through [`apply`]. The returned handle
//! is only awaited by tests; the UI polls the shared state instead.

use crate::actions::{apply, AppAction};
use crate::api::CmsClient;
use crate::pages::{page_paths, resolve_page, PageData, PageResolution};
use crate::request::{Params, RequestOptions};
use crate::state::AppState;
use crate::types::InputMode;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fetch the list of page paths
pub fn fetch_pages_background(state: Arc<RwLock<AppState>>, client: CmsClient) -> JoinHandle<()> {
    apply(&state, AppAction::SetPagesLoading);

    tokio::spawn(async move {
        match client.get_all_pages().await {
            Ok(value) => {
                let pages = page_paths(&value);
                info!(count = pages.len(), "pages loaded");
                apply(&state, AppAction::SetPages(pages));
            }
            Err(e) => {
                warn!(error = %e, "failed to load pages");
                apply(&state, AppAction::SetPagesError(format!("Network error: {e}")));
            }
        }
    })
}

/// Resolve and load a single page
pub fn open_page_background(
    state: Arc<RwLock<AppState>>,
    client: CmsClient,
    path: String,
) -> JoinHandle<()> {
    apply(&state, AppAction::SetPageLoading(path.clone()));

    tokio::spawn(async move {
        let result = resolve_page(&client, &path, Params::new(), &RequestOptions::default()).await;
        let action = match result {
            Ok(resolution) => AppAction::SetPageResolved { path, resolution },
            Err(e) => {
                warn!(%path, error = %e, "failed to load page");
                AppAction::SetPageError {
                    path,
                    message: e.to_string(),
                }
            }
        };
        apply(&state, action);
    })
}

/// Load an unpublished revision into the page panel
pub fn fetch_preview_background(
    state: Arc<RwLock<AppState>>,
    client: CmsClient,
    content_type: String,
    token: String,
) -> JoinHandle<()> {
    let path = format!("preview:{content_type}");
    apply(&state, AppAction::SetPageLoading(path.clone()));

    tokio::spawn(async move {
        let result = client
            .get_page_preview(&content_type, &token, Params::new(), &RequestOptions::default())
            .await
            .and_then(PageData::from_value);

        let action = match result {
            Ok(page) => AppAction::SetPageResolved {
                path,
                resolution: PageResolution::Page(page),
            },
            Err(e) => {
                warn!(%content_type, error = %e, "failed to load preview");
                AppAction::SetPageError {
                    path,
                    message: e.to_string(),
                }
            }
        };
        apply(&state, action);
    })
}

/// Send the typed password for the current gate.
///
/// Returns `None` when there is no gate or a submission is already running.
pub fn submit_password_background(
    state: Arc<RwLock<AppState>>,
    client: CmsClient,
) -> Option<JoinHandle<()>> {
    let submission = {
        let mut s = state.write().ok()?;
        s.gate.as_mut()?.begin_submit()?
    };

    Some(tokio::spawn(async move {
        let submission_id = submission.id;
        let result = submission.send(&client).await;

        if let Ok(mut s) = state.write() {
            // The gate may have been replaced by another page in the meantime
            let Some(gate) = s.gate.as_mut() else {
                return;
            };
            let revealed = gate.complete(submission_id, result) && gate.is_revealed();
            if revealed {
                s.input.mode = InputMode::Normal;
            }
        }
    }))
}
