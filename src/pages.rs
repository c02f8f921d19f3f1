//! Typed page payloads and page resolution
//!
//! Resolving a path is what a host does on top of [`CmsClient::get_page`]:
//! a 401 carries the props of a password gate, a 404 falls back to the
//! redirect table, anything else is an error for the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::api::CmsClient;
use crate::error::Error;
use crate::request::{Params, RequestOptions};

/// A page as the backend describes it: a component name plus its props
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub component_name: String,
    #[serde(default = "empty_props")]
    pub component_props: Value,
}

fn empty_props() -> Value {
    Value::Object(Map::new())
}

impl PageData {
    /// Parse a camel-cased response body
    pub fn from_value(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Props of the page returned with a 401 for a password-protected page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProtectedProps {
    pub restriction_id: u64,
    pub page_id: u64,
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    #[serde(default)]
    pub html_path: Option<String>,
    pub redirect_url: String,
    #[serde(default)]
    pub is_permanent: bool,
}

/// Outcome of resolving a path against the page API
#[derive(Debug, Clone, PartialEq)]
pub enum PageResolution {
    Page(PageData),
    PasswordRequired(PasswordProtectedProps),
    Redirect(Redirect),
    NotFound,
}

/// Fetch `path`, turning 401 and 404 responses into typed outcomes
pub async fn resolve_page(
    client: &CmsClient,
    path: &str,
    params: Params,
    options: &RequestOptions,
) -> Result<PageResolution, Error> {
    let err = match client.get_page(path, params.clone(), options).await {
        Ok(value) => return Ok(PageResolution::Page(PageData::from_value(value)?)),
        Err(Error::Request(err)) => err,
        Err(err) => return Err(err),
    };

    match err.status() {
        401 => {
            let page = PageData::from_value(err.json()?)?;
            let props: PasswordProtectedProps = serde_json::from_value(page.component_props)?;
            info!(path, restriction_id = props.restriction_id, "page is password protected");
            Ok(PageResolution::PasswordRequired(props))
        }
        404 => {
            debug!(path, "page not found, looking up redirect");
            match client.get_redirect(path, params, options).await {
                Ok(value) => Ok(PageResolution::Redirect(serde_json::from_value(value)?)),
                Err(redirect_err) if redirect_err.status() == Some(404) => {
                    Ok(PageResolution::NotFound)
                }
                Err(redirect_err) => Err(redirect_err),
            }
        }
        _ => Err(err.into()),
    }
}

/// Extract page paths from a `get_all_pages` payload.
///
/// Accepts a bare array or an object holding `pages` or `items`; entries are
/// either strings or objects with one of the known url fields.
pub fn page_paths(value: &Value) -> Vec<String> {
    let entries: &[Value] = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("pages").or_else(|| map.get("items")) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(path) => Some(path.clone()),
            Value::Object(map) => ["relativeUrl", "url", "htmlPath", "htmlUrl"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        })
        .collect()
}
