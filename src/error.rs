use serde_json::Value;
use std::collections::HashMap;

use crate::case::keys_to_camel;

/// A non-2xx response, buffered so callers can inspect it after the fact
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub url: String,
    pub status: u16,
    /// Canonical reason phrase ("Not Found"), empty for unregistered codes
    pub status_text: String,
    /// Header names are normalized to lowercase
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Raised whenever the backend answers outside `[200, 300)`.
///
/// Displays as the status text only. Callers that need to tell a 401 from a
/// 404 look at [`RequestError::status`] or the full [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .response.status_text)]
pub struct RequestError {
    response: ErrorResponse,
}

impl RequestError {
    pub fn new(response: ErrorResponse) -> Self {
        Self { response }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn status_text(&self) -> &str {
        &self.response.status_text
    }

    pub fn response(&self) -> &ErrorResponse {
        &self.response
    }

    /// Parse the error body as JSON, camel-casing keys like a success body
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        let value: Value = serde_json::from_str(&self.response.body)?;
        Ok(keys_to_camel(value))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Request(#[from] RequestError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl Error {
    /// HTTP status of the failed response, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request(err) => Some(err.status()),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            Error::Request(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn request_error(status: u16, status_text: &str, body: &str) -> Error {
    Error::Request(RequestError::new(ErrorResponse {
        url: "http://cms.test/v1/page_by_path/?html_path=%2F".to_string(),
        status,
        status_text: status_text.to_string(),
        headers: HashMap::new(),
        body: body.to_string(),
    }))
}
