//! Generic GET/POST wrappers shared by every endpoint
//!
//! Both wrappers snake-case the outgoing parameters, send the default
//! `Content-Type: application/json` header merged with caller headers, and
//! camel-case the JSON they return. Anything outside `[200, 300)` becomes an
//! [`Error::Request`] carrying the buffered response.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::case::{keys_to_camel, params_to_snake};
use crate::error::{Error, ErrorResponse, RequestError};

/// Request parameters, keyed in camelCase at the call site
pub type Params = Map<String, Value>;

/// Per-call request options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Extra headers in insertion order, merged over the defaults. Names
    /// compare case-insensitively and the last one wins.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header; a later header with the same name replaces it when sent
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the last header named `name`, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// True for statuses in `[200, 300)`
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Performs a GET with `params` encoded as the query string
pub async fn get_request(
    http: &reqwest::Client,
    url: &str,
    params: Params,
    options: &RequestOptions,
) -> Result<Value, Error> {
    let headers = build_headers(options)?;
    let full_url = build_get_url(url, params);

    debug!(url = %full_url, "GET");
    let response = http.get(&full_url).headers(headers).send().await?;

    read_response(&full_url, response).await
}

/// Performs a POST with `params` encoded as the JSON body
pub async fn post_request(
    http: &reqwest::Client,
    url: &str,
    params: Params,
    options: &RequestOptions,
) -> Result<Value, Error> {
    let headers = build_headers(options)?;
    let body = serde_json::to_string(&Value::Object(params_to_snake(params)))?;

    debug!(url = %url, "POST");
    let response = http.post(url).headers(headers).body(body).send().await?;

    read_response(url, response).await
}

/// Default headers with the caller's headers merged on top
pub(crate) fn build_headers(options: &RequestOptions) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        // HeaderMap names are case-insensitive, so this replaces the default
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Snake-case `params` and append them to `url` after a literal `?`
pub(crate) fn build_get_url(url: &str, params: Params) -> String {
    let query = build_query_string(&params_to_snake(params));
    format!("{url}?{query}")
}

/// Encode a parameter map; arrays repeat their key once per element.
///
/// Spaces become `%20` and `!'()*~` stay literal, like Node's
/// `querystring.stringify`.
pub(crate) fn build_query_string(params: &Params) -> String {
    let mut pairs = Vec::new();

    for (key, value) in params {
        let key = encode_component(key);
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push(format!("{key}={}", encode_component(&query_value(item))));
                }
            }
            other => {
                pairs.push(format!("{key}={}", encode_component(&query_value(other))));
            }
        }
    }

    pairs.join("&")
}

fn encode_component(input: &str) -> String {
    // byte_serialize yields unescaped runs whole and each escaped byte alone
    form_urlencoded::byte_serialize(input.as_bytes())
        .map(|chunk| match chunk {
            "+" => "%20",
            "%21" => "!",
            "%27" => "'",
            "%28" => "(",
            "%29" => ")",
            "%7E" => "~",
            other => other,
        })
        .collect()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

async fn read_response(url: &str, response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();

    if !is_success(status.as_u16()) {
        let status_text = status.canonical_reason().unwrap_or("").to_string();

        // Extract headers (normalize keys to lowercase for consistency)
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_lowercase(),
                    value.to_str().unwrap_or("").to_string(),
                )
            })
            .collect();

        let body = response.text().await.unwrap_or_default();

        warn!(url = %url, status = status.as_u16(), "request failed");
        return Err(RequestError::new(ErrorResponse {
            url: url.to_string(),
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
        .into());
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(&body)?;
    Ok(keys_to_camel(value))
}
