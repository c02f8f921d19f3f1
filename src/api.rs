//! Endpoint functions for the CMS page API
//!
//! Every endpoint is a URL/parameter builder delegating to
//! [`get_request`] or [`post_request`]. Two base URLs are kept apart: the
//! server-side API and the public one a browser can reach directly.

use serde_json::{json, Value};
use url::Url;

use crate::error::Error;
use crate::request::{get_request, post_request, Params, RequestOptions};

/// Base URLs the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server-side API root (`WAGTAIL_API_URL`)
    pub api_base_url: String,
    /// Public API root reachable from a browser (`NEXT_PUBLIC_WAGTAIL_API_URL`)
    pub public_api_base_url: String,
}

impl ClientConfig {
    /// Validate both base URLs and strip trailing slashes
    pub fn new(api_base_url: &str, public_api_base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            public_api_base_url: normalize_base_url(public_api_base_url)?,
        })
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, Error> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    Ok(trimmed.to_string())
}

/// Client for the headless CMS page endpoints
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CmsClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch a page by its html path
    pub async fn get_page(
        &self,
        path: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let params = with_defaults(json!({ "htmlPath": path }), params);
        let url = format!("{}/v1/page_by_path/", self.config.api_base_url);
        get_request(&self.http, &url, params, options).await
    }

    /// Exchange a password (in `params`) for a protected page.
    ///
    /// Goes to the public API; the anti-forgery token travels in `options`.
    pub async fn get_password_protected_page(
        &self,
        restriction_id: u64,
        page_id: u64,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let url = format!(
            "{}/v1/password_protected_page/{restriction_id}/{page_id}/",
            self.config.public_api_base_url
        );
        post_request(&self.http, &url, params, options).await
    }

    /// List the relative urls of every page
    pub async fn get_all_pages(&self) -> Result<Value, Error> {
        let url = format!("{}/v1/page_relative_urls/", self.config.api_base_url);
        get_request(&self.http, &url, Params::new(), &RequestOptions::default()).await
    }

    /// Fetch an unpublished revision by content type and preview token
    pub async fn get_page_preview(
        &self,
        content_type: &str,
        token: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let params = with_defaults(
            json!({ "contentType": content_type, "token": token }),
            params,
        );
        let url = format!("{}/v1/page_preview/", self.config.api_base_url);
        get_request(&self.http, &url, params, options).await
    }

    pub async fn get_public_view_data(
        &self,
        slug: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let url = format!(
            "{}/v1/external_view_data/{slug}/",
            self.config.public_api_base_url
        );
        get_request(&self.http, &url, params, options).await
    }

    // No trailing slash here, unlike the public variant.
    pub async fn get_view_data(
        &self,
        slug: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let url = format!("{}/v1/external_view_data/{slug}", self.config.api_base_url);
        get_request(&self.http, &url, params, options).await
    }

    /// Look up a redirect registered for `path`
    pub async fn get_redirect(
        &self,
        path: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Value, Error> {
        let params = with_defaults(json!({ "htmlPath": path }), params);
        let url = format!("{}/v1/redirect_by_path/", self.config.api_base_url);
        get_request(&self.http, &url, params, options).await
    }
}

/// Built-in params first, caller params override on the same key
fn with_defaults(defaults: Value, params: Params) -> Params {
    let mut merged = match defaults {
        Value::Object(map) => map,
        _ => Params::new(),
    };
    merged.extend(params);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    async fn setup() -> (ServerGuard, ServerGuard, CmsClient) {
        let api = Server::new_async().await;
        let public = Server::new_async().await;
        let config = ClientConfig::new(&api.url(), &public.url()).unwrap();
        (api, public, CmsClient::new(config))
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("params must be an object"),
        }
    }

    #[test]
    fn test_client_config_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/api/", "https://cms.example.com/").unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.public_api_base_url, "https://cms.example.com");
    }

    #[test]
    fn test_client_config_rejects_invalid_url() {
        let err = ClientConfig::new("not a valid url", "http://localhost").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_with_defaults_caller_wins() {
        let merged = with_defaults(
            json!({"htmlPath": "/about"}),
            params(json!({"htmlPath": "/override", "extra": 1})),
        );
        assert_eq!(merged.get("htmlPath"), Some(&json!("/override")));
        assert_eq!(merged.get("extra"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_get_page_issues_expected_query() {
        let (mut api, _public, client) = setup().await;
        let mock = api
            .mock("GET", "/v1/page_by_path/")
            .match_query(Matcher::Exact("html_path=%2Fabout".into()))
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"component_name": "BasePage", "component_props": {"page_title": "About"}}"#)
            .expect(1)
            .create_async()
            .await;

        let page = client
            .get_page("/about", Params::new(), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(
            page,
            json!({"componentName": "BasePage", "componentProps": {"pageTitle": "About"}})
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_password_protected_page_uses_public_api() {
        let (_api, mut public, client) = setup().await;
        let mock = public
            .mock("POST", "/v1/password_protected_page/3/42/")
            .match_header("x-csrftoken", "csrf-abc")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"password": "secret"})))
            .with_status(200)
            .with_body(r#"{"component_name": "HomePage", "component_props": {}}"#)
            .expect(1)
            .create_async()
            .await;

        let page = client
            .get_password_protected_page(
                3,
                42,
                params(json!({"password": "secret"})),
                &RequestOptions::new().header("X-CSRFToken", "csrf-abc"),
            )
            .await
            .unwrap();

        assert_eq!(page["componentName"], "HomePage");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_all_pages() {
        let (mut api, _public, client) = setup().await;
        let mock = api
            .mock("GET", "/v1/page_relative_urls/")
            .match_query(Matcher::Exact(String::new()))
            .with_status(200)
            .with_body(r#"{"items": [{"relative_url": "/"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let pages = client.get_all_pages().await.unwrap();
        assert_eq!(pages, json!({"items": [{"relativeUrl": "/"}]}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_page_preview_query() {
        let (mut api, _public, client) = setup().await;
        let mock = api
            .mock("GET", "/v1/page_preview/")
            .match_query(Matcher::Exact("content_type=blogpage&token=tok123".into()))
            .with_status(200)
            .with_body(r#"{"component_name": "BlogPage", "component_props": {}}"#)
            .expect(1)
            .create_async()
            .await;

        let preview = client
            .get_page_preview("blogpage", "tok123", Params::new(), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(preview["componentName"], "BlogPage");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_view_data_endpoints() {
        let (mut api, mut public, client) = setup().await;
        let public_mock = public
            .mock("GET", "/v1/external_view_data/menu/")
            .match_query(Matcher::UrlEncoded("menu_level".into(), "2".into()))
            .with_status(200)
            .with_body(r#"{"menu_items": []}"#)
            .expect(1)
            .create_async()
            .await;
        let api_mock = api
            .mock("GET", "/v1/external_view_data/menu")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"menu_items": [{"link_text": "Home"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let public_data = client
            .get_public_view_data("menu", params(json!({"menuLevel": 2})), &RequestOptions::default())
            .await
            .unwrap();
        let server_data = client
            .get_view_data("menu", Params::new(), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(public_data, json!({"menuItems": []}));
        assert_eq!(server_data, json!({"menuItems": [{"linkText": "Home"}]}));
        public_mock.assert_async().await;
        api_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_redirect_query() {
        let (mut api, _public, client) = setup().await;
        let mock = api
            .mock("GET", "/v1/redirect_by_path/")
            .match_query(Matcher::UrlEncoded("html_path".into(), "/old-page/".into()))
            .with_status(200)
            .with_body(r#"{"html_path": "/old-page/", "redirect_url": "/new-page/", "is_permanent": true}"#)
            .expect(1)
            .create_async()
            .await;

        let redirect = client
            .get_redirect("/old-page/", Params::new(), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(redirect["redirectUrl"], "/new-page/");
        assert_eq!(redirect["isPermanent"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_endpoint_errors_propagate() {
        let (mut api, _public, client) = setup().await;
        let _mock = api
            .mock("GET", "/v1/page_by_path/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client
            .get_page("/", Params::new(), &RequestOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
