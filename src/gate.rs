//! Password gate for protected pages
//!
//! The gate starts in [`GateState::AwaitingPassword`], moves to
//! [`GateState::Error`] after a rejected submission (the entry form stays
//! visible with the message), and ends in [`GateState::Revealed`] once the
//! backend hands back the page. Every failure collapses into the same
//! [`INVALID_PASSWORD`] message; the detail only reaches the log.
//!
//! Submitting is split in two so a host can run the request without holding
//! a lock on the gate: [`PasswordGate::begin_submit`] produces a
//! [`GateSubmission`], and [`PasswordGate::complete`] consumes its result.

use serde_json::{json, Value};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::api::CmsClient;
use crate::error::Error;
use crate::pages::{PageData, PasswordProtectedProps};
use crate::request::{Params, RequestOptions};

pub const INVALID_PASSWORD: &str = "Invalid password";

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRFToken";

// Ids are unique across gates, so an answer never lands on another gate
// built from the same props.
static NEXT_SUBMISSION_ID: AtomicU64 = AtomicU64::new(1);

/// Backend able to exchange a password for a protected page
pub trait ProtectedPageSource {
    fn fetch_protected_page(
        &self,
        restriction_id: u64,
        page_id: u64,
        params: Params,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value, Error>> + Send;
}

impl ProtectedPageSource for CmsClient {
    fn fetch_protected_page(
        &self,
        restriction_id: u64,
        page_id: u64,
        params: Params,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value, Error>> + Send {
        async move {
            self.get_password_protected_page(restriction_id, page_id, params, &options)
                .await
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    AwaitingPassword,
    Error(String),
    Revealed(PageData),
}

/// One password submission, detached from the gate
#[derive(Debug, Clone, PartialEq)]
pub struct GateSubmission {
    /// Token [`PasswordGate::complete`] checks the answer against
    pub id: u64,
    pub restriction_id: u64,
    pub page_id: u64,
    pub params: Params,
    pub options: RequestOptions,
}

impl GateSubmission {
    pub async fn send<S: ProtectedPageSource>(self, source: &S) -> Result<Value, Error> {
        source
            .fetch_protected_page(self.restriction_id, self.page_id, self.params, self.options)
            .await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordGate {
    props: PasswordProtectedProps,
    password: String,
    state: GateState,
    /// Id of the submission in flight
    pending: Option<u64>,
}

impl PasswordGate {
    pub fn new(props: PasswordProtectedProps) -> Self {
        Self {
            props,
            password: String::new(),
            state: GateState::AwaitingPassword,
            pending: None,
        }
    }

    pub fn props(&self) -> &PasswordProtectedProps {
        &self.props
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, GateState::Revealed(_))
    }

    /// Message shown above the entry form, if any
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            GateState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn revealed_page(&self) -> Option<&PageData> {
        match &self.state {
            GateState::Revealed(page) => Some(page),
            _ => None,
        }
    }

    pub fn push_str(&mut self, text: &str) {
        if !self.is_revealed() {
            self.password.push_str(text);
        }
    }

    pub fn backspace(&mut self) {
        self.password.pop();
    }

    pub fn clear_password(&mut self) {
        self.password.clear();
    }

    /// Start a submission; `None` once revealed or while one is in flight
    pub fn begin_submit(&mut self) -> Option<GateSubmission> {
        if self.is_revealed() || self.is_submitting() {
            return None;
        }
        let id = NEXT_SUBMISSION_ID.fetch_add(1, Ordering::Relaxed);
        self.pending = Some(id);

        let mut params = Params::new();
        params.insert("password".to_string(), json!(self.password));

        Some(GateSubmission {
            id,
            restriction_id: self.props.restriction_id,
            page_id: self.props.page_id,
            params,
            options: RequestOptions::new().header(CSRF_HEADER, self.props.csrf_token.clone()),
        })
    }

    /// Apply the outcome of the submission `submission_id`.
    ///
    /// Answers to anything but the pending submission are dropped, which
    /// also keeps a revealed gate revealed. Returns whether it was applied.
    pub fn complete(&mut self, submission_id: u64, result: Result<Value, Error>) -> bool {
        if self.pending != Some(submission_id) {
            debug!(
                restriction_id = self.props.restriction_id,
                page_id = self.props.page_id,
                submission_id,
                "dropping stale password answer"
            );
            return false;
        }
        self.pending = None;

        // A 2xx body that is not a page counts as a rejection too
        match result.and_then(PageData::from_value) {
            Ok(page) => {
                info!(
                    restriction_id = self.props.restriction_id,
                    page_id = self.props.page_id,
                    component = %page.component_name,
                    "protected page revealed"
                );
                self.state = GateState::Revealed(page);
            }
            Err(err) => {
                debug!(
                    restriction_id = self.props.restriction_id,
                    page_id = self.props.page_id,
                    error = %err,
                    "password rejected"
                );
                self.state = GateState::Error(INVALID_PASSWORD.to_string());
            }
        }
        true
    }

    /// Submit the current password and wait for the outcome
    pub async fn submit<S: ProtectedPageSource>(&mut self, source: &S) {
        let Some(submission) = self.begin_submit() else {
            return;
        };
        let id = submission.id;
        let result = submission.send(source).await;
        self.complete(id, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientConfig;
    use crate::error::request_error;
    use mockito::Matcher;
    use std::sync::Mutex;

    /// Records every submission and answers with a canned result
    struct FakeSource {
        answer: fn() -> Result<Value, Error>,
        calls: Mutex<Vec<GateSubmission>>,
    }

    impl FakeSource {
        fn new(answer: fn() -> Result<Value, Error>) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProtectedPageSource for FakeSource {
        fn fetch_protected_page(
            &self,
            restriction_id: u64,
            page_id: u64,
            params: Params,
            options: RequestOptions,
        ) -> impl Future<Output = Result<Value, Error>> + Send {
            self.calls.lock().unwrap().push(GateSubmission {
                id: 0,
                restriction_id,
                page_id,
                params,
                options,
            });
            let result = (self.answer)();
            async move { result }
        }
    }

    fn props() -> PasswordProtectedProps {
        PasswordProtectedProps {
            restriction_id: 3,
            page_id: 42,
            csrf_token: "csrf-abc".to_string(),
        }
    }

    #[test]
    fn test_new_gate_awaits_password() {
        let gate = PasswordGate::new(props());
        assert_eq!(gate.state(), &GateState::AwaitingPassword);
        assert_eq!(gate.password(), "");
        assert!(gate.error_message().is_none());
    }

    #[test]
    fn test_password_editing() {
        let mut gate = PasswordGate::new(props());
        gate.push_str("hunter");
        gate.push_str("22");
        gate.backspace();
        assert_eq!(gate.password(), "hunter2");
        gate.clear_password();
        assert_eq!(gate.password(), "");
    }

    #[test]
    fn test_begin_submit_builds_request() {
        let mut gate = PasswordGate::new(props());
        gate.push_str("secret");

        let submission = gate.begin_submit().unwrap();
        assert_eq!(submission.restriction_id, 3);
        assert_eq!(submission.page_id, 42);
        assert_eq!(submission.params.get("password"), Some(&json!("secret")));
        assert_eq!(submission.options.get(CSRF_HEADER), Some("csrf-abc"));
        assert!(gate.is_submitting());
    }

    #[test]
    fn test_begin_submit_refuses_while_in_flight() {
        let mut gate = PasswordGate::new(props());
        assert!(gate.begin_submit().is_some());
        assert!(gate.begin_submit().is_none());
    }

    #[tokio::test]
    async fn test_rejected_password_shows_generic_error() {
        let source = FakeSource::new(|| Err(request_error(403, "Forbidden", r#"{"detail": "wrong"}"#)));
        let mut gate = PasswordGate::new(props());
        gate.push_str("wrong");

        gate.submit(&source).await;

        assert_eq!(gate.state(), &GateState::Error(INVALID_PASSWORD.to_string()));
        assert_eq!(gate.error_message(), Some("Invalid password"));
        assert!(!gate.is_revealed());
        assert!(!gate.is_submitting());
        assert_eq!(gate.password(), "wrong");
    }

    #[tokio::test]
    async fn test_any_error_kind_collapses_to_invalid_password() {
        let source = FakeSource::new(|| Err(Error::InvalidHeader("x".to_string())));
        let mut gate = PasswordGate::new(props());
        gate.submit(&source).await;
        assert_eq!(gate.error_message(), Some(INVALID_PASSWORD));
    }

    #[tokio::test]
    async fn test_malformed_success_payload_is_rejected() {
        let source = FakeSource::new(|| Ok(json!({"unexpected": true})));
        let mut gate = PasswordGate::new(props());
        gate.submit(&source).await;
        assert_eq!(gate.error_message(), Some(INVALID_PASSWORD));
    }

    #[tokio::test]
    async fn test_error_then_success_reveals() {
        let mut gate = PasswordGate::new(props());

        let rejecting = FakeSource::new(|| Err(request_error(401, "Unauthorized", "")));
        gate.submit(&rejecting).await;
        assert!(gate.error_message().is_some());

        let accepting = FakeSource::new(|| {
            Ok(json!({"componentName": "Missing", "componentProps": {}}))
        });
        gate.push_str("!");
        gate.submit(&accepting).await;

        assert_eq!(
            gate.revealed_page(),
            Some(&PageData {
                component_name: "Missing".to_string(),
                component_props: json!({}),
            })
        );
        let calls = accepting.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params.get("password"), Some(&json!("!")));
    }

    #[tokio::test]
    async fn test_revealed_gate_is_terminal() {
        let source = FakeSource::new(|| Ok(json!({"componentName": "HomePage"})));
        let mut gate = PasswordGate::new(props());
        gate.submit(&source).await;
        assert!(gate.is_revealed());

        gate.push_str("ignored");
        assert_eq!(gate.password(), "");
        assert!(gate.begin_submit().is_none());

        gate.submit(&source).await;
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_late_failure_keeps_gate_revealed() {
        let mut gate = PasswordGate::new(props());
        let submission = gate.begin_submit().unwrap();

        assert!(gate.complete(
            submission.id,
            Ok(json!({"componentName": "HomePage", "componentProps": {}}))
        ));
        assert!(gate.is_revealed());

        // The same answer delivered twice, or a failure arriving afterwards
        assert!(!gate.complete(submission.id, Err(request_error(401, "Unauthorized", ""))));
        assert!(gate.is_revealed());
        assert!(gate.error_message().is_none());
    }

    #[test]
    fn test_complete_without_submission_is_ignored() {
        let mut gate = PasswordGate::new(props());
        assert!(!gate.complete(7, Ok(json!({"componentName": "HomePage"}))));
        assert_eq!(gate.state(), &GateState::AwaitingPassword);
        assert!(!gate.is_submitting());
    }

    #[test]
    fn test_answer_for_another_gate_with_same_props_is_ignored() {
        let mut first = PasswordGate::new(props());
        let first_submission = first.begin_submit().unwrap();

        let mut second = PasswordGate::new(props());
        let second_submission = second.begin_submit().unwrap();
        assert_ne!(first_submission.id, second_submission.id);

        assert!(!second.complete(first_submission.id, Ok(json!({"componentName": "HomePage"}))));
        assert!(second.is_submitting());
        assert!(!second.is_revealed());

        assert!(second.complete(second_submission.id, Err(request_error(401, "Unauthorized", ""))));
        assert_eq!(second.error_message(), Some(INVALID_PASSWORD));
    }

    #[tokio::test]
    async fn test_submit_against_cms_client() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/password_protected_page/3/42/")
            .match_header("x-csrftoken", "csrf-abc")
            .match_body(Matcher::Json(json!({"password": "letmein"})))
            .with_status(200)
            .with_body(r#"{"component_name": "HomePage", "component_props": {"page_title": "Hi"}}"#)
            .expect(1)
            .create_async()
            .await;
        let client = CmsClient::new(ClientConfig::new(&server.url(), &server.url()).unwrap());

        let mut gate = PasswordGate::new(props());
        gate.push_str("letmein");
        gate.submit(&client).await;

        let page = gate.revealed_page().unwrap();
        assert_eq!(page.component_name, "HomePage");
        assert_eq!(page.component_props, json!({"pageTitle": "Hi"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_wrong_password_against_cms_client() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/password_protected_page/3/42/")
            .with_status(401)
            .create_async()
            .await;
        let client = CmsClient::new(ClientConfig::new(&server.url(), &server.url()).unwrap());

        let mut gate = PasswordGate::new(props());
        gate.push_str("nope");
        gate.submit(&client).await;

        assert_eq!(gate.error_message(), Some(INVALID_PASSWORD));
    }
}
