//! HTTP client for the items API.
//!
//! `ApiClient` owns the transport and a handle to the session. Every request
//! goes through `request`, which attaches the bearer token when one is held,
//! classifies the response, and turns a 401 into a forced logout before the
//! failure reaches the caller.

mod auth;
mod error;
mod items;
mod resource;

pub use auth::AuthGateway;
pub use error::ApiError;
pub use items::ItemsGateway;
pub use resource::*;

use crate::session::SessionStore;
use log::*;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type ExpiryHook = Box<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Request payload encodings understood by the API.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// Makes requests to the API on behalf of the current session.
///
pub struct ApiClient {
    base_url: String,
    session: Arc<SessionStore>,
    http_client: reqwest::Client,
    expiry_hook: Option<ExpiryHook>,
}

impl ApiClient {
    /// Returns a new instance for the given base URL and session.
    ///
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            session,
            http_client: reqwest::Client::builder().build()?,
            expiry_hook: None,
        })
    }

    /// Registers the hook to await whenever the API rejects the credential.
    /// The session is already cleared when the hook runs.
    ///
    pub fn on_session_expired<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.expiry_hook = Some(Box::new(move || Box::pin(hook())));
        self
    }

    pub fn auth(&self) -> AuthGateway<'_> {
        AuthGateway::new(self)
    }

    pub fn items(&self) -> ItemsGateway<'_> {
        ItemsGateway::new(self)
    }

    /// Make request and return the parsed JSON body, `None` for an empty
    /// success, or the classified failure.
    ///
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Body>,
    ) -> Result<Option<Value>, ApiError> {
        debug!("{} {}", method, endpoint);
        let credentialed = self.session.is_authenticated();
        let response = self.prepare(endpoint, method, body).send().await?;
        let status = response.status();

        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Ok(None);
            }
            return Ok(Some(serde_json::from_slice(&bytes)?));
        }

        // Error bodies are best effort; an unreadable one falls back to the status
        let bytes = response.bytes().await.unwrap_or_default();
        let message = error_detail(&bytes).unwrap_or_else(|| status_message(status));

        // Only a request that carried the token can prove it expired
        if status == StatusCode::UNAUTHORIZED && credentialed {
            warn!("Unauthorized. Logging out.");
            self.session.clear();
            if let Some(hook) = &self.expiry_hook {
                hook().await;
            }
            return Err(ApiError::Unauthorized { message });
        }

        error!("API request failed with status {}: {}", status, message);
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Make request and conform the response body to the given model.
    ///
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Body>,
    ) -> Result<T, ApiError> {
        let value = self
            .request(endpoint, method, body)
            .await?
            .ok_or(ApiError::EmptyBody)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Build the request, attaching the bearer token if the session has one.
    ///
    fn prepare(&self, endpoint: &str, method: Method, body: Option<Body>) -> RequestBuilder {
        let request_url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.http_client.request(method, &request_url);

        if let Some(token) = self.session.get() {
            request = request.bearer_auth(token);
        }

        match body {
            Some(Body::Json(value)) => request.json(&value),
            Some(Body::Form(fields)) => request.form(&fields),
            None => request,
        }
    }
}

/// Extract a human-readable `detail` from an error body. Validation
/// failures carry a list of entries, whose messages are joined.
///
fn error_detail(bytes: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(bytes).ok()?;
    match body.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.to_owned()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

fn status_message(status: StatusCode) -> String {
    format!(
        "API error: {}",
        status.canonical_reason().unwrap_or(status.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;
    use httpmock::MockServer;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn client(base_url: &str, token: Option<&str>) -> (ApiClient, Arc<SessionStore>) {
        let session = Arc::new(match token {
            Some(token) => SessionStore::open(MemoryStorage::with_token(token)),
            None => SessionStore::in_memory(),
        });
        let api = ApiClient::new(base_url, Arc::clone(&session)).unwrap();
        (api, session)
    }

    #[test]
    fn prepare_attaches_bearer_token() {
        let (api, _) = client("http://localhost", Some("tok"));
        let request = api.prepare("/items/", Method::GET, None).build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost/items/");
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer tok");
    }

    #[test]
    fn prepare_without_token_has_no_credential() {
        let (api, _) = client("http://localhost/", None);
        let request = api.prepare("/items/", Method::GET, None).build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost/items/");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn prepare_encodes_json_and_form_bodies() {
        let (api, _) = client("http://localhost", None);
        let request = api
            .prepare("/items/", Method::POST, Some(Body::Json(json!({ "name": "a" }))))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let request = api
            .prepare(
                "/auth/login",
                Method::POST,
                Some(Body::Form(vec![("username".into(), "a".into())])),
            )
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn error_detail_variants() {
        assert_eq!(
            error_detail(br#"{"detail": "Item not found"}"#),
            Some("Item not found".to_string())
        );
        assert_eq!(
            error_detail(br#"{"detail": [{"msg": "field required"}, {"msg": "too short"}]}"#),
            Some("field required; too short".to_string())
        );
        assert_eq!(error_detail(br#"{"message": "nope"}"#), None);
        assert_eq!(error_detail(b"<html>Bad Gateway</html>"), None);
        assert_eq!(error_detail(b""), None);
    }

    #[test]
    fn status_message_uses_reason() {
        assert_eq!(
            status_message(StatusCode::INTERNAL_SERVER_ERROR),
            "API error: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn request_parses_json_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/items/")
                    .header("Authorization", "Bearer tok");
                then.status(200).json_body(json!([{ "id": 1, "name": "a" }]));
            })
            .await;

        let (api, _) = client(&server.base_url(), Some("tok"));
        let value = api.request("/items/", Method::GET, None).await.unwrap();
        assert_eq!(value, Some(json!([{ "id": 1, "name": "a" }])));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_no_content_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/items/3");
                then.status(204);
            })
            .await;

        let (api, _) = client(&server.base_url(), Some("tok"));
        let value = api.request("/items/3", Method::DELETE, None).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn request_surfaces_server_detail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/register");
                then.status(400).json_body(json!({ "detail": "User already exists" }));
            })
            .await;

        let (api, _) = client(&server.base_url(), None);
        let err = api
            .request("/auth/register", Method::POST, Some(Body::Json(json!({}))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn request_falls_back_to_status_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/items/");
                then.status(500).body("oops");
            })
            .await;

        let (api, session) = client(&server.base_url(), Some("tok"));
        let err = api.request("/items/", Method::GET, None).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: Internal Server Error");
        // Only a 401 touches the session
        assert_eq!(session.get(), Some("tok".to_string()));
    }

    #[tokio::test]
    async fn request_unauthorized_clears_session_before_hook() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/items/");
                then.status(401).json_body(json!({ "detail": "Invalid token" }));
            })
            .await;

        let session = Arc::new(SessionStore::open(MemoryStorage::with_token("stale")));
        let saw_cleared = Arc::new(AtomicBool::new(false));
        let calls = Arc::new(AtomicUsize::new(0));
        let hook_session = Arc::clone(&session);
        let hook_saw_cleared = Arc::clone(&saw_cleared);
        let hook_calls = Arc::clone(&calls);
        let api = ApiClient::new(&server.base_url(), Arc::clone(&session))
            .unwrap()
            .on_session_expired(move || {
                let session = Arc::clone(&hook_session);
                let saw_cleared = Arc::clone(&hook_saw_cleared);
                let calls = Arc::clone(&hook_calls);
                async move {
                    saw_cleared.store(session.get().is_none(), Ordering::SeqCst);
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            });

        let err = api.request("/items/", Method::GET, None).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid token");
        assert_eq!(session.get(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(saw_cleared.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn request_unauthorized_without_token_leaves_hook_alone() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/login");
                then.status(401)
                    .json_body(json!({ "detail": "Incorrect email or password" }));
            })
            .await;

        let calls = Arc::new(AtomicUsize::new(0));
        let hook_calls = Arc::clone(&calls);
        let (api, _) = client(&server.base_url(), None);
        let api = api.on_session_expired(move || {
            let calls = Arc::clone(&hook_calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        let err = api
            .request("/auth/login", Method::POST, None)
            .await
            .unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Incorrect email or password");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn request_as_requires_a_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/items/");
                then.status(204);
            })
            .await;

        let (api, _) = client(&server.base_url(), Some("tok"));
        let result = api
            .request_as::<Item>("/items/", Method::POST, None)
            .await;
        assert!(matches!(result, Err(ApiError::EmptyBody)));
    }

    #[tokio::test]
    async fn request_transport_failure() {
        // Nothing listens on port 9 on a test machine
        let (api, session) = client("http://127.0.0.1:9", Some("tok"));
        let err = api.request("/items/", Method::GET, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(session.get(), Some("tok".to_string()));
    }
}
