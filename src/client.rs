//! Servers.com API client.
//!
//! Low-level client that handles authentication and raw requests.
//! Paginated list endpoints are exposed through [`Collection`]; single
//! entities through the [`Get`](crate::Get) trait on model types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::collection::Collection;
use crate::error::{ApiErrorKind, Result, ServersComError};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

const DEFAULT_API_URL: &str = "https://api.servers.com/v1";
const DEFAULT_USER_AGENT: &str = concat!("serverscom-rs/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Low-level Servers.com API client.
///
/// This struct is cheaply cloneable; clones share the same transport.
///
/// # Example
///
/// ```no_run
/// use serverscom::ServersComClient;
///
/// # fn example() -> serverscom::Result<()> {
/// // Create from environment variables
/// let client = ServersComClient::from_env()?;
///
/// // Or configure manually
/// let client = ServersComClient::new("your-token", "https://api.servers.com/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ServersComClient {
    transport: Arc<dyn Transport>,
    base_url: Arc<Url>,
    token: String,
    user_agent: String,
}

impl std::fmt::Debug for ServersComClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServersComClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

impl ServersComClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SERVERSCOM_TOKEN` for authentication and optionally
    /// `SERVERSCOM_API_URL` for the base URL (defaults to
    /// `https://api.servers.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVERSCOM_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("SERVERSCOM_TOKEN").map_err(|_| {
            ServersComError::ConfigMissing(
                "SERVERSCOM_TOKEN environment variable not set".to_string(),
            )
        })?;

        let base_url =
            env::var("SERVERSCOM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(DEFAULT_TIMEOUT)?;
        Self::with_transport(token, base_url, Arc::new(transport))
    }

    /// Create a client that sends every request through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_transport(
        token: &str,
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        // Ensure base URL ends with / so joins keep its path (e.g. /v1)
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        Ok(Self {
            transport,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Override the `User-Agent` header. An empty value keeps the current one.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        if !user_agent.is_empty() {
            self.user_agent = user_agent.to_string();
        }
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the `User-Agent` sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolve a resource path such as `/ssh_keys` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting URL is invalid.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Create a paginated collection bound to `path`.
    pub fn collection<T>(&self, path: impl Into<String>) -> Collection<T> {
        Collection::new(self.clone(), path)
    }

    /// Send a request and map non-2xx statuses to errors.
    #[tracing::instrument(skip(self, url, body), fields(url = %url))]
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse> {
        let request = HttpRequest {
            method,
            url,
            headers: self.default_headers()?,
            body,
        };

        let response = self.transport.execute(request).await?;
        tracing::debug!(status = %response.status, "response received");

        Self::check_response(response)
    }

    /// GET a single JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path)?;
        let response = self.execute(Method::GET, url, None).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            ServersComError::ConfigMissing("token contains invalid header characters".to_string())
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = HeaderValue::from_str(&self.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(USER_AGENT, user_agent);

        Ok(headers)
    }

    /// Check response status and convert errors.
    fn check_response(response: HttpResponse) -> Result<HttpResponse> {
        let status = response.status;

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ServersComError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = serde_json::from_slice::<ErrorBody>(&response.body).unwrap_or_else(|_| {
            ErrorBody {
                code: None,
                message: Some(String::from_utf8_lossy(&response.body).into_owned()),
                errors: None,
            }
        });

        Err(ServersComError::Api {
            kind: ApiErrorKind::from_status(status.as_u16()),
            status_code: status.as_u16(),
            code: body.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            message: body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {status}")),
            errors: body.errors,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::error::TransportError;

    /// Transport double that replays queued responses and records requests.
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        responses: Mutex<VecDeque<std::result::Result<HttpResponse, TransportError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn push(&self, status: u16, link: Option<&str>, body: &str) {
            let mut headers = HeaderMap::new();
            if let Some(link) = link {
                headers.insert(
                    reqwest::header::LINK,
                    HeaderValue::from_str(link).expect("valid link header"),
                );
            }
            self.responses.lock().unwrap().push_back(Ok(HttpResponse {
                status: StatusCode::from_u16(status).expect("valid status"),
                headers,
                body: body.as_bytes().to_vec(),
            }));
        }

        pub(crate) fn push_error(&self, err: TransportError) {
            self.responses.lock().unwrap().push_back(Err(err));
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(
            &self,
            request: HttpRequest,
        ) -> std::result::Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportError::Connection("no scripted response".into())))
        }
    }

    pub(crate) fn scripted_client() -> (ServersComClient, Arc<ScriptedTransport>) {
        let transport = ScriptedTransport::new();
        let client =
            ServersComClient::with_transport("test-token", "https://api.test/v1", transport.clone())
                .unwrap();
        (client, transport)
    }

    #[test]
    fn test_client_debug() {
        let client = ServersComClient::new("test-token", "https://api.servers.com/v1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ServersComClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ServersComClient::new("token", "https://api.servers.com/v1").unwrap();
        let client2 = ServersComClient::new("token", "https://api.servers.com/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let (client, _) = scripted_client();
        let url = client.build_url("/hosts/dedicated_servers/a/ptr_records").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.test/v1/hosts/dedicated_servers/a/ptr_records"
        );
    }

    #[test]
    fn test_user_agent_override() {
        let (client, _) = scripted_client();
        assert!(client.user_agent().starts_with("serverscom-rs/"));

        let client = client.with_user_agent("");
        assert!(client.user_agent().starts_with("serverscom-rs/"));

        let client = client.with_user_agent("my-tool/1.0");
        assert_eq!(client.user_agent(), "my-tool/1.0");
    }

    #[tokio::test]
    async fn test_execute_sends_auth_headers() {
        let (client, transport) = scripted_client();
        transport.push(200, None, "{}");

        let url = client.build_url("/ssh_keys").unwrap();
        client.execute(Method::GET, url, None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert_eq!(headers[AUTHORIZATION], "Bearer test-token");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers[USER_AGENT].to_str().unwrap().starts_with("serverscom-rs/"));
    }

    #[tokio::test]
    async fn test_json_error_body_is_mapped() {
        let (client, transport) = scripted_client();
        transport.push(
            422,
            None,
            r#"{"code":"UNPROCESSABLE_ENTITY","message":"Validation failed","errors":{"name":["is blank"]}}"#,
        );

        let err = client.get_json::<serde_json::Value>("/ssh_keys").await.unwrap_err();

        match err {
            ServersComError::Api {
                kind,
                status_code,
                code,
                message,
                errors,
            } => {
                assert_eq!(kind, ApiErrorKind::UnprocessableEntity);
                assert_eq!(status_code, 422);
                assert_eq!(code, "UNPROCESSABLE_ENTITY");
                assert_eq!(message, "Validation failed");
                assert!(errors.is_some());
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_unknown() {
        let (client, transport) = scripted_client();
        transport.push(502, None, "Bad Gateway");

        let err = client.get_json::<serde_json::Value>("/ssh_keys").await.unwrap_err();

        match err {
            ServersComError::Api {
                kind, code, message, ..
            } => {
                assert_eq!(kind, ApiErrorKind::Unexpected);
                assert_eq!(code, "UNKNOWN");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let (client, transport) = scripted_client();
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("30"));
        transport.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status: StatusCode::TOO_MANY_REQUESTS,
            headers,
            body: Vec::new(),
        }));

        let err = client.get_json::<serde_json::Value>("/ssh_keys").await.unwrap_err();

        assert!(matches!(
            err,
            ServersComError::RateLimited {
                retry_after_secs: Some(30)
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct() {
        let (client, transport) = scripted_client();
        transport.push_error(TransportError::Timeout);

        let err = client.get_json::<serde_json::Value>("/ssh_keys").await.unwrap_err();

        assert!(matches!(err, ServersComError::Transport(TransportError::Timeout)));
        assert_eq!(err.status_code(), None);
    }
}
