//! Remote auth gateway client. Each operation POSTs JSON and resolves to
//! either the parsed success payload or a normalized failure value; nothing
//! escapes this boundary as a panic or a raw transport error. The state
//! machine is the only consumer that interprets the payloads. Request bodies
//! carry credentials and must never be logged.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info_span, Instrument};
use url::Url;

use crate::app_lib::{config::AppConfig, AppError};
use crate::features::auth::types::{FederatedLoginRequest, LoginRequest, SignupRequest};

const USER_AGENT: &str = concat!("veridoc-auth/", env!("CARGO_PKG_VERSION"));

/// Applied to every request to avoid hanging UI state on a dead gateway.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Normalized failure from a gateway operation: the parsed error body for
/// application failures, or `{"message": <error text>}` for transport
/// faults. Either way the body is what the reducer extracts messages from.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiFailure {
    pub body: Value,
}

impl ApiFailure {
    fn transport(err: &reqwest::Error) -> Self {
        Self {
            body: json!({ "message": err.to_string() }),
        }
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Outcome of a gateway operation.
pub type ApiResult = Result<Value, ApiFailure>;

/// HTTP client for the four remote auth operations.
pub struct AuthGateway {
    client: Client,
    base_url: String,
}

impl AuthGateway {
    /// Builds a gateway from the configured base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing or unparsable, or if the
    /// HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base_url = config.api_base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(AppError::Config(
                "API base URL is not configured".to_string(),
            ));
        }
        Url::parse(base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Client(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Registers a new account.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult {
        self.post("/signup/", "auth.signup", request).await
    }

    /// Exchanges credentials for a session payload.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult {
        self.post("/login/", "auth.login", request).await
    }

    /// Submits the one-time passcode for `email`. The code is sent under
    /// three alternate field names for compatibility with gateways expecting
    /// any one of them.
    pub async fn verify_otp(&self, email: &str, code: &str) -> ApiResult {
        let payload = json!({
            "email": email,
            "otp": code,
            "code": code,
            "verification_code": code,
        });
        self.post("/verify-otp/", "auth.verify_otp", &payload).await
    }

    /// Forwards an externally-obtained identity token.
    pub async fn federated_login(&self, request: &FederatedLoginRequest) -> ApiResult {
        self.post("/google-login/", "auth.federated_login", request)
            .await
    }

    async fn post<B: Serialize>(&self, path: &str, operation: &'static str, body: &B) -> ApiResult {
        let url = format!("{}{}", self.base_url, path);

        let span = info_span!(
            "auth.gateway",
            operation = operation,
            http.method = "POST",
            url = %url
        );
        let response = match self
            .client
            .post(&url)
            .json(body)
            .send()
            .instrument(span)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!("{operation}: transport failure: {err}");
                return Err(ApiFailure::transport(&err));
            }
        };

        let status = response.status();
        debug!("{operation}: {status}");

        // The body is parsed regardless of status; error bodies carry the
        // user-facing message.
        match response.json::<Value>().await {
            Ok(body) if status.is_success() => Ok(body),
            Ok(body) => Err(ApiFailure { body }),
            Err(err) => Err(ApiFailure::transport(&err)),
        }
    }
}
