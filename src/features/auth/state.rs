//! Auth state machine: the shared session record, the transition events, and
//! the reducer that applies them. The reducer is pure over the in-memory
//! record; the only outside effect it can request is a session-store write,
//! which it reports to the caller instead of performing itself.

use serde_json::Value;

use crate::features::auth::types::Session;

/// The four remote operations the machine can have in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOp {
    Signup,
    Login,
    VerifyOtp,
    FederatedLogin,
}

impl AuthOp {
    /// Fixed error message shown when a rejected payload carries neither
    /// `message` nor `error`. The wording is user-facing; keep it stable.
    fn default_error(self) -> &'static str {
        match self {
            AuthOp::Signup => "Signup failed",
            AuthOp::Login => "Login failed",
            AuthOp::VerifyOtp => "OTP verification failed",
            AuthOp::FederatedLogin => "Google login failed",
        }
    }
}

/// Transition events consumed by [`reduce`].
///
/// Each remote operation moves `idle → pending → fulfilled | rejected`;
/// fulfilled and rejected carry the gateway payload. The remaining events
/// are synchronous and local.
#[derive(Clone, Debug)]
pub enum AuthEvent {
    Pending(AuthOp),
    Fulfilled(AuthOp, Value),
    Rejected(AuthOp, Value),
    Logout,
    ClearError,
    ResetSignupSuccess,
    ResetOtpVerified,
}

/// Session-store write requested by a transition. Writes happen only on the
/// fulfilled transitions that produced a token, and on logout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEffect {
    Persist(String),
    Clear,
}

/// Canonical auth state exposed to collaborators as a read-only snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// Server-defined user record from the latest successful operation.
    pub user: Option<Value>,
    pub session: Session,
    /// Email captured on signup success, used as the fallback identifier for
    /// OTP verification and cleared on logout.
    pub pending_signup_email: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub signup_success: bool,
    pub otp_verified: bool,
}

impl AuthState {
    /// Seeds initial state from a previously stored token.
    pub fn hydrated(token: Option<String>) -> Self {
        Self {
            session: Session::from_token(token),
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }
}

/// Applies `event` to `state` and returns the session-store write the
/// transition calls for, if any.
pub fn reduce(state: &mut AuthState, event: AuthEvent) -> Option<StoreEffect> {
    match event {
        AuthEvent::Pending(op) => {
            state.is_loading = true;
            state.error = None;
            match op {
                AuthOp::Signup => state.signup_success = false,
                AuthOp::VerifyOtp => state.otp_verified = false,
                AuthOp::Login | AuthOp::FederatedLogin => {}
            }
            None
        }
        AuthEvent::Fulfilled(op, payload) => {
            state.is_loading = false;
            match op {
                AuthOp::Signup => {
                    state.signup_success = true;
                    state.user = field(&payload, "user");
                    state.pending_signup_email = string_field(&payload, "email")
                        .or_else(|| nested_string_field(&payload, "user", "email"));
                    None
                }
                AuthOp::Login | AuthOp::FederatedLogin => {
                    state.user = field(&payload, "user");
                    let token = token_field(&payload);
                    state.session = Session::from_token(token.clone());
                    token.map(StoreEffect::Persist)
                }
                AuthOp::VerifyOtp => {
                    state.otp_verified = true;
                    if let Some(user) = field(&payload, "user") {
                        state.user = Some(user);
                    }
                    // No token means "code correct, server requires a further
                    // step": the session is left untouched.
                    match token_field(&payload) {
                        Some(token) => {
                            state.session = Session::authenticated(token.clone());
                            Some(StoreEffect::Persist(token))
                        }
                        None => None,
                    }
                }
            }
        }
        AuthEvent::Rejected(op, payload) => {
            state.is_loading = false;
            state.error = Some(error_message(&payload, op.default_error()));
            match op {
                AuthOp::Signup => state.signup_success = false,
                AuthOp::VerifyOtp => state.otp_verified = false,
                AuthOp::Login | AuthOp::FederatedLogin => {
                    state.session = Session::anonymous();
                }
            }
            None
        }
        AuthEvent::Logout => {
            *state = AuthState::default();
            Some(StoreEffect::Clear)
        }
        AuthEvent::ClearError => {
            state.error = None;
            None
        }
        AuthEvent::ResetSignupSuccess => {
            state.signup_success = false;
            None
        }
        AuthEvent::ResetOtpVerified => {
            state.otp_verified = false;
            None
        }
    }
}

/// Extracts the user-facing message from a rejected payload: `message`
/// first, then `error`, then the operation default. The order determines
/// what end users see; keep it stable.
fn error_message(payload: &Value, default: &str) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| payload.get("error").and_then(Value::as_str))
        .unwrap_or(default)
        .to_string()
}

/// Session token under either accepted key name.
fn token_field(payload: &Value) -> Option<String> {
    string_field(payload, "token").or_else(|| string_field(payload, "access_token"))
}

// JSON null is treated as absent everywhere a key fallback applies.
fn field(payload: &Value, key: &str) -> Option<Value> {
    payload.get(key).filter(|v| !v.is_null()).cloned()
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn nested_string_field(payload: &Value, key: &str, inner: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(|v| v.get(inner))
        .and_then(Value::as_str)
        .map(str::to_string)
}
