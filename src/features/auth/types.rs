//! Request payloads and session records for auth operations. These payloads
//! carry credentials and one-time passcodes, so they must never be logged.

use serde::{Deserialize, Serialize};

/// Registration form fields POSTed to `/signup/`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// Credential login fields POSTed to `/login/`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// OTP verification input. When `email` is `None` the machine falls back to
/// the email captured during signup.
#[derive(Clone, Debug)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub code: String,
}

/// Externally-obtained identity token forwarded to `/google-login/`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FederatedLoginRequest {
    pub id_token: String,
}

/// Session summary exposed to collaborators and route guards.
///
/// Invariant: `is_authenticated` holds exactly when `token` is present; the
/// constructors below are the only way the machine builds one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    /// Logged-out session with no token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated session around `token`.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            is_authenticated: true,
        }
    }

    /// Builds a session from an optional token, deriving the authenticated
    /// flag from its presence.
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) => Self::authenticated(token),
            None => Self::anonymous(),
        }
    }
}
