//! Client-side authentication and session slice for the VeriDoc app.
//!
//! ## Core Authentication Flows
//!
//! ### Signup & OTP Verification
//!
//! 1. **Signup:** The client POSTs the registration form to `/signup/`. On
//!    success the machine records `signup_success` and captures the email to
//!    fall back on during OTP verification.
//! 2. **Verification:** The user submits the one-time passcode, which the
//!    client POSTs to `/verify-otp/`. A token in the response upgrades the
//!    session to authenticated and persists it.
//!
//! ### Login
//!
//! Credential login POSTs to `/login/`; federated login forwards an external
//! identity token to `/google-login/`. Either response may carry the session
//! token under `token` or `access_token`; when present it is persisted so the
//! session survives restarts.
//!
//! Presentation collaborators drive the [`AuthMachine`] and render its
//! snapshot; route gates consult the [`guards`] module. Centralizing the
//! transitions here keeps network behavior consistent and avoids duplicated
//! auth logic in view code. Callers must still avoid logging credentials,
//! codes, or token material.
//!
//! [`AuthMachine`]: features::auth::machine::AuthMachine
//! [`guards`]: features::auth::guards

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

pub use app_lib::config::AppConfig;
pub use app_lib::errors::AppError;
pub use features::auth::client::{ApiFailure, ApiResult, AuthGateway};
pub use features::auth::guards::{can_enter, route_decision, RouteDecision};
pub use features::auth::machine::AuthMachine;
pub use features::auth::state::{reduce, AuthEvent, AuthOp, AuthState, StoreEffect};
pub use features::auth::store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use features::auth::types::{
    FederatedLoginRequest, LoginRequest, Session, SignupRequest, VerifyOtpRequest,
};
