//! Auth feature module covering signup, credential and federated login, OTP
//! verification, session persistence, and route gating. It keeps
//! authentication logic out of the UI and must stay aligned with gateway
//! protocol expectations. This module touches security boundaries and must
//! avoid logging secrets or token material.
//!
//! Flow Overview: Signup POSTs the registration form and, on success, opens
//! the OTP step. Verify submits the passcode and upgrades the session when
//! the response carries a token. Credential and federated login hydrate the
//! session directly and persist the token through the injected store.

pub mod client;
pub mod guards;
pub mod machine;
pub mod state;
pub mod store;
pub mod types;

pub use client::AuthGateway;
pub use machine::AuthMachine;
pub use state::AuthState;
pub use store::SessionStore;
