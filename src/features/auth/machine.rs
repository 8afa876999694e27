//! Async dispatcher binding the gateway client, the session store, and the
//! reducer into one machine. Collaborators dispatch operations here and read
//! the resulting state through [`AuthMachine::select`]; the machine owns the
//! state record exclusively and applies every transition itself.
//!
//! Dispatch methods take `&mut self`, so two remote operations on one
//! machine instance cannot overlap and a stale late response can never
//! overwrite a fresher one.

use crate::features::auth::client::{ApiResult, AuthGateway};
use crate::features::auth::state::{reduce, AuthEvent, AuthOp, AuthState, StoreEffect};
use crate::features::auth::store::SessionStore;
use crate::features::auth::types::{
    FederatedLoginRequest, LoginRequest, SignupRequest, VerifyOtpRequest,
};

pub struct AuthMachine {
    state: AuthState,
    gateway: AuthGateway,
    store: Box<dyn SessionStore>,
}

impl AuthMachine {
    /// Builds a machine around an injected gateway and store. The store is
    /// read once here to seed the initial session.
    pub fn new(gateway: AuthGateway, store: Box<dyn SessionStore>) -> Self {
        let state = AuthState::hydrated(store.get());
        Self {
            state,
            gateway,
            store,
        }
    }

    /// Read-only snapshot of the current state for rendering and gating.
    pub fn select(&self) -> AuthState {
        self.state.clone()
    }

    /// Registers a new account. On success the OTP step opens via
    /// `signup_success`; "resend OTP" is a plain re-invocation of this.
    pub async fn signup(&mut self, request: SignupRequest) {
        self.apply(AuthEvent::Pending(AuthOp::Signup));
        let outcome = self.gateway.signup(&request).await;
        self.settle(AuthOp::Signup, outcome);
    }

    /// Credential login; a token in the response authenticates and persists
    /// the session.
    pub async fn login(&mut self, request: LoginRequest) {
        self.apply(AuthEvent::Pending(AuthOp::Login));
        let outcome = self.gateway.login(&request).await;
        self.settle(AuthOp::Login, outcome);
    }

    /// Submits the one-time passcode. When the request carries no email the
    /// email captured at signup is used instead, so forms stay dumb.
    pub async fn verify_otp(&mut self, request: VerifyOtpRequest) {
        self.apply(AuthEvent::Pending(AuthOp::VerifyOtp));
        let email = request
            .email
            .or_else(|| self.state.pending_signup_email.clone())
            .unwrap_or_default();
        let outcome = self.gateway.verify_otp(&email, &request.code).await;
        self.settle(AuthOp::VerifyOtp, outcome);
    }

    /// Forwards an externally-obtained identity token.
    pub async fn federated_login(&mut self, request: FederatedLoginRequest) {
        self.apply(AuthEvent::Pending(AuthOp::FederatedLogin));
        let outcome = self.gateway.federated_login(&request).await;
        self.settle(AuthOp::FederatedLogin, outcome);
    }

    /// Drops the session, all sub-state, and the persisted token.
    pub fn logout(&mut self) {
        self.apply(AuthEvent::Logout);
    }

    /// Clears the last error, typically on route entry/exit so stale
    /// messages are not shown.
    pub fn clear_error(&mut self) {
        self.apply(AuthEvent::ClearError);
    }

    /// Collaborators call this after dismissing the OTP modal.
    pub fn reset_signup_success(&mut self) {
        self.apply(AuthEvent::ResetSignupSuccess);
    }

    pub fn reset_otp_verified(&mut self) {
        self.apply(AuthEvent::ResetOtpVerified);
    }

    fn settle(&mut self, op: AuthOp, outcome: ApiResult) {
        let event = match outcome {
            Ok(payload) => AuthEvent::Fulfilled(op, payload),
            Err(failure) => AuthEvent::Rejected(op, failure.into_body()),
        };
        self.apply(event);
    }

    fn apply(&mut self, event: AuthEvent) {
        if let Some(effect) = reduce(&mut self.state, event) {
            match effect {
                StoreEffect::Persist(token) => self.store.set(&token),
                StoreEffect::Clear => self.store.clear(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::config::AppConfig;
    use crate::features::auth::types::Session;
    use anyhow::Result;
    use serde_json::json;
    use std::cell::RefCell;
    use std::net::TcpListener;
    use std::rc::Rc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Store handle the test keeps after handing a clone to the machine.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<Option<String>>>);

    impl SessionStore for SharedStore {
        fn get(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn set(&mut self, token: &str) {
            *self.0.borrow_mut() = Some(token.to_string());
        }

        fn clear(&mut self) {
            *self.0.borrow_mut() = None;
        }
    }

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn machine(base_url: &str, store: &SharedStore) -> Result<AuthMachine> {
        let gateway = AuthGateway::new(&AppConfig::from_base_url(base_url))?;
        Ok(AuthMachine::new(gateway, Box::new(store.clone())))
    }

    #[tokio::test]
    async fn stored_token_seeds_an_authenticated_session() -> Result<()> {
        let store = SharedStore::default();
        store.clone().set("stored-token");

        let machine = machine("http://127.0.0.1:9", &store)?;
        let snapshot = machine.select();

        assert_eq!(snapshot.session, Session::authenticated("stored-token"));
        assert!(!snapshot.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn login_round_trips_token_through_the_store() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": 1},
                "token": "T"
            })))
            .mount(&server)
            .await;

        let store = SharedStore::default();
        let mut machine = machine(&server.uri(), &store)?;
        machine
            .login(LoginRequest {
                username: "ada".to_string(),
                password: "pw".to_string(),
            })
            .await;

        let snapshot = machine.select();
        assert_eq!(snapshot.session, Session::authenticated("T"));
        assert_eq!(store.get(), Some("T".to_string()));
        assert_eq!(snapshot.error, None);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_surfaces_message_and_leaves_store_alone() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        let store = SharedStore::default();
        let mut machine = machine(&server.uri(), &store)?;
        machine
            .login(LoginRequest {
                username: "ada".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        let snapshot = machine.select();
        assert_eq!(snapshot.error.as_deref(), Some("Invalid credentials"));
        assert!(!snapshot.is_authenticated());
        assert!(!snapshot.is_loading);
        assert_eq!(store.get(), None);
        Ok(())
    }

    #[tokio::test]
    async fn verify_otp_falls_back_to_pending_signup_email() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user": {"email": "x@y.com"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/verify-otp/"))
            .and(body_json(json!({
                "email": "x@y.com",
                "otp": "123456",
                "code": "123456",
                "verification_code": "123456"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let store = SharedStore::default();
        let mut machine = machine(&server.uri(), &store)?;
        machine
            .signup(SignupRequest {
                username: "ada".to_string(),
                email: String::new(),
                password: "pw".to_string(),
                confirm_password: "pw".to_string(),
                phone: String::new(),
            })
            .await;
        machine
            .verify_otp(VerifyOtpRequest {
                email: None,
                code: "123456".to_string(),
            })
            .await;

        let snapshot = machine.select();
        assert!(snapshot.otp_verified);
        assert!(!snapshot.is_authenticated(), "no token was issued");
        assert_eq!(store.get(), None);
        Ok(())
    }

    #[tokio::test]
    async fn federated_login_persists_access_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/google-login/"))
            .and(body_json(json!({"id_token": "google-jwt"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "T"})),
            )
            .mount(&server)
            .await;

        let store = SharedStore::default();
        let mut machine = machine(&server.uri(), &store)?;
        machine
            .federated_login(FederatedLoginRequest {
                id_token: "google-jwt".to_string(),
            })
            .await;

        assert!(machine.select().is_authenticated());
        assert_eq!(store.get(), Some("T".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_state_and_store_from_any_state() -> Result<()> {
        let store = SharedStore::default();
        store.clone().set("stored-token");

        let mut machine = machine("http://127.0.0.1:9", &store)?;
        assert!(machine.select().is_authenticated());

        machine.logout();

        assert_eq!(machine.select(), AuthState::default());
        assert_eq!(store.get(), None);

        machine.logout();
        assert_eq!(machine.select(), AuthState::default());
        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_lands_in_idle_with_error() -> Result<()> {
        let store = SharedStore::default();
        let mut machine = machine("http://127.0.0.1:9", &store)?;

        machine
            .login(LoginRequest {
                username: "ada".to_string(),
                password: "pw".to_string(),
            })
            .await;

        let snapshot = machine.select();
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_some());

        machine.clear_error();
        assert_eq!(machine.select().error, None);
        Ok(())
    }
}
