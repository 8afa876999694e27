//! Access guard for protected screens. Pure views over the auth state; the
//! collaborator owns the actual redirect or spinner. UX-only gating; real
//! access control lives on the API.

use crate::features::auth::state::AuthState;
use crate::features::auth::types::Session;

/// Whether a protected screen may be entered.
pub fn can_enter(session: &Session) -> bool {
    session.is_authenticated
}

/// What the route gate should render for a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render a neutral loading indication; deciding now would flash a
    /// redirect while the initial session check is still in flight.
    Loading,
    Allow,
    RedirectToLogin,
}

pub fn route_decision(snapshot: &AuthState) -> RouteDecision {
    if snapshot.is_loading {
        RouteDecision::Loading
    } else if can_enter(&snapshot.session) {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectToLogin
    }
}
