//! Domain-level client features and their shared logic. Presentation
//! collaborators import these modules to keep view code focused while
//! keeping security and API handling in dedicated feature areas.

pub mod auth;
