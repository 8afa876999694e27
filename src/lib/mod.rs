//! Shared client utilities for endpoint configuration and error reporting.
//! Feature modules use these to keep environment handling in one place;
//! configuration values are public and must never hold secrets.

pub mod config;
pub mod errors;

pub(crate) use errors::AppError;
