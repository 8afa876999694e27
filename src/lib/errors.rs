use std::fmt;

/// Local failures raised while wiring the client together. Remote failures
/// are not represented here; the gateway normalizes those into payload
/// values so the state machine can surface them to users.
#[derive(Clone, Debug)]
pub enum AppError {
    Config(String),
    Client(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Client(message) => write!(formatter, "Client error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}
