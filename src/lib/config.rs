//! Endpoint configuration for the auth gateway, read from environment
//! variables so deployments can change endpoints without rebuilding.
//! Configuration values are public; do not store secrets here.

/// Client configuration derived from environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// Loads config from `VERIDOC_API_BASE_URL`, falling back to
    /// `VERIDOC_API_HOST`. Missing or blank values yield an empty base URL,
    /// which the gateway rejects at construction time.
    pub fn load() -> Self {
        let api_base_url = read_env("VERIDOC_API_BASE_URL")
            .or_else(|| read_env("VERIDOC_API_HOST"))
            .unwrap_or_default();

        Self { api_base_url }
    }

    /// Builds a config around an explicit base URL, used by tests and by
    /// hosts that manage their own configuration.
    pub fn from_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|v| normalize_value(&v))
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
