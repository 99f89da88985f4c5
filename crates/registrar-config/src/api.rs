use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8200/api";

/// REST backend configuration.
///
/// # Environment Variables
///
/// - `REGISTRAR_API_URL`: Base URL all request paths are appended to (default: `http://localhost:8200/api`)
/// - `REGISTRAR_API_TIMEOUT_SECS`: Per-request timeout in seconds (default: `30`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self {
            base_url: normalize_base_url(
                env::var("REGISTRAR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ),
            timeout_secs: env::var("REGISTRAR_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Override the base URL, keeping the other settings.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(self, base_url: S) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..self
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join a request path such as `/students/42` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
