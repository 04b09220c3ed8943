use civic_client::ClientConfig;
use std::path::PathBuf;

/// Cache file name inside the work directory
pub const CACHE_FILE: &str = "cache.redb";

/// Client application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | API_BASE_URL | http://localhost:3000 | issue service base (`/api` is appended) |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout (ms) |
/// | WORK_DIR | ./civic-data | directory holding the local cache |
/// | DEFAULT_CITY_ID | 1 | city new reports are routed to |
/// | DEFAULT_LOCALITY_ID | 1 | locality new reports are routed to |
/// | LOG_LEVEL | info | log level when RUST_LOG is unset |
/// | LOG_DIR | (unset) | write daily log files here instead of stderr |
///
/// # Example
///
/// ```ignore
/// API_BASE_URL=http://10.0.0.5:3000 WORK_DIR=/tmp/civic civic issues
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub work_dir: String,
    pub default_city_id: i64,
    pub default_locality_id: i64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: lookup("API_BASE_URL").unwrap_or_else(|| "http://localhost:3000".into()),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./civic-data".into()),
            default_city_id: lookup("DEFAULT_CITY_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            default_locality_id: lookup("DEFAULT_LOCALITY_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.is_empty()),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, api_base_url: Option<String>, work_dir: Option<String>) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        if let Some(dir) = work_dir {
            self.work_dir = dir;
        }
        self
    }

    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(CACHE_FILE)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_base_url).with_timeout_ms(self.request_timeout_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
