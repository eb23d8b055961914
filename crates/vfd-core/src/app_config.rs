use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials for the hosted table backend.
///
/// Absence of either value means the backend is unconfigured, which the
/// loader degrades to an empty snapshot rather than a startup failure —
/// the dashboard renders its "no data" state instead of crashing.
#[derive(Clone)]
pub struct BackendConfig {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub backend: Option<BackendConfig>,
    pub feedback_table: String,
    pub cache_ttl_secs: u64,
    pub fetch_timeout_secs: u64,
}
