use std::path::PathBuf;

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

/// Base URLs of the three API surfaces the console talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Product and review routes, e.g. `https://api.flowhydration.in/api`.
    pub api_base: String,
    /// Admin auth routes (`/me`).
    pub auth_base: String,
    /// Media upload routes.
    pub upload_base: String,
}

impl Endpoints {
    /// Build all three bases from one origin (`{origin}/api`, `/api/admin`,
    /// `/api/upload`).
    #[must_use]
    pub fn from_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            api_base: format!("{origin}/api"),
            auth_base: format!("{origin}/api/admin"),
            upload_base: format!("{origin}/api/upload"),
        }
    }

    /// Pick the local origin for `localhost`/`127.0.0.1`, the production
    /// origin for any other host.
    #[must_use]
    pub fn for_host(host: &str, production_url: &str, local_url: &str) -> Self {
        if is_local_host(host) {
            Self::from_origin(local_url)
        } else {
            Self::from_origin(production_url)
        }
    }
}

#[must_use]
pub fn is_local_host(host: &str) -> bool {
    matches!(host.trim(), "localhost" | "127.0.0.1")
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub host: String,
    pub endpoints: Endpoints,
    pub session_path: PathBuf,
    pub log_level: String,
    pub user_agent: String,
}
