use crate::app_config::{AppConfig, Endpoints, Environment};
use crate::ConfigError;

pub const DEFAULT_PRODUCTION_URL: &str = "https://api.flowhydration.in";
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:5000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_origin = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw.trim_end_matches('/').to_string())
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected an http(s) origin, got \"{raw}\""),
            })
        }
    };

    let env = parse_environment(&or_default("FLOWADMIN_ENV", "development"))?;
    let host = or_default("FLOWADMIN_HOST", "localhost");
    let production_url = parse_origin("FLOWADMIN_PRODUCTION_URL", DEFAULT_PRODUCTION_URL)?;
    let local_url = parse_origin("FLOWADMIN_LOCAL_URL", DEFAULT_LOCAL_URL)?;
    let session_path = PathBuf::from(or_default(
        "FLOWADMIN_SESSION_PATH",
        "./.flowadmin/session.json",
    ));
    let log_level = or_default("FLOWADMIN_LOG_LEVEL", "info");
    let user_agent = or_default("FLOWADMIN_USER_AGENT", "flowadmin/0.1 (catalog-admin)");

    let endpoints = Endpoints::for_host(&host, &production_url, &local_url);
    tracing::debug!(%host, api_base = %endpoints.api_base, "resolved API endpoints");

    Ok(AppConfig {
        env,
        host,
        endpoints,
        session_path,
        log_level,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FLOWADMIN_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
