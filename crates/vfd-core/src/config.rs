use crate::app_config::{AppConfig, BackendConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if optional numeric values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if optional numeric values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
///
/// `SUPABASE_URL` and `SUPABASE_KEY` are deliberately NOT required: when
/// either is missing the backend is left unconfigured and the loader
/// degrades to an empty snapshot.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("VFD_ENV", "development"));
    let bind_addr = parse_addr("VFD_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VFD_LOG_LEVEL", "info");
    let feedback_table = or_default("VFD_FEEDBACK_TABLE", "video_feedbacks");
    let cache_ttl_secs = parse_u64("VFD_CACHE_TTL_SECS", "60")?;
    let fetch_timeout_secs = parse_u64("VFD_FETCH_TIMEOUT_SECS", "30")?;

    let backend = match (lookup("SUPABASE_URL"), lookup("SUPABASE_KEY")) {
        (Ok(url), Ok(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
            Some(BackendConfig { url, key })
        }
        _ => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        backend,
        feedback_table,
        cache_ttl_secs,
        fetch_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.feedback_table, "video_feedbacks");
        assert_eq!(cfg.cache_ttl_secs, 60);
        assert_eq!(cfg.fetch_timeout_secs, 30);
        assert!(cfg.backend.is_none(), "no credentials means no backend");
    }

    #[test]
    fn build_app_config_backend_requires_both_values() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SUPABASE_URL", "https://project.supabase.co");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.backend.is_none());

        map.insert("SUPABASE_KEY", "service-role-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let backend = cfg.backend.expect("both values set");
        assert_eq!(backend.url, "https://project.supabase.co");
        assert_eq!(backend.key, "service-role-key");
    }

    #[test]
    fn build_app_config_blank_credentials_count_as_missing() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SUPABASE_URL", "  ");
        map.insert("SUPABASE_KEY", "key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.backend.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VFD_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VFD_BIND_ADDR"),
            "expected InvalidEnvVar(VFD_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_cache_ttl_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VFD_CACHE_TTL_SECS", "300");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cache_ttl_secs, 300);
    }

    #[test]
    fn build_app_config_cache_ttl_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("VFD_CACHE_TTL_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VFD_CACHE_TTL_SECS"),
            "expected InvalidEnvVar(VFD_CACHE_TTL_SECS), got: {result:?}"
        );
    }

    #[test]
    fn backend_config_debug_redacts_key() {
        let backend = BackendConfig {
            url: "https://project.supabase.co".to_string(),
            key: "secret".to_string(),
        };
        let rendered = format!("{backend:?}");
        assert!(!rendered.contains("secret"), "key leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
