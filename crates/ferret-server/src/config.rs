use std::time::Duration;

use ferret_core::AppError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Server settings read from `FERRET_*` environment variables.
///
/// `APP_PORT` is still honoured when `FERRET_PORT` is unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub http_timeout: Duration,
    pub block_private_urls: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port_var = ["FERRET_PORT", "APP_PORT"]
            .into_iter()
            .find_map(|key| lookup(key).map(|raw| (key, raw)));
        let port = match port_var {
            None => {
                tracing::warn!("FERRET_PORT not set, defaulting to {DEFAULT_PORT}");
                DEFAULT_PORT
            }
            Some((key, raw)) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::ConfigError(format!("Invalid {key} '{raw}': must be a port number"))
            })?,
        };

        let timeout_secs = match lookup("FERRET_HTTP_TIMEOUT_SECS") {
            None => DEFAULT_HTTP_TIMEOUT_SECS,
            Some(raw) => {
                let parsed: u64 = raw.trim().parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid FERRET_HTTP_TIMEOUT_SECS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "FERRET_HTTP_TIMEOUT_SECS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        let block_private_urls = match lookup("FERRET_BLOCK_PRIVATE_URLS") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(format!(
                    "Invalid FERRET_BLOCK_PRIVATE_URLS '{raw}': expected true or false"
                ))
            })?,
        };

        Ok(Self {
            port,
            http_timeout: Duration::from_secs(timeout_secs),
            block_private_urls,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.http_timeout, Duration::from_secs(30));
        assert!(!cfg.block_private_urls);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("FERRET_PORT", "9090"),
            ("FERRET_HTTP_TIMEOUT_SECS", "5"),
            ("FERRET_BLOCK_PRIVATE_URLS", "TRUE"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.http_timeout, Duration::from_secs(5));
        assert!(cfg.block_private_urls);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("FERRET_PORT", "http")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(config(&[("FERRET_PORT", "70000")]).is_err());
    }

    #[test]
    fn app_port_is_a_fallback() {
        assert_eq!(config(&[("APP_PORT", "3000")]).unwrap().port, 3000);

        let cfg = config(&[("APP_PORT", "3000"), ("FERRET_PORT", "9090")]).unwrap();
        assert_eq!(cfg.port, 9090);

        let err = config(&[("APP_PORT", "x")]).unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(config(&[("FERRET_HTTP_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn rejects_unknown_bool() {
        assert!(config(&[("FERRET_BLOCK_PRIVATE_URLS", "maybe")]).is_err());
    }
}
