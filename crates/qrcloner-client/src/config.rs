//! Client configuration sourced from the environment.

use std::time::Duration;

use reqwest::header::HeaderMap;
use thiserror::Error;
use url::Url;

use crate::session::SessionContext;

/// API base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Front-end origin used for checkout and portal return URLs.
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

/// Environment variable holding the API base URL.
pub const ENV_API_BASE: &str = "QRCLONER_API_BASE";
/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "QRCLONER_TOKEN";
/// Environment variable holding the front-end origin.
pub const ENV_APP_ORIGIN: &str = "QRCLONER_APP_ORIGIN";
/// Environment variable enabling placeholder fallbacks.
pub const ENV_OFFLINE: &str = "QRCLONER_OFFLINE";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "QRCLONER_TIMEOUT_SECS";

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL-valued setting failed to parse.
    #[error("invalid URL for {field}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Raw value.
        value: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// A boolean setting held an unrecognised value.
    #[error("invalid boolean for {field}: '{value}'")]
    InvalidFlag {
        /// Setting name.
        field: &'static str,
        /// Raw value.
        value: String,
    },
    /// The timeout was not a positive whole number of seconds.
    #[error("invalid timeout '{value}'")]
    InvalidTimeout {
        /// Raw value.
        value: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Builder error.
        #[source]
        source: reqwest::Error,
    },
}

/// Whether a network failure may be masked with placeholder data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfflineMode {
    /// Network failures are reported as failures.
    #[default]
    Strict,
    /// Network failures yield placeholder data marked as degraded.
    Placeholder,
}

impl OfflineMode {
    /// Map a boolean flag onto a mode.
    #[must_use]
    pub const fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Placeholder
        } else {
            Self::Strict
        }
    }

    /// Whether placeholder data may be substituted.
    #[must_use]
    pub const fn allows_placeholder(self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Resolved client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL.
    pub api_base: Url,
    /// Bearer token; the guest token is used when absent.
    pub token: Option<String>,
    /// Front-end origin for return URLs.
    pub app_origin: Url,
    /// Placeholder fallback policy.
    pub offline: OfflineMode,
    /// Per-request timeout; unset means none.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_base = parse_url(
            ENV_API_BASE,
            read(ENV_API_BASE).as_deref().unwrap_or(DEFAULT_API_BASE),
        )?;
        let app_origin = parse_url(
            ENV_APP_ORIGIN,
            read(ENV_APP_ORIGIN)
                .as_deref()
                .unwrap_or(DEFAULT_APP_ORIGIN),
        )?;
        let offline = match read(ENV_OFFLINE) {
            Some(raw) => OfflineMode::from_flag(parse_flag(ENV_OFFLINE, &raw)?),
            None => OfflineMode::Strict,
        };
        let timeout = read(ENV_TIMEOUT_SECS)
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        Ok(Self {
            api_base,
            token: read(ENV_TOKEN),
            app_origin,
            offline,
            timeout,
        })
    }

    /// Session context for the configured base URL and token.
    #[must_use]
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.api_base.clone(), self.token.clone())
    }

    /// Build the shared HTTP client honouring the configured timeout.
    ///
    /// `default_headers` are attached to every request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend fails to load.
    pub fn http_client(&self, default_headers: HeaderMap) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|source| ConfigError::HttpClient { source })
    }
}

/// Parse a URL-valued setting.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] when the value is not an absolute URL.
pub fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

/// Parse a boolean setting (`1/true/yes/on` or `0/false/no/off`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidFlag`] for any other value.
pub fn parse_flag(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            field,
            value: value.to_string(),
        }),
    }
}

/// Parse a timeout given in whole seconds.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimeout`] unless the value is a positive
/// integer.
pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(config.app_origin.as_str(), "http://localhost:3000/");
        assert_eq!(config.offline, OfflineMode::Strict);
        assert!(config.token.is_none());
        assert!(config.timeout.is_none());
        assert!(config.session().is_guest());
    }

    #[test]
    fn environment_overrides_are_parsed() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_BASE, "https://api.qrcloner.test"),
            (ENV_TOKEN, "tok"),
            (ENV_OFFLINE, "yes"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .expect("config");
        assert_eq!(config.api_base.host_str(), Some("api.qrcloner.test"));
        assert_eq!(config.session().authorization(), "Bearer tok");
        assert!(config.offline.allows_placeholder());
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_BASE, "not a url")]))
            .expect_err("bad url");
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                field: ENV_API_BASE,
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_OFFLINE, "maybe")]))
            .expect_err("bad flag");
        assert!(matches!(err, ConfigError::InvalidFlag { .. }));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")]))
            .expect_err("bad timeout");
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn configured_timeout_builds_http_client() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "5")]))
            .expect("config");
        assert!(config.http_client(HeaderMap::new()).is_ok());
    }

    #[test]
    fn flag_grammar_accepts_common_spellings() {
        for raw in ["1", "true", "YES", " on "] {
            assert_eq!(parse_flag(ENV_OFFLINE, raw).ok(), Some(true), "{raw}");
        }
        for raw in ["0", "False", "no", "off"] {
            assert_eq!(parse_flag(ENV_OFFLINE, raw).ok(), Some(false), "{raw}");
        }
        assert!(parse_flag(ENV_OFFLINE, "maybe").is_err());
    }
}
