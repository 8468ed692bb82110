//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CONTENT_API_URL` - External content service base URL. When unset, content
//!   pages are read from the `cms_pages` table.
//! - `CONTENT_API_TOKEN` - Bearer token for the content service (high entropy)
//! - `CONTENT_CACHE_TTL_SECS` - Content service cache TTL (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_CONTENT_CACHE_TTL_SECS: u64 = 300;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Content backend configuration
    pub content: ContentConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Where content pages come from.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct ContentConfig {
    /// External content service base URL (`None` = read from the database)
    pub api_url: Option<Url>,
    /// Bearer token for the content service
    pub api_token: Option<SecretString>,
    /// How long fetched documents stay cached
    pub cache_ttl: Duration,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            cache_ttl: Duration::from_secs(DEFAULT_CONTENT_CACHE_TTL_SECS),
        }
    }
}

impl std::fmt::Debug for ContentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentConfig")
            .field("api_url", &self.api_url.as_ref().map(Url::as_str))
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(&|key: &str| std::env::var(key).ok())
    }

    fn from_vars(vars: Vars<'_>) -> Result<Self, ConfigError> {
        let database_url = get_database_url(vars, "STOREFRONT_DATABASE_URL")?;
        let host = get_or_default(vars, "STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_or_default(vars, "STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let content = ContentConfig::from_vars(vars)?;
        let sentry_dsn = get_optional(vars, "SENTRY_DSN");
        let sentry_environment = get_optional(vars, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional(vars, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional(vars, "SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            database_url,
            host,
            port,
            content,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ContentConfig {
    fn from_vars(vars: Vars<'_>) -> Result<Self, ConfigError> {
        let api_url = get_optional(vars, "CONTENT_API_URL")
            .map(|raw| parse_api_url(&raw))
            .transpose()?;

        let api_token = match get_optional(vars, "CONTENT_API_TOKEN") {
            Some(token) => {
                validate_secret_strength(&token, "CONTENT_API_TOKEN")?;
                Some(SecretString::from(token))
            }
            None => None,
        };

        let cache_ttl = match get_optional(vars, "CONTENT_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("CONTENT_CACHE_TTL_SECS".to_string(), e.to_string())
            })?),
            None => Duration::from_secs(DEFAULT_CONTENT_CACHE_TTL_SECS),
        };

        Ok(Self {
            api_url,
            api_token,
            cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup; `std::env::var` outside of tests.
type Vars<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(vars: Vars<'_>, primary_key: &str) -> Result<SecretString, ConfigError> {
    vars(primary_key)
        .or_else(|| vars("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional variable; empty values count as unset.
fn get_optional(vars: Vars<'_>, key: &str) -> Option<String> {
    vars(key).filter(|v| !v.is_empty())
}

/// Get a variable with a default value.
fn get_or_default(vars: Vars<'_>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

/// Parse the content service URL. Only http(s) base URLs are accepted.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("CONTENT_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "CONTENT_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-content-token", "CONTENT_API_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "CONTENT_API_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "CONTENT_API_TOKEN");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url("https://cms.ansania.test/api").unwrap();
        assert_eq!(url.host_str(), Some("cms.ansania.test"));

        assert!(matches!(
            parse_api_url("ftp://cms.ansania.test"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            parse_api_url("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        StorefrontConfig::from_vars(&|key: &str| vars.get(key).map(ToString::to_string))
    }

    #[test]
    fn test_only_database_url_is_required() {
        let config = load(&[("STOREFRONT_DATABASE_URL", "postgres://localhost/ansania")]).unwrap();

        assert_eq!(
            config.database_url.expose_secret(),
            "postgres://localhost/ansania"
        );
        assert_eq!(config.port, 3000);
        assert!(config.content.api_url.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fly/ansania")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fly/ansania");

        assert!(matches!(
            load(&[]),
            Err(ConfigError::MissingEnvVar(key)) if key == "STOREFRONT_DATABASE_URL"
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            content: ContentConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_content_config_debug_redacts_token() {
        let config = ContentConfig {
            api_url: Some(Url::parse("https://cms.ansania.test/").unwrap()),
            api_token: Some(SecretString::from("super_secret_content_token")),
            cache_ttl: Duration::from_secs(60),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("cms.ansania.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_content_token"));
    }
}
