//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_REQUEST_TIMEOUT_SECS` - Per-call timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//!
//! ## Optional (code batches)
//! - `BULK_DISCOUNT_MAX_CODES` - Largest batch per request (default: 250, cap: 10000)
//! - `BULK_DISCOUNT_MAX_CODE_LENGTH` - Longest code (default: 32, cap: 255)
//! - `BULK_DISCOUNT_ATTEMPTS_PER_CODE` - Sampling budget per code (default: 16, cap: 1024)
//! - `BULK_DISCOUNT_APPEND_FAILURES` - `absorb` (default) or `abort`
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use bulk_codes_core::GenerationLimits;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::services::AppendFailurePolicy;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;
const DEFAULT_API_VERSION: &str = "2026-01";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
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

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Code batch limits and registration policy
    pub bulk_discount: BulkDiscountConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Admin API access token (HIGH PRIVILEGE - discount write access)
    pub access_token: SecretString,
    /// Timeout applied to every Admin API call
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ShopifyAdminConfig {
    /// The Admin GraphQL endpoint for this store and API version.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the store domain is not a valid host.
    pub fn graphql_endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "https://{}/admin/api/{}/graphql.json",
            self.store, self.api_version
        ))
    }
}

/// Limits and policy for code batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkDiscountConfig {
    /// Batch size, code length, and sampling bounds
    pub limits: GenerationLimits,
    /// What to do when appending a code fails
    pub append_failure_policy: AppendFailurePolicy,
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

/// Source of configuration values, keyed by variable name.
trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(ToString::to_string)
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(&ProcessEnv)
    }

    fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let host = get_env_or_default(env, "ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(env, "ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        let shopify = ShopifyAdminConfig::from_source(env)?;
        let bulk_discount = BulkDiscountConfig::from_source(env)?;
        let sentry_dsn = env.get("SENTRY_DSN");
        let sentry_environment = env.get("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .get("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let tls = TlsConfig::from_source(env)?;

        Ok(Self {
            host,
            port,
            shopify,
            bulk_discount,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyAdminConfig {
    fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let store = get_required_env(env, "SHOPIFY_STORE")?;
        let api_version = get_env_or_default(env, "SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
        let timeout_secs = parse_or_default(
            env,
            "SHOPIFY_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        // A zero timeout fails every request immediately.
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPIFY_REQUEST_TIMEOUT_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }
        let config = Self {
            store,
            api_version,
            access_token: get_validated_secret(env, "SHOPIFY_ADMIN_ACCESS_TOKEN")?,
            request_timeout: Duration::from_secs(timeout_secs),
        };

        config
            .graphql_endpoint()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_STORE".to_string(), e.to_string()))?;

        Ok(config)
    }
}

impl BulkDiscountConfig {
    fn from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let limits = GenerationLimits::new(
            parse_or_default(
                env,
                "BULK_DISCOUNT_MAX_CODES",
                GenerationLimits::DEFAULT_MAX_CODES,
            )?,
            parse_or_default(
                env,
                "BULK_DISCOUNT_MAX_CODE_LENGTH",
                GenerationLimits::DEFAULT_MAX_CODE_LENGTH,
            )?,
            parse_or_default(
                env,
                "BULK_DISCOUNT_ATTEMPTS_PER_CODE",
                GenerationLimits::DEFAULT_ATTEMPTS_PER_CODE,
            )?,
        );

        let append_failure_policy = parse_or_default(
            env,
            "BULK_DISCOUNT_APPEND_FAILURES",
            AppendFailurePolicy::default(),
        )?;

        Ok(Self {
            limits,
            append_failure_policy,
        })
    }
}

impl TlsConfig {
    fn from_source(env: &impl EnvSource) -> Result<Option<Self>, ConfigError> {
        let cert_pem = env.get("ADMIN_TLS_CERT");
        let key_pem = env.get("ADMIN_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_*".to_string(),
                "Both ADMIN_TLS_CERT and ADMIN_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: &impl EnvSource, key: &str) -> Result<String, ConfigError> {
    env.get(key)
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &impl EnvSource, key: &str, default: &str) -> String {
    env.get(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_or_default<T>(env: &impl EnvSource, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env.get(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
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

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real access tokens are random hex)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by Shopify."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(env: &impl EnvSource, key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(env, key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
