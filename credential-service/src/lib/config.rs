use std::env;
use std::fmt;

use auth::HashingParams;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum signing key length for HS256.
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year).
pub const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default)]
    pub secret: String,
    pub ttl_seconds: u64,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_seconds as i64)
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct HashingConfig {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl From<HashingConfig> for HashingParams {
    fn from(config: HashingConfig) -> Self {
        HashingParams {
            memory_cost_kib: config.memory_cost_kib,
            time_cost: config.time_cost,
            parallelism: config.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (every key except the token secret)
    ///
    /// The loaded configuration is validated; a missing or short token
    /// secret is an error, never a fallback.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let defaults = HashingParams::default();

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 3000)?
            .set_default("token.ttl_seconds", 3600)?
            .set_default("hashing.memory_cost_kib", i64::from(defaults.memory_cost_kib))?
            .set_default("hashing.time_cost", i64::from(defaults.time_cost))?
            .set_default("hashing.parallelism", i64::from(defaults.parallelism))?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.is_empty() {
            return Err(ConfigError::Message(
                "token.secret is required (set TOKEN__SECRET)".to_string(),
            ));
        }

        if self.token.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "token.secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        if self.token.ttl_seconds == 0 || self.token.ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be between 1 and {} seconds",
                MAX_TTL_SECONDS
            )));
        }

        auth::PasswordHasher::with_params(self.hashing.into())
            .map_err(|e| ConfigError::Message(format!("hashing: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig { http_port: 3000 },
            token: TokenConfig {
                secret: "test-secret-key-for-token-signing-at-least-32-bytes".to_string(),
                ttl_seconds: 3600,
            },
            hashing: HashingConfig {
                memory_cost_kib: 8,
                time_cost: 1,
                parallelism: 1,
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config();
        assert!(config.validate().is_ok());
        assert_eq!(config.token.ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_missing_secret_rejected() {
        let mut config = config();
        config.token.secret = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TOKEN__SECRET"));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = config();
        config.token.secret = "too-short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = config();
        config.token.ttl_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let mut config = config();

        config.token.ttl_seconds = MAX_TTL_SECONDS;
        assert!(config.validate().is_ok());
        assert!(Utc::now().checked_add_signed(config.token.ttl()).is_some());

        config.token.ttl_seconds = MAX_TTL_SECONDS + 1;
        assert!(config.validate().is_err());

        config.token.ttl_seconds = i64::MAX as u64 / 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_hashing_params_rejected() {
        let mut config = config();
        config.hashing.time_cost = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
