use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{JwtConfig, MIN_SECRET_LEN, generate_secure_jwt_secret};
use crate::core::{Result, ServerError};
use crate::payments::PaymentSettings;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | database file and logs |
/// | HTTP_PORT | 5000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | default tracing filter |
/// | LOG_JSON | false | JSON log output |
/// | JWT_SECRET | dev fallback | token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | PAYMENT_KEY_ID | dev fallback | gateway key id |
/// | PAYMENT_KEY_SECRET | dev fallback | gateway key secret |
/// | PAYMENT_WEBHOOK_SECRET | key secret | callback HMAC secret |
/// | PAYMENT_GATEWAY_URL | unset | gateway base URL, unset uses the local gateway |
/// | PAYMENT_CURRENCY | INR | gateway order currency |
/// | GATEWAY_TIMEOUT_MS | 10000 | gateway call timeout |
/// | REAPER_INTERVAL_SECS | 3600 | pending-order sweep period |
/// | PENDING_ORDER_TTL_SECS | 7200 | age at which a pending order is reaped |
///
/// Secrets must be set outside `development`.
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub jwt: JwtConfig,
    pub payment: PaymentConfig,
    pub reaper_interval_secs: u64,
    pub pending_order_ttl_secs: u64,
}

/// Gateway credentials
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub key_id: String,
    pub key_secret: String,
    pub webhook_secret: String,
    pub gateway_url: Option<String>,
    pub currency: String,
    pub gateway_timeout_ms: u64,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Secret from the environment; a placeholder is allowed only in development
    fn require_secret(name: &str, environment: &str) -> Result<String> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ServerError::Config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    /// JWT signing secret; development without one gets a random per-process key
    fn jwt_secret(environment: &str) -> Result<String> {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                if environment != "development" && secret.len() < MIN_SECRET_LEN {
                    return Err(ServerError::Config(format!(
                        "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                    )));
                }
                Ok(secret)
            }
            _ if environment == "development" => {
                generate_secure_jwt_secret().map_err(|e| ServerError::Config(e.to_string()))
            }
            _ => Err(ServerError::Config(format!(
                "JWT_SECRET must be set in {environment} environment"
            ))),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt_secret = Self::jwt_secret(&environment)?;

        let key_secret = Self::require_secret("PAYMENT_KEY_SECRET", &environment)?;
        let gateway_url = std::env::var("PAYMENT_GATEWAY_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());
        if gateway_url.is_none() && environment == "production" {
            return Err(ServerError::Config(
                "PAYMENT_GATEWAY_URL must be set in production environment".into(),
            ));
        }

        let config = Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            http_port: env_or("HTTP_PORT", 5000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            jwt: JwtConfig::new(jwt_secret, env_or("JWT_EXPIRATION_MINUTES", 1440)),
            payment: PaymentConfig {
                key_id: Self::require_secret("PAYMENT_KEY_ID", &environment)?,
                webhook_secret: std::env::var("PAYMENT_WEBHOOK_SECRET")
                    .ok()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| key_secret.clone()),
                key_secret,
                gateway_url,
                currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),
                gateway_timeout_ms: env_or("GATEWAY_TIMEOUT_MS", 10_000),
            },
            reaper_interval_secs: env_or("REAPER_INTERVAL_SECS", 3600),
            pending_order_ttl_secs: env_or("PENDING_ORDER_TTL_SECS", 7200),
            environment,
        };

        if config.reaper_interval_secs == 0 {
            return Err(ServerError::Config("REAPER_INTERVAL_SECS must be positive".into()));
        }
        Ok(config)
    }

    /// Development configuration rooted at `work_dir`
    ///
    /// Used by tests; reads nothing from the environment.
    pub fn for_work_dir(work_dir: impl Into<String>) -> Self {
        let key_secret = "dev-PAYMENT_KEY_SECRET-not-for-production".to_string();
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            jwt: JwtConfig::new("dev-JWT_SECRET-not-for-production-0000", 1440),
            payment: PaymentConfig {
                key_id: "dev-PAYMENT_KEY_ID-not-for-production".into(),
                webhook_secret: key_secret.clone(),
                key_secret,
                gateway_url: None,
                currency: "INR".into(),
                gateway_timeout_ms: 10_000,
            },
            reaper_interval_secs: 3600,
            pending_order_ttl_secs: 7200,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// redb file location
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("orders.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs)
    }

    pub fn pending_order_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_order_ttl_secs)
    }

    pub fn payment_settings(&self) -> PaymentSettings {
        PaymentSettings {
            key_id: self.payment.key_id.clone(),
            webhook_secret: self.payment.webhook_secret.clone(),
            currency: self.payment.currency.clone(),
            gateway_timeout: Duration::from_millis(self.payment.gateway_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_placeholder_only_in_development() {
        let name = "ORDER_SERVER_TEST_UNSET_SECRET";
        assert_eq!(
            Config::require_secret(name, "development").unwrap(),
            format!("dev-{name}-not-for-production")
        );
        assert!(matches!(
            Config::require_secret(name, "production"),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_development_jwt_secret_is_generated() {
        // JWT_SECRET is not set in the test environment
        if std::env::var("JWT_SECRET").is_ok() {
            return;
        }
        let first = Config::jwt_secret("development").unwrap();
        let second = Config::jwt_secret("development").unwrap();
        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
        assert!(matches!(
            Config::jwt_secret("production"),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_work_dir_layout() {
        let config = Config::for_work_dir("/tmp/orders");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/orders/orders.redb"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/orders/logs"));
        assert_eq!(config.reaper_interval(), Duration::from_secs(3600));
        assert_eq!(config.pending_order_ttl(), Duration::from_secs(7200));
        assert!(config.is_development());
    }

    #[test]
    fn test_webhook_secret_defaults_to_key_secret() {
        let config = Config::for_work_dir("/tmp/orders");
        assert_eq!(config.payment.webhook_secret, config.payment.key_secret);
        let settings = config.payment_settings();
        assert_eq!(settings.currency, "INR");
        assert_eq!(settings.gateway_timeout, Duration::from_secs(10));
    }
}
