use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use nestling_core::AppError;
use tracing_subscriber::EnvFilter;

/// Signing secret used when `JWT_SECRET` is unset outside production.
pub const DEFAULT_JWT_SECRET: &str = "development-secret-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub environment: AppEnvironment,
    pub jwt_secret: String,
    pub jwt_secret_is_default: bool,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub api_host: String,
    pub api_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub permissions_file: Option<PathBuf>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let environment = match optional("APP_ENV").as_deref() {
            None | Some("development") | Some("test") => AppEnvironment::Development,
            Some("production") => AppEnvironment::Production,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "APP_ENV must be 'development', 'test' or 'production', got '{other}'"
                )));
            }
        };

        let (jwt_secret, jwt_secret_is_default) = match optional("JWT_SECRET") {
            Some(secret) => (secret, false),
            None if environment == AppEnvironment::Production => {
                return Err(AppError::Validation(
                    "JWT_SECRET is required when APP_ENV=production".to_owned(),
                ));
            }
            None => (DEFAULT_JWT_SECRET.to_owned(), true),
        };

        let database_max_connections = optional("DATABASE_MAX_CONNECTIONS")
            .map(|value| {
                value.parse::<u32>().map_err(|error| {
                    AppError::Validation(format!("invalid DATABASE_MAX_CONNECTIONS: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(10);

        let api_port = optional("API_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(3000);

        let bootstrap_admin = match (
            optional("BOOTSTRAP_ADMIN_EMAIL"),
            optional("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => {
                return Err(AppError::Validation(
                    "BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .to_owned(),
                ));
            }
        };

        Ok(Self {
            environment,
            jwt_secret,
            jwt_secret_is_default,
            database_url: optional("DATABASE_URL"),
            database_max_connections,
            api_host: optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
            api_port,
            cors_allowed_origin: optional("CORS_ALLOWED_ORIGIN"),
            permissions_file: optional("PERMISSIONS_FILE").map(PathBuf::from),
            bootstrap_admin,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use nestling_core::AppError;

    use super::{ApiConfig, AppEnvironment, DEFAULT_JWT_SECRET};

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() -> Result<(), AppError> {
        let config = load(&[])?;

        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert!(config.jwt_secret_is_default);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.socket_address()?.to_string(), "127.0.0.1:3000");
        assert!(config.bootstrap_admin.is_none());
        Ok(())
    }

    #[test]
    fn production_requires_explicit_secret() {
        let result = load(&[("APP_ENV", "production")]);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = load(&[("APP_ENV", "production"), ("JWT_SECRET", "  ")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn explicit_secret_is_not_flagged_as_default() -> Result<(), AppError> {
        let config = load(&[("APP_ENV", "production"), ("JWT_SECRET", "s3cret")])?;

        assert_eq!(config.jwt_secret, "s3cret");
        assert!(!config.jwt_secret_is_default);
        Ok(())
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = load(&[("API_PORT", "eighty")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn bootstrap_admin_needs_both_values() {
        let result = load(&[("BOOTSTRAP_ADMIN_EMAIL", "root@example.com")]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
