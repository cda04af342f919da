use std::env;
use std::time::Duration;

/// MySQL listens on its standard port; the source deployment never overrides it.
pub const DB_PORT: u16 = 3306;
pub const SERVER_PORT: u16 = 3000;
pub const STATIC_DIR: &str = "public";
pub const DEFAULT_DB_NAME: &str = "myappdb";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_port: u16,
    pub db_name: String,
    pub server_port: u16,
    pub static_dir: String,
    pub request_timeout: Duration,
    pub max_pool_size: u32,
}

impl Config {
    /// Read configuration from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            db_host: required("DB_HOST")?,
            db_user: required("DB_USER")?,
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_port: DB_PORT,
            db_name: lookup("DB_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            server_port: SERVER_PORT,
            static_dir: STATIC_DIR.to_string(),
            request_timeout: Duration::from_secs(positive(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            max_pool_size: positive(&lookup, "MAX_POOL_SIZE", 5)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}

/// Parse an optional numeric variable that must be greater than zero.
fn positive<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Default + PartialOrd,
{
    let value = match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key))?,
        None => default,
    };

    if value > T::default() {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(key))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must be a positive number")]
    Invalid(&'static str),
}
