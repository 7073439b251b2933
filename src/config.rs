//! Environment-driven process configuration.
//!
//! Every setting has a default, so an empty environment yields a working
//! development configuration. Values that are present but malformed are
//! rejected with a [`ConfigError`] naming the variable.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be parsed.
    #[error("invalid value for {var}: {value:?} ({message})")]
    InvalidValue {
        /// Name of the offending environment variable.
        var: &'static str,
        /// The raw value that was rejected.
        value: String,
        /// What was expected instead.
        message: &'static str,
    },
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development; verbose text logs.
    Development,
    /// Production; JSON logs at `info`.
    Production,
    /// Automated tests; JSON logs at `warn`.
    Test,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidValue {
                var: "ENV",
                value: value.to_owned(),
                message: "expected development, production, or test",
            }),
        }
    }

    const fn default_log_level(self) -> &'static str {
        match self {
            Self::Production => "info",
            Self::Test => "warn",
            Self::Development => "debug",
        }
    }

    const fn default_log_format(self) -> LogFormat {
        match self {
            Self::Production | Self::Test => LogFormat::Json,
            Self::Development => LogFormat::Text,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                var: "LOG_FORMAT",
                value: value.to_owned(),
                message: "expected text or json",
            }),
        }
    }
}

/// Logging settings consumed by [`crate::telemetry::init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it when set.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// `PostgreSQL` connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// libpq `sslmode` value.
    pub sslmode: String,
}

impl DatabaseConfig {
    /// Returns the libpq connection URL, percent-encoding the credentials
    /// and database name.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.sslmode),
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}

/// Connection pool sizing and timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on open connections.
    pub max_size: u32,
    /// Connections kept open while idle.
    pub min_idle: u32,
    /// Maximum age of a connection before it is recycled.
    pub max_lifetime: Duration,
    /// How long an idle connection is kept above `min_idle`.
    pub idle_timeout: Duration,
    /// How long to wait for a connection before failing.
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 25,
            min_idle: 5,
            max_lifetime: Duration::from_secs(60 * 60),
            idle_timeout: Duration::from_secs(30 * 60),
            connection_timeout: Duration::from_secs(10),
        }
    }
}

/// Complete process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Pool sizing.
    pub pool: PoolConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let environment = Environment::parse(&read("ENV", "development"))?;
        let raw_port = read("DB_PORT", "5432");
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue {
                var: "DB_PORT",
                value: raw_port.clone(),
                message: "expected a port number",
            })?;

        let database = DatabaseConfig {
            host: read("DB_HOST", "localhost"),
            port,
            user: read("DB_USER", "pr_user"),
            password: read("DB_PASSWORD", "pr_password"),
            name: read("DB_NAME", "pr_review_service"),
            sslmode: read("DB_SSLMODE", "disable"),
        };

        let format = lookup("LOG_FORMAT")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(
                || Ok(environment.default_log_format()),
                |raw| LogFormat::parse(&raw),
            )?;
        let logging = LoggingConfig {
            level: read("LOG_LEVEL", environment.default_log_level()),
            format,
        };

        Ok(Self {
            environment,
            database,
            pool: PoolConfig::default(),
            logging,
        })
    }
}
