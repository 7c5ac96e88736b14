/// Forkful - Configuration management.
///
/// Loads configuration from TOML files with multi-environment support.
///
/// Loading order:
/// 1. config/default.toml - default values
/// 2. config/{environment}.toml - environment-specific values
/// 3. config/local.toml - local overrides (not versioned)
/// 4. FORKFUL_SECRET_KEY environment variable (secrets only)
///
/// Configuration directory lookup order:
/// 1. FORKFUL_CONFIG_DIR environment variable (if set)
/// 2. Crate root config/ directory (development)
/// 3. /etc/forkful/ (production)
use config::{Config as ConfigBuilder, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Macro to generate a Debug implementation that redacts sensitive fields.
#[macro_export]
macro_rules! debug_redacted_struct {
    (
        $name:ident,
        redact: [$($redact:ident),*]
    ) => {
        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    $(.field(stringify!($redact), &"[REDACTED]"))*
                    .finish()
            }
        }
    };
}

/// Application environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "testing" | "test" => Self::Testing,
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format for log aggregation.
    Json,
    /// Human-readable text format (default).
    #[default]
    Text,
}

impl LogFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Application configuration.
/// All values must be defined in TOML files.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    /// Secret used for signing session tokens and flash cookies.
    pub secret_key: secrecy::SecretString,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

debug_redacted_struct!(
    Config,
    redact: [secret_key]
);

/// Database configuration.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: secrecy::SecretString,
    pub max_connections: u32,
}

debug_redacted_struct!(
    DatabaseConfig,
    redact: [url]
);

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub lifetime_minutes: u64,
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub password_min_length: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error.
    pub level: String,
    /// Log format: json or text.
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from TOML files.
    pub fn load() -> Result<Self, crate::error::AppError> {
        let config_path = Self::find_config_dir()?;
        Self::load_from_path(config_path)
    }

    /// Find the configuration directory.
    fn find_config_dir() -> Result<PathBuf, crate::error::AppError> {
        // 1. Explicit FORKFUL_CONFIG_DIR environment variable
        if let Ok(path) = std::env::var("FORKFUL_CONFIG_DIR") {
            let config_path = PathBuf::from(&path);
            if config_path.exists() {
                return Ok(config_path);
            }
            return Err(crate::error::AppError::Config(format!(
                "FORKFUL_CONFIG_DIR points to non-existent directory: {}",
                path
            )));
        }

        // 2. Crate root config/ directory (development)
        let crate_config = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        if crate_config.exists() {
            return Ok(crate_config);
        }

        // 3. System configuration directory (production)
        let system_config = Path::new("/etc/forkful");
        if system_config.exists() {
            return Ok(system_config.to_path_buf());
        }

        Err(crate::error::AppError::Config(
            "Configuration directory not found. Searched:\n\
             - FORKFUL_CONFIG_DIR environment variable\n\
             - Crate root config/ directory\n\
             - /etc/forkful/"
                .to_string(),
        ))
    }

    /// Load configuration from a specific directory path.
    ///
    /// The environment is taken from FORKFUL_ENVIRONMENT, defaulting to
    /// development.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, crate::error::AppError> {
        let environment = std::env::var("FORKFUL_ENVIRONMENT")
            .map(|e| Environment::parse(&e))
            .unwrap_or(Environment::Development);

        Self::load_with_environment(config_path, environment)
    }

    /// Load configuration with a specific environment.
    pub fn load_with_environment<P: AsRef<Path>>(
        config_path: P,
        environment: Environment,
    ) -> Result<Self, crate::error::AppError> {
        let config_path = config_path.as_ref();

        let mut builder = ConfigBuilder::builder();

        // 1. default.toml (required)
        let default_path = config_path.join("default.toml");
        if !default_path.exists() {
            return Err(crate::error::AppError::Config(format!(
                "Configuration file not found: {}",
                default_path.display()
            )));
        }
        builder = builder.add_source(File::from(default_path));

        // 2. {environment}.toml
        let env_path = config_path.join(format!("{}.toml", environment.as_str()));
        if env_path.exists() {
            builder = builder.add_source(File::from(env_path));
        }

        // 3. local.toml (optional, not versioned)
        // Skipped in testing so local overrides cannot hijack the test database
        if environment != Environment::Testing {
            let local_path = config_path.join("local.toml");
            if local_path.exists() {
                builder = builder.add_source(File::from(local_path));
            }
        }

        // 4. Secret overrides from the environment
        if let Ok(secret) = std::env::var("FORKFUL_SECRET_KEY") {
            builder = builder.set_override("secret_key", secret).map_err(|e| {
                crate::error::AppError::Config(format!("Failed to set secret_key: {}", e))
            })?;
        }
        if let Ok(url) = std::env::var("FORKFUL_DATABASE_URL") {
            builder = builder.set_override("database.url", url).map_err(|e| {
                crate::error::AppError::Config(format!("Failed to set database.url: {}", e))
            })?;
        }

        let settings = builder
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))
    }
}
