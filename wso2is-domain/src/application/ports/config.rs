use crate::domain::entities::TenantEndpoints;
use crate::domain::errors::{ConfigError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Identity server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Wso2Config {
    pub host: String,
    pub tenant: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: String,
    pub organization_id: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for Wso2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wso2Config")
            .field("host", &self.host)
            .field("tenant", &self.tenant)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("organization_id", &self.organization_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl Wso2Config {
    pub fn validate(&self) -> DomainResult<()> {
        if self.host.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: keys::HOST.to_string(),
            }
            .into());
        }

        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: keys::HOST.to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        for (key, value) in [
            (keys::TENANT_NAME, &self.tenant),
            (keys::CLIENT_ID, &self.client_id),
            (keys::CLIENT_SECRET, &self.client_secret),
            (keys::ORG_ID, &self.organization_id),
            (keys::REDIRECT_URI, &self.redirect_uri),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingRequired {
                    key: key.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn endpoints(&self) -> TenantEndpoints {
        TenantEndpoints::new(self.host.clone(), self.tenant.clone())
    }
}

/// Sign-in and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub session_ttl_seconds: u64,
    pub state_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 8 * 3600,
            state_ttl_seconds: 600,
        }
    }
}

impl AuthConfig {
    /// Longest accepted session lifetime (30 days)
    pub const MAX_SESSION_TTL_SECONDS: u64 = 30 * 24 * 3600;
    /// Longest accepted sign-in round trip (1 hour)
    pub const MAX_STATE_TTL_SECONDS: u64 = 3600;

    pub fn validate(&self) -> DomainResult<()> {
        for (key, value, max) in [
            (
                "SESSION_TTL_SECONDS",
                self.session_ttl_seconds,
                Self::MAX_SESSION_TTL_SECONDS,
            ),
            (
                "OAUTH_STATE_TTL_SECONDS",
                self.state_ttl_seconds,
                Self::MAX_STATE_TTL_SECONDS,
            ),
        ] {
            if value == 0 || value > max {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("Must be between 1 and {max}"),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn get_session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }

    pub fn get_state_ttl(&self) -> Duration {
        Duration::from_secs(self.state_ttl_seconds)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            max_retries: 2,
            retry_delay_ms: 200,
            user_agent: "wso2is-domain/0.1.0".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn get_retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Shared client used by every outbound adapter
    pub fn build_client(&self) -> DomainResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.get_timeout())
            .connect_timeout(self.get_connect_timeout())
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| {
                ConfigError::InvalidValue {
                    key: "HTTP".to_string(),
                    message: format!("Failed to build HTTP client: {e}"),
                }
                .into()
            })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Environment-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Setting names, shared by the JSON config file and the environment
pub mod keys {
    pub const CONFIG_FILE: &str = "CONFIG_FILE";
    pub const HOST: &str = "WSO2IS_HOST";
    pub const TENANT_NAME: &str = "WSO2IS_TENANT_NAME";
    pub const CLIENT_ID: &str = "WSO2IS_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "WSO2IS_CLIENT_SECRET";
    pub const SCOPES: &str = "WSO2IS_SCOPES";
    pub const ORG_ID: &str = "WSO2IS_ORG_ID";
    pub const REDIRECT_URI: &str = "WSO2IS_REDIRECT_URI";
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub wso2: Wso2Config,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.wso2.validate()?;
        self.auth.validate()?;
        self.http.validate()?;
        Ok(())
    }

    /// Load configuration from the optional `CONFIG_FILE` JSON document,
    /// overridden by environment variables of the same name
    pub fn from_env() -> DomainResult<Self> {
        let file_settings = match std::env::var(keys::CONFIG_FILE) {
            Ok(path) => read_settings_file(Path::new(&path))?,
            Err(_) => HashMap::new(),
        };

        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_settings.get(key).cloned())
        })
    }

    /// Load configuration from a JSON file only
    pub fn from_file(path: &Path) -> DomainResult<Self> {
        let settings = read_settings_file(path)?;
        Self::from_lookup(|key| settings.get(key).cloned())
    }

    /// Build configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let require = |key: &str| {
            lookup(key).ok_or_else(|| ConfigError::MissingRequired {
                key: key.to_string(),
            })
        };

        let environment = get_or("ENVIRONMENT", "development")
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ENVIRONMENT".to_string(),
                message: "Must be one of: development, test, staging, production".to_string(),
            })?;

        let wso2 = Wso2Config {
            host: require(keys::HOST)?,
            tenant: get_or(keys::TENANT_NAME, "carbon.super"),
            client_id: require(keys::CLIENT_ID)?,
            client_secret: require(keys::CLIENT_SECRET)?,
            scopes: get_or(keys::SCOPES, "openid internal_login"),
            organization_id: require(keys::ORG_ID)?,
            redirect_uri: get_or(keys::REDIRECT_URI, "http://localhost:3000/auth/callback"),
        };

        let auth_defaults = AuthConfig::default();
        let auth = AuthConfig {
            session_ttl_seconds: parse_or(
                &lookup,
                "SESSION_TTL_SECONDS",
                auth_defaults.session_ttl_seconds,
            )?,
            state_ttl_seconds: parse_or(
                &lookup,
                "OAUTH_STATE_TTL_SECONDS",
                auth_defaults.state_ttl_seconds,
            )?,
        };

        let http_defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout_seconds: parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", http_defaults.timeout_seconds)?,
            connect_timeout_seconds: parse_or(
                &lookup,
                "HTTP_CONNECT_TIMEOUT_SECONDS",
                http_defaults.connect_timeout_seconds,
            )?,
            max_retries: parse_or(&lookup, "HTTP_MAX_RETRIES", http_defaults.max_retries)?,
            retry_delay_ms: parse_or(&lookup, "HTTP_RETRY_DELAY_MS", http_defaults.retry_delay_ms)?,
            user_agent: get_or("HTTP_USER_AGENT", &http_defaults.user_agent),
        };

        let logging = LoggingConfig {
            level: get_or("LOG_LEVEL", "info").parse().unwrap_or(LogLevel::Info),
            format: get_or("LOG_FORMAT", "compact")
                .parse()
                .unwrap_or(LogFormat::Compact),
        };

        let config = AppConfig {
            environment,
            wso2,
            auth,
            http,
            logging,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}' is not a valid number"),
        }),
        None => Ok(default),
    }
}

/// Read a flat JSON object; scalar values are stringified
fn read_settings_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileError {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;

    let document: HashMap<String, serde_json::Value> =
        serde_json::from_str(&raw).map_err(|e| ConfigError::FileError {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;

    Ok(document
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

/// String parsing implementations
impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
