use thiserror::Error;

/// Domain-specific errors for identity server administration
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Template not found: {template_id}")]
    TemplateNotFound { template_id: String },

    #[error("Unsupported identity provider kind: {template_id}")]
    UnsupportedProviderKind { template_id: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Organization switch failed for {organization}: {reason}")]
    OrganizationSwitchFailed { organization: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Business rule violation: {rule} - {context}")]
    BusinessRule { rule: String, context: String },
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Authentication-specific errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Discovery failed: {reason}")]
    DiscoveryFailed { reason: String },

    #[error("Token acquisition failed: {reason}")]
    TokenAcquisitionFailed { reason: String },

    #[error("User info request failed: {reason}")]
    UserInfoFailed { reason: String },

    #[error("Organization switch rejected ({status}): {reason}")]
    SwitchRejected { status: u16, reason: String },

    #[error("Organization switch unavailable: {reason}")]
    SwitchUnavailable { reason: String },
}

impl AuthError {
    /// Whether a later attempt of the same call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::SwitchUnavailable { .. } => true,
            AuthError::SwitchRejected { status, .. } => {
                matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DiscoveryFailed { reason } => DomainError::ExternalService {
                service: "WSO2IS".to_string(),
                message: reason,
            },
            AuthError::TokenAcquisitionFailed { reason } => {
                DomainError::AuthenticationFailed { reason }
            }
            AuthError::UserInfoFailed { reason } => DomainError::AuthenticationFailed { reason },
            AuthError::SwitchRejected { status, reason } => DomainError::ExternalService {
                service: "WSO2IS".to_string(),
                message: format!("organization switch returned {status}: {reason}"),
            },
            AuthError::SwitchUnavailable { reason } => DomainError::ExternalService {
                service: "WSO2IS".to_string(),
                message: reason,
            },
        }
    }
}

/// Repository-specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request to {endpoint} failed with {status}: {message}")]
    RequestFailed {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Conflict on {endpoint}: {message}")]
    Conflict { endpoint: String, message: String },

    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionFailed { message } => DomainError::ExternalService {
                service: "WSO2IS".to_string(),
                message,
            },
            RepositoryError::RequestFailed {
                endpoint,
                status,
                message,
            } => DomainError::ExternalService {
                service: "WSO2IS".to_string(),
                message: format!("{endpoint} returned {status}: {message}"),
            },
            RepositoryError::Conflict { message, .. } => DomainError::AlreadyExists {
                entity_type: "Identity provider".to_string(),
                identifier: message,
            },
            RepositoryError::SerializationFailed { message } => {
                DomainError::Serialization { message }
            }
            RepositoryError::Timeout { endpoint } => DomainError::ExternalService {
                service: "WSO2IS".to_string(),
                message: format!("Request to {endpoint} timed out"),
            },
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file error: {message}")]
    FileError { message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
            ConfigError::FileError { message } => DomainError::Configuration { message },
        }
    }
}
