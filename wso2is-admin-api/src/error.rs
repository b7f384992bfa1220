use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use wso2is_domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e {
                DomainError::TemplateNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::UnsupportedProviderKind { .. } => StatusCode::BAD_REQUEST,
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::AlreadyExists { .. } => StatusCode::CONFLICT,
                DomainError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
                DomainError::OrganizationSwitchFailed { .. } => StatusCode::BAD_GATEWAY,
                DomainError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
                DomainError::Serialization { .. } => StatusCode::BAD_GATEWAY,
                DomainError::BusinessRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Domain(e) => e.to_string(),
            AppError::BadRequest(msg) => msg,
            AppError::Unauthorized => "Unauthorized".to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, "{}", error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
