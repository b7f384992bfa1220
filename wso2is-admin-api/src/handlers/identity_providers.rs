use crate::{
    dto::CreateIdentityProviderRequest,
    error::{AppError, AppResult},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use wso2is_domain::{IdentityProviderSummary, Session};

pub async fn list_identity_providers(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<IdentityProviderSummary>>> {
    let providers = state
        .identity_provider_service
        .list_identity_providers(&session)
        .await?;
    Ok(Json(providers))
}

pub async fn create_identity_provider(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    request: Result<Json<CreateIdentityProviderRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<IdentityProviderSummary>)> {
    let Json(request) = request.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let created = state
        .identity_provider_service
        .create_identity_provider(&request.template_id, &request.form_values, &session)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
