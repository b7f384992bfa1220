use crate::{dto::TemplateDto, state::AppState};
use axum::{extract::State, Json};

pub async fn list_templates(State(state): State<AppState>) -> Json<Vec<TemplateDto>> {
    let templates = state
        .identity_provider_service
        .list_templates()
        .iter()
        .map(TemplateDto::from)
        .collect();
    Json(templates)
}
