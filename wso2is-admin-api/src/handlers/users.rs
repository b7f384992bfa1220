use crate::{error::AppResult, state::AppState};
use axum::{extract::State, Extension, Json};
use wso2is_domain::{Session, UserSummary};

pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.user_directory.list_users(&session).await?;
    Ok(Json(users))
}
