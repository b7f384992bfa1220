pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod session_store;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router
///
/// Routes under `/api` other than the template catalog require a session.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/session", get(handlers::auth::current_session))
        .route(
            "/api/identity-providers",
            get(handlers::identity_providers::list_identity_providers)
                .post(handlers::identity_providers::create_identity_provider),
        )
        .route("/api/users", get(handlers::users::list_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::auth::session_middleware,
        ));

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Sign-in flow
        .route("/auth/signin", get(handlers::auth::sign_in))
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/auth/signout", post(handlers::auth::sign_out))
        // Template catalog
        .route("/api/templates", get(handlers::templates::list_templates))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
