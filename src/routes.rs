use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get},
};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    config::Config,
    handlers::{
        AppState,
        user::{create_user, delete_user, list_active_users, list_deleted_users},
    },
};

/// Build the application router: the user API plus static assets at the root
pub fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/api/users", get(list_active_users).post(create_user))
        .route("/api/users/{id}", delete(delete_user))
        .route("/api/deleted-users", get(list_deleted_users))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
