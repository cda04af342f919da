use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Json, Path, State, rejection::PathRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::{
    db::user_store::UserRepository,
    error::{AppError, Result},
    models::user::{CreateUser, CreatedUser},
};

/// State shared by the user handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Read the create body. Only a malformed JSON document is refused here;
/// bodies without a JSON content type are treated as carrying no fields.
fn parse_create_body(headers: &HeaderMap, body: &[u8]) -> Result<CreateUser> {
    if !is_json(headers) || body.is_empty() {
        return Ok(CreateUser::default());
    }

    let document: Value =
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    match document {
        Value::Object(mut fields) => Ok(CreateUser {
            name: fields.remove("name"),
        }),
        Value::Array(_) => Ok(CreateUser::default()),
        _ => Err(AppError::BadRequest(
            "body must be a JSON object or array".into(),
        )),
    }
}

/// Create user handler
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let request = parse_create_body(&headers, &body)?;
    let id = state.users.create(request.name_param()).await?;

    Ok((
        StatusCode::OK,
        Json(CreatedUser {
            id,
            name: request.name,
        }),
    ))
}

/// List active users handler
pub async fn list_active_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.users.list_active().await?;
    Ok((StatusCode::OK, Json(users)))
}

/// Soft delete handler. Unknown ids still succeed.
pub async fn delete_user(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let affected = state.users.soft_delete(&id).await?;
    if affected == 0 {
        tracing::debug!(%id, "Soft delete matched no rows");
    }
    Ok(StatusCode::OK)
}

/// List deleted users handler
pub async fn list_deleted_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.users.list_deleted().await?;
    Ok((StatusCode::OK, Json(users)))
}
