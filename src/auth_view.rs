use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::manager::user_manager::UserManager;
use crate::manager::PublicUser;
use crate::AppState;

#[derive(Deserialize)]
pub struct RegisterPayload {
    email: String,
    name: String,
    password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = UserManager::new(&state.pool)
        .create_user(&payload.email, &payload.name, &payload.password, "user")
        .await?;

    tracing::info!(user_id = %user.id, "registered new user");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "userId": user.id,
        })),
    ))
}

#[derive(Deserialize)]
pub struct LoginPayload {
    email: String,
    password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<LoginPayload>,
) -> Result<Json<Value>, ApiError> {
    let user = UserManager::new(&state.pool)
        .login(&credentials.email, &credentials.password)
        .await?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": PublicUser::from(user),
    })))
}
