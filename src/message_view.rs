use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::manager::message_manager::MessageManager;
use crate::manager::ChatMessage;
use crate::AppState;

pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = MessageManager::new(&state.pool).list().await?;
    Ok(Json(messages))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    content: String,
    user_id: String,
}

pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMessage>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let message = MessageManager::new(&state.pool)
        .create(&payload.content, &payload.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
