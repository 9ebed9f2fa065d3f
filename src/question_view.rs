use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::manager::question_manager::QuestionManager;
use crate::manager::Question;
use crate::AppState;

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = QuestionManager::new(&state.pool).list().await?;
    Ok(Json(questions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    title: String,
    content: String,
    user_id: String,
}

pub async fn create_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewQuestion>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let question = QuestionManager::new(&state.pool)
        .create(&payload.title, &payload.content, &payload.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(question)))
}
