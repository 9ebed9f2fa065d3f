use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::manager::contestant_manager::{ContestantChanges, ContestantManager};
use crate::manager::Contestant;
use crate::AppState;

pub async fn list_contestants(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Contestant>>, ApiError> {
    let contestants = ContestantManager::new(&state.pool).list(&category_id).await?;
    Ok(Json(contestants))
}

#[derive(Deserialize)]
pub struct NewContestant {
    name: String,
    surname: String,
    #[serde(default)]
    picture: Option<String>,
}

pub async fn create_contestant(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
    Json(payload): Json<NewContestant>,
) -> Result<(StatusCode, Json<Contestant>), ApiError> {
    let contestant = ContestantManager::new(&state.pool)
        .create(&category_id, &payload.name, &payload.surname, payload.picture)
        .await?;
    Ok((StatusCode::CREATED, Json(contestant)))
}

pub async fn update_contestant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(changes): Json<ContestantChanges>,
) -> Result<Json<Contestant>, ApiError> {
    let contestant = ContestantManager::new(&state.pool).update(&id, changes).await?;
    Ok(Json(contestant))
}

pub async fn delete_contestant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ContestantManager::new(&state.pool).delete(&id).await?;
    Ok(Json(json!({"message": "Contestant deleted successfully"})))
}
