use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::manager::vote_manager::{VoteIdentity, VoteManager};
use crate::manager::Vote;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityParams {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl IdentityParams {
    fn into_identity(self) -> Result<VoteIdentity, ApiError> {
        VoteIdentity::from_parts(self.user_id, self.email)
            .ok_or_else(|| ApiError::BadRequest("User ID or Email is required".to_owned()))
    }
}

pub async fn list_votes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdentityParams>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    let identity = params.into_identity()?;
    let votes = VoteManager::new(&state.pool).list(&identity).await?;
    Ok(Json(votes))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVote {
    category_id: String,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

pub async fn create_vote(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewVote>,
) -> Result<(StatusCode, Json<Vote>), ApiError> {
    let identity = VoteIdentity::from_parts(payload.user_id, payload.email)
        .ok_or_else(|| ApiError::BadRequest("User ID or Email is required".to_owned()))?;

    let vote = VoteManager::new(&state.pool)
        .create(&payload.category_id, identity)
        .await?;
    Ok((StatusCode::CREATED, Json(vote)))
}

pub async fn vote_count(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let count = VoteManager::new(&state.pool)
        .count_for_category(&category_id)
        .await?;
    Ok(Json(json!({"count": count})))
}

pub async fn delete_vote(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
    Query(params): Query<IdentityParams>,
) -> Result<Json<Value>, ApiError> {
    let identity = params.into_identity()?;
    VoteManager::new(&state.pool)
        .delete(&category_id, &identity)
        .await?;
    Ok(Json(json!({"message": "Vote removed"})))
}
