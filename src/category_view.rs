use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::manager::category_manager::{CategoryChanges, CategoryManager, NewCategory};
use crate::manager::{Category, CategoryWithVotes};
use crate::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    all: bool,
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CategoryWithVotes>>, ApiError> {
    let categories = CategoryManager::new(&state.pool).list(params.all).await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = CategoryManager::new(&state.pool).create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(changes): Json<CategoryChanges>,
) -> Result<Json<Category>, ApiError> {
    let category = CategoryManager::new(&state.pool).update(&id, changes).await?;
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    CategoryManager::new(&state.pool).delete(&id).await?;
    Ok(Json(json!({"message": "Category deleted successfully"})))
}
