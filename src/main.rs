use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{routing, Json, Router};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod auth_view;
mod category_view;
mod contestant_view;
mod error;
mod manager;
mod message_view;
mod question_view;
mod utils;
mod vote_view;

pub struct AppState {
    pub pool: sqlx::SqlitePool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("youth_connect=debug,tower_http=info")),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable must be set"))?;
    let pool = SqlitePoolOptions::new().connect(&database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_owned())
        .parse()?;
    tracing::info!("listening on {addr}");

    axum::Server::bind(&addr)
        .serve(app(Arc::new(AppState { pool })).into_make_service())
        .await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://localhost:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", routing::get(root))
        .route("/api/auth/register", routing::post(auth_view::register))
        .route("/api/auth/login", routing::post(auth_view::login))
        .route(
            "/api/categories",
            routing::get(category_view::list_categories).post(category_view::create_category),
        )
        .route(
            "/api/categories/:id",
            routing::patch(category_view::update_category)
                .delete(category_view::delete_category),
        )
        .route(
            "/api/categories/:id/contestants",
            routing::get(contestant_view::list_contestants)
                .post(contestant_view::create_contestant),
        )
        .route(
            "/api/contestants/:id",
            routing::patch(contestant_view::update_contestant)
                .delete(contestant_view::delete_contestant),
        )
        .route(
            "/api/votes",
            routing::get(vote_view::list_votes).post(vote_view::create_vote),
        )
        .route(
            "/api/votes/:category_id/count",
            routing::get(vote_view::vote_count),
        )
        .route("/api/votes/:category_id", routing::delete(vote_view::delete_vote))
        .route(
            "/api/messages",
            routing::get(message_view::list_messages).post(message_view::create_message),
        )
        .route(
            "/api/questions",
            routing::get(question_view::list_questions).post(question_view::create_question),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({"message": "Youth Connect API"}))
}
