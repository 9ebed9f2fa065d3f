use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::manager::{category_manager, contestant_manager, user_manager, vote_manager};

/// Everything a handler can fail with, mapped onto the `{"detail": ...}`
/// wire shape the frontend consumes.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

#[derive(Serialize)]
struct Detail {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(ref err) => {
                tracing::error!("request failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::PasswordHash(ref err) => {
                tracing::error!("password hashing failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(Detail {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<user_manager::Error> for ApiError {
    fn from(err: user_manager::Error) -> Self {
        match err {
            user_manager::Error::EmailTaken => {
                ApiError::BadRequest("User already exists".to_owned())
            }
            user_manager::Error::InvalidCredentials => ApiError::InvalidCredentials,
            user_manager::Error::PasswordHash(err) => ApiError::PasswordHash(err),
            user_manager::Error::DatabaseError(err) => ApiError::Database(err),
        }
    }
}

impl From<category_manager::Error> for ApiError {
    fn from(err: category_manager::Error) -> Self {
        match err {
            category_manager::Error::DoesNotExist => {
                ApiError::NotFound("Category not found".to_owned())
            }
            category_manager::Error::DatabaseError(err) => ApiError::Database(err),
        }
    }
}

impl From<contestant_manager::Error> for ApiError {
    fn from(err: contestant_manager::Error) -> Self {
        match err {
            contestant_manager::Error::CategoryDoesNotExist => {
                ApiError::NotFound("Category not found".to_owned())
            }
            contestant_manager::Error::DoesNotExist => {
                ApiError::NotFound("Contestant not found".to_owned())
            }
            contestant_manager::Error::DatabaseError(err) => ApiError::Database(err),
        }
    }
}

impl From<vote_manager::Error> for ApiError {
    fn from(err: vote_manager::Error) -> Self {
        match err {
            vote_manager::Error::AlreadyVoted => {
                ApiError::BadRequest("You have already voted for this category".to_owned())
            }
            vote_manager::Error::DoesNotExist => ApiError::NotFound("Vote not found".to_owned()),
            vote_manager::Error::DatabaseError(err) => ApiError::Database(err),
        }
    }
}
