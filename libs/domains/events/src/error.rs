use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        match self {
            // Not-found keeps the plain-text body clients depend on
            EventError::NotFound(id) => {
                tracing::info!(event_id = %id, "Event not found");
                (StatusCode::NOT_FOUND, "Event not found").into_response()
            }
            EventError::Validation(msg) => AppError::BadRequest(msg).into_response(),
            EventError::Database(msg) => AppError::InternalServerError(msg).into_response(),
        }
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}
