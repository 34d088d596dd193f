use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

fn error_body(error: &str, message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        details: None,
    })
}

/// Fallback handler for requests that match no route.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_body("NotFound", "The requested resource was not found"),
    )
        .into_response()
}

/// Fallback handler for routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        error_body(
            "MethodNotAllowed",
            "The HTTP method is not allowed for this resource",
        ),
    )
        .into_response()
}
