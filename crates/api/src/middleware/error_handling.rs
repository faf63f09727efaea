//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Slotbook API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::BookingError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `BookingError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::BookingError;
///
/// async fn handler(name: Option<String>) -> Result<Json<String>, AppError> {
///     let name = name.ok_or_else(|| BookingError::Validation("name is required".into()))?;
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidSchedule(_) => StatusCode::BAD_REQUEST,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from BookingError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, BookingError>` in handler functions that return `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// It wraps the eyre error in a BookingError::Storage variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Storage(err))
    }
}

/// Maps a BookingError to an HTTP response
///
/// # Arguments
///
/// * `err` - The BookingError to convert
///
/// # Returns
///
/// * `Response` - An HTTP response with appropriate status code and body
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
