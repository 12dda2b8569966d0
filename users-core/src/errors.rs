use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Body of every failure response produced by the server.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum UsersError {
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request handler panicked: {0}")]
    Panic(String),
}

impl UsersError {
    /// Builds a `Panic` error from a payload caught by the panic layer.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let detail = if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else {
            "unknown panic payload".to_string()
        };
        UsersError::Panic(detail)
    }
}

// Every error degrades to the same opaque response; the detail only goes
// to the log.
impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        error!(error = ?self, "{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_ERROR_MESSAGE).into_response()
    }
}
