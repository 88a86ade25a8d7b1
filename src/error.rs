use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error surfaced to the client; each variant maps to one inline message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("User not logged in.")]
    NotLoggedIn,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Generator(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Generator(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Store failures keep their own message; "no rows" becomes a not-found.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(sqlx::Error::RowNotFound) = e.downcast_ref::<sqlx::Error>() {
            return AppError::NotFound("Record not found.".into());
        }
        AppError::Store(format!("{e:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
