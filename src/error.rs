use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TruckestError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Registry rejected request: {0}")]
    RegistryRejected(String),

    #[error("Registry error with status: {0}")]
    RegistryStatus(StatusCode),
}

impl IntoResponse for TruckestError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            TruckestError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message,
                },
            ),
            TruckestError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Invalid credentials.".to_string(),
                },
            ),
            TruckestError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{what} not found."),
                },
            ),
            TruckestError::RegistryRejected(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "REGISTRY_REJECTED".to_string(),
                    message,
                },
            ),
            TruckestError::Database(err) => match err {
                SqlxError::RowNotFound => (
                    StatusCode::NOT_FOUND,
                    ApiErrorBody {
                        code: "NOT_FOUND".to_string(),
                        message: "Record not found.".to_string(),
                    },
                ),
                SqlxError::Database(db_err) if db_err.is_unique_violation() => (
                    StatusCode::CONFLICT,
                    ApiErrorBody {
                        code: "CONFLICT".to_string(),
                        message: "A record with the same unique value already exists.".to_string(),
                    },
                ),
                SqlxError::Database(db_err) if db_err.is_foreign_key_violation() => (
                    StatusCode::BAD_REQUEST,
                    ApiErrorBody {
                        code: "BAD_REQUEST".to_string(),
                        message: "Request references a record that does not exist.".to_string(),
                    },
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                ),
            },
            TruckestError::Json(_) | TruckestError::Multipart(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: "Malformed request payload.".to_string(),
                },
            ),
            TruckestError::Reqwest(_) | TruckestError::UrlParse(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "Vehicle registry is unavailable.".to_string(),
                },
            ),
            TruckestError::RegistryStatus(code) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody {
                    code: "REGISTRY_ERROR".to_string(),
                    message: format!("Vehicle registry answered with status {code}."),
                },
            ),
            TruckestError::Io(_) | TruckestError::PasswordHash(_) | TruckestError::Join(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
