use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Error de entrada/salida al generar el reporte: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InternalError(String),
}

/// Rejected grade value; the only way a record can fail construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("la calificación debe estar entre 0.0 y 5.0, se recibió {0}")]
pub struct GradeOutOfRange(pub f64);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),

    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Unprocessable(_) => "UNPROCESSABLE_ENTITY",
            ApiError::Io(_) => "IO_FAILURE",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }
        HttpResponse::build(status).json(ErrorResponse {
            detail: self.to_string(),
            code: self.code().to_string(),
        })
    }
}
