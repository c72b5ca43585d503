use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot open GPIO device: {0}")]
    HardwareOpen(String),
    #[error("GPIO error: {0}")]
    Gpio(String),
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Invalid button: {0}")]
    InvalidButton(u32),
    #[error("Render error: {0}")]
    Render(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest(_) | AppError::InvalidButton(_) => StatusCode::BAD_REQUEST,
            AppError::HardwareOpen(_) | AppError::Gpio(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
