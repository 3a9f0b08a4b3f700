use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::models::ErrorResponse;

/// Errors surfaced by the upload route. Every variant renders as `{"error": ...}`
/// and the message of server-side failures is passed through untouched.
#[derive(Debug)]
pub enum AppError {
    MissingFile,
    EmptyFilename,
    BadRequest(String),
    Render(String),
    Image(image::ImageError),
    Internal(String),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFile => write!(f, "No file part"),
            AppError::EmptyFilename => write!(f, "No selected file"),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::Render(msg) => write!(f, "{}", msg),
            AppError::Image(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "{}", msg),
            AppError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile | AppError::EmptyFilename | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: self.to_string() })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Image(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
