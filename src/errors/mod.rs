use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::services::recipe_parser::RecipeError;

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    InvalidPath,
    InvalidTitle(String),
    Malformed(RecipeError),
    TemplateError(String),
}

impl std::fmt::Display for WikiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::NotFound => write!(f, "Not found"),
            WikiError::InvalidPath => write!(f, "Invalid path"),
            WikiError::InvalidTitle(title) => write!(f, "Invalid page title: {:?}", title),
            WikiError::Malformed(e) => write!(f, "Malformed page: {}", e),
            WikiError::TemplateError(e) => write!(f, "Template error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl From<RecipeError> for WikiError {
    fn from(err: RecipeError) -> Self {
        WikiError::Malformed(err)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = match &self {
            WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::InvalidPath | WikiError::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            WikiError::Io(_) | WikiError::Malformed(_) | WikiError::TemplateError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
