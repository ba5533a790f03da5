use axum::http::StatusCode;
use thiserror::Error;

use super::{impl_into_response, AppError};

/// Errors returned by the companies endpoints
#[derive(Error, Debug)]
pub enum CompanyError {
    #[error("Invalid query parameters on {endpoint}: {details}")]
    InvalidQueryParameters {
        endpoint: &'static str,
        details: String,
    },

    #[error("{message}")]
    Internal {
        endpoint: &'static str,
        message: String,
    },
}

impl CompanyError {
    pub fn invalid_query<S: Into<String>>(endpoint: &'static str, details: S) -> Self {
        Self::InvalidQueryParameters {
            endpoint,
            details: details.into(),
        }
    }

    /// Wrap a storage failure, keeping its full cause chain for the log.
    pub fn internal(endpoint: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |err| Self::Internal {
            endpoint,
            message: format!("{:#}", err),
        }
    }
}

impl AppError for CompanyError {
    fn status_code(&self) -> StatusCode {
        match self {
            CompanyError::InvalidQueryParameters { .. } => StatusCode::BAD_REQUEST,
            CompanyError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            CompanyError::InvalidQueryParameters { .. } => "Invalid query parameters".to_string(),
            CompanyError::Internal { .. } => "Internal Server Error".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CompanyError::InvalidQueryParameters { .. } => "INVALID_QUERY_PARAMETERS",
            CompanyError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    fn endpoint(&self) -> Option<&'static str> {
        match self {
            CompanyError::InvalidQueryParameters { endpoint, .. }
            | CompanyError::Internal { endpoint, .. } => Some(*endpoint),
        }
    }
}

impl_into_response!(CompanyError);
