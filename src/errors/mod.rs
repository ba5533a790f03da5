use axum::http::StatusCode;

pub mod company;

pub use company::CompanyError;

/// Common trait for all custom error types in the application
pub trait AppError: std::error::Error + Send + Sync + 'static {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Get the message returned to the caller. Never carries internal details
    /// for server-side failures.
    fn user_message(&self) -> String;

    /// Get a stable error code for log correlation
    fn error_code(&self) -> &'static str;

    /// Get the endpoint the error was raised from, when known
    fn endpoint(&self) -> Option<&'static str> {
        None
    }
}

/// Macro to implement IntoResponse for AppError types.
/// Server-side failures are logged here; client errors only at debug level.
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                use crate::errors::AppError;
                use axum::response::Json;
                use serde_json::json;

                let status = self.status_code();
                let endpoint = self.endpoint().unwrap_or("request");
                if status.is_server_error() {
                    tracing::error!("{} error: {}", endpoint, self);
                } else {
                    tracing::debug!("{} rejected ({}): {}", endpoint, self.error_code(), self);
                }

                let body = Json(json!({ "error": self.user_message() }));
                (status, body).into_response()
            }
        }
    };
}

pub(crate) use impl_into_response;
