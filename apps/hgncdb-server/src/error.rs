use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hgncdb_core::Error;

/// Handler-boundary wrapper that turns a domain error into a status and a
/// plain-text message.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) | Error::InvalidRange(_) => StatusCode::BAD_REQUEST,
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            Error::Connection(_) | Error::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidConfig(_) | Error::Serialization(_) | Error::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, %status, "request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "request rejected");
        }
        (status, format!("{}\n", self.0)).into_response()
    }
}
