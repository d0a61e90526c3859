//! Route handlers. Per-request failures become [`ApiError`](crate::ApiError)
//! responses; an empty namespace is answered with a hint, not an error.

pub mod data;
pub mod genes;
pub mod help;
pub mod image;

use axum::response::{IntoResponse, Response};

pub(crate) const NO_DATA: &str = "No data in the database. Please use a POST route first.\n";

pub(crate) fn empty_state(message: &'static str) -> Response {
    message.into_response()
}
