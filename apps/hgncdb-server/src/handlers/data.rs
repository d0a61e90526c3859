use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use hgncdb_fetch::refresh;

use super::empty_state;
use crate::{ApiError, AppState};

/// GET /data
pub async fn list_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.queries().list_records().await?;
    if records.is_empty() {
        return Ok(empty_state("No data in the database to retrieve. Please use a POST route first.\n"));
    }
    Ok(Json(records).into_response())
}

/// POST /data
pub async fn load_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    let report = refresh(state.source.as_ref(), &state.stores.records).await?;
    let mut message = format!("Data loaded: {} records written", report.written);
    if report.skipped > 0 {
        message.push_str(&format!(", {} skipped without an hgnc_id", report.skipped));
    }
    message.push_str(".\n");
    Ok(message.into_response())
}

/// DELETE /data
pub async fn delete_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    let removed = state.stores.records.clear().await?;
    if removed == 0 {
        return Ok(empty_state("No data in the database to delete.\n"));
    }
    let remaining = state.stores.records.count().await?;
    tracing::info!(removed, "records cleared");
    Ok(format!("Data deleted, there are {} keys in the db.\n", remaining).into_response())
}
