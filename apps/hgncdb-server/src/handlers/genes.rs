use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use hgncdb_query::{Grouping, DATE_FIELDS, LOCUS_FIELDS};

use super::{empty_state, NO_DATA};
use crate::{ApiError, AppState};

/// GET /genes
pub async fn list_genes(State(state): State<AppState>) -> Result<Response, ApiError> {
    let ids = state.queries().list_keys().await?;
    if ids.is_empty() {
        return Ok(empty_state("No data available in the database. Please use a POST route first.\n"));
    }
    Ok(Json(ids).into_response())
}

/// GET /genes/:id
pub async fn get_gene(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let record = state.queries().get_record(&id).await?;
    Ok(Json(record).into_response())
}

/// GET /locus/:id
pub async fn get_locus(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let (field, label) = LOCUS_FIELDS[0];
    let view = state.queries().get_single_field(&id, field, label).await?;
    Ok(Json(view).into_response())
}

/// GET /when/:id
pub async fn get_dates(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let view = state.queries().get_field_subset(&id, DATE_FIELDS).await?;
    Ok(Json(view).into_response())
}

/// GET /locusdata
pub async fn locus_counts(State(state): State<AppState>) -> Result<Response, ApiError> {
    if state.stores.records.is_empty().await? {
        return Ok(empty_state(NO_DATA));
    }
    let result = state.aggregator().group_count(Grouping::LocusGroup).await?;
    Ok(Json(result).into_response())
}
