use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use hgncdb_chart::publish_chart;
use hgncdb_query::{Grouping, YearRange};

use super::{empty_state, NO_DATA};
use crate::{ApiError, AppState};

/// Raw `start`/`end` query values; parsed by [`YearRange::parse`] so a bad
/// value yields our own message instead of the extractor's rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ImageParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// POST /image?start=&end=
pub async fn create_image(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Result<Response, ApiError> {
    if state.stores.records.is_empty().await? {
        return Ok(empty_state(NO_DATA));
    }
    let range = YearRange::parse(params.start.as_deref(), params.end.as_deref(), &state.aggregation)?;
    let data = state
        .aggregator()
        .group_count_ranged(Grouping::ApprovalYear, range)
        .await?;
    let published = publish_chart(state.renderer.clone(), &state.stores.artifacts, data).await?;
    Ok(format!(
        "Image created: {} years plotted between {} and {}.\n",
        published.bars, range.start, range.end
    )
    .into_response())
}

/// GET /image
pub async fn get_image(State(state): State<AppState>) -> Result<Response, ApiError> {
    let image = state.stores.artifacts.image().await?;
    let disposition = format!(
        "attachment; filename=\"approvalyears.{}\"",
        state.renderer.file_extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, state.renderer.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image,
    )
        .into_response())
}

/// DELETE /image
pub async fn delete_image(State(state): State<AppState>) -> Result<Response, ApiError> {
    let removed = state.stores.artifacts.clear().await?;
    if removed == 0 {
        return Ok(empty_state("No image in the database to delete. Please use a POST route first.\n"));
    }
    let remaining = state.stores.artifacts.count().await?;
    Ok(format!("Image deleted, there are {} images in the db.\n", remaining).into_response())
}

/// GET /imagedata
pub async fn get_image_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = state.stores.artifacts.snapshot().await?;
    Ok(Json(snapshot).into_response())
}
