use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use crate::{
    common::AppError,
    data::{CatalogState, CourseStore, ListQuery},
};

/// Healthy as long as the course service answers a one-item list.
#[instrument(level = "debug", skip(state))]
pub async fn get<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
) -> Result<StatusCode, AppError> {
    let probe = ListQuery {
        page_size: 1,
        ..ListQuery::default()
    };
    state.store.list(&probe).await?;
    Ok(StatusCode::OK)
}
