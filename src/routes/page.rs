use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::instrument;

use crate::data::{CatalogState, CourseStore, SessionHandle};

use super::{list_fragment, load};

#[derive(Debug, Deserialize)]
pub struct Page {
    page: u32,
}

#[derive(Debug, Deserialize)]
pub struct PageSize {
    page_size: u32,
}

#[instrument(level = "debug", skip(state, session))]
pub async fn page<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
    Form(Page { page }): Form<Page>,
) -> impl IntoResponse {
    let query = session.list().set_page(page);
    let notice = load(&state.store, &session, query).await;
    (session.jar(), list_fragment(&session, notice.as_ref()))
}

#[instrument(level = "debug", skip(state, session))]
pub async fn page_size<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
    Form(PageSize { page_size }): Form<PageSize>,
) -> impl IntoResponse {
    let query = session.list().set_page_size(page_size);
    let notice = load(&state.store, &session, query).await;
    (session.jar(), list_fragment(&session, notice.as_ref()))
}
