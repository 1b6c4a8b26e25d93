use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::html;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    components,
    data::{CatalogState, CourseStore, SessionHandle},
};

use super::{list_fragment, load};

#[derive(Debug, Deserialize)]
pub struct Search {
    #[serde(default)]
    search: String,
}

/// Search input. Only the last keystroke of a burst reaches the course service; the ones it
/// supersedes get an empty answer.
#[instrument(level = "debug", skip_all, fields(session = %session.id, term = %form.search))]
pub async fn search<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
    Form(form): Form<Search>,
) -> Response {
    let ticket = session.search.ticket();
    if !session.search.settle(ticket).await {
        debug!("superseded by later input");
        return StatusCode::NO_CONTENT.into_response();
    }

    let query = session.list().set_term(&form.search);
    let notice = load(&state.store, &session, query).await;

    (session.jar(), list_fragment(&session, notice.as_ref())).into_response()
}

/// Autocomplete from the page already loaded; no request is made.
#[instrument(level = "debug", skip_all, fields(session = %session.id, term = %form.search))]
pub async fn suggest(session: SessionHandle, Form(form): Form<Search>) -> impl IntoResponse {
    let suggestions = session.list().suggestions(&form.search);
    (
        session.jar(),
        components::search::suggestion_list(false, &suggestions),
    )
}

#[instrument(level = "debug", skip_all, fields(session = %session.id, term = %form.search))]
pub async fn select<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
    Form(form): Form<Search>,
) -> impl IntoResponse {
    // drop any typing still waiting to settle
    session.search.ticket();
    let query = session.list().select_suggestion(&form.search);
    let notice = load(&state.store, &session, query).await;

    (
        session.jar(),
        html! {
            (list_fragment(&session, notice.as_ref()))
            (components::search::input(true, &form.search))
            (components::search::suggestion_list(true, &[]))
        },
    )
}
