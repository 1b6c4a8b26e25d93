use std::{path::Path, sync::Arc};

use axum::{
    extract::Request,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::debug_span;

use crate::{
    data::{
        session::{spawn_sweeper, SESSION_IDLE, SWEEP_PERIOD},
        CatalogState, CourseStore,
    },
    routes::{courses, health, page, root, search},
};

/// Builds the catalog UI on top of `store`, serving static files out of `assets`. Idle sessions
/// are swept in the background, so this has to be called inside a tokio runtime.
pub fn make_app<S: CourseStore>(store: S, assets: impl AsRef<Path>) -> Router {
    let state = Arc::new(CatalogState::new(store));
    spawn_sweeper(&state.sessions, SWEEP_PERIOD, SESSION_IDLE);

    Router::new()
        .nest_service("/assets", ServeDir::new(assets))
        .route("/", get(root::get::<S>))
        .route("/health", get(health::get::<S>))
        .route("/search", post(search::search::<S>))
        .route("/search/suggest", post(search::suggest))
        .route("/search/select", post(search::select::<S>))
        .route("/page", post(page::page::<S>))
        .route("/page-size", post(page::page_size::<S>))
        .route("/courses", post(courses::create::<S>))
        .route("/courses/new", get(courses::new))
        .route(
            "/courses/:id",
            put(courses::update::<S>).delete(courses::delete::<S>),
        )
        .route("/courses/:id/edit", get(courses::edit))
        .route("/dialog/close", get(courses::close_dialog))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    debug_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(DefaultOnResponse::new().latency_unit(LatencyUnit::Micros)),
        )
}
