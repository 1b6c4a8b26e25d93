use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use maud::html;
use tracing::instrument;

use crate::{
    components,
    data::{CatalogState, CourseStore, SessionHandle},
};

use super::load;

#[instrument(level = "debug", skip_all, fields(session = %session.id))]
pub async fn get<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
) -> impl IntoResponse {
    let query = session.list().load();
    let notice = load(&state.store, &session, query).await;

    let list = session.list();
    let page = components::base(html! {
        (components::header())
        (components::notice::view(false, notice.as_ref()))
        (components::search::view(&list.state().term, &[]))
        (components::course_list::view(false, &list))
        (components::edit_dialog::closed(false))
    });

    (session.jar(), page)
}
