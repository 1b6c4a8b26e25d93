use maud::{html, Markup};
use tracing::error;

use crate::{
    components,
    data::{CourseStore, ListQuery, Session},
    view::{list, Notice},
};

pub mod courses;
pub mod health;
pub mod page;
pub mod root;
pub mod search;

/// Sends `query` for `session`'s list. A failure comes back as the notice to show.
pub(crate) async fn load<S: CourseStore>(
    store: &S,
    session: &Session,
    query: ListQuery,
) -> Option<Notice> {
    match list::refresh(&session.list, store, query).await {
        Ok(()) => None,
        Err(e) => {
            error!(%e, "error loading courses");
            Some(Notice::Failure(format!("Error loading courses: {}", e)))
        }
    }
}

/// The course list as it stands, plus `notice` swapped into the alert area.
pub(crate) fn list_fragment(session: &Session, notice: Option<&Notice>) -> Markup {
    let list = session.list();
    html! {
        (components::course_list::view(false, &list))
        (components::notice::view(true, notice))
    }
}
