use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::Form;
use maud::{html, Markup};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    components::{self, course_form, course_list, edit_dialog, notice},
    data::{CatalogState, CourseStore, SessionHandle},
    view::{CourseForm, DialogOutcome, EditDialog, FormMode, FormView, Notice},
};

use super::{list_fragment, load};

fn back_link() -> Markup {
    html! {
        a href="/" class="bg-slate-300 dark:bg-neutral-600 transition rounded-lg p-1 text-xl text-center" {
            "back to courses"
        }
    }
}

/// `done`, unless the reload that followed it failed. Then the notice carries both.
fn after_reload(done: &str, reload: Option<Notice>) -> Notice {
    match reload {
        None => Notice::Success(done.to_string()),
        Some(failed) => Notice::Failure(format!("{}. {}", done, failed.message())),
    }
}

fn dialog_fragment(dialog: &EditDialog) -> Markup {
    html! {
        (edit_dialog::view(dialog))
        (notice::view(true, dialog.view().notice()))
    }
}

#[instrument(level = "debug")]
pub async fn new() -> Markup {
    components::base(html! {
        (components::header())
        (notice::view(false, None))
        h2 class="text-2xl" { "new course" }
        (course_form::view(&FormView::create(), back_link()))
    })
}

/// Saves a new course. A successful save comes back as an empty form.
#[instrument(level = "debug", skip_all, fields(course = %form.course_name))]
pub async fn create<S: CourseStore>(
    State(state): State<Arc<CatalogState<S>>>,
    Form(form): Form<CourseForm>,
) -> Markup {
    let mut form_view = FormView::new(FormMode::Create, form);
    let submission = form_view.submit(&state.store).await;
    debug!(?submission, "create submitted");

    html! {
        (course_form::view(&form_view, back_link()))
        (notice::view(true, form_view.notice()))
    }
}

/// Opens the edit dialog for a course on the loaded page. A course that is not there any more
/// leaves the dialog closed and says so.
#[instrument(level = "debug", skip(session), fields(session = %session.id))]
pub async fn edit(Path(id): Path<String>, session: SessionHandle) -> impl IntoResponse {
    let Some(course) = session.list().find(&id).cloned() else {
        warn!(%id, "course is not on the loaded page");
        let missing = Notice::Failure(
            "That course is no longer on this page. Reload the list and try again".to_string(),
        );
        let markup = html! {
            (edit_dialog::closed(false))
            (notice::view(true, Some(&missing)))
        };
        return (session.jar(), markup);
    };

    let dialog = EditDialog::open(&course);
    let markup = edit_dialog::view(&dialog);
    session.open_dialog(dialog);

    (session.jar(), markup)
}

#[instrument(level = "debug", skip(state, session, form), fields(session = %session.id))]
pub async fn update<S: CourseStore>(
    Path(id): Path<String>,
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
    Form(form): Form<CourseForm>,
) -> impl IntoResponse {
    session.take_dialog();

    let outcome = match EditDialog::from_form(id, form.clone()).confirm() {
        Ok(outcome) => outcome,
        Err(dialog) => {
            let markup = dialog_fragment(&dialog);
            session.open_dialog(dialog);
            return (session.jar(), markup);
        }
    };
    let DialogOutcome::Confirmed { id, course } = outcome else {
        return (session.jar(), edit_dialog::closed(false));
    };

    match state.store.update(&id, &course).await {
        Ok(saved) => {
            info!(%id, course = %saved, "course updated");
            let query = session.list().load();
            let reload = load(&state.store, &session, query).await;
            let shown = after_reload("Course updated successfully", reload);

            let list = session.list();
            let markup = html! {
                (edit_dialog::closed(false))
                (course_list::view(true, &list))
                (notice::view(true, Some(&shown)))
            };
            (session.jar(), markup)
        }
        Err(e) => {
            error!(%e, %id, "error updating course");
            let dialog = EditDialog::from_form(id, form)
                .with_notice(Notice::Failure(format!("Error updating course: {}", e)));
            let markup = dialog_fragment(&dialog);
            session.open_dialog(dialog);
            (session.jar(), markup)
        }
    }
}

#[instrument(level = "debug", skip(session), fields(session = %session.id))]
pub async fn close_dialog(session: SessionHandle) -> impl IntoResponse {
    if let Some(dialog) = session.take_dialog() {
        let outcome = dialog.cancel();
        debug!(?outcome, "dialog closed");
    }
    (session.jar(), edit_dialog::closed(false))
}

/// Deletes a course, then reloads the list as it stands. The page is kept even if it is now
/// empty.
#[instrument(level = "debug", skip(state, session), fields(session = %session.id))]
pub async fn delete<S: CourseStore>(
    Path(id): Path<String>,
    State(state): State<Arc<CatalogState<S>>>,
    session: SessionHandle,
) -> impl IntoResponse {
    let shown = match state.store.delete(&id).await {
        Ok(()) => {
            info!(%id, "course deleted");
            let query = session.list().after_delete();
            let reload = load(&state.store, &session, query).await;
            after_reload("Course deleted", reload)
        }
        Err(e) => {
            error!(%e, %id, "error deleting course");
            Notice::Failure(format!("Error deleting course: {}", e))
        }
    };

    (session.jar(), list_fragment(&session, Some(&shown)))
}
