use tracing::debug;

use super::{
    form::{CourseForm, FormMode, FormView},
    Notice,
};
use crate::course::Course;

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// The caller is expected to send `course` as the update for `id`
    Confirmed { id: String, course: Course },
    Cancelled,
}

/// Modal editor for an existing course.
#[derive(Debug, Clone)]
pub struct EditDialog {
    id: String,
    view: FormView,
}

impl EditDialog {
    pub fn open(course: &Course) -> Self {
        debug!(id = %course.id, "opening edit dialog");
        Self {
            id: course.id.clone(),
            view: FormView::edit(course),
        }
    }

    /// Rebuilds the dialog for `id` around values that came back from the browser.
    pub fn from_form(id: String, form: CourseForm) -> Self {
        Self {
            view: FormView::new(FormMode::Edit(id.clone()), form),
            id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.view.set_notice(notice);
        self
    }

    /// Closes the dialog with its contents, as long as they are valid. An invalid dialog is
    /// handed back, errors attached.
    pub fn confirm(mut self) -> Result<DialogOutcome, EditDialog> {
        match self.view.validate() {
            Some(course) => Ok(DialogOutcome::Confirmed {
                id: self.id,
                course,
            }),
            None => Err(self),
        }
    }

    pub fn cancel(self) -> DialogOutcome {
        debug!(id = %self.id, "edit dialog cancelled");
        DialogOutcome::Cancelled
    }
}
