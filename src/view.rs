//! UI state for the catalog screens, kept independent of how it gets rendered.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod debounce;
pub mod dialog;
pub mod form;
pub mod list;

pub use debounce::{Debouncer, Ticket, SEARCH_DEBOUNCE};
pub use dialog::{DialogOutcome, EditDialog};
pub use form::{CourseForm, Field, FormErrors, FormMode, FormView, Submission};
pub use list::{ListView, SearchState};

/// View state holds no invariants a panicking holder could break halfway, so a poisoned lock
/// is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Outcome message shown to the user in the alert area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) => m,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}
