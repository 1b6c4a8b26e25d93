use std::sync::Mutex;

use itertools::Itertools;
use tracing::debug;

use super::lock;
use crate::{
    course::Course,
    data::{ClientError, CourseStore, ListQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
};

/// Term, page and page size driving the course list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub page: u32,
    pub page_size: u32,
}

impl SearchState {
    pub fn query(&self) -> ListQuery {
        ListQuery {
            search: self.term.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The course list screen.
///
/// Every event returns the query to send; whatever response is applied last is what gets
/// shown. Responses are not matched up with the query that produced them.
#[derive(Debug, Default)]
pub struct ListView {
    state: SearchState,
    courses: Vec<Course>,
    loading: bool,
}

impl ListView {
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the loaded page is full, i.e. a next page might exist. The service reports no
    /// totals, so this is as much as can be known without asking.
    pub fn may_have_next(&self) -> bool {
        self.courses.len() >= self.state.page_size as usize
    }

    fn issue(&mut self) -> ListQuery {
        self.loading = true;
        self.state.query()
    }

    /// Re-requests the list as it currently stands.
    pub fn load(&mut self) -> ListQuery {
        self.issue()
    }

    /// A new search term always starts over at page 1.
    pub fn set_term(&mut self, term: &str) -> ListQuery {
        self.state.term = term.to_string();
        self.state.page = 1;
        self.issue()
    }

    pub fn set_page(&mut self, page: u32) -> ListQuery {
        self.state.page = page.max(1);
        self.issue()
    }

    pub fn set_page_size(&mut self, page_size: u32) -> ListQuery {
        self.state.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.issue()
    }

    /// Reload after a delete. The page is not adjusted even if it ends up empty.
    pub fn after_delete(&mut self) -> ListQuery {
        self.issue()
    }

    pub fn select_suggestion(&mut self, name: &str) -> ListQuery {
        self.set_term(name)
    }

    pub fn receive(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        self.loading = false;
    }

    /// The request failed; whatever was shown before stays.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Autocomplete for `term`, drawn from the loaded page only.
    pub fn suggestions(&self, term: &str) -> Vec<String> {
        suggestions(&self.courses, term)
    }

    pub fn find(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }
}

/// Distinct course names containing `term`, ignoring case, in the order they appear.
pub fn suggestions(courses: &[Course], term: &str) -> Vec<String> {
    let needle = term.to_lowercase();
    courses
        .iter()
        .map(|c| c.course_name.as_str())
        .filter(|name| name.to_lowercase().contains(&needle))
        .unique()
        .map(str::to_string)
        .collect()
}

/// Sends `query` and applies the answer to `view`. The lock is not held while the request is
/// in flight.
pub async fn refresh<S: CourseStore>(
    view: &Mutex<ListView>,
    store: &S,
    query: ListQuery,
) -> Result<(), ClientError> {
    let result = store.list(&query).await;
    let mut view = lock(view);
    match result {
        Ok(courses) => {
            debug!(?query, count = courses.len(), "loaded courses");
            view.receive(courses);
            Ok(())
        }
        Err(e) => {
            view.fail();
            Err(e)
        }
    }
}
