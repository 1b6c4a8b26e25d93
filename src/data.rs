use std::{future::Future, sync::Arc};

use reqwest::StatusCode;
use thiserror::Error;

use crate::course::Course;

pub mod client;
pub mod session;

pub use client::RestCourseClient;
pub use session::{Session, SessionHandle, Sessions};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// The course service refuses `items_per_page` above this
pub const MAX_PAGE_SIZE: u32 = 100;

/// One `GET /courses` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
}

impl ListQuery {
    /// Query-string pairs. `page` and `items_per_page` are always sent, `search` only when it has
    /// something in it.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("items_per_page", self.page_size.to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        params
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Anything that went wrong talking to the course service. Callers report these as-is; the
/// status of a rejection is only there for the message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach the course service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("the course service rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("unexpected response from the course service: {0}")]
    Decode(String),
}

/// The `/courses` resource. This is the only thing in the crate allowed to talk to the course
/// service.
pub trait CourseStore: Send + Sync + 'static {
    fn list(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<Course>, ClientError>> + Send;

    /// Persists a new course. The returned course carries the assigned id.
    fn create(&self, course: &Course) -> impl Future<Output = Result<Course, ClientError>> + Send;

    /// Replaces the course stored under `id` with the full `course` record.
    fn update(
        &self,
        id: &str,
        course: &Course,
    ) -> impl Future<Output = Result<Course, ClientError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

pub struct CatalogState<S> {
    pub store: S,
    pub sessions: Arc<Sessions>,
}

impl<S: CourseStore> CatalogState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            sessions: Arc::default(),
        }
    }
}
