use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog::{
    app::make_app,
    course::Course,
    data::{ClientError, CourseStore, ListQuery},
};
use jiff::civil::date;
use tower::ServiceExt;

#[derive(Default)]
struct Inner {
    courses: Vec<Course>,
    lists: Vec<ListQuery>,
    creates: Vec<Course>,
    updates: Vec<(String, Course)>,
    next_id: u32,
    reject_lists: bool,
    reject_writes: bool,
}

/// In-memory course service that filters and pages the way the real one does.
#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    fn with(courses: Vec<Course>) -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().courses = courses;
        store
    }

    fn lists(&self) -> Vec<ListQuery> {
        self.inner.lock().unwrap().lists.clone()
    }

    fn creates(&self) -> Vec<Course> {
        self.inner.lock().unwrap().creates.clone()
    }

    fn updates(&self) -> Vec<(String, Course)> {
        self.inner.lock().unwrap().updates.clone()
    }

    /// Every list call from now on is refused.
    fn reject_lists(&self) {
        self.inner.lock().unwrap().reject_lists = true;
    }

    /// Every create, update and delete from now on is refused.
    fn reject_writes(&self) {
        self.inner.lock().unwrap().reject_writes = true;
    }
}

fn unavailable() -> ClientError {
    ClientError::Rejected {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "down for maintenance".to_string(),
    }
}

impl CourseStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Course>, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.lists.push(query.clone());
        if inner.reject_lists {
            return Err(unavailable());
        }
        let needle = query.search.to_lowercase();
        let skip = ((query.page - 1) * query.page_size) as usize;
        Ok(inner
            .courses
            .iter()
            .filter(|c| c.course_name.to_lowercase().contains(&needle))
            .skip(skip)
            .take(query.page_size as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, course: &Course) -> Result<Course, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.reject_writes {
            return Err(unavailable());
        }
        inner.next_id += 1;
        let saved = Course {
            id: format!("c{}", inner.next_id),
            ..course.clone()
        };
        inner.creates.push(course.clone());
        inner.courses.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: &str, course: &Course) -> Result<Course, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.updates.push((id.to_string(), course.clone()));
        if inner.reject_writes {
            return Err(unavailable());
        }
        let saved = Course {
            id: id.to_string(),
            ..course.clone()
        };
        if let Some(existing) = inner.courses.iter_mut().find(|c| c.id == id) {
            *existing = saved.clone();
        }
        Ok(saved)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.reject_writes {
            return Err(unavailable());
        }
        inner.courses.retain(|c| c.id != id);
        Ok(())
    }
}

fn course(id: &str, name: &str) -> Course {
    Course {
        id: id.to_string(),
        university: "University of Oxford".to_string(),
        city: "Oxford".to_string(),
        country: "United Kingdom".to_string(),
        course_name: name.to_string(),
        course_description: "Tutorials and lectures".to_string(),
        start_date: date(2025, 7, 1),
        end_date: date(2025, 8, 15),
        price: 4200.0,
        currency: "GBP".to_string(),
    }
}

fn catalog() -> MemoryStore {
    MemoryStore::with(vec![
        course("1", "Oxford Summer School"),
        course("2", "Cambridge Winter"),
        course("3", "Oxford Spring Term"),
    ])
}

/// A browser holding on to its session cookie.
#[derive(Clone)]
struct Browser {
    app: Router,
    cookie: String,
}

impl Browser {
    /// Loads the index page, which starts the session.
    async fn open(store: MemoryStore) -> (Self, String) {
        let app = make_app(store, "assets");
        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (Self { app, cookie }, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn send(&self, method: Method, uri: &str, form: Option<&str>) -> (StatusCode, String) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, &self.cookie);
        let request = match form {
            Some(form) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post(&self, uri: &str, form: &str) -> (StatusCode, String) {
        self.send(Method::POST, uri, Some(form)).await
    }
}

const VALID_FORM: &str = "university=MIT&city=Cambridge&country=USA&course_name=Intro+to+Rust\
    &course_description=Ownership&start_date=2025-06-01&end_date=2025-06-30&price=99.5&currency=USD";

#[tokio::test]
async fn index_lists_first_page() {
    let store = catalog();
    let (_, body) = Browser::open(store.clone()).await;

    assert!(body.contains("Oxford Summer School"));
    assert!(body.contains("Cambridge Winter"));
    assert!(body.contains(r#"id="search-input""#));
    assert_eq!(store.lists(), vec![ListQuery::default()]);
}

#[tokio::test(start_paused = true)]
async fn search_starts_over_at_page_one() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (status, _) = browser.post("/page", "page=3").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = browser.post("/search", "search=oxford").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Oxford Summer School"));
    assert!(!body.contains("Cambridge Winter"));

    let last = store.lists().pop().unwrap();
    assert_eq!(
        last,
        ListQuery {
            search: "oxford".to_string(),
            page: 1,
            page_size: 10
        }
    );
}

#[tokio::test(start_paused = true)]
async fn burst_of_typing_sends_one_search() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    // the second keystroke lands while the first search is still waiting, and the page drops
    // the first request in favour of it
    let typing = browser.clone();
    let first = tokio::spawn(async move { typing.post("/search", "search=o").await });
    tokio::time::sleep(Duration::from_millis(120)).await;
    let (second, body) = browser.post("/search", "search=ox").await;
    let (first, _) = first.await.unwrap();

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::OK);
    assert!(body.contains("Oxford Spring Term"));
    let searches: Vec<_> = store
        .lists()
        .into_iter()
        .map(|q| q.search)
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(searches, vec!["ox"]);
}

#[tokio::test]
async fn suggestions_come_from_loaded_page() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (status, body) = browser.post("/search/suggest", "search=SUMMER").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Oxford Summer School""#));
    assert!(!body.contains("Cambridge Winter"));
    assert!(!body.contains("Oxford Spring Term"));
    assert_eq!(store.lists().len(), 1);
}

#[tokio::test]
async fn selecting_suggestion_searches_for_it() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (_, body) = browser
        .post("/search/select", "search=Oxford+Summer+School")
        .await;

    assert!(body.contains("Oxford Summer School"));
    assert!(!body.contains("Oxford Spring Term"));
    assert!(body.contains(r#"value="Oxford Summer School""#));
    assert_eq!(store.lists().last().unwrap().search, "Oxford Summer School");
}

#[tokio::test]
async fn page_size_is_clamped() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    browser.post("/page-size", "page_size=1000").await;

    assert_eq!(store.lists().last().unwrap().page_size, 100);
}

#[tokio::test]
async fn delete_reloads_current_page() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (status, body) = browser.send(Method::DELETE, "/courses/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Cambridge Winter"));
    assert!(body.contains("Course deleted"));
    assert_eq!(store.lists().len(), 2);
}

#[tokio::test]
async fn invalid_course_is_not_sent() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let form = VALID_FORM.replace("end_date=2025-06-30", "end_date=2025-05-01");
    let (status, body) = browser.post("/courses", &form).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("End date must be after the start date"));
    assert!(store.creates().is_empty());
}

#[tokio::test]
async fn valid_course_is_created() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (_, body) = browser.post("/courses", VALID_FORM).await;

    assert!(body.contains("Course created successfully"));
    let created = store.creates();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].course_name, "Intro to Rust");
    assert_eq!(created[0].start_date, date(2025, 6, 1));
    assert!(created[0].id.is_empty());
}

#[tokio::test]
async fn edit_dialog_updates_course() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (status, body) = browser.send(Method::GET, "/courses/1/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Oxford Summer School""#));
    assert!(body.contains(r#"hx-put="/courses/1""#));

    let form = VALID_FORM.replace("Intro+to+Rust", "Oxford+Summer+School+2");
    let (status, body) = browser
        .send(Method::PUT, "/courses/1", Some(&form))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Course updated successfully"));
    assert!(body.contains("Oxford Summer School 2"));
    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "1");
    assert_eq!(updates[0].1.course_name, "Oxford Summer School 2");
}

#[tokio::test(start_paused = true)]
async fn search_after_a_pause_is_sent() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    browser.post("/search", "search=o").await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    let (status, _) = browser.post("/search", "search=ox").await;

    assert_eq!(status, StatusCode::OK);
    let searches: Vec<_> = store.lists().into_iter().map(|q| q.search).collect();
    assert_eq!(searches, vec!["", "o", "ox"]);
}

#[tokio::test]
async fn editing_unknown_course_says_so() {
    let (browser, _) = Browser::open(catalog()).await;

    let (status, body) = browser.send(Method::GET, "/courses/nope/edit", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<div id="dialog"></div>"#));
    assert!(body.contains(r#"role="alert""#));
    assert!(body.contains("no longer on this page"));
}

#[tokio::test]
async fn cancelling_edit_sends_nothing() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    browser.send(Method::GET, "/courses/1/edit", None).await;
    let (status, body) = browser.send(Method::GET, "/dialog/close", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"<div id="dialog"></div>"#);
    assert!(store.updates().is_empty());
}

#[tokio::test]
async fn invalid_edit_reopens_dialog() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    browser.send(Method::GET, "/courses/1/edit", None).await;
    let form = VALID_FORM.replace("end_date=2025-06-30", "end_date=2025-05-01");
    let (status, body) = browser
        .send(Method::PUT, "/courses/1", Some(&form))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"role="dialog""#));
    assert!(body.contains(r#"hx-put="/courses/1""#));
    assert!(body.contains("End date must be after the start date"));
    assert!(store.updates().is_empty());
}

#[tokio::test]
async fn failed_list_is_reported() {
    let store = catalog();
    store.reject_lists();

    let (_, body) = Browser::open(store).await;

    assert!(body.contains(r#"role="alert""#));
    assert!(body.contains("Error loading courses"));
    assert!(body.contains("down for maintenance"));
}

#[tokio::test]
async fn failed_create_is_reported() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;
    store.reject_writes();

    let (status, body) = browser.post("/courses", VALID_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"role="alert""#));
    assert!(body.contains("Error creating course"));
    assert!(body.contains(r#"value="Intro to Rust""#));
}

#[tokio::test]
async fn failed_update_keeps_dialog_open() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;
    browser.send(Method::GET, "/courses/1/edit", None).await;
    store.reject_writes();

    let (status, body) = browser
        .send(Method::PUT, "/courses/1", Some(VALID_FORM))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"role="dialog""#));
    assert!(body.contains(r#"role="alert""#));
    assert!(body.contains("Error updating course"));
}

#[tokio::test]
async fn failed_delete_is_reported() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;
    store.reject_writes();

    let (_, body) = browser.send(Method::DELETE, "/courses/2", None).await;

    assert!(body.contains(r#"role="alert""#));
    assert!(body.contains("Error deleting course"));
    assert!(body.contains("Cambridge Winter"));
}

#[tokio::test]
async fn update_survives_failed_reload() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;
    browser.send(Method::GET, "/courses/1/edit", None).await;
    store.reject_lists();

    let (_, body) = browser
        .send(Method::PUT, "/courses/1", Some(VALID_FORM))
        .await;

    assert!(body.contains("Course updated successfully. Error loading courses"));
    assert_eq!(store.updates().len(), 1);
}

#[tokio::test]
async fn health_asks_course_service() {
    let store = catalog();
    let (browser, _) = Browser::open(store.clone()).await;

    let (status, _) = browser.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.lists().last().unwrap().page_size, 1);
}
