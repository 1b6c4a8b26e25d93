use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ClientError, CourseStore, ListQuery};
use crate::course::Course;

/// `CourseStore` backed by the course service's REST API.
#[derive(Clone, Debug)]
pub struct RestCourseClient {
    http_client: Client,
    base_url: Url,
}

impl RestCourseClient {
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            bail!("{} cannot be used as a base url", base_url);
        }
        let http_client = Client::builder()
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("courses").extend(segments);
        }
        url
    }

    pub fn list_url(&self, query: &ListQuery) -> Url {
        let mut url = self.endpoint(&[]);
        url.query_pairs_mut().extend_pairs(query.params());
        url
    }

    pub fn course_url(&self, id: &str) -> Url {
        self.endpoint(&[id])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        debug!(%status, url = %response.url(), "course service responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected { status, body });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let text = response.text().await.map_err(ClientError::Transport)?;
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Body of `POST /courses`: everything but the id.
pub fn create_payload(course: &Course) -> Course {
    Course {
        id: String::new(),
        ..course.clone()
    }
}

/// Body of `PUT /courses/{id}`: the whole record, id included.
pub fn update_payload(id: &str, course: &Course) -> Course {
    Course {
        id: id.to_string(),
        ..course.clone()
    }
}

impl CourseStore for RestCourseClient {
    #[instrument(level = "debug", skip(self))]
    async fn list(&self, query: &ListQuery) -> Result<Vec<Course>, ClientError> {
        let request = self.http_client.get(self.list_url(query));
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip_all, fields(course_name = %course.course_name))]
    async fn create(&self, course: &Course) -> Result<Course, ClientError> {
        let request = self
            .http_client
            .post(self.endpoint(&[]))
            .json(&create_payload(course));
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip(self, course))]
    async fn update(&self, id: &str, course: &Course) -> Result<Course, ClientError> {
        let request = self
            .http_client
            .put(self.course_url(id))
            .json(&update_payload(id, course));
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let request = self.http_client.delete(self.course_url(id));
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn client(base: &str) -> RestCourseClient {
        RestCourseClient::new(base.parse().unwrap()).unwrap()
    }

    fn course() -> Course {
        Course {
            id: "stale".to_string(),
            university: "MIT".to_string(),
            city: "Cambridge".to_string(),
            country: "USA".to_string(),
            course_name: "AI101".to_string(),
            course_description: "Intro to AI".to_string(),
            start_date: date(2025, 1, 10),
            end_date: date(2025, 3, 1),
            price: 100.0,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn list_url_always_carries_paging() {
        let client = client("http://localhost:8000");

        let url = client.list_url(&ListQuery::default());
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/courses?page=1&items_per_page=10"
        );

        let url = client.list_url(&ListQuery {
            search: "summer school".to_string(),
            page: 2,
            page_size: 20,
        });
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/courses?page=2&items_per_page=20&search=summer+school"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let nested = client("https://example.com/api/");
        assert_eq!(
            nested.course_url("abc").as_str(),
            "https://example.com/api/courses/abc"
        );

        let bare = client("https://example.com/api");
        assert_eq!(
            bare.course_url("a/b").as_str(),
            "https://example.com/api/courses/a%2Fb"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(RestCourseClient::new("mailto:someone@example.com".parse().unwrap()).is_err());
    }

    #[test]
    fn payloads() {
        let body = serde_json::to_value(create_payload(&course())).unwrap();
        assert!(body.get("_id").is_none());
        assert_eq!(body["course_name"], "AI101");

        let body = serde_json::to_value(update_payload("66a1", &course())).unwrap();
        assert_eq!(body["_id"], "66a1");
        for field in [
            "university",
            "city",
            "country",
            "course_name",
            "course_description",
            "start_date",
            "end_date",
            "price",
            "currency",
        ] {
            assert!(body.get(field).is_some(), "missing {}", field);
        }
    }
}
