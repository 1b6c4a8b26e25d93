use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::data::ClientError;

pub enum AppError {
    /// The course service could not serve a request the page cannot do without
    Upstream(ClientError),
    Code(StatusCode),
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream(error) => {
                error!(%error, "course service unavailable");
                (StatusCode::BAD_GATEWAY, error.to_string()).into_response()
            }
            AppError::Code(c) => (c, c.to_string()).into_response(),
        }
    }
}

impl From<StatusCode> for AppError {
    fn from(err: StatusCode) -> Self {
        Self::Code(err)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        Self::Upstream(err)
    }
}
