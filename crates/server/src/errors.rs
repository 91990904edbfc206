use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::DataAccessError;
use thiserror::Error;
use tracing::{error, warn};

use crate::mvc::{ModelAndView, View};

/// Failures a controller does not handle itself. Each one renders the
/// `error` view with a matching status.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{0}")]
    Internal(String),
}

impl WebError {
    pub fn not_found(entity: &'static str, id: i32) -> Self { Self::NotFound { entity, id } }

    /// Text shown on the error page. Persistence failures stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            WebError::DataAccess(_) => "Something happened while talking to the database.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::DataAccess(_) | WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.public_message();
        match &self {
            WebError::NotFound { entity, id } => warn!(entity, id, "not found"),
            WebError::DataAccess(e) => error!(error = %e, "data access failure"),
            WebError::Internal(msg) => error!(error = %msg, "request failed"),
        }
        ModelAndView::Render(View::Error { status, message }).into_response()
    }
}
