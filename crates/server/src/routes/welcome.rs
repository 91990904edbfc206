use axum::Json;
use common::types::Health;

use crate::errors::WebError;
use crate::mvc::{ModelAndView, View};

pub async fn welcome() -> ModelAndView {
    ModelAndView::Render(View::Welcome)
}

/// Always fails, to show the error page.
pub async fn trigger_exception() -> Result<ModelAndView, WebError> {
    Err(WebError::Internal(
        "Expected: controller used to showcase what happens when an exception is thrown".into(),
    ))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}
