use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::http::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    status: &'static str,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthzResponse)
    )
)]
pub(crate) async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

pub(crate) async fn unknown_endpoint() -> AppError {
    AppError::NotFound
}
