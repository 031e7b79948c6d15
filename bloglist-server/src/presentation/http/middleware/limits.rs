use std::time::Duration;

use anyhow::anyhow;
use axum::{Router, error_handling::HandleErrorLayer};
use tower::{BoxError, ServiceBuilder, limit::ConcurrencyLimitLayer, timeout::TimeoutLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::infrastructure::settings::Settings;
use crate::presentation::http::app_error::AppError;

/// Ограничивает размер тела, число одновременных запросов и время обработки.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.http_request_timeout_secs,
                ))),
        )
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(anyhow!("unhandled middleware error: {err}"))
    }
}
