use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

/// Стирает все блоги и всех пользователей. Монтируется только для e2e-прогонов.
pub(crate) async fn reset(State(state): State<AppState>) -> AppResult<StatusCode> {
    let blogs = state.blog_service.delete_all_blogs().await?;
    let users = state.user_service.delete_all_users().await?;

    info!(blogs, users, "storage reset");
    Ok(StatusCode::NO_CONTENT)
}
