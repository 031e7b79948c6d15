use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::LoginRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::AppJson;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(required, length(min = 1, max = 64))]
    pub(crate) username: Option<String>,
    #[validate(required, length(min = 1))]
    pub(crate) password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) token: String,
    pub(crate) username: String,
    pub(crate) name: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    AppJson(dto): AppJson<LoginDto>,
) -> AppResult<(StatusCode, Json<LoginResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        username: dto.username.unwrap_or_default(),
        password: dto.password.unwrap_or_default(),
    };

    let result = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponseDto {
            token: result.access_token,
            username: result.user.username,
            name: result.user.name,
        }),
    ))
}
