use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{RegisterRequest, UpdateUserRequest, User, UserBlog, UserProfile};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(required, length(min = 3, max = 64))]
    pub(crate) username: Option<String>,
    pub(crate) name: Option<String>,
    #[validate(required, length(min = 3, max = 128))]
    pub(crate) password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateUserDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: Option<String>,
    pub(crate) name: Option<String>,
    #[validate(length(min = 3, max = 128))]
    pub(crate) password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserBlogDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) blogs: Vec<UserBlogDto>,
}

impl From<UserBlog> for UserBlogDto {
    fn from(blog: UserBlog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
        }
    }
}

impl From<UserProfile> for UserDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user.id,
            username: profile.user.username,
            name: profile.user.name,
            blogs: profile.blogs.into_iter().map(UserBlogDto::from).collect(),
        }
    }
}

// Новый пользователь ещё не владеет блогами.
impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: Vec::new(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users listed with their blogs", body = [UserDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<UserDto>>)> {
    let users = state.user_service.list_users().await?;

    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(UserDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.user_service.get_user(id).await?;
    Ok((StatusCode::OK, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "User registered", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    AppJson(dto): AppJson<RegisterDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        username: dto.username.unwrap_or_default(),
        name: dto.name,
        password: dto.password.unwrap_or_default(),
    };

    let user = state.user_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;

    let req = UpdateUserRequest {
        username: dto.username,
        name: dto.name,
        password: dto.password,
    };

    let user = state.user_service.update_user(id, req).await?;
    Ok((StatusCode::OK, Json(user.into())))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User and their blogs deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    auth: Option<AuthenticatedUser>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state
        .user_service
        .delete_user(auth.map(|user| user.user_id), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
