use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::blog::{BlogEntry, BlogOwner, CreateBlogRequest, UpdateBlogRequest};
use crate::domain::stats::{AuthorBlogs, AuthorLikes, BlogStats, FavoriteBlog};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateBlogDto {
    #[validate(required, length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    pub(crate) author: Option<String>,
    pub(crate) url: Option<String>,
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub(crate) likes: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateBlogDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub(crate) author: Option<String>,
    pub(crate) url: Option<String>,
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub(crate) likes: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogUserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: Option<String>,
    pub(crate) likes: i64,
    pub(crate) user: BlogUserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FavoriteBlogDto {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorBlogsDto {
    pub(crate) author: String,
    pub(crate) blogs: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorLikesDto {
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogStatsDto {
    pub(crate) total_blogs: usize,
    pub(crate) total_likes: i64,
    pub(crate) favorite_blog: Option<FavoriteBlogDto>,
    pub(crate) most_blogs: Option<AuthorBlogsDto>,
    pub(crate) most_likes: Option<AuthorLikesDto>,
}

impl From<BlogOwner> for BlogUserDto {
    fn from(owner: BlogOwner) -> Self {
        Self {
            id: owner.id,
            username: owner.username,
            name: owner.name,
        }
    }
}

impl From<BlogEntry> for BlogDto {
    fn from(entry: BlogEntry) -> Self {
        Self {
            id: entry.blog.id,
            title: entry.blog.title,
            author: entry.blog.author,
            url: entry.blog.url,
            likes: entry.blog.likes,
            user: entry.owner.into(),
        }
    }
}

impl From<FavoriteBlog> for FavoriteBlogDto {
    fn from(blog: FavoriteBlog) -> Self {
        Self {
            title: blog.title,
            author: blog.author,
            likes: blog.likes,
        }
    }
}

impl From<AuthorBlogs> for AuthorBlogsDto {
    fn from(value: AuthorBlogs) -> Self {
        Self {
            author: value.author,
            blogs: value.blogs,
        }
    }
}

impl From<AuthorLikes> for AuthorLikesDto {
    fn from(value: AuthorLikes) -> Self {
        Self {
            author: value.author,
            likes: value.likes,
        }
    }
}

impl From<BlogStats> for BlogStatsDto {
    fn from(stats: BlogStats) -> Self {
        Self {
            total_blogs: stats.total_blogs,
            total_likes: stats.total_likes,
            favorite_blog: stats.favorite_blog.map(Into::into),
            most_blogs: stats.most_blogs.map(Into::into),
            most_likes: stats.most_likes.map(Into::into),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "blogs",
    responses(
        (status = 200, description = "Blogs listed", body = [BlogDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_blogs(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<BlogDto>>)> {
    let blogs = state.blog_service.list_blogs().await?;

    Ok((
        StatusCode::OK,
        Json(blogs.into_iter().map(BlogDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    tag = "blogs",
    responses(
        (status = 200, description = "Aggregated statistics over all blogs", body = BlogStatsDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn blog_stats(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<BlogStatsDto>)> {
    let stats = state.blog_service.stats().await?;
    Ok((StatusCode::OK, Json(stats.into())))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog found", body = BlogDto),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<BlogDto>)> {
    let blog = state.blog_service.get_blog(id).await?;
    Ok((StatusCode::OK, Json(blog.into())))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateBlogDto,
    responses(
        (status = 201, description = "Blog created", body = BlogDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_blog(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<CreateBlogDto>,
) -> AppResult<(StatusCode, Json<BlogDto>)> {
    dto.validate()?;
    let req = CreateBlogRequest {
        title: dto.title.unwrap_or_default(),
        author: dto.author.unwrap_or_default(),
        url: dto.url,
        likes: dto.likes,
    };

    let created = state.blog_service.create_blog(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// Обновление блога намеренно не требует токена.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    request_body = UpdateBlogDto,
    responses(
        (status = 200, description = "Blog updated", body = BlogDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateBlogDto>,
) -> AppResult<(StatusCode, Json<BlogDto>)> {
    dto.validate()?;
    let req = UpdateBlogRequest {
        title: dto.title,
        author: dto.author,
        url: dto.url,
        likes: dto.likes,
    };

    let updated = state.blog_service.update_blog(id, req).await?;
    Ok((StatusCode::OK, Json(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_blog(
    State(state): State<AppState>,
    auth: Option<AuthenticatedUser>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state
        .blog_service
        .delete_blog(auth.map(|user| user.user_id), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
