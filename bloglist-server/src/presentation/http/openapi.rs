use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::blogs::{
    AuthorBlogsDto, AuthorLikesDto, BlogDto, BlogStatsDto, BlogUserDto, CreateBlogDto,
    FavoriteBlogDto, UpdateBlogDto,
};
use crate::presentation::http::handlers::health::HealthzResponse;
use crate::presentation::http::handlers::login::{LoginDto, LoginResponseDto};
use crate::presentation::http::handlers::users::{RegisterDto, UpdateUserDto, UserBlogDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::health_handler,
        crate::presentation::http::handlers::login::login,
        crate::presentation::http::handlers::blogs::list_blogs,
        crate::presentation::http::handlers::blogs::blog_stats,
        crate::presentation::http::handlers::blogs::get_blog,
        crate::presentation::http::handlers::blogs::create_blog,
        crate::presentation::http::handlers::blogs::update_blog,
        crate::presentation::http::handlers::blogs::delete_blog,
        crate::presentation::http::handlers::users::list_users,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::users::register,
        crate::presentation::http::handlers::users::update_user,
        crate::presentation::http::handlers::users::delete_user
    ),
    components(
        schemas(
            HealthzResponse,
            LoginDto,
            LoginResponseDto,
            CreateBlogDto,
            UpdateBlogDto,
            BlogDto,
            BlogUserDto,
            BlogStatsDto,
            FavoriteBlogDto,
            AuthorBlogsDto,
            AuthorLikesDto,
            RegisterDto,
            UpdateUserDto,
            UserDto,
            UserBlogDto
        )
    ),
    tags(
        (name = "auth", description = "Login endpoint"),
        (name = "blogs", description = "Blog endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "health", description = "Liveness probe")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/healthz",
            "/api/login",
            "/api/blogs",
            "/api/blogs/stats",
            "/api/blogs/{id}",
            "/api/users",
            "/api/users/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components must be present");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
