use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::user_service::UserService;
use crate::data::blog_repository::DynBlogRepository;
use crate::data::repositories::Repositories;
use crate::data::user_repository::DynUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<DynUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<DynBlogRepository>>,
    pub(crate) user_service: Arc<UserService<DynUserRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(repositories: Repositories, jwt: Arc<JwtService>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(repositories.users.clone(), jwt.clone())),
            blog_service: Arc::new(BlogService::new(repositories.blogs)),
            user_service: Arc::new(UserService::new(repositories.users)),
            jwt,
        }
    }
}
