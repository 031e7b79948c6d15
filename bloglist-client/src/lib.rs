//! Клиентская библиотека для REST API `bloglist-server`.
//!
//! `BlogClient` хранит JWT-токен после `login` и сам подставляет его
//! в операции, которые требуют входа.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{
    AuthorBlogs, AuthorLikes, Blog, BlogOwner, BlogStats, BlogUpdate, FavoriteBlog,
    LoginResponse, NewBlog, User, UserBlog, UserUpdate,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент блог-сервиса.
pub struct BlogClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl BlogClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:3003`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя. Токен не выдаётся, нужен отдельный `login`.
    pub async fn register(
        &self,
        username: &str,
        name: Option<&str>,
        password: &str,
    ) -> BlogClientResult<User> {
        self.http_client.register(username, name, password).await
    }

    /// Выполняет вход и сохраняет полученный токен в клиенте.
    pub async fn login(&mut self, username: &str, password: &str) -> BlogClientResult<LoginResponse> {
        let result = self.http_client.login(username, password).await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Возвращает все блоги.
    pub async fn list_blogs(&self) -> BlogClientResult<Vec<Blog>> {
        self.http_client.list_blogs().await
    }

    /// Возвращает блог по идентификатору.
    pub async fn get_blog(&self, id: i64) -> BlogClientResult<Blog> {
        self.http_client.get_blog(id).await
    }

    /// Создаёт блог. Требует входа.
    pub async fn create_blog(&self, blog: &NewBlog) -> BlogClientResult<Blog> {
        let token = self.require_token()?;
        self.http_client.create_blog(token, blog).await
    }

    /// Частично обновляет блог; токен передаётся, если он есть.
    pub async fn update_blog(&self, id: i64, update: &BlogUpdate) -> BlogClientResult<Blog> {
        self.http_client
            .update_blog(self.get_token(), id, update)
            .await
    }

    /// Добавляет блогу один лайк.
    pub async fn like_blog(&self, id: i64) -> BlogClientResult<Blog> {
        let current = self.get_blog(id).await?;
        let update = BlogUpdate {
            likes: Some(current.likes.saturating_add(1)),
            ..BlogUpdate::default()
        };
        self.update_blog(id, &update).await
    }

    /// Удаляет блог. Требует входа под владельцем.
    pub async fn delete_blog(&self, id: i64) -> BlogClientResult<()> {
        let token = self.require_token()?;
        self.http_client.delete_blog(token, id).await
    }

    /// Возвращает сводную статистику по блогам.
    pub async fn blog_stats(&self) -> BlogClientResult<BlogStats> {
        self.http_client.blog_stats().await
    }

    /// Возвращает всех пользователей вместе с их блогами.
    pub async fn list_users(&self) -> BlogClientResult<Vec<User>> {
        self.http_client.list_users().await
    }

    /// Возвращает пользователя по идентификатору.
    pub async fn get_user(&self, id: i64) -> BlogClientResult<User> {
        self.http_client.get_user(id).await
    }

    /// Частично обновляет пользователя.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> BlogClientResult<User> {
        self.http_client
            .update_user(self.get_token(), id, update)
            .await
    }

    /// Удаляет собственную учётную запись. Требует входа.
    pub async fn delete_user(&self, id: i64) -> BlogClientResult<()> {
        let token = self.require_token()?;
        self.http_client.delete_user(token, id).await
    }

    fn require_token(&self) -> BlogClientResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| BlogClientError::Unauthorized("login required".to_string()))
    }
}
