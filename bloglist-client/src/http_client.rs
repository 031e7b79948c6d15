use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{
    Blog, BlogStats, BlogUpdate, LoginResponse, NewBlog, User, UserUpdate,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `bloglist-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> BlogClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        BlogClientError::from_http_status(status, message)
    }

    async fn execute(request: RequestBuilder) -> BlogClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn fetch<TRes>(&self, path: &str) -> BlogClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        Self::execute(self.request(Method::GET, path, None))
            .await?
            .json::<TRes>()
            .await
            .map_err(BlogClientError::from_reqwest)
    }

    /// универсальный helper для запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> BlogClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        Self::execute(self.request(method, path, token).json(body))
            .await?
            .json::<TRes>()
            .await
            .map_err(BlogClientError::from_reqwest)
    }

    async fn delete(&self, path: &str, token: &str) -> BlogClientResult<()> {
        Self::execute(self.request(Method::DELETE, path, Some(token))).await?;
        Ok(())
    }

    /// Регистрирует пользователя.
    pub async fn register(
        &self,
        username: &str,
        name: Option<&str>,
        password: &str,
    ) -> BlogClientResult<User> {
        let payload = RegisterRequestDto {
            username,
            name,
            password,
        };
        self.send_json(Method::POST, "/api/users", &payload, None)
            .await
    }

    /// Выполняет вход и возвращает токен вместе с профилем.
    pub async fn login(&self, username: &str, password: &str) -> BlogClientResult<LoginResponse> {
        let payload = LoginRequestDto { username, password };
        self.send_json(Method::POST, "/api/login", &payload, None)
            .await
    }

    /// Возвращает все блоги.
    pub async fn list_blogs(&self) -> BlogClientResult<Vec<Blog>> {
        self.fetch("/api/blogs").await
    }

    /// Возвращает блог по идентификатору.
    pub async fn get_blog(&self, id: i64) -> BlogClientResult<Blog> {
        self.fetch(&format!("/api/blogs/{id}")).await
    }

    /// Создаёт блог от имени владельца токена.
    pub async fn create_blog(&self, token: &str, blog: &NewBlog) -> BlogClientResult<Blog> {
        self.send_json(Method::POST, "/api/blogs", blog, Some(token))
            .await
    }

    /// Частично обновляет блог.
    pub async fn update_blog(
        &self,
        token: Option<&str>,
        id: i64,
        update: &BlogUpdate,
    ) -> BlogClientResult<Blog> {
        self.send_json(Method::PUT, &format!("/api/blogs/{id}"), update, token)
            .await
    }

    /// Удаляет блог. Сервер разрешает это только владельцу.
    pub async fn delete_blog(&self, token: &str, id: i64) -> BlogClientResult<()> {
        self.delete(&format!("/api/blogs/{id}"), token).await
    }

    /// Возвращает сводную статистику по блогам.
    pub async fn blog_stats(&self) -> BlogClientResult<BlogStats> {
        self.fetch("/api/blogs/stats").await
    }

    /// Возвращает всех пользователей вместе с их блогами.
    pub async fn list_users(&self) -> BlogClientResult<Vec<User>> {
        self.fetch("/api/users").await
    }

    /// Возвращает пользователя по идентификатору.
    pub async fn get_user(&self, id: i64) -> BlogClientResult<User> {
        self.fetch(&format!("/api/users/{id}")).await
    }

    /// Частично обновляет пользователя.
    pub async fn update_user(
        &self,
        token: Option<&str>,
        id: i64,
        update: &UserUpdate,
    ) -> BlogClientResult<User> {
        self.send_json(Method::PUT, &format!("/api/users/{id}"), update, token)
            .await
    }

    /// Удаляет собственную учётную запись вместе с блогами.
    pub async fn delete_user(&self, token: &str, id: i64) -> BlogClientResult<()> {
        self.delete(&format!("/api/users/{id}"), token).await
    }
}
