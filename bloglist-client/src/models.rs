use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Владелец блога в ответах API.
pub struct BlogOwner {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Отображаемое имя.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель блога.
pub struct Blog {
    /// Идентификатор блога.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub author: String,
    /// Ссылка на оригинал.
    pub url: Option<String>,
    /// Количество лайков.
    pub likes: i64,
    /// Пользователь, добавивший блог.
    pub user: BlogOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Краткая запись блога в профиле пользователя.
pub struct UserBlog {
    /// Идентификатор блога.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub author: String,
    /// Ссылка на оригинал.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Отображаемое имя.
    pub name: String,
    /// Блоги, добавленные пользователем.
    pub blogs: Vec<UserBlog>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешного входа.
pub struct LoginResponse {
    /// JWT access token.
    pub token: String,
    /// Логин.
    pub username: String,
    /// Отображаемое имя.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Самый популярный блог.
pub struct FavoriteBlog {
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub author: String,
    /// Количество лайков.
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Автор с наибольшим числом блогов.
pub struct AuthorBlogs {
    /// Имя автора.
    pub author: String,
    /// Число блогов.
    pub blogs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Автор с наибольшей суммой лайков.
pub struct AuthorLikes {
    /// Имя автора.
    pub author: String,
    /// Сумма лайков.
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Сводная статистика по всем блогам.
pub struct BlogStats {
    /// Общее число блогов.
    pub total_blogs: u64,
    /// Сумма лайков.
    pub total_likes: i64,
    /// Блог с наибольшим числом лайков.
    pub favorite_blog: Option<FavoriteBlog>,
    /// Самый плодовитый автор.
    pub most_blogs: Option<AuthorBlogs>,
    /// Автор с наибольшим числом лайков.
    pub most_likes: Option<AuthorLikes>,
}

#[derive(Debug, Clone, Serialize)]
/// Данные нового блога.
pub struct NewBlog {
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub author: String,
    /// Ссылка на оригинал.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Начальное число лайков, по умолчанию 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Частичное обновление блога: отправляются только заданные поля.
pub struct BlogUpdate {
    /// Новый заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Новый автор.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Новая ссылка.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Новое число лайков.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Частичное обновление пользователя.
pub struct UserUpdate {
    /// Новый логин.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Новое имя.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Новый пароль.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
