use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `bloglist-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Операция требует входа, а токена нет или сервер его отверг.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Пользователь не владеет ресурсом.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Имя пользователя уже занято.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Некорректный запрос или ошибка валидации на сервере.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `bloglist-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
