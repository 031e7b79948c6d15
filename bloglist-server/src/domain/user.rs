use super::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) name: Option<String>,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        validate_password(&self.password)?;
        Ok(Self {
            username,
            name: Some(normalize_name(self.name)),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateUserRequest {
    pub(crate) username: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) password: Option<String>,
}

impl UpdateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.as_deref().map(normalize_username).transpose()?;
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(Self {
            username,
            name: self.name.map(|name| name.trim().to_string()),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;

        Ok(Self {
            id,
            username,
            name: name.into(),
        })
    }
}

/// Краткая запись блога в профиле пользователя.
#[derive(Debug, Clone)]
pub(crate) struct UserBlog {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: Option<String>,
}

/// Пользователь вместе со списком его блогов.
///
/// Список строится по `owner_id` блогов, отдельно он нигде не хранится.
#[derive(Debug, Clone)]
pub(crate) struct UserProfile {
    pub(crate) user: User,
    pub(crate) blogs: Vec<UserBlog>,
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    let len = username.chars().count();
    if len < 3 || len > 64 {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    let password_len = password.chars().count();
    if password_len < 3 || password_len > 128 {
        return Err(DomainError::Validation {
            field: "password",
            message: "must be 3..128 chars",
        });
    }
    Ok(())
}

fn normalize_name(name: Option<String>) -> String {
    name.map(|name| name.trim().to_string()).unwrap_or_default()
}
