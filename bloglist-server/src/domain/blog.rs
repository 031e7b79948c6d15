use super::error::DomainError;

/// Верхняя граница лайков у одного блога; совпадает с CHECK в миграции.
pub(crate) const MAX_LIKES: i64 = 1_000_000_000;

#[derive(Debug, Clone)]
pub(crate) struct Blog {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: Option<String>,
    pub(crate) likes: i64,
    pub(crate) owner_id: i64,
}

/// Публичные данные владельца, которые отдаются вместе с блогом.
#[derive(Debug, Clone)]
pub(crate) struct BlogOwner {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct BlogEntry {
    pub(crate) blog: Blog,
    pub(crate) owner: BlogOwner,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateBlogRequest {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: Option<String>,
    pub(crate) likes: Option<i64>,
}

impl CreateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let likes = self.likes.unwrap_or(0);
        validate_likes(likes)?;

        Ok(Self {
            title: normalize_title(&self.title)?,
            author: normalize_author(&self.author)?,
            url: normalize_url(self.url),
            likes: Some(likes),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateBlogRequest {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) likes: Option<i64>,
}

impl UpdateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if let Some(likes) = self.likes {
            validate_likes(likes)?;
        }

        Ok(Self {
            title: self.title.as_deref().map(normalize_title).transpose()?,
            author: self.author.as_deref().map(normalize_author).transpose()?,
            url: normalize_url(self.url),
            likes: self.likes,
        })
    }
}

impl Blog {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        url: Option<String>,
        likes: i64,
        owner_id: i64,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("owner_id", owner_id)?;
        validate_likes(likes)?;
        let title = normalize_title(&title.into())?;
        let author = normalize_author(&author.into())?;

        Ok(Self {
            id,
            title,
            author,
            url: normalize_url(url),
            likes,
            owner_id,
        })
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn validate_likes(likes: i64) -> Result<(), DomainError> {
    if !(0..=MAX_LIKES).contains(&likes) {
        return Err(DomainError::Validation {
            field: "likes",
            message: "must be 0..=1000000000",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_author(author: &str) -> Result<String, DomainError> {
    let author = author.trim();
    if author.is_empty() || author.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "author",
            message: "must be 1..255 chars",
        });
    }
    Ok(author.to_string())
}

// пустой url равносилен его отсутствию
fn normalize_url(url: Option<String>) -> Option<String> {
    url.map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}
