use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::blog::BlogEntry;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewBlog {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: Option<String>,
    pub(crate) likes: i64,
    pub(crate) owner_id: i64,
}

/// Частичное обновление блога: `None` оставляет поле без изменений.
#[derive(Debug, Clone, Default)]
pub(crate) struct BlogPatch {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) likes: Option<i64>,
}

#[async_trait]
pub(crate) trait BlogRepository: Send + Sync {
    async fn create_blog(&self, input: NewBlog) -> Result<BlogEntry, DomainError>;
    async fn get_blog(&self, id: i64) -> Result<Option<BlogEntry>, DomainError>;
    async fn list_blogs(&self) -> Result<Vec<BlogEntry>, DomainError>;
    async fn update_blog(
        &self,
        id: i64,
        patch: BlogPatch,
    ) -> Result<Option<BlogEntry>, DomainError>;
    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_all_blogs(&self) -> Result<u64, DomainError>;
}

pub(crate) type DynBlogRepository = Arc<dyn BlogRepository>;

#[async_trait]
impl<T> BlogRepository for Arc<T>
where
    T: BlogRepository + ?Sized,
{
    async fn create_blog(&self, input: NewBlog) -> Result<BlogEntry, DomainError> {
        (**self).create_blog(input).await
    }

    async fn get_blog(&self, id: i64) -> Result<Option<BlogEntry>, DomainError> {
        (**self).get_blog(id).await
    }

    async fn list_blogs(&self) -> Result<Vec<BlogEntry>, DomainError> {
        (**self).list_blogs().await
    }

    async fn update_blog(
        &self,
        id: i64,
        patch: BlogPatch,
    ) -> Result<Option<BlogEntry>, DomainError> {
        (**self).update_blog(id, patch).await
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_blog(id).await
    }

    async fn delete_all_blogs(&self) -> Result<u64, DomainError> {
        (**self).delete_all_blogs().await
    }
}
