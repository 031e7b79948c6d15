use tracing::{info, warn};

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::domain::access::authorize_owner_or_fail;
use crate::domain::blog::{Blog, BlogEntry, CreateBlogRequest, UpdateBlogRequest};
use crate::domain::error::DomainError;
use crate::domain::stats::{BlogStats, blog_stats};

pub(crate) struct BlogService<R: BlogRepository> {
    repo: R,
}

impl<R: BlogRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_blog(
        &self,
        owner_id: i64,
        req: CreateBlogRequest,
    ) -> Result<BlogEntry, DomainError> {
        let req = req.validate()?;

        let new_blog = NewBlog {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes.unwrap_or(0),
            owner_id,
        };
        let created = self.repo.create_blog(new_blog).await?;
        info!(blog_id = created.blog.id, owner_id, "blog created");
        Ok(created)
    }

    pub(crate) async fn get_blog(&self, id: i64) -> Result<BlogEntry, DomainError> {
        self.repo
            .get_blog(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("blog id: {id}")))
    }

    pub(crate) async fn list_blogs(&self) -> Result<Vec<BlogEntry>, DomainError> {
        self.repo.list_blogs().await
    }

    pub(crate) async fn update_blog(
        &self,
        id: i64,
        req: UpdateBlogRequest,
    ) -> Result<BlogEntry, DomainError> {
        let req = req.validate()?;
        let patch = BlogPatch {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        };
        self.repo
            .update_blog(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("blog id: {id}")))
    }

    pub(crate) async fn delete_blog(
        &self,
        actor_user_id: Option<i64>,
        blog_id: i64,
    ) -> Result<(), DomainError> {
        let original = self.get_blog(blog_id).await?;

        if let Err(err) = authorize_owner_or_fail(original.blog.owner_id, actor_user_id) {
            warn!(blog_id, actor_user_id, "blog deletion rejected: {err}");
            return Err(err);
        }

        let deleted = self.repo.delete_blog(blog_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("blog id: {blog_id}")));
        }
        info!(blog_id, "blog deleted");
        Ok(())
    }

    pub(crate) async fn stats(&self) -> Result<BlogStats, DomainError> {
        let blogs: Vec<Blog> = self
            .repo
            .list_blogs()
            .await?
            .into_iter()
            .map(|entry| entry.blog)
            .collect();

        Ok(blog_stats(&blogs))
    }

    pub(crate) async fn delete_all_blogs(&self) -> Result<u64, DomainError> {
        self.repo.delete_all_blogs().await
    }
}
