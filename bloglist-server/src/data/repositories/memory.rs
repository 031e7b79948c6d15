use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::blog::{Blog, BlogEntry, BlogOwner};
use crate::domain::error::DomainError;
use crate::domain::user::{User, UserBlog, UserProfile};

/// Хранилище в памяти процесса с той же семантикой, что и у Postgres:
/// уникальный `username`, каскадное удаление блогов вместе с владельцем.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<i64, StoredUser>,
    blogs: BTreeMap<i64, Blog>,
    last_user_id: i64,
    last_blog_id: i64,
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl MemoryState {
    fn entry(&self, blog: &Blog) -> Result<BlogEntry, DomainError> {
        let owner = self
            .users
            .get(&blog.owner_id)
            .ok_or_else(|| DomainError::Unexpected(format!("dangling owner {}", blog.owner_id)))?;

        Ok(BlogEntry {
            blog: blog.clone(),
            owner: BlogOwner {
                id: owner.user.id,
                username: owner.user.username.clone(),
                name: owner.user.name.clone(),
            },
        })
    }

    fn profile(&self, user: &User) -> UserProfile {
        let blogs = self
            .blogs
            .values()
            .filter(|blog| blog.owner_id == user.id)
            .map(|blog| UserBlog {
                id: blog.id,
                title: blog.title.clone(),
                author: blog.author.clone(),
                url: blog.url.clone(),
            })
            .collect();

        UserProfile {
            user: user.clone(),
            blogs,
        }
    }

    fn username_taken(&self, username: &str, except_id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|stored| stored.user.username == username && Some(stored.user.id) != except_id)
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn create_blog(&self, input: NewBlog) -> Result<BlogEntry, DomainError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&input.owner_id) {
            return Err(DomainError::Unauthorized);
        }

        let id = state.last_blog_id + 1;
        let blog = Blog::new(
            id,
            input.title,
            input.author,
            input.url,
            input.likes,
            input.owner_id,
        )?;
        state.last_blog_id = id;
        state.blogs.insert(id, blog.clone());

        state.entry(&blog)
    }

    async fn get_blog(&self, id: i64) -> Result<Option<BlogEntry>, DomainError> {
        let state = self.state.read().await;
        state.blogs.get(&id).map(|blog| state.entry(blog)).transpose()
    }

    async fn list_blogs(&self) -> Result<Vec<BlogEntry>, DomainError> {
        let state = self.state.read().await;
        state.blogs.values().map(|blog| state.entry(blog)).collect()
    }

    async fn update_blog(
        &self,
        id: i64,
        patch: BlogPatch,
    ) -> Result<Option<BlogEntry>, DomainError> {
        let mut state = self.state.write().await;
        let Some(blog) = state.blogs.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            blog.title = title;
        }
        if let Some(author) = patch.author {
            blog.author = author;
        }
        if let Some(url) = patch.url {
            blog.url = Some(url);
        }
        if let Some(likes) = patch.likes {
            blog.likes = likes;
        }

        let blog = blog.clone();
        state.entry(&blog).map(Some)
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.write().await.blogs.remove(&id).is_some())
    }

    async fn delete_all_blogs(&self) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let removed = state.blogs.len() as u64;
        state.blogs.clear();
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if state.username_taken(&input.username, None) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        let id = state.last_user_id + 1;
        let user = User::new(id, input.username, input.name)?;
        state.last_user_id = id;
        state.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: input.password_hash,
            },
        );

        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.username == username)
            .map(|stored| UserCredentials {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserProfile>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).map(|stored| state.profile(&stored.user)))
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .map(|stored| state.profile(&stored.user))
            .collect())
    }

    async fn update_user(
        &self,
        id: i64,
        patch: UserPatch,
    ) -> Result<Option<UserProfile>, DomainError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(username) = &patch.username
            && state.username_taken(username, Some(id))
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }

        let Some(stored) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(username) = patch.username {
            stored.user.username = username;
        }
        if let Some(name) = patch.name {
            stored.user.name = name;
        }
        if let Some(password_hash) = patch.password_hash {
            stored.password_hash = password_hash;
        }

        let user = stored.user.clone();
        Ok(Some(state.profile(&user)))
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state.blogs.retain(|_, blog| blog.owner_id != id);
        Ok(true)
    }

    async fn delete_all_users(&self) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let removed = state.users.len() as u64;
        state.users.clear();
        state.blogs.clear();
        Ok(removed)
    }
}
