use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::{User, UserProfile};

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UserPatch {
    pub(crate) username: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) password_hash: Option<String>,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn get_user(&self, id: i64) -> Result<Option<UserProfile>, DomainError>;
    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError>;
    async fn update_user(
        &self,
        id: i64,
        patch: UserPatch,
    ) -> Result<Option<UserProfile>, DomainError>;
    async fn delete_user(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_all_users(&self) -> Result<u64, DomainError>;
}

pub(crate) type DynUserRepository = Arc<dyn UserRepository>;

#[async_trait]
impl<T> UserRepository for Arc<T>
where
    T: UserRepository + ?Sized,
{
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        (**self).create_user(input).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserCredentials>, DomainError> {
        (**self).find_by_username(username).await
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserProfile>, DomainError> {
        (**self).get_user(id).await
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        (**self).list_users().await
    }

    async fn update_user(
        &self,
        id: i64,
        patch: UserPatch,
    ) -> Result<Option<UserProfile>, DomainError> {
        (**self).update_user(id, patch).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_user(id).await
    }

    async fn delete_all_users(&self) -> Result<u64, DomainError> {
        (**self).delete_all_users().await
    }
}
