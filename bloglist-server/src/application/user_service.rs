use tracing::{info, warn};

use crate::data::user_repository::{NewUser, UserPatch, UserRepository};
use crate::domain::access::authorize_owner_or_fail;
use crate::domain::error::DomainError;
use crate::domain::user::{RegisterRequest, UpdateUserRequest, User, UserProfile};
use crate::infrastructure::password::hash_password;

pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let password_hash = hash_password(&req.password)?;

        let user = self
            .repo
            .create_user(NewUser {
                username: req.username,
                name: req.name.unwrap_or_default(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        self.repo.list_users().await
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<UserProfile, DomainError> {
        self.repo
            .get_user(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))
    }

    /// Частично обновляет профиль; новый пароль сразу хешируется.
    pub(crate) async fn update_user(
        &self,
        id: i64,
        req: UpdateUserRequest,
    ) -> Result<UserProfile, DomainError> {
        let req = req.validate()?;
        let password_hash = req.password.as_deref().map(hash_password).transpose()?;

        let patch = UserPatch {
            username: req.username,
            name: req.name,
            password_hash,
        };
        let updated = self
            .repo
            .update_user(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {id}")))?;

        info!(user_id = id, "user updated");
        Ok(updated)
    }

    /// Удаляет пользователя вместе с его блогами.
    pub(crate) async fn delete_user(
        &self,
        actor_user_id: Option<i64>,
        id: i64,
    ) -> Result<(), DomainError> {
        let target = self.get_user(id).await?;
        if let Err(err) = authorize_owner_or_fail(target.user.id, actor_user_id) {
            warn!(user_id = id, actor_user_id, "user deletion rejected: {err}");
            return Err(err);
        }

        if !self.repo.delete_user(id).await? {
            return Err(DomainError::NotFound(format!("user id: {id}")));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub(crate) async fn delete_all_users(&self) -> Result<u64, DomainError> {
        self.repo.delete_all_users().await
    }
}
