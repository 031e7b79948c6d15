use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{User, UserBlog, UserProfile};

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_profiles(&self, users: Vec<User>) -> Result<Vec<UserProfile>, DomainError> {
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = users.iter().map(|user| user.id).collect();
        let rows = sqlx::query_as::<_, UserBlogRow>(
            r#"
            SELECT id, owner_id, title, author, url
            FROM blogs
            WHERE owner_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let mut blogs_by_owner: HashMap<i64, Vec<UserBlog>> = HashMap::new();
        for row in rows {
            blogs_by_owner.entry(row.owner_id).or_default().push(UserBlog {
                id: row.id,
                title: row.title,
                author: row.author,
                url: row.url,
            });
        }

        Ok(users
            .into_iter()
            .map(|user| UserProfile {
                blogs: blogs_by_owner.remove(&user.id).unwrap_or_default(),
                user,
            })
            .collect())
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    name: String,
    password_hash: String,
}

#[derive(FromRow)]
struct UserBlogRow {
    id: i64,
    owner_id: i64,
    title: String,
    author: String,
    url: Option<String>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, name
            "#,
        )
        .bind(input.username)
        .bind(input.name)
        .bind(input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        map_row_to_user(row)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT
            id,
            username,
            name,
            password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;
        if let Some(r) = row {
            let user = User::new(r.id, r.username, r.name)
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;

            Ok(Some(UserCredentials {
                user,
                password_hash: r.password_hash,
            }))
        } else {
            Ok(None)
        }
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user = map_row_to_user(row)?;
        Ok(self.load_profiles(vec![user]).await?.pop())
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let users = rows
            .into_iter()
            .map(map_row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        self.load_profiles(users).await
    }

    async fn update_user(
        &self,
        id: i64,
        patch: UserPatch,
    ) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                name = COALESCE($3, name),
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            RETURNING id, username, name
            "#,
        )
        .bind(id)
        .bind(patch.username)
        .bind(patch.name)
        .bind(patch.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user = map_row_to_user(row)?;
        Ok(self.load_profiles(vec![user]).await?.pop())
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_users(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        Ok(result.rows_affected())
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    User::new(row.id, row.username, row.name)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_username_key") => "username",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
