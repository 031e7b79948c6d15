use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::blog_repository::{BlogPatch, BlogRepository, NewBlog};
use crate::domain::blog::{Blog, BlogEntry, BlogOwner};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    author: String,
    url: Option<String>,
    likes: i64,
    owner_id: i64,
    owner_username: String,
    owner_name: String,
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn create_blog(&self, input: NewBlog) -> Result<BlogEntry, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH inserted AS (
                INSERT INTO blogs (title, author, url, likes, owner_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, title, author, url, likes, owner_id
            )
            SELECT
                i.id,
                i.title,
                i.author,
                i.url,
                i.likes,
                i.owner_id,
                u.username AS owner_username,
                u.name AS owner_name
            FROM inserted i
            JOIN users u ON u.id = i.owner_id
            "#,
        )
        .bind(input.title)
        .bind(input.author)
        .bind(input.url)
        .bind(input.likes)
        .bind(input.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        map_row_to_entry(row)
    }

    async fn get_blog(&self, id: i64) -> Result<Option<BlogEntry>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                b.id,
                b.title,
                b.author,
                b.url,
                b.likes,
                b.owner_id,
                u.username AS owner_username,
                u.name AS owner_name
            FROM blogs b
            JOIN users u ON u.id = b.owner_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        row.map(map_row_to_entry).transpose()
    }

    async fn list_blogs(&self) -> Result<Vec<BlogEntry>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT
                b.id,
                b.title,
                b.author,
                b.url,
                b.likes,
                b.owner_id,
                u.username AS owner_username,
                u.name AS owner_name
            FROM blogs b
            JOIN users u ON u.id = b.owner_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        rows.into_iter().map(map_row_to_entry).collect()
    }

    async fn update_blog(
        &self,
        id: i64,
        patch: BlogPatch,
    ) -> Result<Option<BlogEntry>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            WITH updated AS (
                UPDATE blogs
                SET title = COALESCE($2, title),
                    author = COALESCE($3, author),
                    url = COALESCE($4, url),
                    likes = COALESCE($5, likes)
                WHERE id = $1
                RETURNING id, title, author, url, likes, owner_id
            )
            SELECT
                b.id,
                b.title,
                b.author,
                b.url,
                b.likes,
                b.owner_id,
                u.username AS owner_username,
                u.name AS owner_name
            FROM updated b
            JOIN users u ON u.id = b.owner_id
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.author)
        .bind(patch.url)
        .bind(patch.likes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        row.map(map_row_to_entry).transpose()
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_blogs(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM blogs")
            .execute(&self.pool)
            .await
            .map_err(map_blog_db_error)?;

        Ok(result.rows_affected())
    }
}

fn map_row_to_entry(row: BlogRow) -> Result<BlogEntry, DomainError> {
    let blog = Blog::new(
        row.id,
        row.title,
        row.author,
        row.url,
        row.likes,
        row.owner_id,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(BlogEntry {
        owner: BlogOwner {
            id: row.owner_id,
            username: row.owner_username,
            name: row.owner_name,
        },
        blog,
    })
}

fn map_blog_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        // Владелец удалён, а его токен ещё действует.
        return DomainError::Unauthorized;
    }
    DomainError::Unexpected(err.to_string())
}
