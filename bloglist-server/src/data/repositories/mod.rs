use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::data::blog_repository::DynBlogRepository;
use crate::data::user_repository::DynUserRepository;
use crate::infrastructure::database::{create_pool, run_migrations};
use crate::infrastructure::settings::{Settings, StorageBackend};

pub(crate) mod memory;
pub(crate) mod postgres;

use memory::MemoryStore;
use postgres::blog_repository::PostgresBlogRepository;
use postgres::user_repository::PostgresUserRepository;

#[derive(Clone)]
pub(crate) struct Repositories {
    pub(crate) blogs: DynBlogRepository,
    pub(crate) users: DynUserRepository,
}

impl Repositories {
    pub(crate) fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            blogs: store.clone(),
            users: store,
        }
    }
}

pub(crate) async fn build_repositories(settings: &Settings) -> Result<Repositories> {
    match &settings.storage {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            Ok(Repositories::in_memory())
        }
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = create_pool(database_url, *max_connections).await?;
            run_migrations(&pool).await?;
            info!("connected to postgres, migrations applied");

            Ok(Repositories {
                blogs: Arc::new(PostgresBlogRepository::new(pool.clone())),
                users: Arc::new(PostgresUserRepository::new(pool)),
            })
        }
    }
}
