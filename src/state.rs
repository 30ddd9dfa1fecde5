use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::database::{
    DatabaseError, DatabaseManager, ItemRepository, MemoryItemRepository, MemoryUserRepository, PgItemRepository,
    PgUserRepository, UserRepository,
};
use crate::services::{ItemService, UserService};

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub user_service: UserService,
    pub item_service: ItemService,
    /// `None` when running on the in-memory store
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        items: Arc<dyn ItemRepository>,
        database: Option<DatabaseManager>,
    ) -> Self {
        Self {
            user_service: UserService::new(users.clone()),
            item_service: ItemService::new(items),
            users,
            database,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryItemRepository::new()),
            None,
        )
    }

    pub fn postgres(manager: DatabaseManager) -> Self {
        let pool = manager.pool().clone();
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgItemRepository::new(pool)),
            Some(manager),
        )
    }

    /// Postgres when a URL is configured, otherwise the in-memory store
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.url {
            Some(_) => Ok(Self::postgres(DatabaseManager::connect(config).await?)),
            None => {
                tracing::warn!("DATABASE_URL not set; using the in-memory store (data is lost on exit)");
                Ok(Self::in_memory())
            }
        }
    }
}
