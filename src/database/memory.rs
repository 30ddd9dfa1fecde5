//! In-process store used when no `DATABASE_URL` is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{AppUser, Item, NewAppUser, NewItem};
use crate::database::repository::{ItemRepository, UserRepository};

/// Rows keyed by id plus the next id to hand out
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: RwLock<Table<AppUser>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: NewAppUser) -> Result<AppUser, DatabaseError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(DatabaseError::Duplicate(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let id = table.allocate_id();
        let stored = user.into_user(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<AppUser>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AppUser>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DatabaseError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryItemRepository {
    table: RwLock<Table<Item>>,
}

impl MemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn insert(&self, item: NewItem) -> Result<Item, DatabaseError> {
        let mut table = self.table.write().await;
        let id = table.allocate_id();
        let stored = item.into_item(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, item: Item) -> Result<Item, DatabaseError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(item)
            }
            None => Err(DatabaseError::NotFound(format!("Item {} not found", item.id))),
        }
    }

    async fn find_all(&self) -> Result<Vec<Item>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
