use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{AppUser, Item, NewAppUser, NewItem};

/// Storage for application users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewAppUser) -> Result<AppUser, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<AppUser>, DatabaseError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<AppUser>, DatabaseError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DatabaseError>;
    /// Deleting a missing id is not an error
    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError>;
}

/// Storage for items
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn insert(&self, item: NewItem) -> Result<Item, DatabaseError>;
    /// Overwrites every column of an existing row
    async fn save(&self, item: Item) -> Result<Item, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<Item>, DatabaseError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, DatabaseError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError>;
}

const USER_COLUMNS: &str = "id, username, password, role, is_immutable";

const ITEM_COLUMNS: &str = "id, item_name, item_cost, item_quantity, item_pack, item_content, \
     item_dimensions, item_origin_location, item_ship, item_company, \
     item_manufacturing_date_time, item_expiry_date";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewAppUser) -> Result<AppUser, DatabaseError> {
        let sql = format!(
            "INSERT INTO app_user (username, password, role, is_immutable) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, AppUser>(&sql)
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.role)
            .bind(user.is_immutable)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DatabaseError::Duplicate(format!("Username '{}' already exists", user.username))
                }
                other => DatabaseError::Sqlx(other),
            })
    }

    async fn find_all(&self) -> Result<Vec<AppUser>, DatabaseError> {
        let sql = format!("SELECT {} FROM app_user ORDER BY id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, AppUser>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AppUser>, DatabaseError> {
        let sql = format!("SELECT {} FROM app_user WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, AppUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DatabaseError> {
        let sql = format!("SELECT {} FROM app_user WHERE username = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, AppUser>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert(&self, item: NewItem) -> Result<Item, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO item (
                item_name, item_cost, item_quantity, item_pack, item_content, item_dimensions,
                item_origin_location, item_ship, item_company, item_manufacturing_date_time, item_expiry_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}"#,
            ITEM_COLUMNS
        );

        Ok(sqlx::query_as::<_, Item>(&sql)
            .bind(&item.item_name)
            .bind(item.item_cost)
            .bind(item.item_quantity)
            .bind(&item.item_pack)
            .bind(item.item_content)
            .bind(item.item_dimensions)
            .bind(&item.item_origin_location)
            .bind(item.item_ship)
            .bind(&item.item_company)
            .bind(item.item_manufacturing_date_time)
            .bind(item.item_expiry_date)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save(&self, item: Item) -> Result<Item, DatabaseError> {
        let sql = format!(
            r#"UPDATE item SET
                item_name = $2, item_cost = $3, item_quantity = $4, item_pack = $5, item_content = $6,
                item_dimensions = $7, item_origin_location = $8, item_ship = $9, item_company = $10,
                item_manufacturing_date_time = $11, item_expiry_date = $12
            WHERE id = $1
            RETURNING {}"#,
            ITEM_COLUMNS
        );

        sqlx::query_as::<_, Item>(&sql)
            .bind(item.id)
            .bind(&item.item_name)
            .bind(item.item_cost)
            .bind(item.item_quantity)
            .bind(&item.item_pack)
            .bind(item.item_content)
            .bind(item.item_dimensions)
            .bind(&item.item_origin_location)
            .bind(item.item_ship)
            .bind(&item.item_company)
            .bind(item.item_manufacturing_date_time)
            .bind(item.item_expiry_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Item {} not found", item.id)))
    }

    async fn find_all(&self) -> Result<Vec<Item>, DatabaseError> {
        let sql = format!("SELECT {} FROM item ORDER BY id", ITEM_COLUMNS);
        Ok(sqlx::query_as::<_, Item>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, DatabaseError> {
        let sql = format!("SELECT {} FROM item WHERE id = $1", ITEM_COLUMNS);
        Ok(sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM item WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0 > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM item WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
