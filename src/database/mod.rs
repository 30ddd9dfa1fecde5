pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryItemRepository, MemoryUserRepository};
pub use repository::{ItemRepository, PgItemRepository, PgUserRepository, UserRepository};
