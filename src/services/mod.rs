pub mod item_service;
pub mod user_service;

pub use item_service::ItemService;
pub use user_service::UserService;
