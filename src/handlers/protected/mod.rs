// handlers/protected/mod.rs - Handlers for any role-holding caller
//
// Security Level: Basic authentication; /items needs ROLE_USER or ROLE_ADMIN.

pub mod health;
pub mod items;

pub use health::health;
pub use items::{item_create, item_delete, item_get, item_list, item_update};
