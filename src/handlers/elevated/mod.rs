// handlers/elevated/mod.rs - Administrative handlers
//
// Security Level: Basic authentication with ROLE_ADMIN.

pub mod users;

pub use users::{user_delete, user_get, user_list};
