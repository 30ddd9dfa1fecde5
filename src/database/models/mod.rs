pub mod item;
pub mod user;

pub use item::{is_missing_content, Item, NewItem};
pub use user::{normalize_role, role_grants, AppUser, NewAppUser, ROLE_ADMIN, ROLE_USER, SUPERADMIN_USERNAME};
