// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None. Credentials are still honoured when sent.

pub mod users;

pub use users::user_create;
