pub mod payload;

pub use payload::{ItemPayload, ItemUpdate, SignupRequest};
