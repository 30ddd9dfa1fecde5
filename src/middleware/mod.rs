pub mod auth;
pub mod context;
pub mod fallback;
pub mod response;

pub use auth::basic_auth_middleware;
pub use context::{AuthUser, RequestContext};
pub use fallback::{method_not_allowed_middleware, no_route};
pub use response::{ApiResponse, ApiResult};
