pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;

/// Build the full application router.
///
/// Every request passes the Basic auth middleware first; unmatched paths and
/// methods answer with the same JSON error body as handler failures.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let routes = Router::new()
        .merge(user_routes())
        .merge(item_routes())
        .route("/health", get(handlers::protected::health))
        .fallback(middleware::no_route)
        .layer(from_fn_with_state(state.clone(), middleware::basic_auth_middleware))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    // axum sets `Allow` after route layers run, so the 405 mapping wraps the
    // routed service as a whole.
    let router = Router::new()
        .fallback_service(routes)
        .layer(from_fn(middleware::method_not_allowed_middleware));

    let router = if config.security.enable_cors {
        router.layer(cors_layer(&config.security.cors_origins))
    } else {
        router
    };

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn user_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::{elevated, public};

    Router::new()
        // Signup is open; listing needs ROLE_ADMIN
        .route("/users", post(public::user_create).get(elevated::user_list))
        .route("/users/:id", get(elevated::user_get).delete(elevated::user_delete))
}

fn item_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::protected;

    Router::new()
        .route("/items", post(protected::item_create).get(protected::item_list))
        .route(
            "/items/:id",
            get(protected::item_get)
                .put(protected::item_update)
                .delete(protected::item_delete),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
