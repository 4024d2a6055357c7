use crate::handlers;
use crate::middleware::validate::validate_signup_middleware;
use axum::{middleware, routing, Router};

pub fn create_routes() -> Router {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router {
    auth_routes().merge(forum_routes())
}

/// Auth routes. Signup sits behind the field-presence gate; login does
/// its own credential check.
fn auth_routes() -> Router {
    Router::new()
        .route("/auth/signup", routing::post(handlers::auth::signup))
        .layer(middleware::from_fn(validate_signup_middleware))
        .route("/auth/login", routing::post(handlers::auth::login))
}

/// Forum routes. All public: reads by design, thread creation because the
/// original never gated it (see DESIGN.md). A session token on thread
/// creation is honored when present.
fn forum_routes() -> Router {
    Router::new()
        .route(
            "/categories",
            routing::get(handlers::forum::list_categories),
        )
        .route(
            "/categories/{id}",
            routing::get(handlers::forum::get_category),
        )
        .route(
            "/categories/{id}/threads",
            routing::get(handlers::forum::list_threads),
        )
        .route("/threads", routing::post(handlers::forum::create_thread))
        .route(
            "/threads/trending",
            routing::get(handlers::forum::trending_threads),
        )
}
