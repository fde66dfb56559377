//! Route assembly
//!
//! Public routes carry no session requirement; event creation sits behind
//! the auth middleware. Rate limiting applies to everything.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, bookmarks, events, health};
use crate::middleware::{auth_middleware, rate_limit_middleware};
use crate::state::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/health", get(health::health))
        .route("/events", get(events::list_events))
        .route(
            "/events/created",
            get(events::created_events).delete(events::delete_created_event),
        )
        .route(
            "/events/bookmarked",
            get(bookmarks::list_bookmarked)
                .post(bookmarks::add_bookmark)
                .delete(bookmarks::remove_bookmark),
        );

    let protected_routes = Router::new()
        .route("/events", post(events::create_event))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ))
        .with_state(app_state)
}
