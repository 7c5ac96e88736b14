//! Forkful - Library crate exposing all modules.
//!
//! This file makes modules available for integration tests.

// Clippy lints to enforce proper error handling
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(clippy::todo)]

// Test utilities - macros for replacing unwrap/expect in tests
#[macro_use]
pub mod test_utils;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod services;
pub mod templates;
pub mod utils;

use axum::routing::get;
use axum::Router;
use secrecy::ExposeSecret;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use config::Config;
use db::DbPool;
use services::auth::AuthService;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db_pool: DbPool,
    pub auth_service: AuthService,
}

/// Build the application router.
///
/// The route table mirrors the site map: static pages, recipe listing and
/// search, account management, and owner-gated recipe/profile mutation.
pub fn app(state: AppState) -> Router {
    use crate::handlers::{auth, web};

    let flash_key = middleware::flash::FlashSecretKey(
        state.config.secret_key.expose_secret().as_bytes().to_vec(),
    );

    Router::new()
        // Static pages
        .route("/", get(web::home))
        .route("/home", get(web::home))
        .route("/articles", get(web::articles))
        // Recipe listing and search
        .route("/get_recipes/", get(web::recipe_list))
        .route(
            "/search_recipes/{category}",
            get(web::search_recipes).post(web::search_recipes),
        )
        .route("/search", get(web::search).post(web::search))
        // Accounts
        .route(
            "/register",
            get(auth::register_page).post(auth::register_submit),
        )
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .route("/profile/{username}", get(web::profile).post(web::profile))
        .route(
            "/edit_profile/{username}",
            get(web::edit_profile_form).post(web::update_profile),
        )
        .route("/delete_profile/{username}", get(web::delete_profile))
        // Recipes
        .route(
            "/add_recipe",
            get(web::recipe_new_form).post(web::create_recipe),
        )
        .route("/recipe/{id}", get(web::recipe_detail))
        .route(
            "/edit_recipe/{id}",
            get(web::recipe_edit_form).post(web::update_recipe),
        )
        .route("/delete_recipe/{id}", get(web::delete_recipe))
        .fallback(web::fallback_handler)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(std::time::Duration::from_secs(30)))
                .layer(axum::middleware::from_fn_with_state(
                    flash_key,
                    middleware::flash::flash_middleware,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::auth::session_middleware,
                )),
        )
        .with_state(state)
}
