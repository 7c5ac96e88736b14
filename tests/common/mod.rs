//! Shared fixtures for router-level tests.
//!
//! The application state is built from the testing configuration with a
//! lazily-connecting pool, so tests exercise routing, rendering and session
//! gating without a live database.
#![allow(dead_code)] // each test binary uses a different subset of fixtures

use std::path::Path;

use forkful::config::{Config, Environment};
use forkful::db::create_pool;
use forkful::services::auth::AuthService;
use forkful::{unwrap_ok, AppState};

pub fn test_config() -> Config {
    unwrap_ok!(Config::load_with_environment(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("config"),
        Environment::Testing,
    ))
}

pub fn test_state() -> AppState {
    let config = test_config();
    let db_pool = unwrap_ok!(create_pool(&config));
    let auth_service = unwrap_ok!(AuthService::new(&config));

    AppState {
        config,
        db_pool,
        auth_service,
    }
}

/// A valid session cookie header value for `username`.
pub fn session_cookie_for(state: &AppState, username: &str) -> String {
    let token = unwrap_ok!(state.auth_service.generate_session_token(username));
    format!(
        "{}={}",
        forkful::middleware::auth::SESSION_COOKIE_NAME,
        token
    )
}
