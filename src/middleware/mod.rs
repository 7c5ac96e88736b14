/// Forkful - Middleware.
pub mod auth;
pub mod flash;

pub use auth::{OptionalSessionUser, SessionUser, WebSessionUser};
