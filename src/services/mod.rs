/// Forkful - Services.
pub mod auth;
