/// Forkful - Request handlers.
pub mod auth;
pub mod web;
