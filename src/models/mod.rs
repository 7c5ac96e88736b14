/// Forkful - Database models and validated request types.
pub mod recipe;
pub mod user;
