/// Forkful - Askama templates module.
///
/// This module contains all template structs and shared types for Askama
/// templates.
pub mod accounts;
pub mod base;
pub mod pages;
pub mod recipes;

pub use base::{FlashMessage, UserContext};
