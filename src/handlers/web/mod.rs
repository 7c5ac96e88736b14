//! Forkful - Web page handlers.
//!
//! Handlers for serving HTML pages using Askama templates. Every mutating
//! endpoint follows the PRG pattern: validation and authorization failures
//! become a flash message plus redirect, never a hard failure.

// ============================================================================
// Shared imports - re-exported for sub-modules via `use super::*;`
// ============================================================================

pub(crate) use askama::Template;
pub(crate) use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
pub(crate) use axum_extra::extract::CookieJar;
pub(crate) use diesel::prelude::*;
pub(crate) use diesel_async::RunQueryDsl;
pub(crate) use std::collections::HashMap;

pub(crate) use crate::db::get_connection;
pub(crate) use crate::error::{AppError, AppResult};
pub(crate) use crate::middleware::auth::{OptionalSessionUser, SessionUser, WebSessionUser};
pub(crate) use crate::middleware::flash::{flash_redirect, ClearFlashCookie, IncomingFlash};
pub(crate) use crate::models::recipe::{Recipe, RecipeForm};
pub(crate) use crate::templates::base::{RecipeCard, UserContext};
pub(crate) use crate::AppState;

// ============================================================================
// Sub-modules
// ============================================================================

mod profiles;
mod recipes;

pub use profiles::*;
pub use recipes::*;

// ============================================================================
// Shared helpers
// ============================================================================

/// Convert the session context to the template-side user context.
pub(crate) fn user_context(session: &SessionUser) -> UserContext {
    UserContext {
        username: session.username.clone(),
    }
}

/// Template user context for pages that work with or without a session.
pub(crate) fn optional_user_context(user: &OptionalSessionUser) -> Option<UserContext> {
    user.0.as_ref().map(user_context)
}

/// Convert incoming flash messages into their template representation.
pub(crate) fn template_messages(
    incoming: &IncomingFlash,
) -> Vec<crate::templates::base::FlashMessage> {
    incoming
        .messages()
        .iter()
        .map(|m| crate::templates::base::FlashMessage {
            level: m.level.clone(),
            message: m.message.clone(),
        })
        .collect()
}

/// Render a template to a full HTML response. When flash messages were
/// displayed, the flash cookie is cleared so they are one-shot.
pub(crate) fn render_html<T: Template>(template: &T, clear_flash: bool) -> AppResult<Response> {
    let html = template
        .render()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template render error: {}", e)))?;
    if clear_flash {
        Ok((ClearFlashCookie, Html(html)).into_response())
    } else {
        Ok(Html(html).into_response())
    }
}

/// Human-readable summary of a validation failure, naming the offending
/// fields without echoing their values.
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    format!("Please check the following fields: {}", fields.join(", "))
}

/// Map a recipe row to its listing card.
pub(crate) fn recipe_card(recipe: &Recipe) -> RecipeCard {
    RecipeCard {
        id: recipe.id,
        name: recipe.name.clone(),
        category: recipe.category.clone(),
        prep_time: recipe.prep_time.clone(),
        difficulty: recipe.difficulty.clone(),
        created_by: recipe.created_by.clone(),
        recipe_img: recipe.recipe_img.clone(),
    }
}

// ============================================================================
// Static pages
// ============================================================================

/// Landing page (GET / and GET /home).
pub async fn home(
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
) -> AppResult<Response> {
    let template = crate::templates::pages::HomeTemplate {
        title: "Home".to_string(),
        user: optional_user_context(&user),
        messages: template_messages(&incoming_flash),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Articles page (GET /articles).
pub async fn articles(
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
) -> AppResult<Response> {
    let template = crate::templates::pages::ArticlesTemplate {
        title: "Articles".to_string(),
        user: optional_user_context(&user),
        messages: template_messages(&incoming_flash),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Fallback handler for unmatched routes.
/// Redirects to the home page instead of returning a 404.
pub async fn fallback_handler() -> Redirect {
    Redirect::to("/")
}
