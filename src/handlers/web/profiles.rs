/// Profile page handlers: paginated profile view, profile edit and delete.
use super::*;

use crate::middleware::auth::clear_session_cookie;
use crate::models::user::{ProfileEditForm, User};
use crate::schema::{recipes, users};
use crate::templates::accounts::{
    EditProfileTemplate, Pagination, ProfileDetail, ProfileTemplate,
};
use crate::utils::page_window;
use chrono::Utc;
use validator::Validate;

/// Recipes shown per profile page.
pub(crate) const PROFILE_PAGE_SIZE: i64 = 2;

/// Load a user row or fail with NotFound. `username` must already be
/// lowercased.
async fn load_user(state: &AppState, username: &str) -> AppResult<User> {
    let mut conn = get_connection(&state.db_pool).await?;

    users::table
        .filter(users::username.eq(username))
        .first::<User>(&mut conn)
        .await
        .optional()
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("User {} does not exist", username)))
}

fn profile_detail(user: &User) -> ProfileDetail {
    ProfileDetail {
        username: user.username.clone(),
        email: user.email.clone(),
        user_img: user.user_img.clone(),
    }
}

/// Parse the `page` query parameter. Missing, non-numeric or sub-1 values
/// fall back to the first page rather than erroring.
fn requested_page(params: &HashMap<String, String>) -> i64 {
    params
        .get("page")
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(1)
}

/// Profile page with the owner's recipes, two per page
/// (GET|POST /profile/{username}?page=N). Only the owner may view it.
pub async fn profile(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Response> {
    if !session.is_current(&username) {
        return Err(AppError::AuthRedirect);
    }

    let username = username.to_lowercase();
    let user = load_user(&state, &username).await?;

    let mut conn = get_connection(&state.db_pool).await?;

    let total: i64 = recipes::table
        .filter(recipes::created_by.eq(&username))
        .count()
        .get_result(&mut conn)
        .await
        .map_err(AppError::Database)?;

    let window = page_window(total, requested_page(&params), PROFILE_PAGE_SIZE);

    // A page past the end yields an empty slice, not an error.
    let rows: Vec<Recipe> = recipes::table
        .filter(recipes::created_by.eq(&username))
        .order(recipes::id.asc())
        .offset(window.offset)
        .limit(window.per_page)
        .load(&mut conn)
        .await
        .map_err(AppError::Database)?;

    let pagination = if window.total_pages > 1 {
        Some(Pagination {
            current_page: window.page,
            total_pages: window.total_pages,
            total_items: window.total_items,
            has_previous: window.has_previous(),
            has_next: window.has_next(),
        })
    } else {
        None
    };

    let template = ProfileTemplate {
        title: format!("{}'s profile", user.username),
        user: Some(user_context(&session)),
        messages: template_messages(&incoming_flash),
        profile: profile_detail(&user),
        recipes: rows.iter().map(recipe_card).collect(),
        pagination,
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Profile edit form (GET /edit_profile/{username}). Owner-only.
pub async fn edit_profile_form(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Path(username): Path<String>,
) -> AppResult<Response> {
    if !session.is_current(&username) {
        return Err(AppError::AuthRedirect);
    }

    let user = load_user(&state, &username.to_lowercase()).await?;

    let template = EditProfileTemplate {
        title: "Edit profile".to_string(),
        user: Some(user_context(&session)),
        messages: template_messages(&incoming_flash),
        profile: profile_detail(&user),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Apply profile changes (POST /edit_profile/{username}). Owner-only.
/// Email and image are taken from the form; a non-empty password field
/// replaces the stored hash; the username itself is immutable.
pub async fn update_profile(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Path(username): Path<String>,
    Form(form): Form<ProfileEditForm>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();

    if !session.is_current(&username) {
        return Err(AppError::AuthRedirect);
    }
    let username = username.to_lowercase();

    if let Err(errors) = form.validate() {
        return Ok(flash_redirect(
            flash.error(validation_message(&errors)),
            &format!("/edit_profile/{}", username),
        ));
    }
    if let Some(password) = form.new_password() {
        if password.len() < state.config.security.password_min_length {
            return Ok(flash_redirect(
                flash.error(format!(
                    "Password must be at least {} characters",
                    state.config.security.password_min_length
                )),
                &format!("/edit_profile/{}", username),
            ));
        }
    }

    // Make sure the row still exists before touching it.
    load_user(&state, &username).await?;

    let mut conn = get_connection(&state.db_pool).await?;
    let email = form.email.to_lowercase();
    let user_img = form.normalized_img();

    match form.new_password() {
        Some(password) => {
            let password_hash = state.auth_service.hash_password(password)?;
            diesel::update(users::table.filter(users::username.eq(&username)))
                .set((
                    users::email.eq(email),
                    users::user_img.eq(user_img),
                    users::password_hash.eq(password_hash),
                    users::updated_at.eq(Utc::now()),
                ))
                .execute(&mut conn)
                .await
                .map_err(AppError::Database)?;
        }
        None => {
            diesel::update(users::table.filter(users::username.eq(&username)))
                .set((
                    users::email.eq(email),
                    users::user_img.eq(user_img),
                    users::updated_at.eq(Utc::now()),
                ))
                .execute(&mut conn)
                .await
                .map_err(AppError::Database)?;
        }
    }

    tracing::info!(username = %username, "Profile updated");

    Ok(flash_redirect(
        flash.success("Profile updated"),
        &format!("/profile/{}", username),
    ))
}

/// Delete a profile (GET /delete_profile/{username}). Owner-only; clears the
/// session afterwards. The user's recipes remain, still attributed to the
/// deleted username.
pub async fn delete_profile(
    State(state): State<AppState>,
    session: WebSessionUser,
    jar: CookieJar,
    incoming_flash: IncomingFlash,
    Path(username): Path<String>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();

    if !session.is_current(&username) {
        return Err(AppError::AuthRedirect);
    }
    let username = username.to_lowercase();

    let mut conn = get_connection(&state.db_pool).await?;

    diesel::delete(users::table.filter(users::username.eq(&username)))
        .execute(&mut conn)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(username = %username, "Profile deleted");

    Ok((
        jar.add(clear_session_cookie()),
        flash.success("Profile deleted"),
        Redirect::to("/register"),
    )
        .into_response())
}
