/// Forkful - Authentication handlers.
///
/// Registration, login and logout. Failures surface as flash messages plus a
/// redirect; unknown-user and wrong-password are indistinguishable to the
/// client.
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use validator::Validate;

use crate::db::get_connection;
use crate::error::{AppError, AppResult};
use crate::handlers::web::{
    optional_user_context, render_html, template_messages, validation_message,
};
use crate::middleware::auth::{build_session_cookie, clear_session_cookie, OptionalSessionUser};
use crate::middleware::flash::{flash_redirect, IncomingFlash};
use crate::models::user::{LoginForm, NewUser, RegisterForm, User};
use crate::schema::users;
use crate::templates::accounts::{LoginTemplate, RegisterTemplate};
use crate::AppState;

/// Registration page (GET /register).
pub async fn register_page(
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
) -> AppResult<Response> {
    let template = RegisterTemplate {
        title: "Register".to_string(),
        user: optional_user_context(&user),
        messages: template_messages(&incoming_flash),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Registration handler (POST /register).
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    incoming_flash: IncomingFlash,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();

    if let Err(errors) = form.validate() {
        return Ok(flash_redirect(
            flash.error(validation_message(&errors)),
            "/register",
        ));
    }

    let username = form.normalized_username();
    let email = form.normalized_email();

    let mut conn = get_connection(&state.db_pool).await?;

    // Usernames are stored lowercased, so this check is case-insensitive.
    let existing: Option<i32> = users::table
        .filter(users::username.eq(&username))
        .select(users::id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(AppError::Database)?;

    if existing.is_some() {
        return Ok(flash_redirect(
            flash.error("Username already exists"),
            "/register",
        ));
    }

    let password_hash = state.auth_service.hash_password(&form.password)?;
    let new_user = NewUser {
        username: username.clone(),
        email,
        password_hash,
        user_img: form.user_img.clone().filter(|s| !s.trim().is_empty()),
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .execute(&mut conn)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(username = %username, "New user registered");

    let token = state.auth_service.generate_session_token(&username)?;
    let cookie = build_session_cookie(token, state.config.session.lifetime_minutes);

    Ok((
        jar.add(cookie),
        flash.success("Welcome, food lover!"),
        Redirect::to(&format!("/profile/{}", username)),
    )
        .into_response())
}

/// Login page (GET /login).
pub async fn login_page(
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
) -> AppResult<Response> {
    let template = LoginTemplate {
        title: "Log in".to_string(),
        user: optional_user_context(&user),
        messages: template_messages(&incoming_flash),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Login handler (POST /login).
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    incoming_flash: IncomingFlash,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();
    let username = form.username.to_lowercase();

    let mut conn = get_connection(&state.db_pool).await?;

    let user: Option<User> = users::table
        .filter(users::username.eq(&username))
        .first(&mut conn)
        .await
        .optional()
        .map_err(AppError::Database)?;

    // Unknown user and wrong password yield the same message so the login
    // form cannot be used to enumerate accounts.
    let user = match user {
        Some(u) => u,
        None => {
            return Ok(flash_redirect(
                flash.error("Incorrect username and/or password"),
                "/login",
            ));
        }
    };

    if !state
        .auth_service
        .verify_password(&form.password, &user.password_hash)?
    {
        return Ok(flash_redirect(
            flash.error("Incorrect username and/or password"),
            "/login",
        ));
    }

    tracing::info!(username = %username, "User logged in");

    let token = state.auth_service.generate_session_token(&username)?;
    let cookie = build_session_cookie(token, state.config.session.lifetime_minutes);

    Ok((
        jar.add(cookie),
        flash.success(format!("Welcome, {}", user.username)),
        Redirect::to(&format!("/profile/{}", username)),
    )
        .into_response())
}

/// Logout handler (GET /logout). Destroys the session cookie.
pub async fn logout(jar: CookieJar, incoming_flash: IncomingFlash) -> Response {
    let flash = incoming_flash.flash();

    (
        jar.add(clear_session_cookie()),
        flash.info("See you soon, chef!"),
        Redirect::to("/login"),
    )
        .into_response()
}

// Login, logout and registration flows are exercised end-to-end by the
// router-level tests in tests/web_routes.rs.
