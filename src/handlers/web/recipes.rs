/// Recipe page handlers: listing, search, detail, create, edit, delete.
use super::*;

use crate::db::like_contains;
use crate::schema::recipes;
use crate::templates::recipes::{
    RecipeDetailTemplate, RecipeEditTemplate, RecipeListTemplate, RecipeNewTemplate, RecipeView,
};
use validator::Validate;

/// Full recipe view for the detail and edit pages.
fn recipe_view(recipe: &Recipe) -> RecipeView {
    RecipeView {
        id: recipe.id,
        name: recipe.name.clone(),
        category: recipe.category.clone(),
        prep_time: recipe.prep_time.clone(),
        difficulty: recipe.difficulty.clone(),
        description: recipe.description.clone(),
        ingredients: recipe.ingredients.clone(),
        preparation: recipe.preparation.clone(),
        recipe_img: recipe.recipe_img.clone(),
        created_by: recipe.created_by.clone(),
        created_at: recipe.created_at.format("%b %d, %Y").to_string(),
    }
}

/// Load a recipe or fail with NotFound.
async fn load_recipe(state: &AppState, recipe_id: i32) -> AppResult<Recipe> {
    let mut conn = get_connection(&state.db_pool).await?;

    recipes::table
        .find(recipe_id)
        .first::<Recipe>(&mut conn)
        .await
        .optional()
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} does not exist", recipe_id)))
}

/// Render the shared listing view.
fn render_listing(
    heading: String,
    rows: Vec<Recipe>,
    user: &OptionalSessionUser,
    incoming_flash: &IncomingFlash,
) -> AppResult<Response> {
    let template = RecipeListTemplate {
        title: "Recipes".to_string(),
        user: optional_user_context(user),
        messages: template_messages(incoming_flash),
        heading,
        recipes: rows.iter().map(recipe_card).collect(),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// All recipes, newest first (GET /get_recipes/).
pub async fn recipe_list(
    State(state): State<AppState>,
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
) -> AppResult<Response> {
    let mut conn = get_connection(&state.db_pool).await?;

    let rows: Vec<Recipe> = recipes::table
        .order(recipes::created_at.desc())
        .load(&mut conn)
        .await
        .map_err(AppError::Database)?;

    render_listing("All recipes".to_string(), rows, &user, &incoming_flash)
}

/// Recipes in one category (GET|POST /search_recipes/{category}).
pub async fn search_recipes(
    State(state): State<AppState>,
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
    Path(category): Path<String>,
) -> AppResult<Response> {
    let mut conn = get_connection(&state.db_pool).await?;

    let rows: Vec<Recipe> = recipes::table
        .filter(recipes::category.eq(&category))
        .order(recipes::created_at.desc())
        .load(&mut conn)
        .await
        .map_err(AppError::Database)?;

    render_listing(format!("{} recipes", category), rows, &user, &incoming_flash)
}

/// Search form payload. On GET the fields come from the query string.
#[derive(Debug, serde::Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

/// Free-text search across recipe content (GET|POST /search).
pub async fn search(
    State(state): State<AppState>,
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
    Form(form): Form<SearchForm>,
) -> AppResult<Response> {
    let query = form
        .query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    // An empty search is just the full listing.
    let query = match query {
        Some(q) => q,
        None => return Ok(Redirect::to("/get_recipes/").into_response()),
    };

    let mut conn = get_connection(&state.db_pool).await?;

    let pattern = like_contains(&query);
    let rows: Vec<Recipe> = recipes::table
        .filter(
            recipes::name
                .ilike(pattern.clone())
                .or(recipes::category.ilike(pattern.clone()))
                .or(recipes::description.ilike(pattern.clone()))
                .or(recipes::ingredients.ilike(pattern.clone()))
                .or(recipes::preparation.ilike(pattern)),
        )
        .order(recipes::created_at.desc())
        .load(&mut conn)
        .await
        .map_err(AppError::Database)?;

    render_listing(
        format!("Recipes matching \"{}\"", query),
        rows,
        &user,
        &incoming_flash,
    )
}

/// Recipe detail page (GET /recipe/{id}).
pub async fn recipe_detail(
    State(state): State<AppState>,
    user: OptionalSessionUser,
    incoming_flash: IncomingFlash,
    Path(recipe_id): Path<i32>,
) -> AppResult<Response> {
    let recipe = load_recipe(&state, recipe_id).await?;

    let is_owner = user
        .0
        .as_ref()
        .map(|s| recipe.is_owned_by(&s.username))
        .unwrap_or(false);

    let template = RecipeDetailTemplate {
        title: recipe.name.clone(),
        user: optional_user_context(&user),
        messages: template_messages(&incoming_flash),
        recipe: recipe_view(&recipe),
        is_owner,
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Recipe creation form (GET /add_recipe).
pub async fn recipe_new_form(
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
) -> AppResult<Response> {
    let template = RecipeNewTemplate {
        title: "Share a recipe".to_string(),
        user: Some(user_context(&session)),
        messages: template_messages(&incoming_flash),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Create a recipe (POST /add_recipe). `created_by` is always the session
/// user, regardless of anything in the form.
pub async fn create_recipe(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Form(form): Form<RecipeForm>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();

    if let Err(errors) = form.validate() {
        return Ok(flash_redirect(
            flash.error(validation_message(&errors)),
            "/add_recipe",
        ));
    }

    let mut conn = get_connection(&state.db_pool).await?;

    let new_recipe = form.into_new_recipe(session.username.clone());
    diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .execute(&mut conn)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(username = %session.username, recipe = %new_recipe.name, "Recipe shared");

    Ok(flash_redirect(flash.success("Recipe shared!"), "/get_recipes/"))
}

/// Recipe edit form (GET /edit_recipe/{id}). Owner-only.
pub async fn recipe_edit_form(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Path(recipe_id): Path<i32>,
) -> AppResult<Response> {
    let recipe = load_recipe(&state, recipe_id).await?;

    if !recipe.is_owned_by(&session.username) {
        return Err(AppError::AuthRedirect);
    }

    let template = RecipeEditTemplate {
        title: "Edit recipe".to_string(),
        user: Some(user_context(&session)),
        messages: template_messages(&incoming_flash),
        recipe: recipe_view(&recipe),
    };
    render_html(&template, !incoming_flash.is_empty())
}

/// Update a recipe (POST /edit_recipe/{id}). Owner-only; `created_by` is
/// preserved, so editing never transfers ownership.
pub async fn update_recipe(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Path(recipe_id): Path<i32>,
    Form(form): Form<RecipeForm>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();

    let recipe = load_recipe(&state, recipe_id).await?;
    if !recipe.is_owned_by(&session.username) {
        return Err(AppError::AuthRedirect);
    }

    if let Err(errors) = form.validate() {
        return Ok(flash_redirect(
            flash.error(validation_message(&errors)),
            &format!("/edit_recipe/{}", recipe_id),
        ));
    }

    let mut conn = get_connection(&state.db_pool).await?;

    diesel::update(recipes::table.find(recipe_id))
        .set(form.into_changeset())
        .execute(&mut conn)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(username = %session.username, recipe_id, "Recipe updated");

    Ok(flash_redirect(
        flash.success("Recipe updated!"),
        "/get_recipes/",
    ))
}

/// Delete a recipe (GET /delete_recipe/{id}). Owner-only, matching the edit
/// policy.
pub async fn delete_recipe(
    State(state): State<AppState>,
    session: WebSessionUser,
    incoming_flash: IncomingFlash,
    Path(recipe_id): Path<i32>,
) -> AppResult<Response> {
    let flash = incoming_flash.flash();

    let recipe = load_recipe(&state, recipe_id).await?;
    if !recipe.is_owned_by(&session.username) {
        return Err(AppError::AuthRedirect);
    }

    let mut conn = get_connection(&state.db_pool).await?;

    diesel::delete(recipes::table.find(recipe_id))
        .execute(&mut conn)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(username = %session.username, recipe_id, "Recipe deleted");

    Ok(flash_redirect(
        flash.success("Recipe deleted"),
        "/get_recipes/",
    ))
}
