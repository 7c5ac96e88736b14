/// Forkful - Recipe model.
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::recipes;

/// Recipe database model.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub difficulty: String,
    pub description: String,
    pub ingredients: String,
    pub preparation: String,
    pub recipe_img: Option<String>,
    /// Username of the creating user; the ownership key for edit and delete.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// True if `username` (already lowercased by the session layer) owns
    /// this recipe.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.created_by == username
    }
}

/// New recipe for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub struct NewRecipe {
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub difficulty: String,
    pub description: String,
    pub ingredients: String,
    pub preparation: String,
    pub recipe_img: Option<String>,
    pub created_by: String,
}

/// Changeset applied on edit. `created_by` is deliberately absent: ownership
/// never transfers on edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub struct RecipeChangeset {
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub difficulty: String,
    pub description: String,
    pub ingredients: String,
    pub preparation: String,
    pub recipe_img: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Recipe create/edit form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 50))]
    pub prep_time: String,
    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub ingredients: String,
    #[validate(length(min = 1))]
    pub preparation: String,
    pub recipe_img: Option<String>,
}

impl RecipeForm {
    /// Normalize the optional image reference: empty string means none.
    pub fn normalized_img(&self) -> Option<String> {
        self.recipe_img.clone().filter(|s| !s.trim().is_empty())
    }

    /// Build an insertable row owned by `created_by`.
    pub fn into_new_recipe(self, created_by: String) -> NewRecipe {
        let recipe_img = self.normalized_img();
        NewRecipe {
            name: self.name,
            category: self.category,
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            description: self.description,
            ingredients: self.ingredients,
            preparation: self.preparation,
            recipe_img,
            created_by,
        }
    }

    /// Build the edit changeset. Ownership is not part of it.
    pub fn into_changeset(self) -> RecipeChangeset {
        let recipe_img = self.normalized_img();
        RecipeChangeset {
            name: self.name,
            category: self.category,
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            description: self.description,
            ingredients: self.ingredients,
            preparation: self.preparation,
            recipe_img,
            updated_at: Utc::now(),
        }
    }
}
