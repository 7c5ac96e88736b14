/// Forkful - Recipe page templates: listing, detail, create and edit forms.
use askama::Template;

use crate::templates::base::{FlashMessage, RecipeCard, UserContext};

/// Full recipe view for the detail and edit pages.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub difficulty: String,
    pub description: String,
    pub ingredients: String,
    pub preparation: String,
    pub recipe_img: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Template)]
#[template(path = "recipes/list.html")]
pub struct RecipeListTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
    /// Heading above the grid: "All recipes", a category name, or a search
    /// summary.
    pub heading: String,
    pub recipes: Vec<RecipeCard>,
}

#[derive(Template)]
#[template(path = "recipes/detail.html")]
pub struct RecipeDetailTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
    pub recipe: RecipeView,
    /// Owner sees edit/delete controls.
    pub is_owner: bool,
}

#[derive(Template)]
#[template(path = "recipes/new.html")]
pub struct RecipeNewTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "recipes/edit.html")]
pub struct RecipeEditTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
    pub recipe: RecipeView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> RecipeView {
        RecipeView {
            id: 3,
            name: "Ratatouille".to_string(),
            category: "Vegetarian".to_string(),
            prep_time: "50 minutes".to_string(),
            difficulty: "Medium".to_string(),
            description: "Provençal stewed vegetables.".to_string(),
            ingredients: "Aubergine, courgette, peppers, tomatoes".to_string(),
            preparation: "Slice vegetables. Layer. Bake.".to_string(),
            recipe_img: None,
            created_by: "chef".to_string(),
            created_at: "Jul 01, 2026".to_string(),
        }
    }

    fn sample_card() -> RecipeCard {
        RecipeCard {
            id: 3,
            name: "Ratatouille".to_string(),
            category: "Vegetarian".to_string(),
            prep_time: "50 minutes".to_string(),
            difficulty: "Medium".to_string(),
            created_by: "chef".to_string(),
            recipe_img: None,
        }
    }

    // ==================== Listing Tests ====================

    #[test]
    fn test_list_template_renders_cards() {
        let template = RecipeListTemplate {
            title: "Recipes".to_string(),
            user: None,
            messages: Vec::new(),
            heading: "All recipes".to_string(),
            recipes: vec![sample_card()],
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("Ratatouille"));
        assert!(html.contains("/recipe/3"));
        assert!(html.contains("All recipes"));
    }

    #[test]
    fn test_list_template_empty_state() {
        let template = RecipeListTemplate {
            title: "Recipes".to_string(),
            user: None,
            messages: Vec::new(),
            heading: "All recipes".to_string(),
            recipes: Vec::new(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("No recipes"));
    }

    #[test]
    fn test_list_template_escapes_recipe_name() {
        let mut card = sample_card();
        card.name = "<script>alert(1)</script>".to_string();
        let template = RecipeListTemplate {
            title: "Recipes".to_string(),
            user: None,
            messages: Vec::new(),
            heading: "All recipes".to_string(),
            recipes: vec![card],
        };
        let html = unwrap_ok!(template.render());
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    // ==================== Detail Tests ====================

    #[test]
    fn test_detail_template_renders_fields() {
        let template = RecipeDetailTemplate {
            title: "Ratatouille".to_string(),
            user: None,
            messages: Vec::new(),
            recipe: sample_view(),
            is_owner: false,
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("Ratatouille"));
        assert!(html.contains("Aubergine"));
        assert!(html.contains("chef"));
    }

    #[test]
    fn test_detail_template_owner_sees_controls() {
        let template = RecipeDetailTemplate {
            title: "Ratatouille".to_string(),
            user: Some(UserContext {
                username: "chef".to_string(),
            }),
            messages: Vec::new(),
            recipe: sample_view(),
            is_owner: true,
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("/edit_recipe/3"));
        assert!(html.contains("/delete_recipe/3"));
    }

    #[test]
    fn test_detail_template_non_owner_has_no_controls() {
        let template = RecipeDetailTemplate {
            title: "Ratatouille".to_string(),
            user: None,
            messages: Vec::new(),
            recipe: sample_view(),
            is_owner: false,
        };
        let html = unwrap_ok!(template.render());
        assert!(!html.contains("/edit_recipe/3"));
        assert!(!html.contains("/delete_recipe/3"));
    }

    // ==================== Form Tests ====================

    #[test]
    fn test_new_template_renders_form() {
        let template = RecipeNewTemplate {
            title: "Share a recipe".to_string(),
            user: Some(UserContext {
                username: "chef".to_string(),
            }),
            messages: Vec::new(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("/add_recipe"));
        assert!(html.contains("ingredients"));
    }

    #[test]
    fn test_edit_template_prefills_fields() {
        let template = RecipeEditTemplate {
            title: "Edit recipe".to_string(),
            user: Some(UserContext {
                username: "chef".to_string(),
            }),
            messages: Vec::new(),
            recipe: sample_view(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("/edit_recipe/3"));
        assert!(html.contains("Ratatouille"));
        assert!(html.contains("50 minutes"));
    }
}
