/// Forkful - Shared template types.

/// Flash message for displaying notifications.
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: String, // "success", "error", "info"
    pub message: String,
}

/// Session context for templates.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub username: String,
}

impl UserContext {
    pub fn is_authenticated(&self) -> bool {
        true
    }
}

/// A recipe rendered as a card in listing views.
#[derive(Debug, Clone)]
pub struct RecipeCard {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub prep_time: String,
    pub difficulty: String,
    pub created_by: String,
    pub recipe_img: Option<String>,
}
