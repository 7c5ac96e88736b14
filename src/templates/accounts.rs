/// Forkful - Account page templates: register, login, profile, edit profile.
use askama::Template;

use crate::templates::base::{FlashMessage, RecipeCard, UserContext};

#[derive(Template)]
#[template(path = "accounts/register.html")]
pub struct RegisterTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "accounts/login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
}

/// Profile owner details shown in the sidebar of the profile page.
#[derive(Debug, Clone)]
pub struct ProfileDetail {
    pub username: String,
    pub email: String,
    pub user_img: Option<String>,
}

/// Pagination data for the profile recipe grid.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn previous_page(&self) -> i64 {
        self.current_page - 1
    }

    pub fn next_page(&self) -> i64 {
        self.current_page + 1
    }
}

#[derive(Template)]
#[template(path = "accounts/profile.html")]
pub struct ProfileTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
    pub profile: ProfileDetail,
    pub recipes: Vec<RecipeCard>,
    pub pagination: Option<Pagination>,
}

#[derive(Template)]
#[template(path = "accounts/edit_profile.html")]
pub struct EditProfileTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
    pub profile: ProfileDetail,
}
