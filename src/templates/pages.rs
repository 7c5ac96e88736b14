/// Forkful - Static page templates.
use askama::Template;

use crate::templates::base::{FlashMessage, UserContext};

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "pages/articles.html")]
pub struct ArticlesTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
}

/// Error page rendered by `AppError::into_response`.
#[derive(Template)]
#[template(path = "pages/error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub user: Option<UserContext>,
    pub messages: Vec<FlashMessage>,
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_template_renders() {
        let template = HomeTemplate {
            title: "Home".to_string(),
            user: None,
            messages: Vec::new(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("Forkful"));
    }

    #[test]
    fn test_home_template_shows_user_nav() {
        let template = HomeTemplate {
            title: "Home".to_string(),
            user: Some(UserContext {
                username: "chef".to_string(),
            }),
            messages: Vec::new(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("chef"));
        assert!(html.contains("/logout"));
    }

    #[test]
    fn test_articles_template_renders() {
        let template = ArticlesTemplate {
            title: "Articles".to_string(),
            user: None,
            messages: Vec::new(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("Articles"));
    }

    #[test]
    fn test_error_template_renders_status_and_message() {
        let template = ErrorTemplate {
            title: "404".to_string(),
            user: None,
            messages: Vec::new(),
            status: 404,
            message: "Recipe not found".to_string(),
        };
        let html = unwrap_ok!(template.render());
        assert!(html.contains("404"));
        assert!(html.contains("Recipe not found"));
    }

    #[test]
    fn test_error_template_escapes_message() {
        let template = ErrorTemplate {
            title: "400".to_string(),
            user: None,
            messages: Vec::new(),
            status: 400,
            message: "<script>alert(1)</script>".to_string(),
        };
        let html = unwrap_ok!(template.render());
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
