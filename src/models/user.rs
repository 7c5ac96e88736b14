/// Forkful - User model.
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::users;

/// User database model.
///
/// `username` and `email` are stored lowercased; registration and login
/// normalize their input before touching the table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub user_img: Option<String>,
}

/// Registration form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub user_img: Option<String>,
}

impl RegisterForm {
    /// Username as stored: lowercased.
    pub fn normalized_username(&self) -> String {
        self.username.to_lowercase()
    }

    /// Email as stored: lowercased.
    pub fn normalized_email(&self) -> String {
        self.email.to_lowercase()
    }
}

/// Login form.
///
/// No length rules here: a mistyped short password must fail with the same
/// generic message as a wrong one.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Profile edit form. Username is immutable; an empty password field keeps
/// the current one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileEditForm {
    #[validate(email)]
    pub email: String,
    pub password: Option<String>,
    pub user_img: Option<String>,
}

impl ProfileEditForm {
    /// The new password, if the user typed one.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Normalize the optional image reference: empty string means none.
    pub fn normalized_img(&self) -> Option<String> {
        self.user_img.clone().filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register_form() -> RegisterForm {
        RegisterForm {
            username: "Chef".to_string(),
            email: "Chef@Example.com".to_string(),
            password: "super-secret".to_string(),
            user_img: None,
        }
    }

    // ==================== RegisterForm Tests ====================

    #[test]
    fn test_register_form_valid() {
        let form = valid_register_form();
        assert_ok!(form.validate());
    }

    #[test]
    fn test_register_form_short_username_rejected() {
        let mut form = valid_register_form();
        form.username = "ab".to_string();
        assert_err!(form.validate());
    }

    #[test]
    fn test_register_form_long_username_rejected() {
        let mut form = valid_register_form();
        form.username = "a".repeat(51);
        assert_err!(form.validate());
    }

    #[test]
    fn test_register_form_bad_email_rejected() {
        let mut form = valid_register_form();
        form.email = "not-an-email".to_string();
        assert_err!(form.validate());
    }

    #[test]
    fn test_register_form_short_password_rejected() {
        let mut form = valid_register_form();
        form.password = "short".to_string();
        assert_err!(form.validate());
    }

    #[test]
    fn test_register_form_normalizes_username_lowercase() {
        let form = valid_register_form();
        assert_eq!(form.normalized_username(), "chef");
    }

    #[test]
    fn test_register_form_normalizes_email_lowercase() {
        let form = valid_register_form();
        assert_eq!(form.normalized_email(), "chef@example.com");
    }

    // ==================== LoginForm Tests ====================

    #[test]
    fn test_login_form_debug_redacts_password() {
        let form = LoginForm {
            username: "chef".to_string(),
            password: "super-secret".to_string(),
        };
        let debug_str = format!("{:?}", form);
        assert!(debug_str.contains("chef"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("super-secret"));
    }

    // ==================== ProfileEditForm Tests ====================

    #[test]
    fn test_profile_edit_form_valid() {
        let form = ProfileEditForm {
            email: "chef@example.com".to_string(),
            password: None,
            user_img: None,
        };
        assert_ok!(form.validate());
    }

    #[test]
    fn test_profile_edit_form_bad_email_rejected() {
        let form = ProfileEditForm {
            email: "nope".to_string(),
            password: None,
            user_img: None,
        };
        assert_err!(form.validate());
    }

    #[test]
    fn test_profile_edit_form_empty_password_is_no_change() {
        let form = ProfileEditForm {
            email: "chef@example.com".to_string(),
            password: Some("".to_string()),
            user_img: None,
        };
        assert!(form.new_password().is_none());
    }

    #[test]
    fn test_profile_edit_form_new_password_detected() {
        let form = ProfileEditForm {
            email: "chef@example.com".to_string(),
            password: Some("fresh-password".to_string()),
            user_img: None,
        };
        assert_eq!(form.new_password(), Some("fresh-password"));
    }

    #[test]
    fn test_profile_edit_form_blank_img_is_none() {
        let form = ProfileEditForm {
            email: "chef@example.com".to_string(),
            password: None,
            user_img: Some("   ".to_string()),
        };
        assert!(form.normalized_img().is_none());
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_user_serialize_skips_password_hash() {
        let user = User {
            id: 1,
            username: "chef".to_string(),
            email: "chef@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            user_img: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = unwrap_ok!(serde_json::to_string(&user));
        assert!(json.contains("chef"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}
