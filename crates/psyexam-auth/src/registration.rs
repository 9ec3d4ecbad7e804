//! Sign-up and sign-in form checks. Every failing field is reported at once,
//! keyed by field name.

use std::collections::BTreeMap;

use serde::Deserialize;

use psyexam_core::models::user::Role;

use crate::error::AuthError;

pub const MIN_USERNAME_LEN: usize = 3;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut errors = BTreeMap::new();
        if self.username.trim().is_empty() {
            errors.insert("username".to_string(), "username is required".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password".to_string(), "password is required".to_string());
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub user_type: String,
}

/// A registration that passed every field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<ValidRegistration, AuthError> {
        let mut errors = BTreeMap::new();
        let username = self.username.trim();
        let email = self.email.trim();
        let full_name = self.full_name.trim();

        if username.chars().count() < MIN_USERNAME_LEN {
            errors.insert(
                "username".to_string(),
                format!("username must be at least {MIN_USERNAME_LEN} characters"),
            );
        }
        if !email.contains('@') {
            errors.insert("email".to_string(), "enter a valid email address".to_string());
        }
        if let Err(message) = check_password(&self.password) {
            errors.insert("password".to_string(), message);
        }
        if self.confirm_password != self.password {
            errors.insert(
                "confirm_password".to_string(),
                "passwords do not match".to_string(),
            );
        }
        if full_name.is_empty() {
            errors.insert("full_name".to_string(), "full name is required".to_string());
        }
        let role = self.user_type.parse::<Role>();
        if role.is_err() {
            errors.insert(
                "user_type".to_string(),
                "choose doctor or admin".to_string(),
            );
        }

        finish(errors)?;
        Ok(ValidRegistration {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            full_name: full_name.to_string(),
            role: role.unwrap_or(Role::Doctor),
        })
    }
}

/// Password policy shared by self-registration and admin-created accounts.
pub fn check_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Errors for a single field.
pub fn field_error(field: &str, message: impl Into<String>) -> AuthError {
    AuthError::Validation(BTreeMap::from([(field.to_string(), message.into())]))
}

fn finish(errors: BTreeMap<String, String>) -> Result<(), AuthError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(errors))
    }
}
