//! Account administration. Every route here sits behind the admin gate.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use psyexam_auth::password::hash_password;
use psyexam_auth::registration::check_password;
use psyexam_core::models::user::{NewUser, Role, User};
use psyexam_storage::users;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    role: Option<String>,
}

#[derive(Deserialize)]
pub struct ApprovalForm {
    approved: bool,
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let conn = state.db.conn()?;
    Ok(Json(users::list_users(&conn)?))
}

/// Accounts created by an administrator are approved immediately.
pub async fn create_user(
    State(state): State<AppState>,
    Json(form): Json<CreateUserForm>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let username = form.username.trim();
    let mut errors = BTreeMap::new();
    if username.is_empty() {
        errors.insert("username".to_string(), "username is required".to_string());
    }
    if form.password.is_empty() {
        errors.insert("password".to_string(), "password is required".to_string());
    } else if let Err(message) = check_password(&form.password) {
        errors.insert("password".to_string(), message);
    }
    let role = match form.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        None => Role::Doctor,
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                errors.insert("role".to_string(), "choose doctor or admin".to_string());
                Role::Doctor
            }
        },
    };
    if !errors.is_empty() {
        return Err(ApiError::Fields(errors));
    }

    let password = form.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
    let conn = state.db.conn()?;
    let user = users::create_user(
        &conn,
        &NewUser {
            username: username.to_string(),
            email: None,
            full_name: None,
            password_hash,
            role,
            is_approved: true,
        },
    )?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = state.db.conn()?;
    if !users::delete_user(&conn, id)? {
        return Err(ApiError::NotFound("user not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_approval(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<ApprovalForm>,
) -> Result<Json<User>, ApiError> {
    let conn = state.db.conn()?;
    if !users::set_approval(&conn, id, form.approved)? {
        return Err(ApiError::NotFound("user not found".to_string()));
    }
    let user = users::get_user(&conn, id)?.ok_or(ApiError::NotFound("user not found".to_string()))?;
    Ok(Json(user))
}
