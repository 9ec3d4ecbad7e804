use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};
use serde::Serialize;

use psyexam_auth::error::AuthError;
use psyexam_auth::password::{hash_password, verify_login};
use psyexam_auth::registration::{LoginForm, RegistrationForm};
use psyexam_core::models::user::{NewUser, User};
use psyexam_core::paths;
use psyexam_storage::users;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SignedIn {
    user: User,
    next: &'static str,
}

#[derive(Serialize)]
pub struct SessionStatus {
    user: User,
    redirect_to: Option<&'static str>,
}

fn landing(user: &User) -> &'static str {
    if user.is_approved {
        paths::INDEX_DOCTOR
    } else {
        paths::WAITING_APPROVAL
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    form.validate()?;

    let found = {
        let conn = state.db.conn()?;
        users::find_credentials(&conn, form.username.trim())?
    };
    let (user, hash) = found.unzip();
    let password = form.password;
    let verified =
        tokio::task::spawn_blocking(move || verify_login(&password, hash.as_deref())).await?;
    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::info!("login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = state.sessions.issue(user.id)?;
    tracing::info!(user_id = user.id, "user signed in");
    let next = landing(&user);
    Ok((
        AppendHeaders([(SET_COOKIE, state.cookies.session_cookie(&token))]),
        Json(SignedIn { user, next }),
    ))
}

/// Self-registration. New accounts wait for administrator approval.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<impl IntoResponse, ApiError> {
    let valid = form.validate()?;
    let password = valid.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let user = {
        let conn = state.db.conn()?;
        users::create_user(
            &conn,
            &NewUser {
                username: valid.username,
                email: Some(valid.email),
                full_name: Some(valid.full_name),
                password_hash,
                role: valid.role,
                is_approved: false,
            },
        )?
    };

    let token = state.sessions.issue(user.id)?;
    Ok((
        AppendHeaders([(SET_COOKIE, state.cookies.session_cookie(&token))]),
        Json(SignedIn {
            user,
            next: paths::WAITING_APPROVAL,
        }),
    ))
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, state.cookies.clear_cookie())]),
        Json(serde_json::json!({ "next": paths::LOGIN })),
    )
}

/// Who is signed in, and where an approved user should go next.
pub async fn session(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<SessionStatus> {
    let redirect_to = user.is_approved.then_some(paths::INDEX_DOCTOR);
    Json(SessionStatus { user, redirect_to })
}
