use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use psyexam_auth::gate::{self, Access};
use psyexam_auth::session::token_from_cookie_header;
use psyexam_core::models::user::User;
use psyexam_storage::users;

use crate::error::ApiError;
use crate::middleware::audit::AuditUser;
use crate::state::AppState;

/// The signed-in user, inserted into request extensions by the gates.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Resolve the session cookie to a user. Anything short of a valid token
/// for an existing user counts as no session.
pub fn session_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, ApiError> {
    let Some(token) = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(token_from_cookie_header)
    else {
        return Ok(None);
    };

    let claims = match state.sessions.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "session cookie rejected");
            return Ok(None);
        }
    };

    let conn = state.db.conn()?;
    Ok(users::get_user(&conn, claims.sub)?)
}

async fn gate(state: AppState, access: Access, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user = session_user(&state, req.headers())?;
    gate::check(user.as_ref(), access)?;
    let user_id = user.as_ref().map(|user| user.id);
    if let Some(user) = user {
        req.extensions_mut().insert(AuthUser(user));
    }
    let mut response = next.run(req).await;
    if let Some(id) = user_id {
        response.extensions_mut().insert(AuditUser(id));
    }
    Ok(response)
}

pub async fn require_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, Access::User, req, next).await
}

pub async fn require_approved(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, Access::Approved, req, next).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, Access::Admin, req, next).await
}
