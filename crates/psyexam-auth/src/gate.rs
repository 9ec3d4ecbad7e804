//! Access levels for clinical routes. Each level includes the previous one.

use psyexam_core::models::user::User;
use psyexam_core::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in user.
    User,
    /// Signed in and approved by an administrator.
    Approved,
    /// Approved administrator.
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denied {
    #[error("login required")]
    LoginRequired,

    #[error("account is waiting for administrator approval")]
    ApprovalPending,

    #[error("administrator access required")]
    AdminRequired,
}

impl Denied {
    pub fn code(&self) -> &'static str {
        match self {
            Denied::LoginRequired => "login_required",
            Denied::ApprovalPending => "approval_pending",
            Denied::AdminRequired => "admin_required",
        }
    }

    /// Page the browser should be sent to.
    pub fn redirect_to(&self) -> &'static str {
        match self {
            Denied::LoginRequired => paths::LOGIN,
            Denied::ApprovalPending => paths::WAITING_APPROVAL,
            Denied::AdminRequired => paths::UNAUTHORIZED,
        }
    }
}

/// Decide whether `user` (the session's user, if any) may proceed.
pub fn check(user: Option<&User>, required: Access) -> Result<(), Denied> {
    let user = user.ok_or(Denied::LoginRequired)?;
    if required == Access::User {
        return Ok(());
    }
    if !user.is_approved {
        return Err(Denied::ApprovalPending);
    }
    if required == Access::Admin && !user.is_admin() {
        return Err(Denied::AdminRequired);
    }
    Ok(())
}
