use psyexam_auth::password::hash_password;
use psyexam_core::models::user::{NewUser, Role};
use psyexam_storage::db::Database;
use psyexam_storage::users;

pub const ADMIN_USERNAME: &str = "admin";

const ADMIN_EMAIL: &str = "admin@example.com";

/// Create the initial administrator unless an `admin` account exists.
/// Returns whether an account was created.
pub fn seed_admin(db: &Database, password: &str) -> eyre::Result<bool> {
    let conn = db.conn()?;
    if users::find_by_username(&conn, ADMIN_USERNAME)?.is_some() {
        tracing::info!("admin account present, skipping seed");
        return Ok(false);
    }

    users::create_user(
        &conn,
        &NewUser {
            username: ADMIN_USERNAME.to_string(),
            email: Some(ADMIN_EMAIL.to_string()),
            full_name: Some("Administrator".to_string()),
            password_hash: hash_password(password)?,
            role: Role::Admin,
            is_approved: true,
        },
    )?;
    tracing::info!("admin account created");
    Ok(true)
}
