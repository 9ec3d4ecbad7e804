use std::env;
use std::path::PathBuf;

use psyexam_auth::session::CookieSettings;

const DEV_SESSION_SECRET: &str = "psyexam-development-secret";

/// Server settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub database_path: PathBuf,
    pub exams_dir: PathBuf,
    pub session_secret: String,
    pub cookie: CookieSettings,
    pub analyzer_url: String,
    /// When set, an `admin` account is created on first start.
    pub admin_password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("SESSION_SECRET not set, using the development secret");
                DEV_SESSION_SECRET.to_string()
            }
        };

        Self {
            bind: var_or("PSYEXAM_BIND", "0.0.0.0:3010"),
            database_path: var_or("PSYEXAM_DATABASE", "psyexam.db").into(),
            exams_dir: var_or("PSYEXAM_EXAMS_DIR", "exams").into(),
            session_secret,
            cookie: CookieSettings {
                domain: env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty()),
                secure: env::var("COOKIE_SECURE")
                    .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(false),
            },
            analyzer_url: var_or("ANALYZER_URL", "http://localhost:8110"),
            admin_password: env::var("PSYEXAM_ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
