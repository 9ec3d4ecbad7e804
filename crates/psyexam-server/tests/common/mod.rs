#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use psyexam_analysis::client::AnalysisClient;
use psyexam_auth::password::hash_password;
use psyexam_auth::session::{CookieSettings, SessionKeys, COOKIE_NAME};
use psyexam_core::models::user::{NewUser, Role};
use psyexam_server::state::AppState;
use psyexam_storage::db::Database;
use psyexam_storage::users;

/// Nothing listens here, so every scoring call fails to connect.
pub const UNREACHABLE_ANALYZER: &str = "http://127.0.0.1:9";

pub const PASSWORD: &str = "s3cure-password";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub exams_dir: TempDir,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Three-question definition with answers 0..=3.
pub fn short_definition() -> Value {
    json!({
        "title": "Short screen",
        "instruction": "Answer each question.",
        "questions": [
            { "text": "Little interest or pleasure" },
            { "text": "Feeling down" },
            { "text": "Trouble sleeping" },
        ],
        "options": [
            { "value": 0, "label": "Not at all" },
            { "value": 1, "label": "Several days" },
            { "value": 2, "label": "More than half the days" },
            { "value": 3, "label": "Nearly every day" },
        ],
    })
}

pub fn test_app(analyzer_url: &str) -> TestApp {
    test_app_with_db(Arc::new(Database::open_in_memory().unwrap()), analyzer_url)
}

pub fn test_app_with_db(db: Arc<Database>, analyzer_url: &str) -> TestApp {
    let exams_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        exams_dir.path().join("PHQ-9.json"),
        serde_json::to_vec(&short_definition()).unwrap(),
    )
    .unwrap();

    let state = AppState {
        db,
        sessions: SessionKeys::new(b"test-secret"),
        cookies: CookieSettings::default(),
        analysis: AnalysisClient::new(analyzer_url, 5).unwrap(),
        exams_dir: exams_dir.path().to_path_buf(),
    };
    TestApp {
        app: psyexam_server::app(state.clone()),
        state,
        exams_dir,
    }
}

impl TestApp {
    /// Create an account and return a `Cookie` header value for its session.
    pub fn sign_in(&self, username: &str, role: Role, approved: bool) -> String {
        let user = {
            let conn = self.state.db.conn().unwrap();
            users::create_user(
                &conn,
                &NewUser {
                    username: username.to_string(),
                    email: Some(format!("{username}@clinic.example")),
                    full_name: Some(username.to_string()),
                    password_hash: hash_password(PASSWORD).unwrap(),
                    role,
                    is_approved: approved,
                },
            )
            .unwrap()
        };
        let token = self.state.sessions.issue(user.id).unwrap();
        format!("{COOKIE_NAME}={token}")
    }

    pub fn doctor(&self) -> String {
        self.sign_in("doctor", Role::Doctor, true)
    }

    pub fn admin(&self) -> String {
        self.sign_in("chief", Role::Admin, true)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Reply {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: &str) -> Reply {
        self.send(Method::GET, uri, Some(cookie), None).await
    }

    pub async fn post(&self, uri: &str, cookie: &str, body: Value) -> Reply {
        self.send(Method::POST, uri, Some(cookie), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: &str) -> Reply {
        self.send(Method::DELETE, uri, Some(cookie), None).await
    }

    pub async fn create_patient(&self, cookie: &str, id: i64) {
        let reply = self
            .post(
                "/patients",
                cookie,
                json!({ "id": id, "initial": "AB", "birthdate": "1980-05-17", "sex": 1 }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    }

    pub async fn create_exam(&self, cookie: &str, name: &str) -> i64 {
        let reply = self
            .post("/exams", cookie, json!({ "name": name, "cutoff": 5 }))
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
        reply.body["id"].as_i64().unwrap()
    }
}

/// The session cookie (name=value) set by a response.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(COOKIE_NAME))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
