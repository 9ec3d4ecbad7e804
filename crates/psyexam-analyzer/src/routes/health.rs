use axum::Json;
use serde_json::{json, Value};

pub async fn banner() -> Json<Value> {
    Json(json!({ "message": "psyexam analysis service" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
