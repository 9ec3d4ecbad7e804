use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Id of the signed-in account that made a request. The session gates put
/// it on the response so the audit log can attribute the access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuditUser(pub i64);

/// Logs every request as a structured `api_request` event, with the acting
/// user when a gate resolved one.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let user_id = response.extensions().get::<AuditUser>().map(|user| user.0);
    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        user_id,
        "api_request"
    );

    response
}
