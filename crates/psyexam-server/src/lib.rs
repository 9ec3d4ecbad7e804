//! psyexam-server
//!
//! The clinical web application: sign-in and approval, patient and exam
//! administration, the doctor's worklist, and exam taking on the kiosk.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use axum::Router;

use state::AppState;

/// Build the full router. Gates are applied per route group.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/logout", post(routes::auth::logout))
        // Kiosk
        .route("/patient/{id}/exams", get(routes::kiosk::pending_exams))
        .route(
            "/exam/{exam_id}/patient/{patient_id}",
            get(routes::kiosk::exam_form).post(routes::kiosk::submit_exam),
        );

    let signed_in = Router::new()
        .route("/auth/session", get(routes::auth::session))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_user,
        ));

    let approved = Router::new()
        .route(
            "/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/patients/{id}",
            get(routes::patients::find_patient).delete(routes::patients::delete_patient),
        )
        .route(
            "/exams",
            get(routes::exams::list_exams).post(routes::exams::create_exam),
        )
        .route("/exams/{id}", delete(routes::exams::delete_exam))
        .route(
            "/exam-sets",
            get(routes::exam_sets::list_exam_sets).post(routes::exam_sets::create_exam_set),
        )
        .route("/exam-sets/{id}", delete(routes::exam_sets::delete_exam_set))
        .route("/exam-sets/{id}/items", post(routes::exam_sets::add_exam))
        .route("/exam-set-items/{id}", delete(routes::exam_sets::remove_item))
        .route("/doctor/patients/{id}", get(routes::doctor::overview))
        .route("/doctor/patients/{id}/stacked", post(routes::doctor::stack_exam))
        .route(
            "/doctor/patients/{id}/stacked/{exam_id}",
            delete(routes::doctor::unstack_exam),
        )
        .route(
            "/doctor/patients/{id}/exam-sets/{exam_set_id}",
            post(routes::doctor::stack_exam_set),
        )
        .route("/doctor/patients/{id}/charts", get(routes::doctor::charts))
        .route(
            "/doctor/patients/{id}/analyses",
            get(routes::doctor::patient_analyses),
        )
        .route(
            "/doctor/results/{id}/analyze",
            post(routes::doctor::analyze_result),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_approved,
        ));

    let admin = Router::new()
        .route(
            "/admin/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/admin/users/{id}", delete(routes::users::delete_user))
        .route("/admin/users/{id}/approval", put(routes::users::set_approval))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        .merge(public)
        .merge(signed_in)
        .merge(approved)
        .merge(admin)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .with_state(state)
}
