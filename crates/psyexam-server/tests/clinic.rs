mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{test_app, UNREACHABLE_ANALYZER};
use psyexam_core::models::user::Role;

#[tokio::test]
async fn patients_are_created_listed_and_looked_up() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    t.create_patient(&cookie, 101).await;
    t.create_patient(&cookie, 102).await;

    let list = t.get("/patients", &cookie).await;
    let ids: Vec<_> = list.body.as_array().unwrap().iter().map(|p| p["id"].clone()).collect();
    assert_eq!(ids, [json!(102), json!(101)]);

    let found = t.get("/patients/101", &cookie).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["patient"]["birthdate"], "1980-05-17");
    assert_eq!(found.body["next"], "/doctor/101");

    assert_eq!(t.get("/patients/999", &cookie).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_patient_id_is_rejected() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    t.create_patient(&cookie, 5).await;

    let reply = t
        .post(
            "/patients",
            &cookie,
            json!({ "id": 5, "initial": "XY", "birthdate": "1990-01-01", "sex": 2 }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "patient id already in use");
}

#[tokio::test]
async fn patient_fields_are_checked() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();

    let long_initial = t
        .post(
            "/patients",
            &cookie,
            json!({ "id": 1, "initial": "ABCDEFGHI", "birthdate": "1990-01-01", "sex": 1 }),
        )
        .await;
    assert_eq!(long_initial.status, StatusCode::BAD_REQUEST);
    assert!(long_initial.body["fields"]["initial"].is_string());

    let bad_date = t
        .post(
            "/patients",
            &cookie,
            json!({ "id": 1, "initial": "AB", "birthdate": "17/05/1980", "sex": 1 }),
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);
    assert!(bad_date.body["fields"]["birthdate"].is_string());
}

#[tokio::test]
async fn deleting_a_patient() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    t.create_patient(&cookie, 7).await;

    assert_eq!(t.delete("/patients/7", &cookie).await.status, StatusCode::NO_CONTENT);
    assert_eq!(t.delete("/patients/7", &cookie).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exam_names_are_required_and_unique() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    let id = t.create_exam(&cookie, "PHQ-9").await;

    let dup = t.post("/exams", &cookie, json!({ "name": "PHQ-9", "cutoff": 1 })).await;
    assert_eq!(dup.status, StatusCode::BAD_REQUEST);
    let blank = t.post("/exams", &cookie, json!({ "name": " ", "cutoff": 1 })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    assert_eq!(t.get("/exams", &cookie).await.body.as_array().unwrap().len(), 1);
    let uri = format!("/exams/{id}");
    assert_eq!(t.delete(&uri, &cookie).await.status, StatusCode::NO_CONTENT);
    assert_eq!(t.delete(&uri, &cookie).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exam_sets_collect_exams_once() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    let sds = t.create_exam(&cookie, "SDS").await;
    t.create_exam(&cookie, "GAD-7").await;

    let set = t
        .post("/exam-sets", &cookie, json!({ "name": "intake", "description": "first visit" }))
        .await;
    assert_eq!(set.status, StatusCode::CREATED);
    let items_uri = format!("/exam-sets/{}/items", set.body["id"]);

    let first = t.post(&items_uri, &cookie, json!({ "exam_id": sds })).await;
    assert_eq!(first.body["added"], true);
    let second = t.post(&items_uri, &cookie, json!({ "exam_id": sds })).await;
    assert_eq!(second.body["added"], false);
    let unknown = t.post(&items_uri, &cookie, json!({ "exam_id": 999 })).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let overview = t.get("/exam-sets", &cookie).await;
    let sets = overview.body["exam_sets"].as_array().unwrap();
    assert_eq!(sets.len(), 1);
    let items = sets[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["exam"]["name"], "SDS");
    let names: Vec<_> = overview.body["exams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["GAD-7", "SDS"]);

    let item_uri = format!("/exam-set-items/{}", items[0]["id"]);
    assert_eq!(t.delete(&item_uri, &cookie).await.status, StatusCode::NO_CONTENT);
    assert_eq!(t.delete(&item_uri, &cookie).await.status, StatusCode::NOT_FOUND);
    let set_uri = format!("/exam-sets/{}", set.body["id"]);
    assert_eq!(t.delete(&set_uri, &cookie).await.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn exam_set_name_is_required() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    let reply = t.post("/exam-sets", &cookie, json!({ "description": "no name" })).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["fields"]["name"].is_string());
}

#[tokio::test]
async fn user_administration_is_admin_only() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let doctor = t.doctor();
    let reply = t.get("/admin/users", &doctor).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["code"], "admin_required");
    assert_eq!(reply.body["redirect_to"], "/unauthorized");

    let pending_admin = t.sign_in("newadmin", Role::Admin, false);
    let reply = t.get("/admin/users", &pending_admin).await;
    assert_eq!(reply.body["code"], "approval_pending");
}

#[tokio::test]
async fn admins_manage_accounts() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let admin = t.admin();
    let pending = t.sign_in("waiting", Role::Doctor, false);

    let created = t
        .post("/admin/users", &admin, json!({ "username": "nurse1", "password": "long enough" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["role"], "doctor");
    assert_eq!(created.body["is_approved"], true);

    let list = t.get("/admin/users", &admin).await;
    let users = list.body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["username"], "nurse1");
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let waiting_id = users.iter().find(|u| u["username"] == "waiting").unwrap()["id"].clone();
    let approval = t
        .send(
            Method::PUT,
            &format!("/admin/users/{waiting_id}/approval"),
            Some(&admin),
            Some(json!({ "approved": true })),
        )
        .await;
    assert_eq!(approval.status, StatusCode::OK);
    assert_eq!(approval.body["is_approved"], true);
    assert_eq!(t.get("/patients", &pending).await.status, StatusCode::OK);

    let missing = t
        .send(
            Method::PUT,
            "/admin/users/9999/approval",
            Some(&admin),
            Some(json!({ "approved": true })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let uri = format!("/admin/users/{}", created.body["id"]);
    assert_eq!(t.delete(&uri, &admin).await.status, StatusCode::NO_CONTENT);
    assert_eq!(t.delete(&uri, &admin).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_created_users_need_a_real_password() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let admin = t.admin();

    let reply = t
        .post("/admin/users", &admin, json!({ "username": "", "password": "short", "role": "janitor" }))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let fields = reply.body["fields"].as_object().unwrap();
    assert!(fields.contains_key("username"));
    assert!(fields.contains_key("password"));
    assert!(fields.contains_key("role"));

    let admin_role = t
        .post(
            "/admin/users",
            &admin,
            json!({ "username": "boss", "password": "long enough", "role": "ADMIN" }),
        )
        .await;
    assert_eq!(admin_role.body["role"], "admin");
}
