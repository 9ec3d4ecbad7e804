mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{test_app, UNREACHABLE_ANALYZER};

fn exam_ids(list: &serde_json::Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn overview_splits_stacked_and_available_exams() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    t.create_patient(&cookie, 1).await;
    let phq = t.create_exam(&cookie, "PHQ-9").await;
    let sds = t.create_exam(&cookie, "SDS").await;

    let stacked = t.post("/doctor/patients/1/stacked", &cookie, json!({ "exam_id": phq })).await;
    assert_eq!(stacked.body["added"], 1);
    let again = t.post("/doctor/patients/1/stacked", &cookie, json!({ "exam_id": phq })).await;
    assert_eq!(again.body["added"], 0);

    let overview = t.get("/doctor/patients/1", &cookie).await;
    assert_eq!(overview.status, StatusCode::OK);
    let pending = overview.body["stacked_exams"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["exam"]["id"], phq);
    assert_eq!(exam_ids(&overview.body["available_exams"]), [sds]);
    assert!(overview.body["results"].as_array().unwrap().is_empty());

    let removed = t.delete(&format!("/doctor/patients/1/stacked/{phq}"), &cookie).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);
    let overview = t.get("/doctor/patients/1", &cookie).await;
    assert_eq!(exam_ids(&overview.body["available_exams"]), [phq, sds]);
}

#[tokio::test]
async fn unknown_patient_or_exam_is_not_found() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    let phq = t.create_exam(&cookie, "PHQ-9").await;
    t.create_patient(&cookie, 1).await;

    assert_eq!(t.get("/doctor/patients/404", &cookie).await.status, StatusCode::NOT_FOUND);
    let no_patient = t.post("/doctor/patients/404/stacked", &cookie, json!({ "exam_id": phq })).await;
    assert_eq!(no_patient.status, StatusCode::NOT_FOUND);
    let no_exam = t.post("/doctor/patients/1/stacked", &cookie, json!({ "exam_id": 999 })).await;
    assert_eq!(no_exam.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stacking_a_set_counts_only_new_exams() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    t.create_patient(&cookie, 1).await;
    let phq = t.create_exam(&cookie, "PHQ-9").await;
    let sds = t.create_exam(&cookie, "SDS").await;
    let set = t.post("/exam-sets", &cookie, json!({ "name": "intake" })).await;
    let set_id = set.body["id"].as_i64().unwrap();
    for exam_id in [phq, sds] {
        t.post(&format!("/exam-sets/{set_id}/items"), &cookie, json!({ "exam_id": exam_id }))
            .await;
    }
    t.post("/doctor/patients/1/stacked", &cookie, json!({ "exam_id": sds })).await;

    let uri = format!("/doctor/patients/1/exam-sets/{set_id}");
    assert_eq!(t.post(&uri, &cookie, json!({})).await.body["added"], 1);
    assert_eq!(t.post(&uri, &cookie, json!({})).await.body["added"], 0);

    let overview = t.get("/doctor/patients/1", &cookie).await;
    assert_eq!(overview.body["stacked_exams"].as_array().unwrap().len(), 2);
    assert!(overview.body["available_exams"].as_array().unwrap().is_empty());

    let unknown_set = t.post("/doctor/patients/1/exam-sets/9999", &cookie, json!({})).await;
    assert_eq!(unknown_set.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn charts_track_totals_per_exam() {
    let t = test_app(UNREACHABLE_ANALYZER);
    let cookie = t.doctor();
    t.create_patient(&cookie, 1).await;
    let phq = t.create_exam(&cookie, "PHQ-9").await;

    for answers in [json!({ "item0": 1, "item1": 1, "item2": 1 }), json!({ "item0": 3, "item1": 2, "item2": 0 })] {
        let reply = t
            .post(
                &format!("/exam/{phq}/patient/1"),
                &cookie,
                json!({ "answers": answers }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    }

    let charts = t.get("/doctor/patients/1/charts", &cookie).await;
    assert_eq!(charts.status, StatusCode::OK);
    let charts = charts.body.as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0]["cutoff"], 5);
    let totals: Vec<_> = charts[0]["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["total"].as_i64().unwrap())
        .collect();
    assert_eq!(totals, [3, 5]);

    assert_eq!(
        t.get("/doctor/patients/2/charts", &cookie).await.status,
        StatusCode::NOT_FOUND
    );
}
