use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Value, json};
use tower::ServiceExt;

use theralink_bedrock::error::GenerationError;
use theralink_bedrock::generator::{Completion, TextGenerator};
use theralink_bedrock::summary::SummaryService;
use theralink_server::state::AppState;
use theralink_storage::memory::MemoryStore;

#[derive(Default)]
struct FakeGenerator {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl TextGenerator for FakeGenerator {
    fn model_id(&self) -> &str {
        "fake-model"
    }

    fn complete<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<Completion, GenerationError>> {
        async move {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing.load(Ordering::SeqCst) {
                return Err(GenerationError::Invocation("throttled".to_string()));
            }
            Ok(Completion {
                text: format!("Patient reports a steady week (summary {n})."),
                usage: None,
            })
        }
        .boxed()
    }
}

fn test_app() -> (Router, Arc<FakeGenerator>) {
    let generator = Arc::new(FakeGenerator::default());
    let summaries = SummaryService::new(generator.clone(), Duration::from_secs(5));
    let state = AppState::new(Arc::new(MemoryStore::new()), summaries).unwrap();
    (theralink_server::app(state), generator)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, text) = send(app, request).await;
    (status, serde_json::from_str(&text).unwrap())
}

async fn post_form(app: &Router, uri: &str, body: String) -> axum::response::Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn check_in(app: &Router, patient_id: &str, answer: i64) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/check-ins",
        json!({ "patient_id": patient_id, "responses": vec![answer; 20] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn questionnaire_lists_twenty_questions() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/questionnaire").await;
    assert_eq!(status, StatusCode::OK);

    let detail: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(detail["id"], "daily_wellness");
    assert_eq!(detail["questions"].as_array().unwrap().len(), 20);
    assert_eq!(detail["questions"][0]["default_value"], 3);
}

#[tokio::test]
async fn empty_store_lists_nothing_and_dashboard_shows_no_data() {
    let (app, generator) = test_app();

    let (status, list) = send_json(&app, "GET", "/api/patients", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, html) = get(&app, "/doctor").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No patient data available."));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn check_in_scores_and_classifies() {
    let (app, _) = test_app();

    let low = check_in(&app, "p-low", 1).await;
    assert_eq!(low["score"], 1.0);
    check_in(&app, "p-mid", 3).await;
    let high = check_in(&app, "p-high", 5).await;
    assert_eq!(high["score"], 5.0);
    assert_eq!(high["responses"].as_array().unwrap().len(), 20);

    let (_, list) = send_json(&app, "GET", "/api/patients", Value::Null).await;
    let rows: Vec<(String, String)> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["patient_id"].as_str().unwrap().to_string(),
                r["risk"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("p-high".to_string(), "green".to_string()),
            ("p-low".to_string(), "red".to_string()),
            ("p-mid".to_string(), "yellow".to_string()),
        ]
    );
}

#[tokio::test]
async fn history_grows_in_submission_order() {
    let (app, _) = test_app();
    for answer in [2, 4, 5] {
        check_in(&app, "patient_001", answer).await;
    }

    let (status, record) = send_json(&app, "GET", "/api/patients/patient_001", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    let scores: Vec<f64> = record["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["score"].as_f64().unwrap())
        .collect();
    assert_eq!(scores, vec![2.0, 4.0, 5.0]);
    assert_eq!(record["verified"], false);
    assert_eq!(record["notes"], "");
}

#[tokio::test]
async fn invalid_check_ins_are_rejected() {
    let (app, _) = test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/check-ins",
        json!({ "patient_id": "p1", "responses": vec![3; 19] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation failed");

    let mut responses = vec![3; 20];
    responses[4] = 6;
    responses[7] = -1;
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/check-ins",
        json!({ "patient_id": "p1", "responses": responses }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["details"].as_array().unwrap().is_empty());

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/check-ins",
        json!({ "patient_id": "   ", "responses": vec![3; 20] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored by any of the rejected submissions.
    let (_, list) = send_json(&app, "GET", "/api/patients", Value::Null).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
    let (app, _) = test_app();

    let (status, _) = send_json(&app, "GET", "/api/patients/ghost", Value::Null).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/patients/ghost/verified",
        json!({ "verified": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/doctor/patients/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verified_and_notes_are_last_writer_wins() {
    let (app, _) = test_app();
    check_in(&app, "p1", 4).await;

    let (status, record) = send_json(
        &app,
        "PUT",
        "/api/patients/p1/verified",
        json!({ "verified": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["verified"], true);

    send_json(&app, "PUT", "/api/patients/p1/notes", json!({ "notes": "first" })).await;
    let (_, record) =
        send_json(&app, "PUT", "/api/patients/p1/notes", json!({ "notes": "second" })).await;
    assert_eq!(record["notes"], "second");
    assert_eq!(record["history"].as_array().unwrap().len(), 1);

    let (_, dashboard) =
        send_json(&app, "GET", "/api/patients/p1/dashboard", Value::Null).await;
    assert_eq!(dashboard["verified"], true);
    assert_eq!(dashboard["notes"], "second");
    assert_eq!(dashboard["risk_label"], "GREEN ZONE");
}

#[tokio::test]
async fn summary_is_cached_per_score() {
    let (app, generator) = test_app();
    check_in(&app, "p1", 3).await;

    let (status, first) =
        send_json(&app, "POST", "/api/patients/p1/summary", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "ready");
    assert_eq!(first["source"], "generated");
    assert_eq!(first["summary"]["model_id"], "fake-model");

    let (_, second) = send_json(&app, "POST", "/api/patients/p1/summary", Value::Null).await;
    assert_eq!(second["source"], "cached");
    assert_eq!(second["summary"]["text"], first["summary"]["text"]);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    // A new score means a new call.
    check_in(&app, "p1", 5).await;
    let (_, third) = send_json(&app, "POST", "/api/patients/p1/summary", Value::Null).await;
    assert_eq!(third["source"], "generated");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn summary_failures_fall_back() {
    let (app, generator) = test_app();
    check_in(&app, "p1", 3).await;
    generator.failing.store(true, Ordering::SeqCst);

    let (status, outcome) =
        send_json(&app, "POST", "/api/patients/p1/summary", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["status"], "unavailable");

    // The dashboard still renders, with a notice in place of the summary.
    let (status, html) = get(&app, "/doctor/patients/p1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Session prep summary unavailable"));
    assert!(html.contains("YELLOW ZONE"));

    generator.failing.store(false, Ordering::SeqCst);
    send_json(&app, "POST", "/api/patients/p1/summary", Value::Null).await;

    generator.failing.store(true, Ordering::SeqCst);
    check_in(&app, "p1", 1).await;
    let (_, outcome) = send_json(&app, "POST", "/api/patients/p1/summary", Value::Null).await;
    assert_eq!(outcome["status"], "ready");
    assert_eq!(outcome["source"], "stale");
    assert_eq!(outcome["summary"]["score"], 3.0);
}

#[tokio::test]
async fn check_in_page_defaults_to_demo_patient() {
    let (app, _) = test_app();
    let (status, html) = get(&app, "/patient").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("patient_001"));
    assert!(html.contains("name=\"q20\""));
}

#[tokio::test]
async fn form_check_in_then_doctor_page() {
    let (app, _) = test_app();

    let mut body = String::from("patient_id=patient_007");
    for i in 1..=20 {
        body.push_str(&format!("&q{i}=2"));
    }
    let response = post_form(&app, "/patient/check-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("Check-in submitted successfully"));

    let (status, html) = get(&app, "/doctor").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("patient_007"));
    assert!(html.contains("RED ZONE"));
    assert!(html.contains("Awaiting verification"));
}

#[tokio::test]
async fn incomplete_form_is_shown_again_with_errors() {
    let (app, _) = test_app();

    let response = post_form(&app, "/patient/check-in", "patient_id=p1&q1=5".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = String::from_utf8(
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("no answer given"));

    let (_, list) = send_json(&app, "GET", "/api/patients", Value::Null).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn doctor_forms_redirect_back_to_patient() {
    let (app, _) = test_app();
    check_in(&app, "p1", 4).await;

    let response = post_form(&app, "/doctor/patients/p1/verified", "verified=true".to_string()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/doctor/patients/p1"
    );

    let response = post_form(
        &app,
        "/doctor/patients/p1/notes",
        "notes=%3Cb%3Ecalm%3C%2Fb%3E".to_string(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, html) = get(&app, "/doctor/patients/p1").await;
    assert!(html.contains("Verified by clinician"));
    assert!(html.contains("&lt;b&gt;calm&lt;&#x2F;b&gt;"));
}

#[tokio::test]
async fn malformed_check_in_json_is_a_validation_error() {
    let (app, _) = test_app();

    let mut responses = vec![json!(3); 20];
    responses[0] = json!(3.5);
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/check-ins",
        json!({ "patient_id": "p1", "responses": responses }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation failed");
    assert!(body["details"][0].as_str().unwrap().contains("3.5"));

    let (status, body) =
        send_json(&app, "POST", "/api/check-ins", json!({ "responses": vec![3; 20] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation failed");

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/patients/p1/verified",
        json!({ "verified": "yes" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation failed");

    let (_, list) = send_json(&app, "GET", "/api/patients", Value::Null).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unparsable_json_body_is_a_bad_request() {
    let (app, _) = test_app();
    let request = Request::post("/api/check-ins")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"patient_id\": \"p1\", "))
        .unwrap();
    let (status, text) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn form_reports_patient_id_and_answer_problems_together() {
    let (app, _) = test_app();

    let response = post_form(&app, "/patient/check-in", "patient_id=bad+id%21&q1=5".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = String::from_utf8(
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("forbidden character"));
    assert!(html.contains("no answer given"));
    // The answer that was given is kept on the re-shown form.
    assert!(html.contains("name=\"q1\""));

    let mut body = String::from("patient_id=");
    for i in 1..=20 {
        body.push_str(&format!("&q{i}={}", if i == 4 { 9 } else { 3 }));
    }
    let response = post_form(&app, "/patient/check-in", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = String::from_utf8(
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("must not be empty"));
    assert!(html.contains("outside range"));
}
