use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use quizgen_backend::config::QuizLimits;
use quizgen_backend::routes::build_router;
use quizgen_backend::state::AppState;
use quizgen_backend::store::QuestionStore;

fn dataset_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/quiz_dataset.json")
}

fn app() -> Router {
    let store = QuestionStore::load(dataset_path()).unwrap();
    let state = Arc::new(AppState::new(store, QuizLimits::default()));
    build_router(state, Path::new("./static"))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(req).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(req).await
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_question_count() {
    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["questions"], 12);
}

#[tokio::test]
async fn tags_are_sorted_and_unique() {
    let (status, body) = get("/api/v1/tags").await;
    assert_eq!(status, StatusCode::OK);
    let tags: Vec<String> = serde_json::from_value(body["tags"].clone()).unwrap();
    let mut sorted = tags.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(tags, sorted);
    assert!(tags.contains(&"europe".to_string()));
}

#[tokio::test]
async fn quiz_defaults_to_ten_questions() {
    let (status, body) = post("/api/v1/quiz", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let ids: BTreeSet<u64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids.len(), 10);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn quiz_filters_by_any_selected_tag() {
    let (_, body) = post("/api/v1/quiz", json!({ "tags": ["astronomy", "chemistry"], "count": 50 })).await;
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    for q in questions {
        let tags: Vec<&str> = q["tags"].as_array().unwrap().iter().map(|t| t.as_str().unwrap()).collect();
        assert!(tags.contains(&"astronomy") || tags.contains(&"chemistry"));
        assert!(q.get("correct_answers").is_none());
    }
}

#[tokio::test]
async fn quiz_count_is_clamped_to_minimum() {
    let (_, body) = post("/api/v1/quiz", json!({ "count": 1 })).await;
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn quiz_without_matches_returns_message() {
    let (status, body) = post("/api/v1/quiz", json!({ "tags": ["cooking"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!([]));
    assert_eq!(body["message"], "No questions found for selected topics.");
}

#[tokio::test]
async fn score_returns_per_question_results_and_breakdown() {
    // 0: single, 1: multiple {2,3,5}, 2: single, 9: multiple {Jupiter,Saturn}
    let submission = json!({
        "questionIds": [0, 1, 2, 9],
        "answers": {
            "0": "Paris",
            "1": ["2", "3"],
            "3": ["Jupiter"]
        }
    });
    let (status, body) = post("/api/v1/quiz/score", submission).await;
    assert_eq!(status, StatusCode::OK);

    let scores: Vec<f64> = body["results"].as_array().unwrap().iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert_eq!(scores[0], 1.0);
    assert!((scores[1] - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(scores[2], 0.0);
    assert_eq!(scores[3], 0.5);

    assert_eq!(body["max_score"], 4);
    assert!((body["total_score"].as_f64().unwrap() - (1.0 + 2.0 / 3.0 + 0.5)).abs() < 1e-9);
    assert!((body["percentage"].as_f64().unwrap() - 54.1667).abs() < 1e-3);
    assert_eq!(body["correct_count"], 1);
    assert_eq!(body["breakdown"], json!({ "correct": 1, "partial": 2, "incorrect": 1 }));

    assert_eq!(body["results"][0]["user_answer"], "Paris");
    assert_eq!(body["results"][2]["user_answer"], Value::Null);
    assert_eq!(body["results"][0]["mode"], "single");
    assert_eq!(body["results"][1]["correct_answers"], json!(["2", "3", "5"]));
}

#[tokio::test]
async fn score_rejects_unknown_question() {
    let (status, body) = post("/api/v1/quiz/score", json!({ "questionIds": [999] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown question id: 999");
}

#[tokio::test]
async fn scoring_twice_is_identical() {
    let submission = json!({ "questionIds": [3, 5], "answers": { "0": ["u32", "String"], "1": ["Rhine"] } });
    let (_, first) = post("/api/v1/quiz/score", submission.clone()).await;
    let (_, second) = post("/api/v1/quiz/score", submission).await;
    assert_eq!(first, second);
}
