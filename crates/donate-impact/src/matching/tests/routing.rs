use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::matching::router::{rank_handler, save_preferences_handler, RankRequest};
use crate::matching::service::MatchService;
use crate::matching::scoring::ScoringConfig;

#[tokio::test]
async fn save_preferences_handler_accepts_wizard_payloads() {
    let (service, _repository) = build_service();
    let service = Arc::new(service);

    let response = save_preferences_handler::<MemoryRepository>(
        State(service),
        axum::Json(serde_json::from_value(json!({
            "issues": ["climate"],
            "impact": "close",
            "strategy": "single",
            "current_step": 3
        })).expect("request parses")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("preference_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .starts_with("donor-"));
    assert_eq!(payload.get("impact"), Some(&json!("close races")));
}

#[tokio::test]
async fn save_preferences_handler_reports_unavailable_repositories() {
    let service = Arc::new(MatchService::new(
        Arc::new(UnavailableRepository),
        Arc::new(catalog()),
        ScoringConfig::default(),
    ));

    let response = save_preferences_handler::<UnavailableRepository>(
        State(service),
        axum::Json(serde_json::from_value(json!({ "issues": [] })).expect("request parses")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn rank_handler_orders_matches_and_applies_limits() {
    let (service, _repository) = build_service();
    let service = Arc::new(service);

    let request = RankRequest {
        preferences: Some(donor_preferences()),
        preference_id: None,
        limit: Some(2),
    };
    let response = rank_handler::<MemoryRepository>(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total"), Some(&json!(3)));

    let matches = payload
        .get("matches")
        .and_then(Value::as_array)
        .expect("matches array");
    assert_eq!(matches.len(), 2);
    assert_eq!(
        matches[0].get("candidate_id").and_then(Value::as_str),
        Some("a-frey")
    );
    let first = matches[0].get("score").and_then(Value::as_f64).unwrap();
    let second = matches[1].get("score").and_then(Value::as_f64).unwrap();
    assert!(first >= second);
}

#[tokio::test]
async fn candidates_route_lists_the_catalog() {
    let (service, _repository) = build_service();
    let router = match_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/candidates")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let candidates = payload.as_array().expect("candidate array");
    assert_eq!(candidates.len(), 3);
    assert!(candidates[0].get("donationLeverage").is_some());
}

#[tokio::test]
async fn rank_route_resolves_stored_preferences() {
    let (service, _repository) = build_service();
    let record = service
        .save_preferences(donor_preferences(), 3)
        .expect("preferences save");
    let router = match_router_with_service(service);

    let body = json!({ "preference_id": record.preference_id.0 });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/match/rank")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total"), Some(&json!(3)));
}

#[tokio::test]
async fn explain_route_returns_not_found_for_unknown_candidates() {
    let (service, _repository) = build_service();
    let router = match_router_with_service(service);

    let body = json!({ "candidate_id": "nobody" });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/match/explain")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("unknown candidate"));
}

#[tokio::test]
async fn explain_route_reports_the_weighted_breakdown() {
    let (service, _repository) = build_service();
    let router = match_router_with_service(service);

    let body = json!({
        "candidate_id": "a-frey",
        "preferences": { "issues": ["climate", "healthcare"] }
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/match/explain")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let breakdown = payload.get("breakdown").expect("breakdown present");
    assert_eq!(
        breakdown
            .pointer("/competitiveness/weight")
            .and_then(Value::as_f64),
        Some(0.35)
    );
    assert_eq!(breakdown.get("total").and_then(Value::as_f64), Some(0.92));
}

#[tokio::test]
async fn plan_route_builds_the_spread_allocation() {
    let (service, _repository) = build_service();
    let record = service
        .save_preferences(donor_preferences(), 3)
        .expect("preferences save");
    let router = match_router_with_service(service);

    let body = json!({ "preference_id": record.preference_id.0, "total_amount": 60 });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/match/plan")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("strategy"), Some(&json!("spread")));
    let allocations = payload
        .get("allocations")
        .and_then(Value::as_array)
        .expect("allocations array");
    assert_eq!(allocations.len(), 3);
    assert_eq!(
        allocations[0].get("amount").and_then(Value::as_u64),
        Some(20)
    );
}

#[tokio::test]
async fn preferences_route_returns_not_found_for_missing_records() {
    let (service, _repository) = build_service();
    let router = match_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/donors/preferences/donor-missing")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
