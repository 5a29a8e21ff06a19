use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateId, PreferenceId, UserPreferences};
use super::ranking::{RankedCandidateView, DEFAULT_DONATION_AMOUNT};
use super::repository::{PreferenceRepository, RepositoryError};
use super::service::{MatchService, MatchServiceError};

/// Router builder exposing HTTP endpoints for the matching workflow.
pub fn match_router<R>(service: Arc<MatchService<R>>) -> Router
where
    R: PreferenceRepository + 'static,
{
    Router::new()
        .route("/api/v1/candidates", get(candidates_handler::<R>))
        .route(
            "/api/v1/donors/preferences",
            post(save_preferences_handler::<R>),
        )
        .route(
            "/api/v1/donors/preferences/:preference_id",
            get(preferences_handler::<R>),
        )
        .route(
            "/api/v1/donors/preferences/:preference_id/selection",
            post(select_candidates_handler::<R>),
        )
        .route("/api/v1/match/rank", post(rank_handler::<R>))
        .route("/api/v1/match/explain", post(explain_handler::<R>))
        .route("/api/v1/match/plan", post(plan_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SavePreferencesRequest {
    #[serde(flatten)]
    pub(crate) preferences: UserPreferences,
    #[serde(default)]
    pub(crate) current_step: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectionRequest {
    pub(crate) candidates: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    #[serde(default)]
    pub(crate) preferences: Option<UserPreferences>,
    #[serde(default)]
    pub(crate) preference_id: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplainRequest {
    pub(crate) candidate_id: String,
    #[serde(default)]
    pub(crate) preferences: Option<UserPreferences>,
    #[serde(default)]
    pub(crate) preference_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlanRequest {
    pub(crate) preference_id: String,
    #[serde(default = "default_donation_amount")]
    pub(crate) total_amount: u32,
}

fn default_donation_amount() -> u32 {
    DEFAULT_DONATION_AMOUNT
}

pub(crate) async fn candidates_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    (
        StatusCode::OK,
        axum::Json(service.catalog().candidates().to_vec()),
    )
        .into_response()
}

pub(crate) async fn save_preferences_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(request): axum::Json<SavePreferencesRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    match service.save_preferences(request.preferences, request.current_step) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn preferences_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(preference_id): Path<String>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    let id = PreferenceId(preference_id);
    match service.preferences(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn select_candidates_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    Path(preference_id): Path<String>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    let id = PreferenceId(preference_id);
    let selected = request.candidates.into_iter().map(CandidateId).collect();
    match service.select_candidates(&id, selected) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn rank_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    let ranked = match request.preference_id {
        Some(preference_id) => {
            match service.rank_stored(&PreferenceId(preference_id)) {
                Ok(ranked) => ranked,
                Err(error) => return service_error_response(error),
            }
        }
        None => service.rank(&request.preferences.unwrap_or_default()),
    };

    let limit = request.limit.unwrap_or(usize::MAX);
    let matches: Vec<RankedCandidateView> = ranked
        .iter()
        .take(limit)
        .map(|entry| entry.view())
        .collect();

    (
        StatusCode::OK,
        axum::Json(json!({
            "total": ranked.len(),
            "matches": matches,
        })),
    )
        .into_response()
}

pub(crate) async fn explain_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(request): axum::Json<ExplainRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    let candidate_id = CandidateId(request.candidate_id);
    let preferences = match request.preference_id {
        Some(preference_id) => match service.preferences(&PreferenceId(preference_id)) {
            Ok(record) => record.preferences,
            Err(error) => return service_error_response(error),
        },
        None => request.preferences.unwrap_or_default(),
    };

    match service.explain(&candidate_id, &preferences) {
        Ok(breakdown) => (
            StatusCode::OK,
            axum::Json(json!({
                "candidate_id": candidate_id,
                "breakdown": breakdown,
            })),
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn plan_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(request): axum::Json<PlanRequest>,
) -> Response
where
    R: PreferenceRepository + 'static,
{
    let id = PreferenceId(request.preference_id);
    match service.donation_plan(&id, request.total_amount) {
        Ok(plan) => (StatusCode::OK, axum::Json(plan)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::UnknownCandidate(_) => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MatchServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
