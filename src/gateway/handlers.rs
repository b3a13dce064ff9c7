use super::pipeline::SearchPipeline;
use super::types::ErrorResponse;
use crate::access::{AccessScope, ClaimsVerifier, RequestClaims};
use crate::query::SearchRequest;

use axum::extract::{FromRef, Query, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;

const CORS_MAX_AGE: Duration = Duration::from_secs(300);

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SearchPipeline>,
    pub verifier: Arc<ClaimsVerifier>,
    pub request_timeout: Duration,
}

impl FromRef<AppState> for Arc<ClaimsVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_search))
        .route("/healthcheck", get(handle_healthcheck))
        .layer(cors_layer())
        .with_state(state)
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-csrf-id"),
        ])
        .max_age(CORS_MAX_AGE)
}

pub async fn handle_search(
    State(state): State<AppState>,
    claims: RequestClaims,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = SearchRequest::from_params(&params);
    let scope = AccessScope::from_claims(claims.claims.as_ref());
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("search", request_id = %request_id);

    let run = state
        .pipeline
        .run(&request, &scope, claims.token.as_deref())
        .instrument(span);

    match tokio::time::timeout(state.request_timeout, run).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome.result)).into_response(),
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                "Search timed out after {} ms",
                state.request_timeout.as_millis()
            );
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorResponse {
                    error: "search timed out".to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn handle_healthcheck(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.pipeline.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::error!("Search backend health check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy")
        }
    }
}
