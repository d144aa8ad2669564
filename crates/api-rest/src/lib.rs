//! # API REST
//!
//! Mock KEDB API service.
//!
//! Answers the two collaborator calls of the draft generator with canned
//! payloads after a fixed artificial delay, plus an entry lookup and a
//! health check:
//! - `POST /api/suggested-kedbs` - canned entry list (honours `limit`)
//! - `POST /api/generate-kedb` - draft template interpolating the description
//! - `GET /api/kedb/:id` - single canned entry by identifier
//! - `GET /health` - liveness check
//!
//! There is no search, ranking, or persistence behind any of this; the
//! delay exists purely so clients exercise their loading states. OpenAPI
//! docs are served through Swagger UI as on the other services.

#![warn(rust_2018_idioms)]

use std::time::Duration;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use kedb_core::{draft_template, fallback_entries, SuggestedEntry};
use kedb_types::IncidentDescription;

/// Artificial delay before answering a suggestions request.
const DEFAULT_SUGGEST_DELAY: Duration = Duration::from_millis(1500);
/// Artificial delay before answering a generation request.
const DEFAULT_GENERATE_DELAY: Duration = Duration::from_millis(2000);

/// Shared state for the mock API handlers.
///
/// Only the artificial response delays live here; the payloads themselves
/// are canned in `kedb-core`.
#[derive(Clone)]
pub struct AppState {
    suggest_delay: Duration,
    generate_delay: Duration,
}

impl AppState {
    /// Creates state with explicit delays.
    pub fn new(suggest_delay: Duration, generate_delay: Duration) -> Self {
        Self {
            suggest_delay,
            generate_delay,
        }
    }

    /// Creates state with the default delays (1.5 s / 2 s), or a single
    /// override from `KEDB_MOCK_DELAY_MS` applied to both.
    pub fn from_env() -> Self {
        match std::env::var("KEDB_MOCK_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            Some(ms) => {
                let delay = Duration::from_millis(ms);
                Self::new(delay, delay)
            }
            None => Self::new(DEFAULT_SUGGEST_DELAY, DEFAULT_GENERATE_DELAY),
        }
    }

    /// Creates state that answers immediately. Intended for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGEST_DELAY, DEFAULT_GENERATE_DELAY)
    }
}

/// Request body for the suggestions endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SuggestedKedbsReq {
    /// Incident short description to match against
    pub description: String,
    /// Maximum number of entries to return
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for the suggestions endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestedKedbsRes {
    /// Suggested entries, in display order
    pub kedbs: Vec<SuggestedEntry>,
}

/// Request body for the generation endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateKedbReq {
    /// Incident short description to interpolate into the draft
    pub description: String,
    /// Accepted for compatibility; the mock always includes steps
    #[serde(rename = "includeSteps", default)]
    pub include_steps: Option<bool>,
    /// Accepted for compatibility; the mock always emits markdown
    #[serde(default)]
    pub format: Option<String>,
}

/// Response body for the generation endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateKedbRes {
    /// Generated draft content
    pub content: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    /// Whether the service is healthy
    pub ok: bool,
    /// Human-readable status message
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, suggested_kedbs, generate_kedb, kedb_by_id),
    components(schemas(
        HealthRes,
        SuggestedKedbsReq,
        SuggestedKedbsRes,
        GenerateKedbReq,
        GenerateKedbRes,
        SuggestedEntry,
    ))
)]
struct ApiDoc;

/// Builds the mock API router with Swagger UI and permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/suggested-kedbs", post(suggested_kedbs))
        .route("/api/generate-kedb", post(generate_kedb))
        .route("/api/kedb/:id", get(kedb_by_id))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the mock KEDB API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "KEDB mock API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/api/suggested-kedbs",
    request_body = SuggestedKedbsReq,
    responses(
        (status = 200, description = "Suggested entries", body = SuggestedKedbsRes)
    )
)]
/// Returns the canned suggested-entry list for an incident description
///
/// The description is logged but never inspected; the mock serves the
/// same fixed set for every incident, truncated to `limit` when given.
#[axum::debug_handler]
async fn suggested_kedbs(
    State(state): State<AppState>,
    Json(req): Json<SuggestedKedbsReq>,
) -> Json<SuggestedKedbsRes> {
    tracing::info!("Finding KEDBs for: {}", req.description);

    tokio::time::sleep(state.suggest_delay).await;

    let mut kedbs = fallback_entries();
    if let Some(limit) = req.limit {
        kedbs.truncate(limit);
    }

    Json(SuggestedKedbsRes { kedbs })
}

#[utoipa::path(
    post,
    path = "/api/generate-kedb",
    request_body = GenerateKedbReq,
    responses(
        (status = 200, description = "Generated draft content", body = GenerateKedbRes),
        (status = 400, description = "Blank description")
    )
)]
/// Generates draft content by interpolating the description into the
/// fixed template
///
/// # Errors
///
/// Returns `400 Bad Request` if the description is blank or
/// whitespace-only.
#[axum::debug_handler]
async fn generate_kedb(
    State(state): State<AppState>,
    Json(req): Json<GenerateKedbReq>,
) -> Result<Json<GenerateKedbRes>, (StatusCode, &'static str)> {
    tracing::info!("Generating KEDB for: {}", req.description);

    let description = IncidentDescription::new(&req.description)
        .map_err(|_| (StatusCode::BAD_REQUEST, "description is required"))?;

    tokio::time::sleep(state.generate_delay).await;

    Ok(Json(GenerateKedbRes {
        content: draft_template(&description),
    }))
}

#[utoipa::path(
    get,
    path = "/api/kedb/{id}",
    params(
        ("id" = String, Path, description = "Knowledge base entry identifier")
    ),
    responses(
        (status = 200, description = "The requested entry", body = SuggestedEntry),
        (status = 404, description = "No entry with that identifier")
    )
)]
/// Looks up a single canned entry by its identifier
///
/// # Errors
///
/// Returns `404 Not Found` if no canned entry carries the identifier.
#[axum::debug_handler]
async fn kedb_by_id(
    State(_state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<SuggestedEntry>, (StatusCode, &'static str)> {
    fallback_entries()
        .into_iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(&id))
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "no KEDB entry with that id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("Failed to parse body as JSON")
    }

    #[tokio::test]
    async fn test_health_reports_alive() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], json!(true));
    }

    #[tokio::test]
    async fn test_suggested_kedbs_returns_wrapped_canned_list() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(post_json(
                "/api/suggested-kedbs",
                json!({ "description": "CTR PC3 JOBTERMINATED", "limit": 10 }),
            ))
            .await
            .expect("Request failed");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let kedbs = body["kedbs"].as_array().expect("kedbs must be an array");
        assert_eq!(kedbs.len(), 3);
        assert_eq!(kedbs[0]["id"], json!("KB0092892"));
        assert_eq!(kedbs[0]["recommended"], json!(true));
    }

    #[tokio::test]
    async fn test_suggested_kedbs_honours_limit() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(post_json(
                "/api/suggested-kedbs",
                json!({ "description": "anything", "limit": 1 }),
            ))
            .await
            .expect("Request failed");

        let body = body_json(response).await;
        assert_eq!(body["kedbs"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_generate_kedb_interpolates_description() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(post_json(
                "/api/generate-kedb",
                json!({ "description": "FOO_JOB.B", "includeSteps": true, "format": "markdown" }),
            ))
            .await
            .expect("Request failed");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let content = body["content"].as_str().expect("content must be a string");
        assert!(content.contains("**Error:** FOO_JOB.B"));
    }

    #[tokio::test]
    async fn test_generate_kedb_rejects_blank_description() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(post_json("/api/generate-kedb", json!({ "description": "  " })))
            .await
            .expect("Request failed");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_kedb_by_id_finds_canned_entry_case_insensitively() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/kedb/kb0082635")
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], json!("KB0082635"));
    }

    #[tokio::test]
    async fn test_kedb_by_id_unknown_is_not_found() {
        let app = app(AppState::instant());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/kedb/KB9999999")
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request failed");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
