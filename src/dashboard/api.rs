use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::metrics::DashboardMetrics;
use crate::errors::{PipelineError, StoreError};
use crate::pipeline::board::Board;
use crate::pipeline::drag::DragPayload;
use crate::pipeline::tracker::{DropOutcome, PipelineTracker, TracingNotifier};
use crate::store::{Interview, Opening, OpeningDraft, Store};
use crate::util::today_in_luanda;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub tracker: PipelineTracker,
    pub store: Arc<dyn Store>,
    pub upcoming_limit: usize,
}

impl AppState {
    /// Wire a tracker to `store`. Alerts go to the log and back to the
    /// client whose drop raised them.
    pub fn new(store: Arc<dyn Store>, board: Board, upcoming_limit: usize) -> Self {
        let tracker =
            PipelineTracker::with_board(store.clone(), Arc::new(TracingNotifier), board);
        Self {
            tracker,
            store,
            upcoming_limit,
        }
    }
}

pub type SharedState = Arc<AppState>;

// ── Request / response types ──────────────────────────────────────────

/// Drop payload. Accepts the id as a number or as text, like the drag
/// transfer data it models.
#[derive(Debug, Deserialize)]
pub struct DropRequest {
    pub candidate_id: PayloadId,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PayloadId {
    Number(i64),
    Text(String),
}

impl PayloadId {
    fn into_payload(self) -> DragPayload {
        match self {
            PayloadId::Number(id) => DragPayload::for_candidate(id),
            PayloadId::Text(text) => DragPayload { candidate_id: text },
        }
    }
}

#[derive(Serialize)]
pub struct DropResponse {
    pub outcome: DropOutcome,
    pub alerts: Vec<String>,
    pub board: Board,
}

#[derive(Serialize)]
pub struct OpeningView {
    #[serde(flatten)]
    pub opening: Opening,
    pub status_label: String,
    pub opened_at_display: String,
    pub closes_at_display: String,
}

impl From<Opening> for OpeningView {
    fn from(opening: Opening) -> Self {
        Self {
            status_label: opening.status_label().to_string(),
            opened_at_display: opening.opened_at_display(),
            closes_at_display: opening.closes_at_display(),
            opening,
        }
    }
}

#[derive(Serialize)]
pub struct InterviewView {
    pub id: i64,
    pub scheduled: String,
    pub status: String,
    pub status_slug: String,
    pub interviewer: String,
    pub notes: Option<String>,
    pub opening: String,
    pub candidate: String,
}

impl From<&Interview> for InterviewView {
    fn from(interview: &Interview) -> Self {
        Self {
            id: interview.id,
            scheduled: interview.scheduled_display(),
            status: interview.status_label().to_string(),
            status_slug: interview.status_slug(),
            interviewer: interview.interviewer_label().to_string(),
            notes: interview.notes.clone(),
            opening: interview.opening_label().to_string(),
            candidate: interview.candidate_label().to_string(),
        }
    }
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Invalid(msg) => ApiError::BadRequest(msg),
            other => {
                error!(error = %other, "store request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::UnknownColumn { .. }
            | PipelineError::DragInProgress { .. }
            | PipelineError::CardNotRendered { .. } => ApiError::BadRequest(err.to_string()),
            PipelineError::LoadFailed(_) => ApiError::Internal(err.to_string()),
            PipelineError::Store(store) => store.into(),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/board", get(get_board))
        .route("/api/board/reload", post(reload_board))
        .route("/api/board/columns/{position}/drop", post(drop_on_column))
        .route("/api/candidates", get(list_candidates))
        .route("/api/metrics", get(get_metrics))
        .route("/api/openings", get(list_openings).post(create_opening))
        .route(
            "/api/openings/{id}",
            put(update_opening).delete(delete_opening),
        )
        .route("/api/interviews/upcoming", get(upcoming_interviews))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn get_board(State(state): State<SharedState>) -> Json<Board> {
    Json(state.tracker.snapshot())
}

async fn reload_board(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    state.tracker.load().await?;
    Ok(Json(state.tracker.snapshot()))
}

async fn drop_on_column(
    State(state): State<SharedState>,
    Path(position): Path<usize>,
    Json(req): Json<DropRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = req.candidate_id.into_payload();
    let outcome = match payload.candidate_id() {
        Some(id) => state.tracker.drag_and_drop(id, position).await?,
        None => state.tracker.drop_on(position, &payload).await?,
    };
    let alerts = match &outcome {
        DropOutcome::RolledBack { alert, .. } => vec![alert.clone()],
        _ => Vec::new(),
    };
    Ok(Json(DropResponse {
        outcome,
        alerts,
        board: state.tracker.snapshot(),
    }))
}

async fn list_candidates(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.list_candidates().await?))
}

async fn get_metrics(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(DashboardMetrics::collect(state.store.as_ref()).await?))
}

async fn list_openings(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let openings = state.store.list_openings().await?;
    let views: Vec<OpeningView> = openings.into_iter().map(OpeningView::from).collect();
    Ok(Json(views))
}

async fn create_opening(
    State(state): State<SharedState>,
    Json(draft): Json<OpeningDraft>,
) -> Result<impl IntoResponse, ApiError> {
    draft.validate().map_err(ApiError::BadRequest)?;
    let opening = state.store.create_opening(&draft).await?;
    Ok((StatusCode::CREATED, Json(OpeningView::from(opening))))
}

async fn update_opening(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(draft): Json<OpeningDraft>,
) -> Result<impl IntoResponse, ApiError> {
    draft.validate().map_err(ApiError::BadRequest)?;
    let opening = state.store.update_opening(id, &draft).await?;
    Ok(Json(OpeningView::from(opening)))
}

async fn delete_opening(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_opening(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upcoming_interviews(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let interviews = state
        .store
        .upcoming_interviews(today_in_luanda(), state.upcoming_limit)
        .await?;
    let views: Vec<InterviewView> = interviews.iter().map(InterviewView::from).collect();
    Ok(Json(views))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::{NewCandidate, NewInterview, NewOpening, SeedData, SqliteStore};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .lock_sync()
            .unwrap()
            .import(&SeedData {
                openings: vec![NewOpening {
                    id: Some(1),
                    title: "Backend Developer".into(),
                    ..Default::default()
                }],
                candidates: vec![
                    NewCandidate {
                        id: Some(1),
                        name: "Ana".into(),
                        opening_id: Some(1),
                        ..Default::default()
                    },
                    NewCandidate {
                        id: Some(2),
                        name: "Bruno".into(),
                        status: Some("Triagem".into()),
                        ..Default::default()
                    },
                ],
                interviews: vec![NewInterview {
                    scheduled_at: Some("2999-01-01T10:00:00Z".into()),
                    opening_id: Some(1),
                    candidate_id: Some(1),
                    ..Default::default()
                }],
            })
            .unwrap();
        store
    }

    async fn test_state() -> SharedState {
        let store: Arc<dyn Store> = Arc::new(seeded_store());
        let state = Arc::new(AppState::new(store, Board::new(), 7));
        state.tracker.load().await.unwrap();
        state
    }

    fn test_app(state: SharedState) -> Router {
        api_router().with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app(test_state().await);
        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_get_board_snapshot() {
        let app = test_app(test_state().await);
        let response = app.oneshot(empty_request("GET", "/api/board")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let board: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(board["columns"].as_array().unwrap().len(), 6);
        assert_eq!(board["summary"], serde_json::json!([1, 1, 0, 0, 0, 0]));
        assert_eq!(
            board["columns"][0]["cards"][0]["opening_label"],
            "Backend Developer"
        );
    }

    #[tokio::test]
    async fn test_drop_moves_card_and_persists_header() {
        let state = test_state().await;
        let app = test_app(state.clone());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/board/columns/3/drop",
                serde_json::json!({"candidate_id": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(body["outcome"]["result"], "moved");
        assert_eq!(body["outcome"]["status"], "entrevista técnica");
        assert_eq!(body["board"]["summary"], serde_json::json!([0, 1, 1, 0, 0, 0]));
        assert!(body["alerts"].as_array().unwrap().is_empty());

        let candidates = state.store.list_candidates().await.unwrap();
        assert_eq!(candidates[0].status.as_deref(), Some("entrevista técnica"));
    }

    #[tokio::test]
    async fn test_rejected_drop_returns_its_own_alert() {
        // Board rendered from one store, writes sent to an empty one.
        let board = test_state().await.tracker.snapshot();
        let empty: Arc<dyn Store> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let state = Arc::new(AppState::new(empty, board, 7));

        let response = test_app(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/board/columns/4/drop",
                serde_json::json!({"candidate_id": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(body["outcome"]["result"], "rolled_back");
        let alerts = body["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].as_str().unwrap().starts_with("Erro ao mover candidato"));
        assert_eq!(body["board"]["summary"], serde_json::json!([0, 0, 0, 0, 0, 0]));

        let response = test_app(state)
            .oneshot(json_request(
                "POST",
                "/api/board/columns/2/drop",
                serde_json::json!({"candidate_id": 2}),
            ))
            .await
            .unwrap();
        let body: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(body["outcome"]["result"], "ignored");
        assert!(body["alerts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drop_with_text_payload_is_ignored() {
        let app = test_app(test_state().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/board/columns/2/drop",
                serde_json::json!({"candidate_id": "abc"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(body["outcome"]["result"], "ignored");
        assert_eq!(body["board"]["summary"], serde_json::json!([1, 1, 0, 0, 0, 0]));
    }

    #[tokio::test]
    async fn test_drop_on_unknown_column_is_bad_request() {
        let app = test_app(test_state().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/board/columns/9/drop",
                serde_json::json!({"candidate_id": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = body_json(response.into_body()).await;
        assert!(body["error"].as_str().unwrap().contains("position 9"));
    }

    #[tokio::test]
    async fn test_reload_board() {
        let state = test_state().await;
        state.store.update_candidate_status(1, "contratado").await.unwrap();
        let app = test_app(state);
        let response = app
            .oneshot(empty_request("POST", "/api/board/reload"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let board: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(board["summary"], serde_json::json!([0, 1, 0, 0, 0, 1]));
    }

    #[tokio::test]
    async fn test_metrics() {
        let app = test_app(test_state().await);
        let response = app.oneshot(empty_request("GET", "/api/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let metrics: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(metrics["candidates"], 2);
        assert_eq!(metrics["open_openings"], 1);
    }

    #[tokio::test]
    async fn test_list_candidates() {
        let app = test_app(test_state().await);
        let response = app
            .oneshot(empty_request("GET", "/api/candidates"))
            .await
            .unwrap();
        let candidates: Vec<serde_json::Value> = body_json(response.into_body()).await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["name"], "Ana");
    }

    #[tokio::test]
    async fn test_opening_lifecycle() {
        let state = test_state().await;

        let response = test_app(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/openings",
                serde_json::json!({"title": "Designer", "closes_on": "2026-12-31"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: serde_json::Value = body_json(response.into_body()).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["status_label"], "aberta");
        assert_eq!(created["admin_id"], 1);

        let response = test_app(state.clone())
            .oneshot(json_request(
                "PUT",
                &format!("/api/openings/{}", id),
                serde_json::json!({"title": "Product Designer"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: serde_json::Value = body_json(response.into_body()).await;
        assert_eq!(updated["title"], "Product Designer");

        let response = test_app(state.clone())
            .oneshot(empty_request("GET", "/api/openings"))
            .await
            .unwrap();
        let openings: Vec<serde_json::Value> = body_json(response.into_body()).await;
        assert_eq!(openings.len(), 2);
        assert_eq!(openings[0]["id"], id);
        assert_eq!(openings[1]["candidate_count"], 1);

        let response = test_app(state.clone())
            .oneshot(empty_request("DELETE", &format!("/api/openings/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = test_app(state)
            .oneshot(empty_request("DELETE", &format!("/api/openings/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_opening_blank_title_is_bad_request() {
        let app = test_app(test_state().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/openings",
                serde_json::json!({"title": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upcoming_interviews_uses_placeholders() {
        let app = test_app(test_state().await);
        let response = app
            .oneshot(empty_request("GET", "/api/interviews/upcoming"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let interviews: Vec<serde_json::Value> = body_json(response.into_body()).await;
        assert_eq!(interviews.len(), 1);
        assert_eq!(interviews[0]["status"], "Agendada");
        assert_eq!(interviews[0]["status_slug"], "agendada");
        assert_eq!(interviews[0]["interviewer"], "Não definido");
        assert_eq!(interviews[0]["opening"], "Backend Developer");
        assert_eq!(interviews[0]["candidate"], "Ana");
        assert_eq!(interviews[0]["scheduled"], "01/01/2999 (11:00)");
    }
}
