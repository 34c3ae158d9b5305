use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};

use crate::api::{ApiAnalysisRequest, ApiAnalysisResponse};
use contentflow::record::ContentItem;
use contentflow::store::{RecordStore, DEFAULT_RECORD_LIMIT};
use contentflow::{AnalysisError, AnalyzerConfig, ContentAnalyzer};

#[derive(Clone)]
struct AppState {
    analyzer: Arc<ContentAnalyzer>,
    store: Arc<RecordStore>,
}

#[derive(Serialize)]
struct IndexStatus {
    indexed_documents: usize,
}

type ApiError = (StatusCode, String);

pub async fn serve(args: crate::ServeArgs, config: AnalyzerConfig) -> Result<(), String> {
    let store = RecordStore::load(args.records.clone(), DEFAULT_RECORD_LIMIT)
        .await
        .map_err(|err| format!("failed to load records {}: {}", args.records.display(), err))?;
    let state = AppState {
        analyzer: Arc::new(ContentAnalyzer::new(config)),
        store: Arc::new(store),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/records", get(list_records))
        .route("/api/records/:id", get(get_record).delete(delete_record))
        .route("/api/index/reset", post(reset_index))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    info!(%addr, records = %args.records.display(), "serving content analysis api");

    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalysisRequest>,
) -> Result<Json<ApiAnalysisResponse>, ApiError> {
    let (request, page) = request
        .into_parts()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    // Scoring holds the index lock; keep it off the async workers.
    let analyzer = Arc::clone(&state.analyzer);
    let outcome = tokio::task::spawn_blocking(move || match page {
        Some(page) => analyzer
            .analyze_page(&page, request.content_type, &request.platforms)
            .map(|scored| (scored.analysis, Some(scored.item))),
        None => analyzer.analyze(&request).map(|analysis| (analysis, None)),
    })
    .await
    .map_err(|err| {
        warn!(error = %err, "analysis task failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "analysis task failed".to_string())
    })?;
    let (analysis, item) = outcome.map_err(error_response)?;

    let response = ApiAnalysisResponse::from_analysis(analysis);
    match item {
        Some(item) => {
            let record = state.store.add(item).await.map_err(error_response)?;
            Ok(Json(response.with_record(record)))
        }
        None => Ok(Json(response)),
    }
}

async fn list_records(State(state): State<AppState>) -> Json<Vec<ContentItem>> {
    Json(state.store.list().await)
}

async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, ApiError> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("record not found: {}", id)))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete(&id).await.map_err(error_response)? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err((StatusCode::NOT_FOUND, format!("record not found: {}", id))),
    }
}

async fn reset_index(State(state): State<AppState>) -> Json<IndexStatus> {
    state.analyzer.reset_index();
    info!("lexical index reset");
    Json(IndexStatus {
        indexed_documents: state.analyzer.indexed_documents(),
    })
}

fn error_response(err: AnalysisError) -> ApiError {
    match err {
        AnalysisError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
        other => {
            warn!(error = %other, "request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
