//! HTTP API: one endpoint that runs the crew for a JSON request

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::crew::{ContentCrew, ContentRequest};
use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Content Crew API server
#[derive(Parser, Debug, Clone)]
#[command(name = "content-api")]
pub struct ServeArgs {
    #[arg(long, env = "CONTENT_CREW_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "CONTENT_CREW_PORT", default_value = "5000")]
    pub port: u16,

    #[arg(long, env = "CONTENT_CREW_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "CONTENT_CREW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl ServeArgs {
    /// Bind the listen address; `--host` may be an IP or a hostname.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub content_type: String,
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
    /// ISO-8601, local time
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub status: String,
    pub content: String,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

/// Failures the endpoint reports as `{"status":"error","message":...}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Pipeline(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Pipeline(e) => {
                error!(error = %format!("{:#}", e), "content generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
            }
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(crew: Arc<ContentCrew>) -> Router {
    Router::new()
        .route("/api/generate-content", post(generate_content))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(crew)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate_content(
    State(crew): State<Arc<ContentCrew>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(content_type = %request.content_type, topic = %request.topic, "generating content");
    let output = crew.kickoff(&request).await.map_err(ApiError::Pipeline)?;

    Ok(Json(GenerateResponse {
        status: "success".to_string(),
        content: output.raw,
        metadata: ResponseMetadata {
            content_type: request.content_type,
            topic: request.topic,
            target_audience: request.target_audience,
            tone: request.tone,
            timestamp: Local::now().to_rfc3339(),
        },
    }))
}

/// Serve on `listener` until the process stops
pub async fn serve(crew: Arc<ContentCrew>, listener: TcpListener) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(%addr, "content API listening");

    axum::serve(listener, router(crew))
        .await
        .context("HTTP server error")
}
