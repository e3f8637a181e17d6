//! HTTP surface.
//!
//! Request/response JSON mirrors the client contract: camelCase fields,
//! `{error}` bodies on failure. The server holds no session state between
//! requests; clients send their transcript and site structure on every
//! chat call.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use pagesmith_core::PagesmithError;
use pagesmith_core::agent::AgentKind;
use pagesmith_core::page::{ChangeRecord, Page};
use pagesmith_core::pipeline::{
    CompletionClient, ImageDecision, ImageRef, PipelineConfig, PromptPipeline,
};
use pagesmith_core::session::TranscriptEntry;
use pagesmith_core::site::{HostMetadata, Site, SiteListPage, SiteMetadata, SiteRepository, SiteSummary};

use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub completions: Arc<dyn CompletionClient>,
    pub sites: Arc<dyn SiteRepository>,
    pub pipeline_config: PipelineConfig,
}

/// Builds the API router with CORS enabled.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/host", post(host))
        .route("/api/sites", get(list_sites))
        .route("/api/recentsites", get(recent_sites))
        .route("/api/sites/:site_id", get(get_site))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    prompt: String,
    #[serde(default)]
    previous_messages: Vec<TranscriptEntry>,
    #[serde(default)]
    site_structure: Vec<Page>,
    #[serde(default)]
    agent_type: AgentKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    response: String,
    changes: Vec<ChangeRecord>,
    image_decision: ImageDecision,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    image_urls: Vec<ImageRef>,
}

/// Maps a body that failed JSON extraction onto the shared `{error}`
/// response shape instead of axum's plain-text rejection.
fn invalid_body(rejection: JsonRejection) -> ApiError {
    PagesmithError::validation(rejection.body_text()).into()
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body.map_err(invalid_body)?;
    info!(
        agent = ?request.agent_type,
        pages = request.site_structure.len(),
        history = request.previous_messages.len(),
        "chat request"
    );

    let pipeline = PromptPipeline::new(state.completions.clone(), state.pipeline_config.clone());
    let result = pipeline
        .run(
            request.agent_type,
            &request.prompt,
            &request.previous_messages,
            &request.site_structure,
        )
        .await?;

    Ok(Json(ChatResponse {
        response: result.response_text,
        changes: result.changes,
        image_decision: result.image_decision,
        image_urls: result.image_urls,
    }))
}

#[derive(Deserialize)]
struct HostRequest {
    #[serde(default)]
    pages: Option<Value>,
    #[serde(default)]
    metadata: Option<HostMetadata>,
}

async fn host(
    State(state): State<AppState>,
    body: Result<Json<HostRequest>, JsonRejection>,
) -> Result<Json<pagesmith_core::site::HostReceipt>, ApiError> {
    let Json(request) = body.map_err(invalid_body)?;
    let pages = match request.pages {
        Some(Value::Array(items)) => serde_json::from_value::<Vec<Page>>(Value::Array(items))
            .map_err(|err| PagesmithError::validation(format!("Invalid pages array: {err}")))?,
        _ => return Err(PagesmithError::validation("Pages array is required").into()),
    };

    let site_id = Uuid::new_v4().to_string();
    let metadata = SiteMetadata::from_request(request.metadata, &pages);
    info!(site_id = %site_id, pages = pages.len(), "hosting site");

    let receipt = state.sites.host_site(pages, site_id, metadata).await?;
    Ok(Json(receipt))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SitesQuery {
    #[serde(default)]
    start_after: Option<String>,
}

async fn list_sites(
    State(state): State<AppState>,
    Query(query): Query<SitesQuery>,
) -> Result<Json<SiteListPage>, ApiError> {
    let page = state.sites.list_sites(query.start_after).await?;
    Ok(Json(page))
}

#[derive(Serialize)]
struct RecentSitesResponse {
    sites: Vec<SiteSummary>,
}

async fn recent_sites(
    State(state): State<AppState>,
) -> Result<Json<RecentSitesResponse>, ApiError> {
    let sites = state.sites.list_recent_sites().await?;
    Ok(Json(RecentSitesResponse { sites }))
}

async fn get_site(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Result<Json<Site>, ApiError> {
    match state.sites.get_site(&site_id).await? {
        Some(site) => Ok(Json(site)),
        None => Err(PagesmithError::not_found("site", site_id).into()),
    }
}
