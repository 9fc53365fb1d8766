// src/server/handlers.rs
// =============================================================================
// Request handlers behind the browser page.
//
// Each handler receives the shared `AppContext` through axum's State
// extractor and does one step of the page flow:
//   session (form submit) -> explore (tree) -> view (ticked files)
// =============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiResult;
use crate::app::AppContext;
use crate::codecommit::Repository;
use crate::config::ConnectionSettings;
use crate::explorer::{SelectionOutcome, TreeNode};

pub type AppState = Arc<AppContext>;

const PAGE: &str = include_str!("page.html");

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub connected: bool,
    /// True when the environment already names a profile and region, so the
    /// page can skip asking for them
    pub defaults_complete: bool,
    pub traverse: bool,
    /// Repository the tree was last explored for, so a reloaded page can
    /// show it again
    pub repository: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RepositoryList {
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
pub struct ExploreRequest {
    pub repository: String,
}

#[derive(Debug, Serialize)]
pub struct ExploreResponse {
    pub traverse: bool,
    /// Always a single root node, as the tree widget expects a list
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub repository: String,
    #[serde(default)]
    pub checked: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub repository: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(PAGE)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn session_info(State(ctx): State<AppState>) -> Json<SessionInfo> {
    Json(SessionInfo {
        connected: ctx.is_connected().await,
        defaults_complete: ctx.defaults().is_complete(),
        traverse: ctx.traverse_requested().await,
        repository: ctx.explored_repository().await,
    })
}

pub async fn connect(
    State(ctx): State<AppState>,
    Json(form): Json<ConnectionSettings>,
) -> ApiResult<Json<RepositoryList>> {
    ctx.connect(&form).await?;
    let repositories = ctx.repositories().await?;

    Ok(Json(RepositoryList {
        repositories: repositories.as_ref().clone(),
    }))
}

pub async fn repositories(State(ctx): State<AppState>) -> ApiResult<Json<RepositoryList>> {
    let repositories = ctx.repositories().await?;

    Ok(Json(RepositoryList {
        repositories: repositories.as_ref().clone(),
    }))
}

pub async fn explore(
    State(ctx): State<AppState>,
    Json(request): Json<ExploreRequest>,
) -> ApiResult<Json<ExploreResponse>> {
    let tree = ctx.explore(&request.repository).await?;

    Ok(Json(ExploreResponse {
        traverse: ctx.traverse_requested().await,
        nodes: vec![tree.as_ref().clone()],
    }))
}

pub async fn view(
    State(ctx): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> ApiResult<Json<SelectionOutcome>> {
    let outcome = ctx.select(&request.repository, &request.checked).await?;
    Ok(Json(outcome))
}

pub async fn refresh(
    State(ctx): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> StatusCode {
    ctx.refresh(request.repository.as_deref()).await;
    StatusCode::NO_CONTENT
}
