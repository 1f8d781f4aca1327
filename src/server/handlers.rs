//! Relay endpoint handlers

use crate::analyzer::Analyzer;
use crate::github::TreeEntry;
use crate::repository::RepositoryReference;
use crate::server::error::ApiError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query string of `GET /api/files`
#[derive(Debug, Deserialize)]
pub struct FilesQuery {
    /// Repository URL or `owner/name`
    #[serde(default)]
    pub repo: Option<String>,
}

/// Body of a successful `GET /api/files`
#[derive(Debug, Serialize, Deserialize)]
pub struct FilesResponse {
    /// Source-file entries of the repository tree
    pub files: Vec<TreeEntry>,
}

/// Body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Repository URL or `owner/name`
    pub repo: String,

    /// Paths selected for analysis
    #[serde(default)]
    pub files: Vec<String>,

    /// Optional question replacing the default instruction
    #[serde(default)]
    pub question: Option<String>,
}

/// Body of a successful `POST /api/analyze`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Model output, verbatim
    pub analysis: String,
}

/// `GET /api/files?repo=<url>`
pub async fn list_files(
    State(analyzer): State<Analyzer>,
    query: Result<Query<FilesQuery>, QueryRejection>,
) -> Result<Json<FilesResponse>, ApiError> {
    let Query(query) = query?;
    let repo = query.repo.unwrap_or_default();
    info!("Received request for repo: {}", repo);

    let repo = RepositoryReference::parse(&repo).map_err(ApiError::fetch_files)?;
    let files = analyzer
        .list_source_files(&repo)
        .await
        .map_err(ApiError::fetch_files)?;

    Ok(Json(FilesResponse { files }))
}

/// `POST /api/analyze`
pub async fn analyze(
    State(analyzer): State<Analyzer>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = request?;
    info!(
        "Received analysis request for {} ({} files)",
        request.repo,
        request.files.len()
    );

    let repo = RepositoryReference::parse(&request.repo).map_err(ApiError::analyze)?;
    let analysis = analyzer
        .analyze(&repo, &request.files, request.question.as_deref())
        .await
        .map_err(ApiError::analyze)?;

    Ok(Json(AnalyzeResponse { analysis }))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
