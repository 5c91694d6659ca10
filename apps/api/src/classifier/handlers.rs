//! Axum route handlers for the Classification API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::engine::Classifier;
use crate::classifier::exclusion::parse_custom_excludes;
use crate::classifier::models::ClassificationResult;
use crate::errors::AppError;
use crate::rules::CatalogueDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub job_title: String,
    /// Comma-separated extra exclusion terms; `/regex/` entries allowed.
    #[serde(default)]
    pub excludes: Option<String>,
}

/// Titles as a JSON array or as one comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JobTitles {
    List(Vec<String>),
    Csv(String),
}

impl JobTitles {
    /// Non-blank titles in request order. List entries are kept as sent so
    /// `input` echoes them unchanged; CSV pieces are trimmed after the split.
    fn into_titles(self) -> Vec<String> {
        match self {
            JobTitles::List(titles) => titles
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .collect(),
            JobTitles::Csv(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchClassifyRequest {
    pub job_titles: JobTitles,
    #[serde(default)]
    pub excludes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchClassifyResponse {
    pub results: Vec<ClassificationResult>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub version: String,
    pub departments: usize,
    pub source: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /classify
///
/// Classifies one job title. The `input` field echoes `job_title` unchanged.
pub async fn handle_classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let Json(request) = payload?;

    if request.job_title.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "job_title cannot be empty".to_string(),
        ));
    }

    let catalogue = state.rules.snapshot();
    let classifier = Classifier::new(&catalogue, state.config.exclusion_mode);
    let result = classifier
        .classify_with_excludes(&request.job_title, request.excludes.as_deref().unwrap_or(""))?;

    Ok(Json(result))
}

/// POST /classify/batch
///
/// Classifies several titles against one set of excludes and one catalogue
/// snapshot. Results are returned in request order.
pub async fn handle_classify_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchClassifyRequest>, JsonRejection>,
) -> Result<Json<BatchClassifyResponse>, AppError> {
    let Json(request) = payload?;

    let titles = request.job_titles.into_titles();
    if titles.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "job_titles must contain at least one non-empty title".to_string(),
        ));
    }
    if titles.len() > state.config.max_batch_size {
        return Err(AppError::UnprocessableEntity(format!(
            "job_titles has {} entries; the limit is {}",
            titles.len(),
            state.config.max_batch_size
        )));
    }

    let custom = parse_custom_excludes(request.excludes.as_deref().unwrap_or(""))?;
    let catalogue = state.rules.snapshot();
    let classifier = Classifier::new(&catalogue, state.config.exclusion_mode);

    let results = titles
        .iter()
        .map(|title| classifier.classify(title, &custom))
        .collect();

    Ok(Json(BatchClassifyResponse { results }))
}

/// GET /rules
///
/// Returns the active catalogue document.
pub async fn handle_get_rules(State(state): State<AppState>) -> Json<CatalogueDocument> {
    Json(state.rules.snapshot().document().clone())
}

/// POST /rules/reload
///
/// Re-reads the configured catalogue source and swaps it in. A catalogue that
/// fails validation is rejected and the current one stays active.
pub async fn handle_reload_rules(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let catalogue = state.rules.reload().await.map_err(|e| {
        warn!("Rejected rule catalogue from {}: {e}", state.rules.source());
        e
    })?;

    info!("Rule catalogue now at version {}", catalogue.version());

    Ok(Json(ReloadResponse {
        version: catalogue.version().to_string(),
        departments: catalogue.departments().len(),
        source: state.rules.source().to_string(),
    }))
}
