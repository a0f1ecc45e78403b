//! Axum route handlers for the Description API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::description::{render_description, segment, RenderedDescription, Section};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub description: String,
    /// Scraper source tag, e.g. `PRACTICAS_PE`. Unknown tags are not an error.
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    /// False when the source does not use sectioned descriptions.
    pub applicable: bool,
    pub sections: Vec<Section>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/descriptions/segment
///
/// Returns the raw segmentation result, keeping "not applicable" and
/// "no sections" apart.
pub async fn handle_segment(
    State(state): State<AppState>,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<SegmentResponse>, AppError> {
    validate_request(&request, &state.config)?;

    let segmentation = segment(&request.description, &request.source);
    let response = SegmentResponse {
        applicable: segmentation.is_applicable(),
        sections: segmentation.into_sections().unwrap_or_default(),
    };

    info!(
        source = %request.source,
        applicable = response.applicable,
        sections = response.sections.len(),
        "Description segmented"
    );

    Ok(Json(response))
}

/// POST /api/v1/descriptions/render
///
/// Returns what the dashboard should display: sections, or the raw text.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<RenderedDescription>, AppError> {
    validate_request(&request, &state.config)?;

    let rendered = render_description(&request.description, &request.source);
    if matches!(rendered, RenderedDescription::Raw { .. }) {
        info!(source = %request.source, "Falling back to raw description");
    }

    Ok(Json(rendered))
}

fn validate_request(request: &DescriptionRequest, config: &Config) -> Result<(), AppError> {
    if request.source.trim().is_empty() {
        return Err(AppError::Validation("source cannot be empty".to_string()));
    }

    let length = request.description.chars().count();
    if length > config.max_description_chars {
        return Err(AppError::Validation(format!(
            "description is {length} characters, limit is {}",
            config.max_description_chars
        )));
    }

    Ok(())
}
