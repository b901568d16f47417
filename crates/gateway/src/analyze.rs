//! The `/analyze` handler and its request validation.

use {
    axum::{
        Json,
        extract::{Query, State},
        response::{IntoResponse, Response},
    },
    serde::Deserialize,
    sitelens_common::validate_analysis_url,
    tracing::debug,
    url::Url,
};

use crate::{error::ApiError, server::AppState};

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub url: Option<String>,
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Response {
    // Reject before any browser resource is allocated.
    let url = match validate_url(params.url.as_deref()) {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };

    debug!(url = %url, "analysis requested");

    match state.analyzer.analyze(&url).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => ApiError::from_browser(&e, state.debug_errors).into_response(),
    }
}

/// Validate the `url` query parameter: required, absolute, http/https.
fn validate_url(raw: Option<&str>) -> Result<Url, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::validation("url query parameter is required"))?;
    validate_analysis_url(raw).map_err(|e| ApiError::validation(e.to_string()))
}
