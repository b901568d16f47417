//! Failure responses: structured JSON bodies, never raw stacks.

use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    serde::Serialize,
    sitelens_browser::BrowserError,
};

/// Wire shape of every failure: `{ error, details? }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An HTTP failure response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Malformed request, rejected before any browser work.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }

    /// Map a pipeline failure to a status and message.
    ///
    /// Navigation failures are the caller's problem (unreachable target) and
    /// get a client-error status; everything else is a system fault. The
    /// underlying message is only exposed when `debug_errors` is set.
    pub fn from_browser(err: &BrowserError, debug_errors: bool) -> Self {
        let (status, error) = match err {
            BrowserError::NavigationFailed(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "failed to load the target page",
            ),
            BrowserError::LaunchFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "no browser available for analysis",
            ),
            BrowserError::ExtractionFailed(_)
            | BrowserError::JsEvalFailed(_)
            | BrowserError::Cdp(_) => (StatusCode::INTERNAL_SERVER_ERROR, "analysis failed"),
        };

        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: debug_errors.then(|| err.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
