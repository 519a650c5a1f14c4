//! Response envelopes exposed by the JSON API endpoints.

use serde::Serialize;

use crate::services::notify::NotifyOutcome;

/// Outcome of a client delete request.
///
/// A blocked delete is a structured refusal carrying the dependent count,
/// not a generic error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeleteClientResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "interventionCount", skip_serializing_if = "Option::is_none")]
    pub intervention_count: Option<i64>,
}

impl DeleteClientResponse {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: "Client deleted".to_string(),
            intervention_count: None,
        }
    }

    pub fn refused(intervention_count: i64) -> Self {
        Self {
            success: false,
            message: format!(
                "Cannot delete client: {intervention_count} intervention(s) still reference it"
            ),
            intervention_count: Some(intervention_count),
        }
    }
}

/// Outer envelope of the completion notification endpoint.
///
/// Always serialized with a 200-class status so the calling UI can decode a
/// single shape; downstream failures travel inside `result`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotifyEnvelope {
    pub success: bool,
    pub result: NotifyOutcome,
}

impl From<NotifyOutcome> for NotifyEnvelope {
    fn from(result: NotifyOutcome) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Generic structured error body for 404/500 responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
