//! Outbound completion notification towards the calendar bridge.
//!
//! Split in two halves so the blocking store read and the async HTTP call
//! can live on their respective runtimes: [`prepare_completion`] resolves
//! the intervention into a payload against the repository, and
//! [`dispatch_completion`] performs a single POST attempt. Delivery is
//! fire-and-forget; nothing about the outcome is persisted, so a retried
//! request simply notifies again.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use crate::domain::types::InterventionId;
use crate::models::config::CalendarSettings;
use crate::repository::{ClientReader, InterventionReader};
use crate::services::{ServiceError, ServiceResult};

/// Terminal state of one notification attempt, reported to the caller
/// inside a 200 envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotifyOutcome {
    /// The intervention carries no calendar event id; nothing to notify.
    Skipped,
    /// No endpoint is configured; the request is acknowledged but inert.
    Misconfigured,
    /// The bridge answered with a success status.
    Acked { response: Value },
    /// The bridge answered with an error status, or the request never
    /// reached it (`http_status` is absent for transport failures).
    DownstreamFailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        http_status: Option<u16>,
        body: String,
    },
}

/// Body POSTed to the calendar bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionPayload {
    pub gcal_event_id: String,
    pub reference: String,
    pub description: String,
}

pub(crate) fn build_payload(
    gcal_event_id: String,
    reference: &str,
    first_name: &str,
    last_name: &str,
) -> CompletionPayload {
    let description = format!(
        "Intervention {reference} completed for {} {}",
        first_name.trim(),
        last_name.trim()
    );
    CompletionPayload {
        gcal_event_id,
        reference: reference.to_string(),
        description,
    }
}

/// Resolves an intervention into a notification payload.
///
/// Returns `Ok(None)` when the intervention has no calendar event id, and
/// [`ServiceError::NotFound`] when it does not exist. A missing client row
/// degrades to empty names rather than blocking the notification.
pub fn prepare_completion<R>(
    repo: &R,
    intervention_id: InterventionId,
) -> ServiceResult<Option<CompletionPayload>>
where
    R: InterventionReader + ClientReader + ?Sized,
{
    let intervention = repo
        .get_intervention_by_id(intervention_id)?
        .ok_or(ServiceError::NotFound)?;

    let Some(gcal_event_id) = intervention.gcal_event_id else {
        return Ok(None);
    };

    let client = repo.get_client_by_id(intervention.client_id)?;
    let (first_name, last_name) = client
        .map(|c| {
            (
                c.first_name.unwrap_or_default(),
                c.last_name.unwrap_or_default(),
            )
        })
        .unwrap_or_default();

    Ok(Some(build_payload(
        gcal_event_id,
        &intervention.reference,
        &first_name,
        &last_name,
    )))
}

/// Builds the optional static credential header.
///
/// The header is attached only when both its name and value are configured;
/// a malformed pair is a deployment error and maps to
/// [`ServiceError::Configuration`].
fn credential_header(
    settings: &CalendarSettings,
) -> ServiceResult<Option<(HeaderName, HeaderValue)>> {
    let (Some(name), Some(value)) = (&settings.auth_header_name, &settings.auth_header_value)
    else {
        return Ok(None);
    };

    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ServiceError::Configuration(format!("invalid auth header name: {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| ServiceError::Configuration(format!("invalid auth header value: {e}")))?;
    Ok(Some((name, value)))
}

fn map_response(status: StatusCode, body: String) -> NotifyOutcome {
    if status.is_success() {
        let response = serde_json::from_str(&body).unwrap_or(Value::String(body));
        NotifyOutcome::Acked { response }
    } else {
        NotifyOutcome::DownstreamFailed {
            http_status: Some(status.as_u16()),
            body,
        }
    }
}

/// Performs one delivery attempt. No retries: the caller decides whether to
/// resubmit based on the reported outcome.
pub async fn dispatch_completion(
    http: &reqwest::Client,
    settings: &CalendarSettings,
    payload: &CompletionPayload,
) -> ServiceResult<NotifyOutcome> {
    let Some(endpoint) = &settings.endpoint else {
        return Ok(NotifyOutcome::Misconfigured);
    };
    let url = Url::parse(endpoint)
        .map_err(|e| ServiceError::Configuration(format!("invalid calendar endpoint: {e}")))?;

    let mut request = http.post(url).json(payload);
    if let Some((name, value)) = credential_header(settings)? {
        request = request.header(name, value);
    }

    match request.send().await {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(map_response(status, body))
        }
        Err(e) => Ok(NotifyOutcome::DownstreamFailed {
            http_status: None,
            body: e.to_string(),
        }),
    }
}
