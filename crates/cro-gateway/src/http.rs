//! Shared HTTP response helpers for the remote strategy.
//!
//! Centralizes status-code checks (non-success → [`ReportError::Remote`] with
//! the server's `error` message when present) and transport failure mapping,
//! so `remote.rs` stays focused on request construction.

use cro_core::ReportError;
use serde::Deserialize;

/// Error body shape returned by the analysis service.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise reads the body and
/// returns [`ReportError::Remote`] carrying the server-supplied message, or
/// `fallback` when the body has none.
pub async fn check_response(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, ReportError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ReportError::remote(
        Some(status.as_u16()),
        server_message(&body).unwrap_or_else(|| fallback.to_string()),
    ))
}

/// Extract `error` (or `message`) from a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Map a failure to obtain a response into the transport error kind.
pub fn transport(error: &reqwest::Error) -> ReportError {
    let detail = if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("could not connect: {error}")
    } else {
        error.to_string()
    };
    ReportError::Transport(detail)
}

/// Map a failure while reading a successful response body.
///
/// A body that arrived but does not decode is the service's fault
/// ([`ReportError::Remote`]); a body that stopped arriving is transport.
pub fn body_error(error: &reqwest::Error, status: u16) -> ReportError {
    if error.is_decode() {
        ReportError::remote(Some(status), format!("malformed response from service: {error}"))
    } else {
        transport(error)
    }
}
