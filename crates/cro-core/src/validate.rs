//! Input validation shared by every gateway strategy.
//!
//! Validation runs before any network call, delay, or store write, so an
//! invalid submission never leaves a partial side effect behind.

use url::Url;

use crate::errors::ReportError;

/// Message shown for an empty or malformed submission URL.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL. Please enter a valid product page URL.";

/// Message shown when a lookup is attempted without an ID.
pub const MISSING_ID_MESSAGE: &str = "Report ID is required";

/// Parse and check a submission URL.
///
/// Accepts only absolute `http`/`https` URLs with a host. Leading and
/// trailing whitespace is ignored.
///
/// # Errors
///
/// Returns [`ReportError::Validation`] when the input is empty, does not
/// parse, uses another scheme, or has no host.
pub fn parse_report_url(input: &str) -> Result<Url, ReportError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReportError::Validation(INVALID_URL_MESSAGE.to_string()));
    }

    let url =
        Url::parse(trimmed).map_err(|_| ReportError::Validation(INVALID_URL_MESSAGE.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(ReportError::Validation(INVALID_URL_MESSAGE.to_string()));
    }

    Ok(url)
}

/// Check that a confidence score, if present, lies in `[0, 1]`.
///
/// Out-of-range and non-finite values are rejected, never clamped.
///
/// # Errors
///
/// Returns [`ReportError::Validation`] for values outside `[0, 1]` or NaN.
pub fn check_confidence(confidence: Option<f64>) -> Result<(), ReportError> {
    match confidence {
        Some(value) if !(0.0..=1.0).contains(&value) => Err(ReportError::Validation(format!(
            "confidence must be within [0, 1], got {value}"
        ))),
        _ => Ok(()),
    }
}

/// Check that a lookup ID is non-blank.
///
/// # Errors
///
/// Returns [`ReportError::Validation`] for an empty or whitespace-only ID.
pub fn check_report_id(id: &str) -> Result<&str, ReportError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ReportError::Validation(MISSING_ID_MESSAGE.to_string()));
    }
    Ok(trimmed)
}
