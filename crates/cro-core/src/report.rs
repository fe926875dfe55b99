//! The report record: one immutable analysis result for a URL.
//!
//! The persisted and wire shape is camelCase JSON:
//!
//! ```json
//! {
//!   "id": "rpt-3fa85f6457b2",
//!   "url": "https://example.com/p",
//!   "createdAt": "2026-02-08T12:00:00Z",
//!   "confidence": 0.82,
//!   "report": {
//!     "layout_analysis": "...",
//!     "improvements": ["...", "..."]
//!   }
//! }
//! ```
//!
//! Older payloads used `timestamp`, `confidenceScore` and `croInsights`; those
//! names are accepted on read and never written.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ReportError;
use crate::ids::generate_report_id;
use crate::validate::{check_confidence, parse_report_url};

/// Canonical insight keys, in the order the analysis backend emits them.
pub mod keys {
    pub const LAYOUT_ANALYSIS: &str = "layout_analysis";
    pub const CTA_EVALUATION: &str = "cta_evaluation";
    pub const IMAGE_QUALITY: &str = "image_quality";
    pub const DESCRIPTION_CLARITY: &str = "description_clarity";
    pub const IMPROVEMENTS: &str = "improvements";

    /// The minimal set usually present in every report.
    pub const CANONICAL: [&str; 4] = [
        LAYOUT_ANALYSIS,
        CTA_EVALUATION,
        IMAGE_QUALITY,
        DESCRIPTION_CLARITY,
    ];
}

/// One insight category's content: a block of text or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum InsightValue {
    Text(String),
    List(Vec<String>),
}

impl InsightValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

impl From<String> for InsightValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for InsightValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for InsightValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Insertion-ordered mapping from insight category to content.
///
/// The key set is open: consumers must iterate entries rather than look up
/// fixed names.
pub type Insights = IndexMap<String, InsightValue>;

/// One analysis result. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub url: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "confidenceScore", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(rename = "report", alias = "croInsights", alias = "insights", default)]
    pub insights: Insights,
}

impl ReportRecord {
    /// Build a new record with a freshly generated ID.
    ///
    /// The URL is normalized through the same parser used for submissions.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] if the URL is not an absolute
    /// `http(s)` URL or the confidence lies outside `[0, 1]`.
    pub fn new(
        url: &str,
        created_at: DateTime<Utc>,
        confidence: Option<f64>,
        insights: Insights,
    ) -> Result<Self, ReportError> {
        let url = parse_report_url(url)?;
        check_confidence(confidence)?;
        Ok(Self {
            id: generate_report_id(),
            url: url.into(),
            created_at,
            confidence,
            insights,
        })
    }

    /// Re-check the invariants of a record that arrived from outside
    /// (storage slot, remote service).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] describing the first violated
    /// invariant.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.id.trim().is_empty() {
            return Err(ReportError::Validation("report id is empty".into()));
        }
        parse_report_url(&self.url)?;
        check_confidence(self.confidence)
    }

    /// Iterate insight entries in their natural order.
    pub fn insight_entries(&self) -> impl Iterator<Item = (&str, &InsightValue)> {
        self.insights.iter().map(|(key, value)| (key.as_str(), value))
    }
}
