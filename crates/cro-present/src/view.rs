use chrono::{DateTime, Utc};
use cro_core::{InsightValue, ReportRecord};
use serde::Serialize;

use crate::humanize::humanize_key;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Display-ready projection of one [`ReportRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub id: String,
    pub url: String,
    pub generated_at: String,
    pub confidence_percent: Option<u8>,
    pub sections: Vec<InsightSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightSection {
    /// Raw key as stored in the record.
    pub key: String,
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
}

impl From<&InsightValue> for SectionBody {
    fn from(value: &InsightValue) -> Self {
        match value {
            InsightValue::Text(text) => Self::Text(text.clone()),
            InsightValue::List(items) => Self::List(items.clone()),
        }
    }
}

impl From<&ReportRecord> for ReportView {
    fn from(record: &ReportRecord) -> Self {
        let sections = record
            .insight_entries()
            .map(|(key, value)| InsightSection {
                key: key.to_string(),
                heading: humanize_key(key),
                body: SectionBody::from(value),
            })
            .collect();

        Self {
            id: record.id.clone(),
            url: record.url.clone(),
            generated_at: format_time(record.created_at),
            confidence_percent: record.confidence.map(confidence_percent),
            sections,
        }
    }
}

/// One row of the recent-reports list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub generated_at: String,
    pub confidence_percent: Option<u8>,
}

impl From<&ReportRecord> for HistoryEntry {
    fn from(record: &ReportRecord) -> Self {
        Self {
            id: record.id.clone(),
            url: record.url.clone(),
            generated_at: format_time(record.created_at),
            confidence_percent: record.confidence.map(confidence_percent),
        }
    }
}

/// Whole-percent rendering of a `[0, 1]` confidence score, rounded half up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn confidence_percent(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use cro_core::Insights;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.7, 70)]
    #[case(0.826, 83)]
    #[case(0.949, 95)]
    #[case(1.0, 100)]
    fn percent_rounds_to_whole(#[case] confidence: f64, #[case] expected: u8) {
        assert_eq!(confidence_percent(confidence), expected);
    }

    #[test]
    fn view_keeps_insight_order_and_shapes() {
        let mut insights = Insights::new();
        insights.insert("zeta_notes".into(), "last alphabetically, first here".into());
        insights.insert(
            "improvements".into(),
            InsightValue::List(vec!["One".into(), "Two".into()]),
        );
        insights.insert("alpha".into(), "first alphabetically".into());
        let record = ReportRecord::new(
            "https://example.com/p",
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap(),
            Some(0.81),
            insights,
        )
        .unwrap();

        let view = ReportView::from(&record);
        let headings: Vec<&str> = view.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Zeta Notes", "Improvements", "Alpha"]);
        assert_eq!(
            view.sections[1].body,
            SectionBody::List(vec!["One".into(), "Two".into()])
        );
        assert_eq!(view.generated_at, "2026-03-01 09:05 UTC");
        assert_eq!(view.confidence_percent, Some(81));
    }

    #[test]
    fn missing_confidence_stays_absent() {
        let record = ReportRecord::new(
            "https://example.com",
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            None,
            Insights::new(),
        )
        .unwrap();
        let entry = HistoryEntry::from(&record);
        assert_eq!(entry.confidence_percent, None);
        assert!(ReportView::from(&record).sections.is_empty());
    }
}
