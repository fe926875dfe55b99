use cro_core::{ErrorKind, ReportError, ReportRecord};
use serde::Serialize;

use crate::view::{HistoryEntry, ReportView};

/// What the caller currently knows about a single report.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenterInput<'a> {
    pub record: Option<&'a ReportRecord>,
    pub is_loading: bool,
    pub error: Option<&'a ReportError>,
}

impl<'a> PresenterInput<'a> {
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            record: None,
            is_loading: true,
            error: None,
        }
    }

    #[must_use]
    pub const fn loaded(record: &'a ReportRecord) -> Self {
        Self {
            record: Some(record),
            is_loading: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn failed(error: &'a ReportError) -> Self {
        Self {
            record: None,
            is_loading: false,
            error: Some(error),
        }
    }

    /// Input for the outcome of a finished gateway operation.
    #[must_use]
    pub fn from_result(result: &'a Result<ReportRecord, ReportError>) -> Self {
        match result {
            Ok(record) => Self::loaded(record),
            Err(error) => Self::failed(error),
        }
    }
}

/// The single active display state for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    Loading,
    Error { kind: ErrorKind, message: String },
    Empty,
    Loaded(ReportView),
}

impl DisplayState {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Derive the display state. Precedence: loading, then error, then record.
#[must_use]
pub fn present(input: PresenterInput<'_>) -> DisplayState {
    if input.is_loading {
        return DisplayState::Loading;
    }
    if let Some(error) = input.error {
        return DisplayState::Error {
            kind: error.kind(),
            message: error.to_string(),
        };
    }
    input
        .record
        .map_or(DisplayState::Empty, |record| DisplayState::Loaded(ReportView::from(record)))
}

/// What the caller currently knows about the recent-reports list.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryInput<'a> {
    pub records: Option<&'a [ReportRecord]>,
    pub is_loading: bool,
    pub error: Option<&'a ReportError>,
}

impl<'a> HistoryInput<'a> {
    #[must_use]
    pub fn from_result(result: &'a Result<Vec<ReportRecord>, ReportError>) -> Self {
        match result {
            Ok(records) => Self {
                records: Some(records.as_slice()),
                is_loading: false,
                error: None,
            },
            Err(error) => Self {
                records: None,
                is_loading: false,
                error: Some(error),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HistoryState {
    Loading,
    Error { kind: ErrorKind, message: String },
    Empty,
    Loaded { reports: Vec<HistoryEntry> },
}

/// Same precedence as [`present`]; an empty list is [`HistoryState::Empty`].
#[must_use]
pub fn present_history(input: HistoryInput<'_>) -> HistoryState {
    if input.is_loading {
        return HistoryState::Loading;
    }
    if let Some(error) = input.error {
        return HistoryState::Error {
            kind: error.kind(),
            message: error.to_string(),
        };
    }
    match input.records {
        Some(records) if !records.is_empty() => HistoryState::Loaded {
            reports: records.iter().map(HistoryEntry::from).collect(),
        },
        _ => HistoryState::Empty,
    }
}
