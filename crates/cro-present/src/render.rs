//! Plain-text rendering of display states for terminals and logs.

use std::fmt::Write as _;

use crate::state::{DisplayState, HistoryState};
use crate::view::{ReportView, SectionBody};

pub const LOADING_REPORT_TEXT: &str = "Generating CRO report...";
pub const EMPTY_REPORT_TEXT: &str = "Enter a URL to get a CRO analysis report.";
pub const LOADING_HISTORY_TEXT: &str = "Loading recent reports...";
pub const EMPTY_HISTORY_TEXT: &str = "No recent reports found. Analyze a page to get started!";

const INDENT: &str = "  ";

/// Render one report state as multi-line text without a trailing newline.
#[must_use]
pub fn render_text(state: &DisplayState) -> String {
    match state {
        DisplayState::Loading => LOADING_REPORT_TEXT.to_string(),
        DisplayState::Error { message, .. } => format!("Error: {message}"),
        DisplayState::Empty => EMPTY_REPORT_TEXT.to_string(),
        DisplayState::Loaded(view) => render_view(view),
    }
}

/// Render the recent-reports list, one entry per line, newest first.
#[must_use]
pub fn render_history_text(state: &HistoryState) -> String {
    match state {
        HistoryState::Loading => LOADING_HISTORY_TEXT.to_string(),
        HistoryState::Error { message, .. } => format!("Error: {message}"),
        HistoryState::Empty => EMPTY_HISTORY_TEXT.to_string(),
        HistoryState::Loaded { reports } => {
            let mut out = String::from("Recent Reports");
            for entry in reports {
                let _ = write!(
                    out,
                    "\n{INDENT}{}  {}  {}",
                    entry.id, entry.generated_at, entry.url
                );
                if let Some(percent) = entry.confidence_percent {
                    let _ = write!(out, "  ({percent}%)");
                }
            }
            out
        }
    }
}

fn render_view(view: &ReportView) -> String {
    let mut out = String::from("CRO Report");
    let _ = write!(out, "\nURL: {}", view.url);
    let _ = write!(out, "\nGenerated: {}", view.generated_at);
    if let Some(percent) = view.confidence_percent {
        let _ = write!(out, "\nConfidence: {percent}%");
    }
    let _ = write!(out, "\nID: {}", view.id);

    for section in &view.sections {
        let _ = write!(out, "\n\n{}", section.heading);
        match &section.body {
            SectionBody::Text(text) if text.trim().is_empty() => {
                let _ = write!(out, "\n{INDENT}-");
            }
            SectionBody::Text(text) => {
                for line in text.lines() {
                    let _ = write!(out, "\n{INDENT}{line}");
                }
            }
            SectionBody::List(items) if items.is_empty() => {
                let _ = write!(out, "\n{INDENT}(none)");
            }
            SectionBody::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    let _ = write!(out, "\n{INDENT}{}. {item}", index + 1);
                }
            }
        }
    }
    out
}
