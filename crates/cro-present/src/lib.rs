//! # cro-present
//!
//! Pure presentation for report records: no I/O, no state of its own.
//!
//! [`present`] maps `{record, is_loading, error}` to exactly one
//! [`DisplayState`]. Loading wins over a stale record; an error wins over a
//! record; no record and no error is [`DisplayState::Empty`], never an error.
//! Loaded reports carry a [`ReportView`] whose sections follow the record's
//! insight order, with headings from [`humanize_key`].

mod humanize;
mod render;
mod state;
mod view;

pub use humanize::humanize_key;
pub use render::{
    EMPTY_HISTORY_TEXT, EMPTY_REPORT_TEXT, LOADING_HISTORY_TEXT, LOADING_REPORT_TEXT,
    render_history_text, render_text,
};
pub use state::{
    DisplayState, HistoryInput, HistoryState, PresenterInput, present, present_history,
};
pub use view::{HistoryEntry, InsightSection, ReportView, SectionBody, confidence_percent};
