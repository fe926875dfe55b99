//! # cro-core
//!
//! Core types, ID generation, and error types for cro.
//!
//! This crate provides the foundational types shared across all cro crates:
//! - The immutable [`ReportRecord`] produced by one analysis run
//! - The open-ended, insertion-ordered [`Insights`] mapping
//! - Report ID generation (`rpt-` prefixed)
//! - Submission URL and confidence validation
//! - The surfaced error taxonomy ([`ReportError`], [`ErrorKind`])

pub mod errors;
pub mod ids;
pub mod report;
pub mod validate;

pub use errors::{ErrorKind, ReportError};
pub use report::{InsightValue, Insights, ReportRecord};
