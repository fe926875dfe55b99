use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Submit a page URL for CRO analysis.
    Analyze(AnalyzeArgs),
    /// List recent reports, newest first.
    Recent,
    /// Show one report by ID.
    Show(ShowArgs),
    /// Delete the local report history (simulated backend only).
    Clear,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Absolute http(s) URL of the page to analyze.
    pub url: String,

    /// Skip listing recent reports after the analysis.
    #[arg(long)]
    pub no_recent: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Report ID (e.g. rpt-3f9a0c12b7de).
    pub id: String,
}
