use cro_present::{LOADING_REPORT_TEXT, PresenterInput, present};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::context::AppContext;
use crate::output::output_report;
use crate::progress::Progress;

/// Handle `cro analyze <url>`.
pub async fn handle(
    args: &AnalyzeArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let progress = Progress::spinner(LOADING_REPORT_TEXT);
    let result = ctx.gateway.submit(&args.url).await;
    match &result {
        Ok(_) => progress.finish_clear(),
        Err(error) => progress.finish_err(&format!("analysis failed ({})", error.kind())),
    }

    output_report(&present(PresenterInput::from_result(&result)), flags.format)?;
    let record = result?;
    tracing::info!(id = %record.id, strategy = ctx.gateway.name(), "report generated");

    if !args.no_recent && !flags.quiet && !flags.format.is_machine() {
        println!();
        super::recent::handle(ctx, flags).await?;
    }
    Ok(())
}
