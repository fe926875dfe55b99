use cro_present::{HistoryInput, present_history};

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output_history;

/// Handle `cro recent`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.max_reports());
    let result = ctx.gateway.fetch_recent().await.map(|mut records| {
        records.truncate(limit);
        records
    });

    output_history(&present_history(HistoryInput::from_result(&result)), flags.format)?;
    result?;
    Ok(())
}
