use cro_present::{PresenterInput, present};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::context::AppContext;
use crate::output::output_report;

/// Handle `cro show <id>`.
pub async fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.gateway.fetch_by_id(&args.id).await;
    output_report(&present(PresenterInput::from_result(&result)), flags.format)?;
    result?;
    Ok(())
}
