use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;

#[derive(Serialize)]
struct ClearResponse {
    cleared: usize,
}

/// Handle `cro clear`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cleared = ctx.gateway.clear_history().await?;

    let response = ClearResponse { cleared };
    match flags.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Raw => println!("{}", serde_json::to_string(&response)?),
        OutputFormat::Text | OutputFormat::Table => {
            if !flags.quiet {
                println!("Cleared {cleared} report(s).");
            }
        }
    }
    Ok(())
}
