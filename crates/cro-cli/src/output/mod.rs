use cro_present::{DisplayState, HistoryState, render_history_text, render_text};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Anything printable in every output format.
pub trait Presentable: Serialize {
    fn to_text(&self) -> String;
    fn to_table(&self, style: table::TableStyle) -> String;
}

impl Presentable for DisplayState {
    fn to_text(&self) -> String {
        render_text(self)
    }

    fn to_table(&self, style: table::TableStyle) -> String {
        let Self::Loaded(view) = self else {
            return render_text(self);
        };
        table::report_table(view, style)
    }
}

impl Presentable for HistoryState {
    fn to_text(&self) -> String {
        render_history_text(self)
    }

    fn to_table(&self, style: table::TableStyle) -> String {
        let Self::Loaded { reports } = self else {
            return render_history_text(self);
        };
        table::history_table(reports, style)
    }
}

/// Render a state to a string in the requested format.
pub fn render<T: Presentable>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(value.to_table(table::TableStyle {
            width: table::terminal_width(),
            color: ui::prefs().color,
        })),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a state in the requested format.
pub fn output<T: Presentable>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a report state. Error states go to stdout only for machine formats;
/// human formats leave the message to the top-level error handler on stderr.
pub fn output_report(state: &DisplayState, format: OutputFormat) -> anyhow::Result<()> {
    if state.is_error() && !format.is_machine() {
        return Ok(());
    }
    output(state, format)
}

pub fn output_history(state: &HistoryState, format: OutputFormat) -> anyhow::Result<()> {
    if matches!(state, HistoryState::Error { .. }) && !format.is_machine() {
        return Ok(());
    }
    output(state, format)
}
