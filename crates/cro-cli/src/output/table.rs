//! Layout for `--format table`.
//!
//! Two shapes: the history table (`id`, `generated`, `confidence`, `url`)
//! and the report table (`section`, `content`). Leading columns take their
//! natural width. The trailing column gets what is left of the terminal and
//! is cut with `…` when it does not fit.

use cro_present::{HistoryEntry, ReportView, SectionBody};

const GAP: &str = "  ";
/// The trailing column never shrinks below this; narrower terminals wrap.
const MIN_TRAILING: usize = 12;
/// `COLUMNS` values below this are ignored.
const MIN_TERMINAL: usize = 40;

#[derive(Clone, Copy, Debug, Default)]
pub struct TableStyle {
    /// Total width to fit, if known.
    pub width: Option<usize>,
    /// Tint the confidence column by band.
    pub color: bool,
}

/// Terminal width from `COLUMNS`, when set to something usable.
#[must_use]
pub fn terminal_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width >= MIN_TERMINAL)
}

#[must_use]
pub fn history_table(entries: &[HistoryEntry], style: TableStyle) -> String {
    let rows: Vec<[String; 4]> = entries
        .iter()
        .map(|entry| {
            [
                entry.id.clone(),
                entry.generated_at.clone(),
                percent_cell(entry.confidence_percent),
                entry.url.clone(),
            ]
        })
        .collect();
    layout(["id", "generated", "confidence", "url"], &rows, Some(2), style)
}

#[must_use]
pub fn report_table(view: &ReportView, style: TableStyle) -> String {
    let mut rows = vec![
        ["URL".to_string(), view.url.clone()],
        ["Generated".to_string(), view.generated_at.clone()],
        ["Confidence".to_string(), percent_cell(view.confidence_percent)],
        ["ID".to_string(), view.id.clone()],
    ];
    rows.extend(view.sections.iter().map(|section| {
        let content = match &section.body {
            SectionBody::Text(text) => text.replace('\n', " "),
            SectionBody::List(items) => items.join("; "),
        };
        [section.heading.clone(), content]
    }));
    layout(["section", "content"], &rows, None, style)
}

fn percent_cell(percent: Option<u8>) -> String {
    percent.map_or_else(|| "-".to_string(), |p| format!("{p}%"))
}

fn layout<const N: usize>(
    headers: [&str; N],
    rows: &[[String; N]],
    confidence_column: Option<usize>,
    style: TableStyle,
) -> String {
    let mut widths: [usize; N] = std::array::from_fn(|col| {
        rows.iter()
            .map(|row| row[col].chars().count())
            .fold(headers[col].len(), usize::max)
    });

    let last = N - 1;
    if let Some(limit) = style.width {
        let leading = widths[..last].iter().sum::<usize>() + GAP.len() * last;
        widths[last] = widths[last].min(limit.saturating_sub(leading).max(MIN_TRAILING));
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header = headers
        .iter()
        .zip(widths)
        .map(|(name, width)| pad_right(&truncate(name, width), width))
        .collect::<Vec<_>>()
        .join(GAP);
    lines.push(header.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * last));

    for row in rows {
        let line = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (value, width))| {
                let text = truncate(value, width);
                if Some(col) != confidence_column {
                    return pad_right(&text, width);
                }
                let cell = pad_left(&text, width);
                if style.color {
                    tint(&cell, value)
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad_right(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn pad_left(value: &str, width: usize) -> String {
    format!("{value:>width$}")
}

/// Green at 80% and above, yellow from 60%, red below. `-` stays plain.
fn tint(cell: &str, value: &str) -> String {
    let Some(percent) = value
        .strip_suffix('%')
        .and_then(|digits| digits.parse::<u8>().ok())
    else {
        return cell.to_string();
    };
    let code = match percent {
        80.. => "32",
        60..=79 => "33",
        _ => "31",
    };
    format!("\u{1b}[{code}m{cell}\u{1b}[0m")
}
