use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Decorations enabled for this run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Tint confidence cells in `--format table` output.
    pub color: bool,
    /// Draw the spinner on stderr while a request is in flight.
    pub progress: bool,
}

/// What the process is attached to.
#[derive(Clone, Copy, Debug)]
struct Terminal {
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
        }
    }
}

impl UiPrefs {
    fn resolve(flags: &GlobalFlags, terminal: Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let color = match flags.color {
            ColorMode::Always => table,
            ColorMode::Never => false,
            ColorMode::Auto => table && terminal.stdout_tty && !terminal.no_color,
        };
        // The spinner shares the terminal with stdout; keep it off when stdout is parsed.
        let progress = terminal.stdout_tty
            && terminal.stderr_tty
            && !flags.quiet
            && !flags.format.is_machine();
        Self { color, progress }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(UiPrefs::resolve(flags, Terminal::detect()));
}

/// Prefs set by [`init`], or everything off before it runs.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
