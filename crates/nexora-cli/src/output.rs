//! Terminal output: status lines, settings fields, path lists and spinners.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Status glyph in front of a one-line message.
#[derive(Debug, Clone, Copy)]
enum Mark {
    Done,
    Caution,
    Note,
}

impl Mark {
    fn glyph(self) -> &'static str {
        match self {
            Self::Done => "\u{2713}",
            Self::Caution => "\u{26a0}",
            Self::Note => "\u{2139}",
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Done => text.green().to_string(),
            Self::Caution => text.yellow().to_string(),
            Self::Note => text.blue().to_string(),
        }
    }
}

/// Writes command results to stdout in the resolved format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };
        let no_color =
            args.no_color || config.output.no_color || resolved_format == OutputFormat::Plain;

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Done, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Caution, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Note, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.print(text)
        } else {
            self.print(&text.cyan().bold().to_string())
        }
    }

    /// `label: value`, indented, with the label column `width` wide.
    pub fn field(&self, label: &str, value: &str, width: usize) -> io::Result<()> {
        let label = format!("{label}:");
        let label = if self.no_color {
            label
        } else {
            label.dimmed().to_string()
        };
        // Pad on the visible width so ANSI codes do not shift the column.
        let pad = (width + 1).saturating_sub(console::measure_text_width(&label));
        self.print(&format!("  {label}{} {value}", " ".repeat(pad)))
    }

    /// Captioned list of paths; prints nothing for an empty slice.
    pub fn list<T: AsRef<str>>(&self, caption: &str, items: &[T]) -> io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.print(&format!("  {caption} ({}):", items.len()))?;
        items
            .iter()
            .try_for_each(|item| self.print(&format!("    {}", item.as_ref())))
    }

    /// Spinner that only shows for human output outside quiet mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    fn marked(&self, mark: Mark, msg: &str) -> io::Result<()> {
        self.print(&self.marked_line(mark, msg))
    }

    fn marked_line(&self, mark: Mark, msg: &str) -> String {
        if self.no_color {
            format!("{} {msg}", mark.glyph())
        } else {
            format!("{} {}", mark.paint(mark.glyph()).bold(), mark.paint(msg))
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
