//! Output formatting abstraction for text vs JSON rendering
//!
//! All subcommand output flows through [`OutputWriter`] which handles format switching.
//! Validation diagnostics in text mode are drawn by [`ConsoleSink`].

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use logwarden_validator::ReportSink;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Maximum width of the first table column before it wraps.
pub const FIRST_COLUMN_WIDTH: usize = 70;

/// Abstraction for writing CLI output in different formats.
///
/// Subcommand handlers call `writer.render(&payload)` where `payload`
/// implements both `Serialize` (for JSON) and `Render` (for text).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a payload to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.render_to(payload, &mut handle)
    }

    /// Render a payload to an arbitrary writer.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, serialises via `serde_json`.
    pub fn render_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => {
                payload.render_text(w)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// Terminal renderer for validation diagnostics.
///
/// Titles are bold red, list positions bold magenta, tables boxed.
/// [`ReportSink`] is infallible, so the first write error is kept and
/// returned by [`ConsoleSink::finish`].
pub struct ConsoleSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and return the first write error, if any.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }

    fn write_lines(&mut self, lines: &[String]) {
        if self.error.is_some() {
            return;
        }
        for line in lines {
            if let Err(e) = writeln!(self.out, "{line}") {
                self.error = Some(e);
                return;
            }
        }
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn title(&mut self, text: &str) {
        let line = text.red().bold().to_string();
        self.write_lines(&[line]);
    }

    fn ordered_item(&mut self, position: usize, text: &str) {
        let line = format!("{}{}", format!("{position}) ").magenta().bold(), text);
        self.write_lines(&[line]);
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        let lines = draw_table(rows, FIRST_COLUMN_WIDTH);
        self.write_lines(&lines);
    }
}

/// Draw a boxed table. The first row is the header; the first column wraps
/// at `first_width` characters. Embedded newlines start a new line in the cell.
pub fn draw_table(rows: &[Vec<String>], first_width: usize) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let wrapped: Vec<Vec<Vec<String>>> = rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|col| {
                    let cell = row.get(col).map(String::as_str).unwrap_or("");
                    let lines = cell.split('\n').map(|line| line.trim_end_matches('\r'));
                    if col == 0 {
                        lines.flat_map(|line| wrap(line, first_width)).collect()
                    } else {
                        lines.map(str::to_owned).collect()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            wrapped
                .iter()
                .flat_map(|row| row[col].iter())
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };

    let mut lines = vec![border("┌", "┬", "┐")];
    for (idx, row) in wrapped.iter().enumerate() {
        let height = row.iter().map(Vec::len).max().unwrap_or(1);
        for line_no in 0..height {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| {
                    let text = cell.get(line_no).map(String::as_str).unwrap_or("");
                    let padded = format!("{text:<width$}");
                    if idx == 0 {
                        padded.bold().to_string()
                    } else {
                        padded
                    }
                })
                .collect();
            lines.push(format!("│ {} │", cells.join(" │ ")));
        }
        if idx == 0 && wrapped.len() > 1 {
            lines.push(border("├", "┼", "┤"));
        }
    }
    lines.push(border("└", "┴", "┘"));
    lines
}

/// Greedy word wrap by character count. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.chars().count() <= width {
        return vec![text.to_owned()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
