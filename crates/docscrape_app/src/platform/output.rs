use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use docscrape_core::Row;
use docscrape_engine::{results_filename, AtomicFileWriter, Mode};
use scrape_logging::scrape_info;

use super::cli::OutputMode;

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Sends header-first `rows` wherever `output` asks for.
pub fn control_output(
    rows: &[Row],
    output: Option<OutputMode>,
    mode: Mode,
    results_dir: &Path,
) -> anyhow::Result<()> {
    match output {
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(render_lines(rows).as_bytes())?;
            stdout.flush()?;
        }
        Some(OutputMode::Pretty) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(render_pretty(rows).as_bytes())?;
            stdout.flush()?;
        }
        Some(OutputMode::File) => {
            let timestamp = Local::now().format(DATETIME_FORMAT).to_string();
            let path = file_output(rows, mode, results_dir, &timestamp)?;
            scrape_info!("Results saved to: {}", path.display());
        }
    }
    Ok(())
}

fn file_output(rows: &[Row], mode: Mode, results_dir: &Path, timestamp: &str) -> anyhow::Result<PathBuf> {
    let filename = results_filename(mode.name(), timestamp);
    AtomicFileWriter::new(results_dir.to_path_buf())
        .write(&filename, render_csv(rows))
        .with_context(|| format!("cannot save results to {}", results_dir.display()))
}

/// One row per line, cells separated by a space.
fn render_lines(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Left-aligned ASCII table; the first row is the header.
fn render_pretty(rows: &[Row]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let mut widths = vec![0usize; header.len()];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .chain(std::iter::once("+\n".to_string()))
        .collect();
    let line = |row: &Row| -> String {
        let mut out = String::new();
        for (cell, width) in row.iter().zip(&widths) {
            let pad = width - cell.chars().count();
            out.push_str(&format!("| {}{} ", cell, " ".repeat(pad)));
        }
        out.push_str("|\n");
        out
    };

    let mut out = border.clone();
    out.push_str(&line(header));
    out.push_str(&border);
    for row in &rows[1..] {
        out.push_str(&line(row));
    }
    out.push_str(&border);
    out
}

/// Every field quoted, `"` doubled, `\n` line endings.
fn render_csv(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}
