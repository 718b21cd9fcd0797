use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::debug;

use crate::types::RunSummary;

/// Human readable byte count (`512 B`, `1.5 KB`, `2.0 MB`)
pub fn format_bytes(bytes: i64) -> String {
    let sign = if bytes < 0 { "-" } else { "" };
    let abs = bytes.unsigned_abs() as f64;
    if abs < 1024.0 {
        format!("{}{} B", sign, abs as u64)
    } else if abs < 1024.0 * 1024.0 {
        format!("{}{:.1} KB", sign, abs / 1024.0)
    } else {
        format!("{}{:.1} MB", sign, abs / (1024.0 * 1024.0))
    }
}

pub fn print_skipped_output<W: Write>(writer: &mut W, output_dir: &Path) -> io::Result<()> {
    debug!("Output {} was not processed", output_dir.display());
    writeln!(
        writer,
        "{} {} (not processed)",
        "-".dimmed(),
        output_dir.display().to_string().dimmed()
    )
}

pub fn print_summary<W: Write>(
    writer: &mut W,
    output_dir: &Path,
    summary: &RunSummary,
) -> io::Result<()> {
    if summary.is_noop() {
        writeln!(
            writer,
            "{} {} no static scripts to minify",
            "✓".green().bold(),
            output_dir.display().to_string().blue()
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "{} {} minified {} files, saved {}",
        "✓".green().bold(),
        output_dir.display().to_string().blue(),
        summary.files_transformed.to_string().cyan(),
        format_bytes(summary.bytes_saved).green().bold()
    )?;

    if summary.files_transformed > 0 {
        writeln!(
            writer,
            "  {} {} -> {}",
            "└──".dimmed(),
            format_bytes(summary.original_bytes as i64),
            format_bytes(summary.minified_bytes as i64)
        )?;
    }
    if summary.files_skipped > 0 {
        writeln!(writer, "  Skipped: {}", summary.files_skipped.to_string().yellow())?;
    }
    if summary.files_failed > 0 {
        writeln!(writer, "  Failed: {}", summary.files_failed.to_string().red().bold())?;
    }
    Ok(())
}
