//! Output formatting for query results.
//!
//! Rows are printed either as JSON lines (one object per row, keys in column
//! order) or as CSV with a header line.

use anyhow::Result;
use clap::ValueEnum;
use csvmodel::Row;
use std::io::Write;

/// Output format for matching rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Comma-separated values with a header line
    Csv,
}

/// Write `rows` to `out` in `format`.
///
/// `columns` is the selection the rows were narrowed to; it supplies the CSV
/// header when no row matched.
///
/// # Errors
///
/// Fails if serializing or writing fails.
pub fn write_rows(
    out: &mut impl Write,
    rows: &[Row],
    columns: &[String],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, rows),
        OutputFormat::Csv => write_csv(out, rows, columns),
    }
}

fn write_json(out: &mut impl Write, rows: &[Row]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv(out: &mut impl Write, rows: &[Row], columns: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(&mut *out);
    // With no rows the header can only come from an explicit selection.
    match rows.first() {
        Some(first) => writer.write_record(first.header())?,
        None if !columns.is_empty() => writer.write_record(columns)?,
        None => {}
    }
    for row in rows {
        writer.write_record(row.body())?;
    }
    writer.flush()?;
    Ok(())
}
