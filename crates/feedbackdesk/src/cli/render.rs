//! Listing output.

use std::io::Write;

use crate::error::Result;
use crate::record::FeedbackRecord;

use super::OutputFormat;

/// Shown instead of a listing when the store is empty.
pub const NO_ENTRIES: &str = "No feedback entries found.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR_WIDTH: usize = 50;
const PREVIEW_CHARS: usize = 40;

/// Write `records` to `out` in the requested format.
///
/// # Errors
///
/// Returns an error if writing fails or JSON serialization fails.
pub fn render_records<W: Write>(
    out: &mut W,
    records: &[FeedbackRecord],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        _ if records.is_empty() => writeln!(out, "{NO_ENTRIES}")?,
        OutputFormat::Plain => render_plain(out, records)?,
        OutputFormat::Table => render_table(out, records)?,
    }
    Ok(())
}

fn render_plain<W: Write>(out: &mut W, records: &[FeedbackRecord]) -> std::io::Result<()> {
    writeln!(out, "=== All Feedback Entries ===")?;
    for record in records {
        writeln!(out)?;
        writeln!(out, "ID: {}", record.id)?;
        writeln!(out, "Name: {}", record.name)?;
        writeln!(out, "Email: {}", record.email)?;
        writeln!(out, "Feedback: {}", record.feedback)?;
        writeln!(out, "Timestamp: {}", record.timestamp.format(TIMESTAMP_FORMAT))?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }
    Ok(())
}

fn render_table<W: Write>(out: &mut W, records: &[FeedbackRecord]) -> std::io::Result<()> {
    let id_width = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let name_width = column_width(records.iter().map(|r| r.name.as_str()), "NAME");
    let email_width = column_width(records.iter().map(|r| r.email.as_str()), "EMAIL");

    writeln!(
        out,
        "{:>id_width$}  {:<19}  {:<name_width$}  {:<email_width$}  FEEDBACK",
        "ID", "TIMESTAMP", "NAME", "EMAIL"
    )?;
    for record in records {
        writeln!(
            out,
            "{:>id_width$}  {:<19}  {:<name_width$}  {:<email_width$}  {}",
            record.id,
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            record.name,
            record.email,
            preview(&record.feedback),
        )?;
    }
    Ok(())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

/// First line of the feedback, cut to a fixed number of characters.
fn preview(feedback: &str) -> String {
    let first_line = feedback.lines().next().unwrap_or_default();
    let truncated = first_line.chars().count() > PREVIEW_CHARS || feedback.lines().nth(1).is_some();
    let mut shown: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if truncated {
        shown.push_str("...");
    }
    shown
}
