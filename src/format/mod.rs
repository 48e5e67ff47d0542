//! Output formatting for product records (table, JSON, markdown, CSV) and persistence.

use crate::config::OutputFormat;
use crate::llm::models::ProductRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Serialises records as a JSON array indented with four spaces.
///
/// Non-ASCII text is written verbatim.
pub fn to_json(records: &[ProductRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer).context("Failed to serialize product records")?;

    String::from_utf8(buf).context("Serialized records are not valid UTF-8")
}

/// Writes records to `path` as UTF-8 JSON, creating parent directories.
pub fn write_json(path: &Path, records: &[ProductRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = to_json(records)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Formats records for stdout.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[ProductRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_header().to_string(),
                _ => "No products extracted.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => to_json(records).unwrap_or_else(|_| "[]".to_string()),
            OutputFormat::Table => self.table(records),
            OutputFormat::Markdown => self.markdown(records),
            OutputFormat::Csv => self.csv(records),
        }
    }

    // Table formatting

    fn table(&self, records: &[ProductRecord]) -> String {
        let id_width = 12;
        let price_width = 14;
        let title_width = 60;

        let mut lines = Vec::new();

        lines.push(format!("{:<id_width$}  {:>price_width$}  {}", "ID", "Price", "Title"));
        lines.push(format!("{:-<id_width$}  {:-<price_width$}  {:-<title_width$}", "", "", ""));

        for record in records {
            lines.push(format!(
                "{:<id_width$}  {:>price_width$.2}  {}",
                truncate(&record.id, id_width),
                record.price,
                truncate(&record.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Title | Image |".to_string());
        lines.push("|----|-------|-------|-------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {:.2} | {} | [image]({}) |",
                record.id,
                record.price,
                truncate(&record.title, 40).replace('|', "\\|"),
                record.image_url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products extracted*", records.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header() -> &'static str {
        "id,title,price,image_url,description"
    }

    fn csv(&self, records: &[ProductRecord]) -> String {
        let mut lines = vec![Self::csv_header().to_string()];

        for record in records {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&record.id),
                Self::csv_escape(&record.title),
                record.price,
                Self::csv_escape(&record.image_url),
                Self::csv_escape(&record.description)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `s` to `max` characters, ending with "..." when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
