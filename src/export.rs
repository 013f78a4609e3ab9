//! File export: the narrative report and filtered record sets.
//!
//! The report is written verbatim as Markdown — including the explanatory
//! body produced when generation failed. Record exports mirror the table
//! column order so downstream tools see the same layout as the store.

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::models::{ExportFormat, TabulationRecord};
use crate::schema::tabulations;

/// Save the narrative report as a Markdown file
pub fn save_report(report: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(report.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Export records in the given format.
///
/// An empty record set writes the CSV header only, or an empty JSON array.
pub fn write_records(
    records: &[TabulationRecord],
    format: ExportFormat,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => write_csv(records, path),
        ExportFormat::Json => write_json(records, path),
    }
}

fn write_csv(records: &[TabulationRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    writer.write_record([
        tabulations::ID,
        tabulations::TIMESTAMP,
        tabulations::CLIENT_NAME,
        tabulations::SOCIAL_NETWORK,
        tabulations::MESSAGE_TEXT,
        tabulations::LINK,
        tabulations::RATING,
        tabulations::REASON,
        tabulations::DESTINATION_CENTER,
        tabulations::SENTIMENT,
        tabulations::DATE_ONLY,
    ])?;

    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.client_name.clone(),
            record.social_network.to_string(),
            record.message_text.clone().unwrap_or_default(),
            record.link.clone().unwrap_or_default(),
            record.rating.map(|r| r.to_string()).unwrap_or_default(),
            record.reason.to_string(),
            record.destination_center.clone(),
            record.sentiment.to_string(),
            record.date_only.format("%Y-%m-%d").to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json(records: &[TabulationRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
