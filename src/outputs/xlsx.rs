//! Spreadsheet export.
//!
//! Records are written to a single `Events` sheet: a bold header row, then
//! one row per record, absent values left as blank cells. The workbook is
//! built in memory; [`write_xlsx`] persists it when the caller wants a file.
//!
//! The creation timestamp in the document properties is pinned, so the same
//! records always serialize to the same bytes.

use crate::error::Result;
use crate::models::EventRecords;
use itertools::Itertools;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

pub const FILE_NAME: &str = "Events.xlsx";
pub const MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Events";

/// Column index of `Event Name` in the Eventbrite layout.
const EVENT_NAME_COLUMN: usize = 1;

/// Rows as they will appear in the sheet. Eventbrite rows repeating an
/// earlier `Event Name` are dropped.
pub fn export_rows(records: &EventRecords) -> Vec<Vec<Option<&str>>> {
    let rows = records.rows();
    match records {
        EventRecords::Meetup(_) => rows,
        EventRecords::Eventbrite(_) => rows
            .into_iter()
            .unique_by(|row| row[EVENT_NAME_COLUMN])
            .collect(),
    }
}

/// Serialize records into an `.xlsx` byte buffer.
///
/// # Arguments
///
/// * `records` - A run's records; their shape picks the column set
///
/// # Returns
///
/// The workbook bytes: one `Events` sheet with a bold header row, then one
/// row per record (Eventbrite rows deduplicated by event name). Absent
/// values are left as blank cells. The creation time is pinned, so equal
/// input gives equal bytes.
///
/// # Errors
///
/// Returns [`crate::error::Error::Xlsx`] if the workbook cannot be built.
#[instrument(level = "info", skip_all, fields(source = %records.source(), count = records.len()))]
pub fn to_spreadsheet(records: &EventRecords) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let header_format = Format::new().set_bold();
    let rows = export_rows(records);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in records.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string(row_idx as u32 + 1, col as u16, *value)?;
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    info!(rows = rows.len(), bytes = buffer.len(), "Built spreadsheet");
    Ok(buffer)
}

/// Write a spreadsheet buffer to `{output_dir}/Events.xlsx`.
///
/// # Arguments
///
/// * `output_dir` - Target directory, created if missing
/// * `bytes` - Buffer from [`to_spreadsheet`]
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] if the directory cannot be created or
/// the file cannot be written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_xlsx(output_dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(FILE_NAME);
    fs::write(&path, bytes).await?;
    info!(path = %path.display(), mime = MIME_TYPE, "Wrote spreadsheet");
    Ok(path)
}
