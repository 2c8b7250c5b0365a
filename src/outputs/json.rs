//! JSON output of a run's records.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-06-10/
//!     ├── meetup.json
//!     └── eventbrite.json
//! ```
//!
//! A later run on the same day for the same source replaces the file.

use crate::models::EventRecords;
use chrono::Local;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write records to `{json_output_dir}/{local_date}/{source}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_records(
    records: &EventRecords,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;

    let local_date = Local::now().date_naive().to_string();
    let full_json_dir = format!("{}/{}", json_output_dir.trim_end_matches('/'), local_date);

    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{}/{}.json", full_json_dir, records.source());
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, count = records.len(), "Wrote JSON records");

    Ok(output_json_filename)
}
