//! # Event Finder
//!
//! Scrapes public event listings from Meetup and Eventbrite for a set of
//! keywords, normalizes and deduplicates the events, and exports them to an
//! `Events.xlsx` spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! event_finder -k "rust, ai" -l Pune --start-date 2025-06-10
//! event_finder -s eventbrite -k "data science" -t online -o ./exports
//! ```
//!
//! ## Architecture
//!
//! Each run is a straight pipeline with no state carried between runs:
//! 1. **Query**: Build one search URL per keyword
//! 2. **Scrape**: Fetch each page in turn and pull candidate events off it
//! 3. **Normalize**: Extract fields and drop duplicates (by URL for Meetup,
//!    by name for Eventbrite)
//! 4. **Output**: Print the table, optionally write JSON, write the workbook

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod extract;
mod models;
mod outputs;
mod query;
mod scrapers;
mod utils;

use cli::{Cli, SearchRequest};
use models::EventRecords;
use outputs::{json, table, xlsx};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("event_finder starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let request = match args.search_request() {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Invalid search; nothing scraped");
            return Err(e.into());
        }
    };

    let client = scrapers::http_client()?;
    let records = run_search(&client, request).await;
    if records.is_empty() {
        warn!(source = %records.source(), "No events found");
    }

    println!("Processed Events:\n{}", table::render(&records));

    if let Some(ref json_output_dir) = args.json_output_dir {
        if let Err(e) = ensure_writable_dir(json_output_dir).await {
            error!(path = %json_output_dir, error = %e, "JSON output directory is not writable");
        } else if let Err(e) = json::write_records(&records, json_output_dir).await {
            error!(error = %e, "Failed to write JSON records");
        }
    }

    let bytes = xlsx::to_spreadsheet(&records)?;
    let path = xlsx::write_xlsx(&args.output_dir, &bytes).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        path = %path.display(),
        events = records.len(),
        "Execution complete"
    );

    Ok(())
}

/// Run every keyword query for one search and collect the normalized records.
#[instrument(level = "info", skip_all)]
async fn run_search(client: &Client, request: SearchRequest) -> EventRecords {
    match request {
        SearchRequest::Meetup(query) => {
            let urls = query::meetup_query_urls(&query);
            let listings = scrapers::meetup::scrape_listings(client, &urls).await;
            EventRecords::Meetup(extract::process_events(&listings))
        }
        SearchRequest::Eventbrite {
            keywords,
            location,
            event_type,
        } => EventRecords::Eventbrite(
            scrapers::eventbrite::scrape_events(
                client,
                query::EVENTBRITE_DIRECTORY_URL,
                event_type,
                &location,
                &keywords,
            )
            .await,
        ),
    }
}
