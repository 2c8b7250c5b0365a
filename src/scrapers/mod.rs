//! Listing site scrapers.
//!
//! Each scraper is split into a pure page parser, which holds all knowledge
//! of the site's markup, and an async driver that walks the keyword list,
//! fetches pages sequentially and reports per-keyword failures without
//! aborting the run.
//!
//! # Supported Sources
//!
//! | Source | Module | Parser | Dedup key | Notes |
//! |--------|--------|--------|-----------|-------|
//! | Meetup | [`meetup`] | `parse_listing_page` | event URL | Links only; fields come from [`crate::extract`] |
//! | Eventbrite | [`eventbrite`] | `parse_event_cards` | event name | Fields read straight from the card |
//!
//! # Common Patterns
//!
//! - One `reqwest::Client` per run, shared by both drivers
//! - Selectors compiled once into `Lazy<Selector>` statics
//! - Failed keywords are logged with the keyword and skipped

pub mod eventbrite;
pub mod meetup;
#[cfg(test)]
mod test_server;

use reqwest::Client;

/// Browser-like agent; both sites serve reduced markup to unknown clients.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Build the HTTP client shared by every request in a run.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder().user_agent(USER_AGENT).build()
}
