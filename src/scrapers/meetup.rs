//! Meetup search page scraper.
//!
//! Search results live inside a single `.max-w-narrow` container. Every link
//! in it becomes a [`RawListing`]; deciding which links are events is left
//! to [`crate::extract::process_events`].
//!
//! # URL Pattern
//!
//! `https://www.meetup.com/find/?keywords=rust&location=Pune&eventType=online`

use crate::error::{Error, Result};
use crate::models::RawListing;
use crate::query::KeywordUrl;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

static CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".max-w-narrow").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Collect every link inside the results container of a search page.
///
/// Returns an empty list when the container is missing. Links without an
/// `href` are ignored.
pub fn parse_listing_page(html: &str, keyword: &str) -> Vec<RawListing> {
    let document = Html::parse_document(html);
    let Some(container) = document.select(&CONTAINER_SELECTOR).next() else {
        debug!(keyword, "No results container on Meetup page");
        return Vec::new();
    };

    container
        .select(&LINK_SELECTOR)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            Some(RawListing {
                text: stripped_text(link),
                href: href.to_string(),
                searched_keyword: keyword.to_string(),
            })
        })
        .collect()
}

/// Text nodes trimmed, empties dropped, joined without a separator.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Scrape every keyword's search page, one after another.
///
/// A failing keyword is reported and contributes no listings; the rest of
/// the run carries on.
#[instrument(level = "info", skip_all, fields(keywords = urls.len()))]
pub async fn scrape_listings(client: &Client, urls: &[KeywordUrl]) -> Vec<RawListing> {
    let mut listings = Vec::new();

    for KeywordUrl { keyword, url } in urls {
        info!(%keyword, %url, "Scraping Meetup URL for keyword");
        match fetch_listing_page(client, keyword, url).await {
            Ok(found) => {
                info!(%keyword, count = found.len(), "Collected Meetup links");
                listings.extend(found);
            }
            Err(Error::HttpStatus { status, .. }) => {
                warn!(%keyword, status = status.as_u16(), "Failed to retrieve data for keyword");
            }
            Err(e) => {
                warn!(%keyword, error = %e, "Failed to retrieve data for keyword");
            }
        }
    }

    info!(count = listings.len(), "Scraped Meetup listings");
    listings
}

/// Fetch a single Meetup search page
#[instrument(level = "info", skip_all, fields(%keyword, %url))]
async fn fetch_listing_page(client: &Client, keyword: &str, url: &str) -> Result<Vec<RawListing>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::HttpStatus {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched Meetup page");
    Ok(parse_listing_page(&body, keyword))
}
