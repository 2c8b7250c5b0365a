//! Eventbrite directory page scraper.
//!
//! Each result is an event card (`div.Stack_root__1ksk7`) holding an
//! `a.event-card-link` and a handful of `p.Typography_root__487rx` text rows.
//! Cards nest, and the same event is listed under several keywords, so
//! cards are deduplicated by event name across the whole run.
//!
//! # URL Pattern
//!
//! `https://www.eventbrite.com/d/[online/]{location}/{keyword}/`

use crate::error::Result;
use crate::models::{EventbriteEvent, EventbriteEventType};
use crate::query::eventbrite_query_url;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

static CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.Stack_root__1ksk7").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.event-card-link").unwrap());
static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p.Typography_root__487rx").unwrap());

const URGENCY_SIGNAL_CLASS: &str = "EventCardUrgencySignal__label";

/// Cards found on one directory page, split into the total and the events
/// that are new to this run.
#[derive(Debug, Default)]
pub struct EventCards {
    /// Cards carrying a linked, named event, including names seen before.
    pub matched: usize,
    /// Events whose names had not been collected yet, in page order.
    pub events: Vec<EventbriteEvent>,
}

/// Parse the event cards on one directory page.
///
/// # Arguments
///
/// * `html` - Directory page markup
/// * `seen_names` - Event names already collected earlier in the run; every
///   returned event's name is added to it
///
/// # Returns
///
/// An [`EventCards`] with the number of matched cards and the new events.
/// Cards without a link, an `aria-label` or an `href` are not counted.
pub fn parse_event_cards(html: &str, seen_names: &mut HashSet<String>) -> EventCards {
    let document = Html::parse_document(html);
    let mut page = EventCards::default();

    for card in document.select(&CARD_SELECTOR) {
        let Some(link) = card.select(&LINK_SELECTOR).next() else {
            continue;
        };
        let Some(name) = link.value().attr("aria-label") else {
            debug!("Event card link without aria-label; skipping");
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            debug!(name, "Event card link without href; skipping");
            continue;
        };
        page.matched += 1;
        if seen_names.contains(name) {
            continue;
        }

        let texts: Vec<String> = card
            .select(&TEXT_SELECTOR)
            .filter(|p| !p.value().classes().any(|c| c == URGENCY_SIGNAL_CLASS))
            .map(element_text)
            .collect();

        let date_and_time = texts.first().cloned();
        let event_location = texts
            .get(1)
            .cloned()
            .or_else(|| link.value().attr("data-event-location").map(str::to_string));

        seen_names.insert(name.to_string());
        page.events.push(EventbriteEvent {
            event_url: href.to_string(),
            event_name: name.to_string(),
            event_location,
            date_and_time,
        });
    }

    page
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Scrape one directory page per keyword, one after another.
///
/// A keyword that fails to build or fetch is reported with its error and
/// skipped. A page without any event cards is reported as a warning; a page
/// whose events were all collected under an earlier keyword is not.
///
/// `directory_url` is the root the search URLs are built on, normally
/// [`crate::query::EVENTBRITE_DIRECTORY_URL`].
#[instrument(level = "info", skip_all, fields(keywords = keywords.len(), %location))]
pub async fn scrape_events(
    client: &Client,
    directory_url: &str,
    event_type: EventbriteEventType,
    location: &str,
    keywords: &[String],
) -> Vec<EventbriteEvent> {
    let mut seen_names = HashSet::new();
    let mut events = Vec::new();

    for keyword in keywords {
        match scrape_keyword(client, directory_url, event_type, location, keyword, &mut seen_names).await {
            Ok(page) if page.matched == 0 => {
                warn!(%keyword, "No events found for keyword");
            }
            Ok(page) if page.events.is_empty() => {
                debug!(%keyword, cards = page.matched, "Events for keyword already collected");
            }
            Ok(page) => {
                info!(%keyword, count = page.events.len(), "Collected Eventbrite events");
                events.extend(page.events);
            }
            Err(e) => {
                error!(%keyword, error = %e, "Error processing keyword");
            }
        }
    }

    info!(count = events.len(), "Scraped Eventbrite events");
    events
}

/// Build, fetch and parse the directory page for a single keyword
#[instrument(level = "info", skip(client, directory_url, seen_names))]
async fn scrape_keyword(
    client: &Client,
    directory_url: &str,
    event_type: EventbriteEventType,
    location: &str,
    keyword: &str,
    seen_names: &mut HashSet<String>,
) -> Result<EventCards> {
    let url = eventbrite_query_url(directory_url, event_type, location, keyword)?;
    info!(%url, "Scraping Eventbrite URL for keyword");

    let body = client.get(&url).send().await?.text().await?;
    debug!(bytes = body.len(), "Fetched Eventbrite page");
    Ok(parse_event_cards(&body, seen_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scrapers::test_server;

    const DIRECTORY_PAGE: &str = r#"
        <html><body>
          <div class="Stack_root__1ksk7">
            <a class="event-card-link" aria-label="Rust Pune Meetup"
               href="https://www.eventbrite.com/e/rust-pune-meetup-1" data-event-location="Pune">Rust</a>
            <p class="Typography_root__487rx EventCardUrgencySignal__label">Almost full</p>
            <p class="Typography_root__487rx">Sat, Jun 14 • 10:00 AM GMT+5:30</p>
            <p class="Typography_root__487rx">Koregaon Park, Pune</p>
          </div>
          <div class="Stack_root__1ksk7">
            <a class="event-card-link" aria-label="AI Summit"
               href="https://www.eventbrite.com/e/ai-summit-2" data-event-location="Hinjewadi">AI</a>
            <p class="Typography_root__487rx">Sun, Jun 15 • 9:00 AM GMT+5:30</p>
          </div>
          <div class="Stack_root__1ksk7">
            <a class="event-card-link" aria-label="Rust Pune Meetup"
               href="https://www.eventbrite.com/e/rust-pune-meetup-1-copy">Again</a>
          </div>
          <div class="Stack_root__1ksk7">
            <a class="event-card-link" aria-label="No Details" href="https://www.eventbrite.com/e/3"
               data-event-location="Baner">x</a>
          </div>
          <div class="Stack_root__1ksk7"><p class="Typography_root__487rx">Orphan text</p></div>
        </body></html>
    "#;

    #[test]
    fn test_parse_event_cards_fields() {
        let mut seen = HashSet::new();
        let page = parse_event_cards(DIRECTORY_PAGE, &mut seen);
        assert_eq!(page.matched, 4);
        let events = page.events;
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].event_name, "Rust Pune Meetup");
        assert_eq!(events[0].event_url, "https://www.eventbrite.com/e/rust-pune-meetup-1");
        assert_eq!(events[0].date_and_time.as_deref(), Some("Sat, Jun 14 • 10:00 AM GMT+5:30"));
        assert_eq!(events[0].event_location.as_deref(), Some("Koregaon Park, Pune"));
    }

    #[test]
    fn test_location_falls_back_to_data_attribute() {
        let mut seen = HashSet::new();
        let events = parse_event_cards(DIRECTORY_PAGE, &mut seen).events;
        assert_eq!(events[1].event_name, "AI Summit");
        assert_eq!(events[1].event_location.as_deref(), Some("Hinjewadi"));
    }

    #[test]
    fn test_card_without_text_rows() {
        let mut seen = HashSet::new();
        let events = parse_event_cards(DIRECTORY_PAGE, &mut seen).events;
        assert_eq!(events[2].event_name, "No Details");
        assert_eq!(events[2].date_and_time, None);
        assert_eq!(events[2].event_location.as_deref(), Some("Baner"));
    }

    #[test]
    fn test_seen_names_carry_across_pages() {
        let mut seen = HashSet::new();
        let first = parse_event_cards(DIRECTORY_PAGE, &mut seen);
        assert_eq!(first.events.len(), 3);
        assert!(seen.contains("AI Summit"));

        let second = parse_event_cards(DIRECTORY_PAGE, &mut seen);
        assert!(second.events.is_empty());
        assert_eq!(second.matched, 4);
    }

    #[test]
    fn test_page_of_already_seen_events_still_counts_cards() {
        let page = r#"
            <div class="Stack_root__1ksk7">
              <a class="event-card-link" aria-label="Rust Pune Meetup" href="https://www.eventbrite.com/e/1">x</a>
              <p class="Typography_root__487rx">Sat, Jun 14 • 10:00 AM GMT+5:30</p>
            </div>
        "#;
        let mut seen = HashSet::new();
        let rust = parse_event_cards(page, &mut seen);
        let systems = parse_event_cards(page, &mut seen);

        assert_eq!((rust.matched, rust.events.len()), (1, 1));
        assert_eq!((systems.matched, systems.events.len()), (1, 0));
    }

    #[test]
    fn test_card_without_href_is_skipped() {
        let page = r#"
            <div class="Stack_root__1ksk7">
              <a class="event-card-link" aria-label="Placeholder">x</a>
              <p class="Typography_root__487rx">Sat, Jun 14 • 10:00 AM GMT+5:30</p>
            </div>
        "#;
        let mut seen = HashSet::new();
        let parsed = parse_event_cards(page, &mut seen);
        assert_eq!(parsed.matched, 0);
        assert!(parsed.events.is_empty());
        assert!(!seen.contains("Placeholder"));
    }

    #[test]
    fn test_page_without_cards() {
        let mut seen = HashSet::new();
        let page = parse_event_cards("<html><body><p>Nothing</p></body></html>", &mut seen);
        assert_eq!(page.matched, 0);
        assert!(page.events.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_events_skips_failed_keywords() {
        let base = test_server::serve(DIRECTORY_PAGE).await;
        let directory_url = format!("{base}/d/");
        let client = test_server::client();
        let keywords: Vec<String> = ["", "broken", "rust", "fail"].map(String::from).to_vec();

        let events = scrape_events(
            &client,
            &directory_url,
            EventbriteEventType::InPerson,
            "india--pune",
            &keywords,
        )
        .await;

        let names: Vec<&str> = events.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["Rust Pune Meetup", "AI Summit", "No Details"]);
    }

    #[tokio::test]
    async fn test_scrape_keyword_errors() {
        let base = test_server::serve(DIRECTORY_PAGE).await;
        let directory_url = format!("{base}/d/");
        let client = test_server::client();
        let mut seen = HashSet::new();

        let empty = scrape_keyword(&client, &directory_url, EventbriteEventType::Online, "india--pune", "", &mut seen).await;
        assert!(matches!(empty, Err(Error::InvalidArgument(_))));

        let broken =
            scrape_keyword(&client, &directory_url, EventbriteEventType::Online, "india--pune", "broken", &mut seen).await;
        assert!(matches!(broken, Err(Error::Http(_))));
        assert!(seen.is_empty());
    }
}
