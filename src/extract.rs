//! Field extraction for Meetup listings.
//!
//! Meetup search results carry the event stamp inside the link text, e.g.
//! `"Tue, Jun 10 · 6:30 PM UTCRust in Production"`. This module pulls that
//! stamp apart, derives the group name from the event URL and folds raw
//! listings into deduplicated [`MeetupEvent`] records.

use crate::models::{MeetupEvent, ParsedEventText, RawListing};
use crate::utils::title_case;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, instrument};
use url::Url;

/// Weekday, month and day, then a 12-hour clock time pinned to UTC.
static EVENT_STAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w{3}), (\w{3} \d{1,2}) \x{00B7} (\d{1,2}:\d{2} (?:AM|PM) UTC)").unwrap()
});

const MEETUP_ORIGIN: &str = "https://www.meetup.com/";

/// Split a listing's text into day, date, time and trailing keywords.
///
/// When the stamp is missing every field is `None`; callers treat that as
/// "not an event line".
pub fn parse_event_text(text: &str) -> ParsedEventText {
    let Some(caps) = EVENT_STAMP_RE.captures(text) else {
        return ParsedEventText::default();
    };

    let keywords = text
        .find("UTC")
        .map(|idx| text[idx + "UTC".len()..].trim().to_string());

    ParsedEventText {
        day: Some(caps[1].to_string()),
        date: Some(caps[2].to_string()),
        time: Some(caps[3].to_string()),
        keywords,
    }
}

/// Derive a readable group name from the first path segment of a Meetup URL.
///
/// `https://www.meetup.com/tech-talks-pune/events/123` -> `"Tech Talks Pune"`.
/// Relative hrefs are resolved against the Meetup origin first. The segment
/// is used as it appears in the URL; percent escapes are not decoded.
pub fn extract_group_name(url: &str) -> String {
    let parsed = Url::parse(url).or_else(|_| Url::parse(MEETUP_ORIGIN).and_then(|base| base.join(url)));
    let Ok(parsed) = parsed else {
        return String::new();
    };

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next())
        .unwrap_or_default();

    title_case(&segment.replace('-', " "))
}

/// Turn raw listings into Meetup events.
///
/// Listings without an event stamp are dropped. The first listing for each
/// href wins; later ones are skipped even if their text differs.
#[instrument(level = "debug", skip_all, fields(listings = listings.len()))]
pub fn process_events(listings: &[RawListing]) -> Vec<MeetupEvent> {
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut events = Vec::new();

    for listing in listings {
        let parsed = parse_event_text(&listing.text);
        if !parsed.is_event() {
            continue;
        }
        if !seen_urls.insert(listing.href.as_str()) {
            debug!(href = %listing.href, keyword = %listing.searched_keyword, "Skipping duplicate event URL");
            continue;
        }

        events.push(MeetupEvent {
            day: parsed.day,
            date: parsed.date,
            time: parsed.time,
            keywords: parsed.keywords,
            group_name: extract_group_name(&listing.href),
            event_url: listing.href.clone(),
        });
    }

    debug!(count = events.len(), "Processed Meetup events");
    events
}
