//! Search URL construction for both listing sites.

use crate::error::{Error, Result};
use crate::models::{EventbriteEventType, MeetupEventType};
use crate::utils::split_keywords;

pub const MEETUP_FIND_URL: &str = "https://www.meetup.com/find/?";
pub const EVENTBRITE_DIRECTORY_URL: &str = "https://www.eventbrite.com/d/";
pub const DEFAULT_EVENTBRITE_LOCATION: &str = "india--pune";

/// Filters for a Meetup search. Dates are already in Meetup's parameter
/// format (see [`crate::utils::meetup_date_param`]).
#[derive(Clone, Debug, Default)]
pub struct MeetupQuery {
    /// Comma-separated keywords; one search URL is built per keyword.
    pub keywords: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event_type: MeetupEventType,
}

/// A search URL together with the keyword that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordUrl {
    pub keyword: String,
    pub url: String,
}

/// Build one Meetup search URL per keyword.
///
/// # Arguments
///
/// * `query` - Comma-separated keywords plus the optional location, date
///   range and event type filters
///
/// # Returns
///
/// One [`KeywordUrl`] per non-empty keyword, in input order. Filters that
/// are unset (or `All` for the event type) are left out of the query string.
pub fn meetup_query_urls(query: &MeetupQuery) -> Vec<KeywordUrl> {
    split_keywords(&query.keywords)
        .into_iter()
        .map(|keyword| {
            let url = meetup_query_url(query, &keyword);
            KeywordUrl { keyword, url }
        })
        .collect()
}

fn meetup_query_url(query: &MeetupQuery, keyword: &str) -> String {
    let mut params = vec![format!("keywords={}", keyword.replace(' ', "%20"))];

    if let Some(location) = query.location.as_deref().filter(|l| !l.is_empty()) {
        params.push(format!("location={location}"));
    }
    if let (Some(start), Some(end)) = (&query.start_date, &query.end_date) {
        params.push(format!("customStartDate={start}&customEndDate={end}"));
    }
    if query.event_type != MeetupEventType::All {
        params.push(format!("eventType={}", query.event_type.as_str()));
    }

    format!("{MEETUP_FIND_URL}{}", params.join("&"))
}

/// Build the Eventbrite directory URL for one keyword:
/// `{directory_url}[online/]{location}/{keyword}/`, where `directory_url` is
/// normally [`EVENTBRITE_DIRECTORY_URL`].
///
/// # Arguments
///
/// * `directory_url` - Root of the directory pages; must end with `/`
/// * `event_type` - `Online` adds the `online/` segment before the location
/// * `location` - Location slug, e.g. `india--pune`
/// * `keyword` - Search keyword, percent-encoded as a path segment
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `keyword` is empty or blank.
pub fn eventbrite_query_url(
    directory_url: &str,
    event_type: EventbriteEventType,
    location: &str,
    keyword: &str,
) -> Result<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(Error::InvalidArgument(
            "keyword is required to construct the URL".to_string(),
        ));
    }

    let mut url = String::from(directory_url);
    if event_type == EventbriteEventType::Online {
        url.push_str("online/");
    }
    url.push_str(location);
    url.push('/');
    url.push_str(&urlencoding::encode(keyword));
    url.push('/');
    Ok(url)
}
