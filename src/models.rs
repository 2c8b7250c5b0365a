//! Data models for scraped listings and the event records built from them.
//!
//! - [`RawListing`]: one anchor pulled off a Meetup search page
//! - [`ParsedEventText`]: the day/date/time fields recognised in a listing's text
//! - [`MeetupEvent`] / [`EventbriteEvent`]: normalized records, one shape per source
//! - [`EventRecords`]: a run's result list tagged with its shape
//!
//! Records serialize with the spreadsheet column names as keys so the JSON
//! output and the exported workbook agree on naming.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which listing site a run scrapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Source {
    Meetup,
    Eventbrite,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Meetup => "meetup",
            Source::Eventbrite => "eventbrite",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event type filter accepted by the Meetup search page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MeetupEventType {
    Online,
    InPerson,
    #[default]
    All,
    Indoor,
    Outdoor,
}

impl MeetupEventType {
    /// Query-string value; `All` is never sent.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetupEventType::Online => "online",
            MeetupEventType::InPerson => "in-person",
            MeetupEventType::All => "all",
            MeetupEventType::Indoor => "indoor",
            MeetupEventType::Outdoor => "outdoor",
        }
    }
}

/// Event type filter accepted by Eventbrite's directory pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EventbriteEventType {
    Online,
    #[default]
    InPerson,
}

/// One link scraped from a Meetup listing page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawListing {
    /// Visible link text, text nodes trimmed and concatenated.
    pub text: String,
    pub href: String,
    /// Keyword whose query produced this link.
    pub searched_keyword: String,
}

/// Fields recognised in a listing's text. All `None` when the text
/// carries no day/date/time stamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedEventText {
    pub day: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub keywords: Option<String>,
}

impl ParsedEventText {
    pub fn is_event(&self) -> bool {
        self.day.is_some()
    }
}

/// A Meetup event, unique by `event_url` within a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetupEvent {
    #[serde(rename = "Day")]
    pub day: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Time")]
    pub time: Option<String>,
    #[serde(rename = "Keywords")]
    pub keywords: Option<String>,
    #[serde(rename = "Group Name")]
    pub group_name: String,
    #[serde(rename = "Event URL")]
    pub event_url: String,
}

/// An Eventbrite event, unique by `event_name` within a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventbriteEvent {
    #[serde(rename = "Event URL")]
    pub event_url: String,
    #[serde(rename = "Event Name")]
    pub event_name: String,
    #[serde(rename = "Event Location")]
    pub event_location: Option<String>,
    #[serde(rename = "Date and Time")]
    pub date_and_time: Option<String>,
}

/// The result list of one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventRecords {
    Meetup(Vec<MeetupEvent>),
    Eventbrite(Vec<EventbriteEvent>),
}

impl EventRecords {
    pub fn source(&self) -> Source {
        match self {
            EventRecords::Meetup(_) => Source::Meetup,
            EventRecords::Eventbrite(_) => Source::Eventbrite,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EventRecords::Meetup(events) => events.len(),
            EventRecords::Eventbrite(events) => events.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column headers in export order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            EventRecords::Meetup(_) => &[
                "Day",
                "Date",
                "Time",
                "Keywords",
                "Group Name",
                "Event URL",
            ],
            EventRecords::Eventbrite(_) => &[
                "Event URL",
                "Event Name",
                "Event Location",
                "Date and Time",
            ],
        }
    }

    /// Cell values per row, aligned with [`EventRecords::headers`].
    pub fn rows(&self) -> Vec<Vec<Option<&str>>> {
        match self {
            EventRecords::Meetup(events) => events
                .iter()
                .map(|e| {
                    vec![
                        e.day.as_deref(),
                        e.date.as_deref(),
                        e.time.as_deref(),
                        e.keywords.as_deref(),
                        Some(e.group_name.as_str()),
                        Some(e.event_url.as_str()),
                    ]
                })
                .collect(),
            EventRecords::Eventbrite(events) => events
                .iter()
                .map(|e| {
                    vec![
                        Some(e.event_url.as_str()),
                        Some(e.event_name.as_str()),
                        e.event_location.as_deref(),
                        e.date_and_time.as_deref(),
                    ]
                })
                .collect(),
        }
    }
}
