//! Command-line interface definitions for Event Finder.
//!
//! Arguments can be given as flags or, for the common ones, environment
//! variables. [`Cli::search_request`] validates them into a [`SearchRequest`].

use crate::error::{Error, Result};
use crate::models::{EventbriteEventType, MeetupEventType, Source};
use crate::query::{DEFAULT_EVENTBRITE_LOCATION, MeetupQuery};
use crate::utils::{meetup_date_param, split_keywords};
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for Event Finder.
///
/// # Examples
///
/// ```sh
/// # Meetup, in-person events in Pune over the next week
/// event_finder -k "rust, ai" -l Pune --start-date 2025-06-10 --end-date 2025-06-17 -t in-person
///
/// # Eventbrite, online events
/// event_finder -s eventbrite -k "data science" -t online -o ./exports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing site to search
    #[arg(short, long, value_enum, env = "EVENT_SOURCE", default_value_t = Source::Meetup)]
    pub source: Source,

    /// Comma-separated search keywords
    #[arg(short, long, env = "EVENT_KEYWORDS")]
    pub keywords: String,

    /// Location: free text for Meetup, a slug such as `india--pune` for Eventbrite
    #[arg(short, long, env = "EVENT_LOCATION")]
    pub location: Option<String>,

    /// First day of the Meetup date range (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the Meetup date range (YYYY-MM-DD); defaults to the day after the start
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Event type: online, in-person, all, indoor or outdoor (Eventbrite accepts online and in-person)
    #[arg(short = 't', long)]
    pub event_type: Option<String>,

    /// Directory for Events.xlsx
    #[arg(short, long, env = "EVENT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write the records as JSON under this directory
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}

/// A validated search, ready to be turned into query URLs.
#[derive(Debug)]
pub enum SearchRequest {
    Meetup(MeetupQuery),
    Eventbrite {
        keywords: Vec<String>,
        location: String,
        event_type: EventbriteEventType,
    },
}

impl Cli {
    /// Validate the arguments for the chosen source.
    pub fn search_request(&self) -> Result<SearchRequest> {
        let keywords = split_keywords(&self.keywords);
        if keywords.is_empty() {
            return Err(Error::InvalidArgument("please enter the keywords".to_string()));
        }

        match self.source {
            Source::Meetup => {
                let event_type = match self.event_type.as_deref() {
                    Some(t) => parse_choice::<MeetupEventType>(t)?,
                    None => MeetupEventType::default(),
                };
                let (start_date, end_date) = self.date_range(Local::now().date_naive())?.unzip();
                Ok(SearchRequest::Meetup(MeetupQuery {
                    keywords: self.keywords.clone(),
                    location: self.location.clone().filter(|l| !l.trim().is_empty()),
                    start_date: start_date.map(meetup_date_param),
                    end_date: end_date.map(meetup_date_param),
                    event_type,
                }))
            }
            Source::Eventbrite => {
                let event_type = match self.event_type.as_deref() {
                    Some(t) => parse_choice::<EventbriteEventType>(t)?,
                    None => EventbriteEventType::default(),
                };
                let location = self
                    .location
                    .clone()
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_EVENTBRITE_LOCATION.to_string());
                Ok(SearchRequest::Eventbrite {
                    keywords,
                    location,
                    event_type,
                })
            }
        }
    }

    /// Resolve the Meetup date range. No dates means no date filter; a lone
    /// end date starts today, a lone start date ends a day later.
    fn date_range(&self, today: NaiveDate) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let (start, end) = match (self.start_date, self.end_date) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, next_day(start)?),
            (None, Some(end)) => (today, end),
        };
        if end <= start {
            return Err(Error::InvalidArgument(format!(
                "end date {end} must be after start date {start}"
            )));
        }
        Ok(Some((start, end)))
    }
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| Error::InvalidArgument(format!("no day after {date}")))
}

fn parse_choice<T: clap::ValueEnum>(value: &str) -> Result<T> {
    T::from_str(value, true).map_err(|_| {
        let allowed = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Error::InvalidArgument(format!("unsupported event type '{value}' (expected one of: {allowed})"))
    })
}
