//! Extraction of pickup events from the schedule message.
//!
//! The message is a flat, query-string-like blob such as
//! `kiedy_1=2021-01-12&co_1=papier&kiedy_1=2021-01-12&co_2=tworzywa&...`.
//! A waste type belongs to a date only when its `co_` key directly follows a
//! `kiedy_` key carrying that date.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use ekowroc_core::{
    model::{PickupEvent, PickupType},
    ports::DataError,
    schedule::sort_schedule,
};

use crate::RawPayload;

const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"kiedy_\d*=(\d{4}-\d{2}-\d{2})").expect("date pattern is valid")
});

/// Parse the events contained in a decoded response.
///
/// # Errors
///
/// Returns [`DataError::MissingMessage`] when the payload carries no message,
/// otherwise see [`parse_message`].
pub fn parse_events(payload: &RawPayload) -> Result<Vec<PickupEvent>, DataError> {
    let message = payload
        .message
        .as_deref()
        .ok_or(DataError::MissingMessage)?;
    parse_message(message)
}

/// Parse the events contained in a schedule message.
///
/// Returns one event per distinct date, sorted ascending. A message without
/// any dates yields an empty schedule.
///
/// # Errors
///
/// Returns [`DataError::UnknownWasteType`] for a code outside the waste-type table
/// and [`DataError::InvalidDate`] for a date-shaped value that is not a real date.
pub fn parse_message(message: &str) -> Result<Vec<PickupEvent>, DataError> {
    let dates: BTreeSet<&str> = DATE_PATTERN
        .captures_iter(message)
        .filter_map(|captures| captures.get(1))
        .map(|found| found.as_str())
        .collect();

    let mut events = dates
        .into_iter()
        .map(|raw_date| parse_event(message, raw_date))
        .collect::<Result<Vec<_>, _>>()?;

    sort_schedule(&mut events);
    debug!(events = events.len(), "parsed pickup schedule");
    Ok(events)
}

fn parse_event(message: &str, raw_date: &str) -> Result<PickupEvent, DataError> {
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|source| {
        DataError::InvalidDate {
            raw: raw_date.to_owned(),
            source,
        }
    })?;

    let pickup_types = codes_for_date(message, raw_date)
        .into_iter()
        .map(|code| {
            PickupType::lookup(code).inspect_err(|_err| {
                warn!(code, date = raw_date, "unknown waste type in schedule");
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PickupEvent { date, pickup_types })
}

/// Codes whose `co_` key immediately follows a `kiedy_` key with this exact date, in message order.
fn codes_for_date<'msg>(message: &'msg str, raw_date: &str) -> Vec<&'msg str> {
    let pattern = format!(r"kiedy_\d*={}&co_\d*=(\w*)&", regex::escape(raw_date));
    let code_pattern = Regex::new(&pattern).expect("escaped date keeps the pattern valid");

    code_pattern
        .captures_iter(message)
        .filter_map(|captures| captures.get(1))
        .map(|found| found.as_str())
        .collect()
}
