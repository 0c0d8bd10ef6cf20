//! Error types and the trait implemented by schedule providers.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, ParseError as ChronoParseError};
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::PickupEvent;
use crate::schedule::next_event;

#[derive(thiserror::Error, Debug)]
/// Errors returned to callers of a schedule provider.
pub enum PortError {
    /// The HTTP request failed or the server answered with an error status.
    #[error("Request error: {0}")]
    Request(#[from] ReqwestError),
    /// The response arrived but could not be interpreted.
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

#[derive(thiserror::Error, Debug)]
/// Ways in which schedule data can be unusable.
pub enum DataError {
    /// Response body is not valid JSON.
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] JsonError),
    /// Response JSON has no schedule message.
    #[error("Schedule message missing from response")]
    MissingMessage,
    /// Upstream sent a waste-type code missing from the static table.
    #[error("Unknown waste type: {0}")]
    UnknownWasteType(String),
    /// A date-shaped value is not a real calendar date.
    #[error("Invalid date {raw}: {source}")]
    InvalidDate {
        /// Date text as found in the message.
        raw: String,
        /// Underlying chrono error.
        source: ChronoParseError,
    },
    /// No event falls on or after the requested start date.
    #[error("No events found from {from}")]
    NoUpcomingEvent {
        /// First date that was considered.
        from: NaiveDate,
    },
}

#[async_trait]
/// Trait for backends that deliver a pickup schedule.
pub trait SchedulePort: Send + Sync {
    /// Fetch all pickup events, sorted ascending by date with one event per date.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Request`] when the backend cannot be reached and
    /// [`PortError::Data`] when its answer cannot be parsed.
    async fn pickup_events(&self) -> Result<Vec<PickupEvent>, PortError>;

    /// Fetch the schedule and return the first event on or after `reference`.
    ///
    /// With `omit_reference` set, events on `reference` itself are skipped.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors and returns [`DataError::NoUpcomingEvent`] when
    /// nothing is left.
    async fn next_pickup_event_from(
        &self,
        reference: NaiveDate,
        omit_reference: bool,
    ) -> Result<PickupEvent, PortError> {
        let events = self.pickup_events().await?;
        let event = next_event(&events, reference, omit_reference)?;
        Ok(event.clone())
    }

    /// Next pickup counted from today's local date.
    ///
    /// # Errors
    ///
    /// Same as [`SchedulePort::next_pickup_event_from`].
    async fn next_pickup_event(&self, omit_today: bool) -> Result<PickupEvent, PortError> {
        let today = Local::now().date_naive();
        self.next_pickup_event_from(today, omit_today).await
    }
}
