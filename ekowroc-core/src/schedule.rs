//! Queries over a pickup schedule.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::model::PickupEvent;
use crate::ports::DataError;

/// Sort events ascending by date.
pub fn sort_schedule(events: &mut [PickupEvent]) {
    events.sort_by(PickupEvent::cmp_by_date);
}

/// Find the first event on or after `reference`, or after it when `omit_reference` is set.
///
/// `events` must already be sorted by date.
///
/// # Errors
///
/// Returns [`DataError::NoUpcomingEvent`] when every event lies before the start date.
pub fn next_event(
    events: &[PickupEvent],
    reference: NaiveDate,
    omit_reference: bool,
) -> Result<&PickupEvent, DataError> {
    let start = if omit_reference {
        reference
            .checked_add_days(Days::new(1))
            .ok_or(DataError::NoUpcomingEvent { from: reference })?
    } else {
        reference
    };

    let found = events.iter().find(|event| event.date >= start);
    debug!(%start, found = found.is_some(), "looked up next pickup event");
    found.ok_or(DataError::NoUpcomingEvent { from: start })
}
