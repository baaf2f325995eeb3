use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashSet;
use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::venue::{Venue, VenueAvailability};

/// Venues taken at one exact (date, time) slot.
///
/// Matches on point equality of `check_in` and `event_time` among approved
/// bookings. Bookings that only carry a date range have no `event_time` and
/// are never matched here; use [`booked_in_range`] for overlap detection.
pub fn booked_at_slot(bookings: &[Booking], date: NaiveDate, time: NaiveTime) -> HashSet<String> {
    bookings.iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .filter(|b| b.check_in == date && b.event_time == Some(time))
        .map(|b| b.venue.venue_id.clone())
        .collect()
}

/// Half-open `[start, end)` day range a booking occupies.
///
/// Dates are put in order first. A booking with an empty range still holds
/// its check-in day.
pub fn occupied_range(booking: &Booking) -> (NaiveDate, NaiveDate) {
    normalize_range(booking.check_in, booking.check_out)
}

pub fn normalize_range(a: NaiveDate, b: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    if start == end {
        (start, start + Duration::days(1))
    } else {
        (start, end)
    }
}

/// Venues with an approved booking overlapping `[check_in, check_out)`.
pub fn booked_in_range(bookings: &[Booking], check_in: NaiveDate, check_out: NaiveDate) -> HashSet<String> {
    let (start, end) = normalize_range(check_in, check_out);
    bookings.iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .filter(|b| {
            let (b_start, b_end) = occupied_range(b);
            b_start < end && start < b_end
        })
        .map(|b| b.venue.venue_id.clone())
        .collect()
}

pub fn mark_availability(venues: Vec<Venue>, booked: &HashSet<String>) -> Vec<VenueAvailability> {
    venues.into_iter()
        .map(|venue| {
            let available = !booked.contains(&venue.id);
            VenueAvailability { venue, available }
        })
        .collect()
}
