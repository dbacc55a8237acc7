use crate::model::{Booking, BookingId, WASH_DURATION_MIN};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Chevauchement d'intervalles semi-ouverts `[a, b)` : les créneaux
/// adjacents (fin de l'un = début de l'autre) ne se chevauchent pas.
pub(super) fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Jour de semaine en convention 0=lundi .. 6=dimanche.
pub(super) fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Intervalle `[start, start+90min)` ancré sur une date.
pub(super) fn wash_span(date: NaiveDate, start: NaiveTime) -> (NaiveDateTime, NaiveDateTime) {
    let begin = date.and_time(start);
    (begin, begin + Duration::minutes(WASH_DURATION_MIN))
}

pub(super) fn find_booking_index(bookings: &[Booking], id: &BookingId) -> Option<usize> {
    bookings.iter().position(|b| &b.id == id)
}

/// Vrai si le créneau candidat chevauche une des réservations données.
pub(super) fn conflicts_with_any(
    date: NaiveDate,
    start: NaiveTime,
    bookings: &[&Booking],
) -> bool {
    let (c_start, c_end) = wash_span(date, start);
    bookings.iter().any(|b| {
        let (b_start, b_end) = wash_span(b.date, b.start);
        overlaps(c_start, c_end, b_start, b_end)
    })
}
