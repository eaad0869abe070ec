//! Admission rules for reservation requests.
//!
//! Every rule runs on every request; failures are collected in rule order
//! so the guest sees all problems at once.

use chrono::NaiveDate;

use super::{ExistingReservation, Reservation, ReservationError, ReservationRequest};

/// Minimum number of days between today and the reserved date.
pub const MIN_LEAD_DAYS: i64 = 7;

type Rule = fn(&ReservationRequest, &[ExistingReservation], NaiveDate) -> Option<ReservationError>;

const RULES: [Rule; 5] = [
    guest_present,
    property_present,
    lead_time,
    not_reserved_by_someone_else,
    not_already_reserved_by_guest,
];

/// Validates a request against the bookings already committed.
///
/// Returns the admissible [`Reservation`] or every rule violation, in rule order.
pub fn validate(
    request: &ReservationRequest,
    existing: &[ExistingReservation],
    today: NaiveDate,
) -> Result<Reservation, Vec<ReservationError>> {
    let failures: Vec<ReservationError> = RULES
        .iter()
        .filter_map(|rule| rule(request, existing, today))
        .collect();

    if failures.is_empty() {
        Ok(Reservation::new(
            request.guest.clone(),
            request.date,
            request.property.clone(),
        ))
    } else {
        Err(failures)
    }
}

/// Like [`validate`], but reports violations as display strings.
pub fn evaluate(
    request: &ReservationRequest,
    existing: &[ExistingReservation],
    today: NaiveDate,
) -> Result<Reservation, Vec<String>> {
    validate(request, existing, today)
        .map_err(|failures| failures.iter().map(ToString::to_string).collect())
}

fn guest_present(
    request: &ReservationRequest,
    _: &[ExistingReservation],
    _: NaiveDate,
) -> Option<ReservationError> {
    request
        .guest
        .as_str()
        .trim()
        .is_empty()
        .then_some(ReservationError::GuestRequired)
}

fn property_present(
    request: &ReservationRequest,
    _: &[ExistingReservation],
    _: NaiveDate,
) -> Option<ReservationError> {
    request
        .property
        .as_str()
        .trim()
        .is_empty()
        .then_some(ReservationError::PropertyRequired)
}

fn lead_time(
    request: &ReservationRequest,
    _: &[ExistingReservation],
    today: NaiveDate,
) -> Option<ReservationError> {
    let lead = request.date.signed_duration_since(today).num_days();
    (lead < MIN_LEAD_DAYS).then_some(ReservationError::TooSoon {
        min_days: MIN_LEAD_DAYS,
    })
}

fn not_reserved_by_someone_else(
    request: &ReservationRequest,
    existing: &[ExistingReservation],
    _: NaiveDate,
) -> Option<ReservationError> {
    existing
        .iter()
        .any(|r| r.occupies(request.date, &request.property) && r.guest() != &request.guest)
        .then(|| ReservationError::ReservedBySomeoneElse {
            property: request.property.clone(),
        })
}

fn not_already_reserved_by_guest(
    request: &ReservationRequest,
    existing: &[ExistingReservation],
    _: NaiveDate,
) -> Option<ReservationError> {
    existing
        .iter()
        .any(|r| r.occupies(request.date, &request.property) && r.guest() == &request.guest)
        .then(|| ReservationError::AlreadyReservedByGuest {
            property: request.property.clone(),
        })
}
