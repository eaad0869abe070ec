//! Reservation entities.

use chrono::NaiveDate;
use common::{GuestId, PropertyId};
use serde::{Deserialize, Serialize};

/// An incoming request to book a property for a date.
///
/// Nothing here is checked on construction; presence of the guest and
/// property is one of the validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Who is asking for the booking.
    pub guest: GuestId,

    /// The night being booked.
    pub date: NaiveDate,

    /// The property being booked.
    pub property: PropertyId,
}

impl ReservationRequest {
    /// Creates a new reservation request.
    pub fn new(
        guest: impl Into<GuestId>,
        date: NaiveDate,
        property: impl Into<PropertyId>,
    ) -> Self {
        Self {
            guest: guest.into(),
            date,
            property: property.into(),
        }
    }
}

/// A booking that has already been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingReservation {
    guest: GuestId,
    date: NaiveDate,
    property: PropertyId,
}

impl ExistingReservation {
    /// Creates a record of a committed booking.
    pub fn new(
        guest: impl Into<GuestId>,
        date: NaiveDate,
        property: impl Into<PropertyId>,
    ) -> Self {
        Self {
            guest: guest.into(),
            date,
            property: property.into(),
        }
    }

    pub fn guest(&self) -> &GuestId {
        &self.guest
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn property(&self) -> &PropertyId {
        &self.property
    }

    /// Returns true if this booking occupies the given property on the given date.
    pub fn occupies(&self, date: NaiveDate, property: &PropertyId) -> bool {
        self.date == date && &self.property == property
    }
}

/// A reservation that passed validation but is not yet confirmed.
///
/// Only [`validate`](super::validate) and [`evaluate`](super::evaluate)
/// can produce one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    guest: GuestId,
    date: NaiveDate,
    property: PropertyId,
}

impl Reservation {
    pub(crate) fn new(guest: GuestId, date: NaiveDate, property: PropertyId) -> Self {
        Self {
            guest,
            date,
            property,
        }
    }

    pub fn guest(&self) -> &GuestId {
        &self.guest
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn property(&self) -> &PropertyId {
        &self.property
    }

    /// Converts the reservation into the committed-booking record stores keep.
    pub fn to_existing(&self) -> ExistingReservation {
        ExistingReservation::new(self.guest.clone(), self.date, self.property.clone())
    }
}
