//! A user's own reservations, grouped into upcoming, past and cancelled ones

use crate::data_store::models::{Reservation, ReservationStatus};
use crate::data_store::{ReservationFilterBuilder, SlotPlanStoreFacade, StoreError};
use chrono::NaiveDate;
use log::debug;

#[derive(Default, Debug)]
pub struct OwnerReservations {
    /// Not cancelled, taking place today or later
    pub upcoming: Vec<Reservation>,
    /// Not cancelled, taking place before today
    pub past: Vec<Reservation>,
    /// Cancelled, regardless of their date
    pub cancelled: Vec<Reservation>,
}

impl OwnerReservations {
    /// Sort the given reservations into the three groups. The order within each group is kept.
    pub fn split(reservations: Vec<Reservation>, today: NaiveDate) -> Self {
        let mut result = Self::default();
        for reservation in reservations {
            if reservation.status == ReservationStatus::Cancelled {
                result.cancelled.push(reservation);
            } else if reservation.date < today {
                result.past.push(reservation);
            } else {
                result.upcoming.push(reservation);
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty() && self.cancelled.is_empty()
    }
}

/// Fetch all reservations of the given owner (in chronological order) and group them relative to
/// `today`.
pub fn owner_reservations<F>(
    facade: &mut F,
    owner: &str,
    today: NaiveDate,
) -> Result<OwnerReservations, StoreError>
where
    F: SlotPlanStoreFacade + ?Sized,
{
    let mut builder = ReservationFilterBuilder::new();
    builder.owned_by(owner);
    let reservations = facade.get_reservations_filtered(builder.build())?;
    debug!("Found {} reservations of {}", reservations.len(), owner);
    Ok(OwnerReservations::split(reservations, today))
}
