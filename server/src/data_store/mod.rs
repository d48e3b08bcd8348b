//! The data provider interface of the availability engine
//!
//! The engine itself never talks to any store. Instead, callers fetch a snapshot of a room's
//! reservations and timetable through the [ReservationProvider] and [TimetableProvider] traits and
//! pass it to [crate::slot_engine::compute_daily_slots] (or let
//! [crate::slot_engine::build_slots_for] do both steps).
//!
//! Stores implement the [SlotPlanStore] trait. Such an object can be shared between threads and be
//! used to create [SlotPlanStoreFacade] instances, which implement both provider traits and
//! provide a CRUD-like interface, using the data models from the [models] module.
//!
//! The only implementation, [memory::MemoryStore], keeps all data in memory. It is filled from a
//! JSON snapshot file by the command line interface and used directly by the unittests.

use chrono::NaiveDate;

pub mod memory;
pub mod models;
#[cfg(test)]
pub(crate) mod sample_data;

pub type RoomId = String;
pub type ReservationId = String;
pub type TimetableEntryId = String;

pub trait ReservationProvider {
    /// Get all reservations of the room on the given date, except for cancelled ones.
    ///
    /// Reservations are returned in chronological order, i.e. sorted by (start, end).
    fn list_non_cancelled_reservations(
        &mut self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<models::Reservation>, StoreError>;
}

pub trait TimetableProvider {
    /// Get all timetable entries of the room, regardless of weekday and semester
    fn list_entries(&mut self, room_id: &str) -> Result<Vec<models::TimetableEntry>, StoreError>;
}

pub trait SlotPlanStoreFacade: ReservationProvider + TimetableProvider {
    fn get_rooms(&mut self) -> Result<Vec<models::Room>, StoreError>;
    fn get_room(&mut self, room_id: &str) -> Result<models::Room, StoreError>;

    /// Get a filtered list of reservations
    ///
    /// Reservations are returned in chronological order, i.e. sorted by (date, start, end)
    fn get_reservations_filtered(
        &mut self,
        filter: ReservationFilter,
    ) -> Result<Vec<models::Reservation>, StoreError>;

    /// Store a new reservation. If the reservation's id is empty, a new id is generated.
    ///
    /// # return value
    /// - `Ok(id)` with the id of the new reservation
    /// - `Err(StoreError::ConflictEntityExists)` if a reservation with the same id exists already
    /// - `Err(_)` if something different went wrong, as usual
    fn create_reservation(
        &mut self,
        reservation: models::Reservation,
    ) -> Result<ReservationId, StoreError>;

    /// Change the status of an existing reservation (approval, check-in, cancellation)
    fn update_reservation_status(
        &mut self,
        reservation_id: &str,
        status: models::ReservationStatus,
    ) -> Result<(), StoreError>;

    fn create_timetable_entry(
        &mut self,
        entry: models::TimetableEntry,
    ) -> Result<TimetableEntryId, StoreError>;
    fn delete_timetable_entry(&mut self, entry_id: &str) -> Result<(), StoreError>;

    /// Import a complete snapshot of rooms, reservations and timetable entries at once
    fn import_snapshot(&mut self, contents: models::SnapshotContents) -> Result<(), StoreError>;
}

pub trait SlotPlanStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn SlotPlanStoreFacade + 'a>, StoreError>;
}

/// Filter options for retrieving reservations from the store via
/// SlotPlanStoreFacade::get_reservations_filtered()
///
/// Can be constructed through the ReservationFilterBuilder
#[derive(Default, Debug)]
pub struct ReservationFilter {
    /// Filter for reservations of the given room
    pub room_id: Option<RoomId>,
    /// Filter for reservations on the given date
    pub date: Option<NaiveDate>,
    /// Filter for reservations made by the given owner
    pub owner: Option<String>,
    /// If true, filter out cancelled reservations
    pub exclude_cancelled: bool,
}

impl ReservationFilter {
    /// Checks if a given reservation matches the filter
    pub fn matches(&self, reservation: &models::Reservation) -> bool {
        if let Some(room_id) = &self.room_id {
            if *room_id != reservation.room_id {
                return false;
            }
        }
        if let Some(date) = self.date {
            if date != reservation.date {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if *owner != reservation.owner {
                return false;
            }
        }
        if self.exclude_cancelled && reservation.status == models::ReservationStatus::Cancelled {
            return false;
        }
        true
    }
}

/// Builder for constructing ReservationFilter objects
pub struct ReservationFilterBuilder {
    result: ReservationFilter,
}

impl ReservationFilterBuilder {
    pub fn new() -> Self {
        Self {
            result: ReservationFilter::default(),
        }
    }

    /// Add filter to only include reservations of the given room
    pub fn in_room(&mut self, room_id: &str) -> &mut Self {
        self.result.room_id = Some(room_id.to_owned());
        self
    }

    /// Add filter to only include reservations on the given date
    pub fn on_date(&mut self, date: NaiveDate) -> &mut Self {
        self.result.date = Some(date);
        self
    }

    pub fn owned_by(&mut self, owner: &str) -> &mut Self {
        self.result.owner = Some(owner.to_owned());
        self
    }

    /// Add filter to exclude reservations in CANCELLED status
    pub fn without_cancelled(&mut self) -> &mut Self {
        self.result.exclude_cancelled = true;
        self
    }

    /// Create the ReservationFilter object
    pub fn build(self) -> ReservationFilter {
        self.result
    }
}

impl Default for ReservationFilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// The underlying storage is not reachable or unusable. See string description for details.
    ConnectionError(String),
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because it already exists.
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it does not match the expected ranges. See string
    /// description for details.
    InvalidInputData(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to data store: {}", e),
            Self::NotExisting => f.write_str("Record does not exist."),
            Self::ConflictEntityExists => f.write_str("Record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored is not valid: {}", e)
            }
        }
    }
}

impl std::error::Error for StoreError {}
