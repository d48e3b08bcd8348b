use crate::data_store::models::{
    Reservation, ReservationStatus, Room, SnapshotContents, TimetableEntry,
};
use crate::data_store::{
    ReservationFilter, ReservationFilterBuilder, ReservationId, ReservationProvider, RoomId,
    SlotPlanStore, SlotPlanStoreFacade, StoreError, TimetableEntryId, TimetableProvider,
};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Callback to be notified about changed data. It gets the id of the affected room.
pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

/**
 * An in-memory [SlotPlanStore] implementation.
 *
 * The data consists of the [MemoryStoreData] structure with vectors of entities. These can be
 * modified directly (e.g. by tests) or through the facade's CRUD methods.
 *
 * Listeners registered via [MemoryStore::subscribe] are called after each successful modification
 * through the facade, so that views can recompute the affected room's schedule from a fresh
 * snapshot.
 *
 * The [MemoryStoreData.next_error] attribute can be set to simulate a storage failure in the next
 * facade call.
 */
#[derive(Default)]
pub struct MemoryStore {
    pub data: Mutex<MemoryStoreData>,
    listeners: Mutex<Vec<ChangeListener>>,
}

#[derive(Default)]
pub struct MemoryStoreData {
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub timetable: Vec<TimetableEntry>,
    /// If not none, the next call to a store facade method will return this error.
    pub next_error: Option<StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener to be called after every successful modification of the store's data.
    ///
    /// Listeners are called without any lock held, so they may use the store again, including
    /// further modifications.
    pub fn subscribe<F>(&self, listener: F) -> Result<(), StoreError>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?
            .push(Arc::new(listener));
        Ok(())
    }

    fn lock_data(&self) -> Result<MutexGuard<'_, MemoryStoreData>, StoreError> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        Ok(data)
    }

    fn notify(&self, room_ids: &[RoomId]) -> Result<(), StoreError> {
        let listeners: Vec<ChangeListener> = self
            .listeners
            .lock()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?
            .clone();
        for room_id in room_ids {
            debug!("Notifying {} listeners about change in room {}", listeners.len(), room_id);
            for listener in listeners.iter() {
                listener(room_id);
            }
        }
        Ok(())
    }
}

impl SlotPlanStore for MemoryStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn SlotPlanStoreFacade + 'a>, StoreError> {
        Ok(Box::new(MemoryStoreFacade { store: self }))
    }
}

struct MemoryStoreFacade<'a> {
    store: &'a MemoryStore,
}

impl ReservationProvider for MemoryStoreFacade<'_> {
    fn list_non_cancelled_reservations(
        &mut self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, StoreError> {
        let mut builder = ReservationFilterBuilder::new();
        builder.in_room(room_id).on_date(date).without_cancelled();
        self.get_reservations_filtered(builder.build())
    }
}

impl TimetableProvider for MemoryStoreFacade<'_> {
    fn list_entries(&mut self, room_id: &str) -> Result<Vec<TimetableEntry>, StoreError> {
        let data = self.store.lock_data()?;
        Ok(data
            .timetable
            .iter()
            .filter(|e| e.room_id == room_id)
            .cloned()
            .collect())
    }
}

impl SlotPlanStoreFacade for MemoryStoreFacade<'_> {
    fn get_rooms(&mut self) -> Result<Vec<Room>, StoreError> {
        let data = self.store.lock_data()?;
        Ok(data.rooms.clone())
    }

    fn get_room(&mut self, room_id: &str) -> Result<Room, StoreError> {
        let data = self.store.lock_data()?;
        data.rooms
            .iter()
            .find(|r| r.id == room_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn get_reservations_filtered(
        &mut self,
        filter: ReservationFilter,
    ) -> Result<Vec<Reservation>, StoreError> {
        let data = self.store.lock_data()?;
        let mut result: Vec<Reservation> = data
            .reservations
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        result.sort_by_key(|r| (r.date, r.time.start, r.time.end));
        Ok(result)
    }

    fn create_reservation(
        &mut self,
        mut reservation: Reservation,
    ) -> Result<ReservationId, StoreError> {
        let room_id = reservation.room_id.clone();
        let reservation_id = {
            let mut data = self.store.lock_data()?;
            if reservation.id.is_empty() {
                reservation.id = uuid::Uuid::now_v7().to_string();
            } else if data.reservations.iter().any(|r| r.id == reservation.id) {
                return Err(StoreError::ConflictEntityExists);
            }
            let reservation_id = reservation.id.clone();
            data.reservations.push(reservation);
            reservation_id
        };
        debug!("Created reservation {} in room {}", reservation_id, room_id);
        self.store.notify(&[room_id])?;
        Ok(reservation_id)
    }

    fn update_reservation_status(
        &mut self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> Result<(), StoreError> {
        let room_id = {
            let mut data = self.store.lock_data()?;
            let reservation = data
                .reservations
                .iter_mut()
                .find(|r| r.id == reservation_id)
                .ok_or(StoreError::NotExisting)?;
            reservation.status = status;
            reservation.room_id.clone()
        };
        debug!("Changed status of reservation {} to {}", reservation_id, status);
        self.store.notify(&[room_id])
    }

    fn create_timetable_entry(
        &mut self,
        mut entry: TimetableEntry,
    ) -> Result<TimetableEntryId, StoreError> {
        let room_id = entry.room_id.clone();
        let entry_id = {
            let mut data = self.store.lock_data()?;
            if entry.id.is_empty() {
                entry.id = uuid::Uuid::now_v7().to_string();
            } else if data.timetable.iter().any(|e| e.id == entry.id) {
                return Err(StoreError::ConflictEntityExists);
            }
            let entry_id = entry.id.clone();
            data.timetable.push(entry);
            entry_id
        };
        self.store.notify(&[room_id])?;
        Ok(entry_id)
    }

    fn delete_timetable_entry(&mut self, entry_id: &str) -> Result<(), StoreError> {
        let room_id = {
            let mut data = self.store.lock_data()?;
            let position = data
                .timetable
                .iter()
                .position(|e| e.id == entry_id)
                .ok_or(StoreError::NotExisting)?;
            data.timetable.remove(position).room_id
        };
        self.store.notify(&[room_id])
    }

    fn import_snapshot(&mut self, contents: SnapshotContents) -> Result<(), StoreError> {
        let mut affected_rooms: Vec<RoomId> = contents
            .reservations
            .iter()
            .map(|r| r.room_id.clone())
            .chain(contents.timetable.iter().map(|e| e.room_id.clone()))
            .collect();
        affected_rooms.sort();
        affected_rooms.dedup();
        {
            let mut data = self.store.lock_data()?;
            let rooms_unique =
                all_unique(data.rooms.iter().chain(&contents.rooms).map(|r| &r.id));
            let reservations_unique = all_unique(
                data.reservations
                    .iter()
                    .chain(&contents.reservations)
                    .map(|r| &r.id),
            );
            let timetable_unique =
                all_unique(data.timetable.iter().chain(&contents.timetable).map(|e| &e.id));
            if !(rooms_unique && reservations_unique && timetable_unique) {
                return Err(StoreError::ConflictEntityExists);
            }
            data.rooms.extend(contents.rooms);
            data.reservations.extend(contents.reservations);
            data.timetable.extend(contents.timetable);
            debug!(
                "Store contains {} rooms, {} reservations and {} timetable entries after import",
                data.rooms.len(),
                data.reservations.len(),
                data.timetable.len()
            );
        }
        self.store.notify(&affected_rooms)
    }
}

fn all_unique<'a>(mut ids: impl Iterator<Item = &'a String>) -> bool {
    let mut seen = HashSet::new();
    ids.all(|id| seen.insert(id))
}
