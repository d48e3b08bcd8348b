use crate::cli_error::CliError;
use crate::data_store::models::{Reservation, SnapshotContents, TimetableEntry};
use crate::data_store::{SlotPlanStore, StoreError};
use crate::slot_engine::build_slots_for;
use chrono::NaiveDate;
use log::info;
use slotplan_api_types::{DaySchedule, SavedSnapshot};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

pub fn load_snapshot_from_file(path: &Path, store: &impl SlotPlanStore) -> Result<(), CliError> {
    let f = File::open(path).map_err(|e| {
        CliError::FileError(format!("Could not open {:?} for reading: {}", path, e))
    })?;
    load_snapshot(BufReader::new(f), store)?;
    info!("Loaded snapshot from {:?}", path);
    Ok(())
}

pub fn load_snapshot(reader: impl Read, store: &impl SlotPlanStore) -> Result<(), CliError> {
    let data: SavedSnapshot = serde_json::from_reader(reader)?;
    check_room_references(&data)?;

    let contents = SnapshotContents {
        rooms: data.rooms.into_iter().map(|r| r.into()).collect(),
        reservations: data
            .reservations
            .into_iter()
            .map(Reservation::try_from)
            .collect::<Result<_, _>>()
            .map_err(StoreError::InvalidInputData)?,
        timetable: data
            .timetable
            .into_iter()
            .map(TimetableEntry::try_from)
            .collect::<Result<_, _>>()
            .map_err(StoreError::InvalidInputData)?,
    };

    let mut data_store = store.get_facade()?;
    data_store.import_snapshot(contents)?;
    Ok(())
}

fn check_room_references(data: &SavedSnapshot) -> Result<(), CliError> {
    let room_ids: BTreeSet<&str> = data.rooms.iter().map(|r| r.id.as_str()).collect();
    for reservation in data.reservations.iter() {
        if !room_ids.contains(reservation.room_id.as_str()) {
            return Err(CliError::DataError(format!(
                "Room {} of reservation {} does not exist",
                reservation.room_id, reservation.id
            )));
        }
    }
    for entry in data.timetable.iter() {
        if !room_ids.contains(entry.room_id.as_str()) {
            return Err(CliError::DataError(format!(
                "Room {} of timetable entry {} does not exist",
                entry.room_id, entry.id
            )));
        }
    }
    Ok(())
}

/// Calculate the room's slots on the given date and write them as JSON document
pub fn write_day_schedule(
    store: &impl SlotPlanStore,
    room_id: &str,
    date: NaiveDate,
    writer: impl Write,
) -> Result<(), CliError> {
    let mut data_store = store.get_facade()?;
    // Fail for unknown rooms instead of reporting them as completely available
    data_store.get_room(room_id)?;
    let slots = build_slots_for(&mut *data_store, room_id, date)?;
    let schedule = DaySchedule {
        room_id: room_id.to_string(),
        date,
        slots: slots.into_iter().map(|s| s.into()).collect(),
    };
    serde_json::to_writer_pretty(writer, &schedule)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_store::memory::MemoryStore;

    const SNAPSHOT: &str = r#"{
        "rooms": [
            {"id": "room301", "building": "Engineering Hall", "name": "Engineering Hall 301",
             "capacity": 40, "floor": "3F", "facilities": ["Projector"]}
        ],
        "reservations": [
            {"id": "RS-1", "roomId": "room301", "title": "Algorithm study group",
             "owner": "Kim Minjun", "date": "2025-09-30", "startTime": "10:30",
             "endTime": "12:00", "attendees": 15, "status": "RESERVED"},
            {"id": "RS-2", "roomId": "room301", "title": "Board game night",
             "owner": "Kim Minjun", "date": "2025-09-30", "startTime": "19:00",
             "endTime": "20:00", "status": "CANCELLED"}
        ],
        "timetable": [
            {"id": "TT-1", "courseName": "Operating Systems", "roomId": "room301",
             "dayOfWeek": "TUESDAY", "startTime": "15:00", "endTime": "17:00",
             "attendees": 40, "professor": "Prof. Lee", "semester": "2025-2"}
        ]
    }"#;

    #[test]
    fn test_load_snapshot() {
        let store = MemoryStore::new();
        load_snapshot(SNAPSHOT.as_bytes(), &store).unwrap();
        let data = store.data.lock().unwrap();
        assert_eq!(data.rooms.len(), 1);
        assert_eq!(data.reservations.len(), 2);
        assert_eq!(data.timetable.len(), 1);
        assert_eq!(data.timetable[0].instructor, "Prof. Lee");
    }

    #[test]
    fn test_load_snapshot_with_unknown_room() {
        let store = MemoryStore::new();
        let snapshot = SNAPSHOT.replace(
            r#""roomId": "room301", "title": "Board"#,
            r#""roomId": "room999", "title": "Board"#,
        );
        let result = load_snapshot(snapshot.as_bytes(), &store);
        assert!(matches!(result, Err(CliError::DataError(e)) if e.contains("room999")));
        assert!(store.data.lock().unwrap().rooms.is_empty());
    }

    #[test]
    fn test_load_snapshot_with_inverted_range() {
        let store = MemoryStore::new();
        let snapshot = SNAPSHOT.replace(r#""endTime": "12:00""#, r#""endTime": "10:00""#);
        let result = load_snapshot(snapshot.as_bytes(), &store);
        assert!(matches!(result, Err(CliError::DataError(e)) if e.contains("RS-1")));
    }

    #[test]
    fn test_load_invalid_json() {
        let store = MemoryStore::new();
        let result = load_snapshot("{\"rooms\": [".as_bytes(), &store);
        assert!(matches!(result, Err(CliError::DataError(_))));
    }

    #[test]
    fn test_write_day_schedule() {
        let store = MemoryStore::new();
        load_snapshot(SNAPSHOT.as_bytes(), &store).unwrap();
        let mut output = Vec::new();
        write_day_schedule(&store, "room301", "2025-09-30".parse().unwrap(), &mut output)
            .unwrap();

        let schedule: DaySchedule = serde_json::from_slice(&output).unwrap();
        assert_eq!(schedule.slots.len(), 6);
        assert_eq!(schedule.slots[0].label, "Algorithm study group");
        assert_eq!(schedule.slots[3].label, "Operating Systems");
        assert_eq!(
            schedule.slots[5].status,
            slotplan_api_types::ReservationStatus::Available
        );
    }

    #[test]
    fn test_write_day_schedule_of_unknown_room() {
        let store = MemoryStore::new();
        load_snapshot(SNAPSHOT.as_bytes(), &store).unwrap();
        let result = write_day_schedule(
            &store,
            "room999",
            "2025-09-30".parse().unwrap(),
            Vec::new(),
        );
        assert!(matches!(result, Err(CliError::DataError(_))));
    }
}
