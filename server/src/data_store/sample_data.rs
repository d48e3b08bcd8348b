use crate::data_store::models::{
    Reservation, ReservationStatus, Room, SnapshotContents, TimeRange, TimetableEntry,
};
use crate::data_store::SlotPlanStore;

pub(crate) fn time_range(start: &str, end: &str) -> TimeRange {
    TimeRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

/// A RESERVED reservation in room301 on Tuesday, 2025-09-30
pub(crate) fn sample_reservation(id: &str, start: &str, end: &str) -> Reservation {
    Reservation {
        id: id.to_string(),
        room_id: "room301".to_string(),
        room_name: "Engineering Hall 301".to_string(),
        title: "Algorithm study group".to_string(),
        owner: "Kim Minjun".to_string(),
        date: "2025-09-30".parse().unwrap(),
        time: time_range(start, end),
        attendees: 15,
        status: ReservationStatus::Reserved,
        note: "".to_string(),
    }
}

pub(crate) fn sample_timetable_entry(
    id: &str,
    weekday: chrono::Weekday,
    start: &str,
    end: &str,
) -> TimetableEntry {
    TimetableEntry {
        id: id.to_string(),
        course_name: "Operating Systems".to_string(),
        room_id: "room301".to_string(),
        room_name: "Engineering Hall 301".to_string(),
        weekday,
        time: time_range(start, end),
        attendees: 40,
        instructor: "Prof. Lee".to_string(),
        note: "".to_string(),
        semester: "2025-2".to_string(),
    }
}

fn sample_room(id: &str, name: &str, capacity: u32, floor: &str) -> Room {
    Room {
        id: id.to_string(),
        building: "Engineering Hall".to_string(),
        name: name.to_string(),
        capacity,
        floor: floor.to_string(),
        facilities: vec!["Projector".to_string(), "Whiteboard".to_string()],
        status: slotplan_api_types::RoomStatus::Available,
    }
}

pub(crate) fn fill_sample_data(store: &impl SlotPlanStore) {
    let mut facade = store.get_facade().unwrap();

    let mut project_meeting = sample_reservation("RS-2025-0930-002", "14:30", "16:00");
    project_meeting.title = "Capstone project meeting".to_string();
    project_meeting.owner = "Park Seoyeon".to_string();
    project_meeting.attendees = 8;
    project_meeting.status = ReservationStatus::Pending;

    let mut cancelled = sample_reservation("RS-2025-0930-003", "19:00", "20:00");
    cancelled.title = "Board game night".to_string();
    cancelled.status = ReservationStatus::Cancelled;

    let mut other_room = sample_reservation("RS-2025-0930-004", "09:00", "11:00");
    other_room.room_id = "room205".to_string();
    other_room.room_name = "Engineering Hall 205".to_string();

    let mut databases = sample_timetable_entry("TT-DB-MON", chrono::Weekday::Mon, "13:00", "15:00");
    databases.course_name = "Databases".to_string();
    databases.instructor = "Prof. Choi".to_string();

    facade
        .import_snapshot(SnapshotContents {
            rooms: vec![
                sample_room("room301", "Engineering Hall 301", 40, "3F"),
                sample_room("room205", "Engineering Hall 205", 30, "2F"),
                sample_room("roomB102", "Engineering Hall B102", 25, "B1"),
            ],
            reservations: vec![
                project_meeting,
                sample_reservation("RS-2025-0930-001", "10:30", "12:00"),
                cancelled,
                other_room,
            ],
            timetable: vec![
                sample_timetable_entry("TT-OS-TUE", chrono::Weekday::Tue, "15:00", "17:00"),
                databases,
            ],
        })
        .unwrap();
}
