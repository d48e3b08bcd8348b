use crate::data_store::{ReservationId, RoomId, TimetableEntryId};
use chrono::{NaiveDate, NaiveTime, Weekday};
use std::fmt::{Display, Formatter};

/// A wall-clock time range within a single day, interpreted as half-open interval `[start, end)`.
///
/// Producers of time ranges are expected to create them via [TimeRange::new], which rejects
/// zero-length and inverted ranges. The fields are public nevertheless, so consumers must not rely
/// on `start < end` for correctness of anything but their own results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, String> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(format!(
                "Time range {} - {} does not end after its start",
                start.format("%H:%M"),
                end.format("%H:%M")
            ))
        }
    }

    /// Check if the two ranges share a non-empty interval. Ranges which only touch at their
    /// boundaries (e.g. 09:00-11:00 and 11:00-13:00) don't overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Available,
    Pending,
    Reserved,
    CheckedIn,
    Cancelled,
}

impl From<slotplan_api_types::ReservationStatus> for ReservationStatus {
    fn from(value: slotplan_api_types::ReservationStatus) -> Self {
        match value {
            slotplan_api_types::ReservationStatus::Available => Self::Available,
            slotplan_api_types::ReservationStatus::Pending => Self::Pending,
            slotplan_api_types::ReservationStatus::Reserved => Self::Reserved,
            slotplan_api_types::ReservationStatus::CheckedIn => Self::CheckedIn,
            slotplan_api_types::ReservationStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ReservationStatus> for slotplan_api_types::ReservationStatus {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Available => Self::Available,
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Reserved => Self::Reserved,
            ReservationStatus::CheckedIn => Self::CheckedIn,
            ReservationStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ReservationStatus::Available => "AVAILABLE",
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Reserved => "RESERVED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::Cancelled => "CANCELLED",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub room_name: String,
    pub title: String,
    pub owner: String,
    pub date: NaiveDate,
    pub time: TimeRange,
    pub attendees: u32,
    pub status: ReservationStatus,
    pub note: String,
}

impl TryFrom<slotplan_api_types::Reservation> for Reservation {
    type Error = String;

    fn try_from(value: slotplan_api_types::Reservation) -> Result<Self, Self::Error> {
        Ok(Self {
            time: TimeRange::new(value.start_time, value.end_time)
                .map_err(|e| format!("Reservation {}: {}", value.id, e))?,
            id: value.id,
            room_id: value.room_id,
            room_name: value.room_name,
            title: value.title,
            owner: value.owner,
            date: value.date,
            attendees: value.attendees,
            status: value.status.into(),
            note: value.note,
        })
    }
}

impl From<Reservation> for slotplan_api_types::Reservation {
    fn from(value: Reservation) -> Self {
        Self {
            id: value.id,
            room_id: value.room_id,
            room_name: value.room_name,
            title: value.title,
            owner: value.owner,
            date: value.date,
            start_time: value.time.start,
            end_time: value.time.end,
            attendees: value.attendees,
            status: value.status.into(),
            note: value.note,
        }
    }
}

/// A recurring class, occupying a room on the same weekday of every week
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimetableEntry {
    pub id: TimetableEntryId,
    pub course_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub weekday: Weekday,
    pub time: TimeRange,
    pub attendees: u32,
    pub instructor: String,
    pub note: String,
    pub semester: String,
}

impl TryFrom<slotplan_api_types::TimetableEntry> for TimetableEntry {
    type Error = String;

    fn try_from(value: slotplan_api_types::TimetableEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            time: TimeRange::new(value.start_time, value.end_time)
                .map_err(|e| format!("Timetable entry {}: {}", value.id, e))?,
            id: value.id,
            course_name: value.course_name,
            room_id: value.room_id,
            room_name: value.room_name,
            weekday: value.day_of_week.into(),
            attendees: value.attendees,
            instructor: value.instructor,
            note: value.note,
            semester: value.semester,
        })
    }
}

impl From<TimetableEntry> for slotplan_api_types::TimetableEntry {
    fn from(value: TimetableEntry) -> Self {
        Self {
            id: value.id,
            course_name: value.course_name,
            room_id: value.room_id,
            room_name: value.room_name,
            day_of_week: value.weekday.into(),
            start_time: value.time.start,
            end_time: value.time.end,
            attendees: value.attendees,
            instructor: value.instructor,
            note: value.note,
            semester: value.semester,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Room {
    pub id: RoomId,
    pub building: String,
    pub name: String,
    pub capacity: u32,
    pub floor: String,
    pub facilities: Vec<String>,
    pub status: slotplan_api_types::RoomStatus,
}

impl From<slotplan_api_types::Room> for Room {
    fn from(value: slotplan_api_types::Room) -> Self {
        Self {
            id: value.id,
            building: value.building,
            name: value.name,
            capacity: value.capacity,
            floor: value.floor,
            facilities: value.facilities,
            status: value.status,
        }
    }
}

impl From<Room> for slotplan_api_types::Room {
    fn from(value: Room) -> Self {
        Self {
            id: value.id,
            building: value.building,
            name: value.name,
            capacity: value.capacity,
            floor: value.floor,
            facilities: value.facilities,
            status: value.status,
        }
    }
}

/// Rooms, reservations and timetable entries to be imported into a store at once
pub struct SnapshotContents {
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub timetable: Vec<TimetableEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_new() {
        assert!(TimeRange::new("09:00".parse().unwrap(), "11:00".parse().unwrap()).is_ok());
        assert!(TimeRange::new("11:00".parse().unwrap(), "11:00".parse().unwrap()).is_err());
        assert!(TimeRange::new("13:00".parse().unwrap(), "11:00".parse().unwrap()).is_err());
    }

    #[test]
    fn test_time_range_overlaps() {
        let slot = TimeRange::new("09:00".parse().unwrap(), "11:00".parse().unwrap()).unwrap();
        let cases = [
            ("10:30", "12:00", true),
            ("08:00", "09:30", true),
            ("08:00", "22:00", true),
            ("09:30", "10:00", true),
            ("11:00", "13:00", false),
            ("07:00", "09:00", false),
        ];
        for (start, end, expected) in cases {
            let other = TimeRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap();
            assert_eq!(slot.overlaps(&other), expected, "{}", other);
            assert_eq!(other.overlaps(&slot), expected, "{}", other);
        }
    }

    #[test]
    fn test_time_range_display() {
        let range = TimeRange::new("09:05".parse().unwrap(), "11:00".parse().unwrap()).unwrap();
        assert_eq!(range.to_string(), "09:05 - 11:00");
    }

    #[test]
    fn test_reservation_from_api_rejects_inverted_range() {
        let reservation: slotplan_api_types::Reservation = serde_json::from_str(
            r#"{"id": "RS-1", "roomId": "room301", "title": "Study group",
                "date": "2025-09-30", "startTime": "12:00", "endTime": "10:30"}"#,
        )
        .unwrap();
        let result = Reservation::try_from(reservation);
        assert!(result.is_err());
        assert!(result.unwrap_err().starts_with("Reservation RS-1:"));
    }

    #[test]
    fn test_reservation_from_api_defaults() {
        let reservation: slotplan_api_types::Reservation = serde_json::from_str(
            r#"{"id": "RS-1", "roomId": "room301", "title": "Study group",
                "date": "2025-09-30", "startTime": "10:30", "endTime": "12:00"}"#,
        )
        .unwrap();
        let reservation = Reservation::try_from(reservation).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.attendees, 0);
        assert_eq!(reservation.time.to_string(), "10:30 - 12:00");
    }

    #[test]
    fn test_timetable_entry_from_api() {
        let entry: slotplan_api_types::TimetableEntry = serde_json::from_str(
            r#"{"id": "TT-1", "courseName": "Operating Systems", "roomId": "room301",
                "dayOfWeek": "TUESDAY", "startTime": "15:00", "endTime": "17:00",
                "professor": "Lee", "semester": "2025-2"}"#,
        )
        .unwrap();
        let entry = TimetableEntry::try_from(entry).unwrap();
        assert_eq!(entry.weekday, Weekday::Tue);
        assert_eq!(entry.instructor, "Lee");
        assert_eq!(
            slotplan_api_types::TimetableEntry::from(entry).day_of_week,
            slotplan_api_types::Weekday::Tuesday
        );
    }
}
