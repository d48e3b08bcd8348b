use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Missing status values in stored data are read as `PENDING`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Available,
    #[default]
    Pending,
    Reserved,
    CheckedIn,
    Cancelled,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    #[default]
    Available,
    Reserved,
    Maintenance,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for chrono::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub building: String,
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub status: RoomStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Reservation {
    pub id: String,
    #[serde(rename = "roomId")]
    pub room_id: String,
    #[serde(default, rename = "roomName")]
    pub room_name: String,
    pub title: String,
    #[serde(default)]
    pub owner: String,
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub note: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TimetableEntry {
    pub id: String,
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "roomId")]
    pub room_id: String,
    #[serde(default, rename = "roomName")]
    pub room_name: String,
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: Weekday,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default, rename = "professor")]
    pub instructor: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub semester: String,
}

/// Complete set of rooms, reservations and timetable entries, as read from or written to a JSON
/// file.
#[derive(Serialize, Deserialize, Default)]
pub struct SavedSnapshot {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub timetable: Vec<TimetableEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlotOccupant {
    Free,
    Reservation {
        #[serde(rename = "reservationId")]
        reservation_id: String,
    },
    Class {
        #[serde(rename = "timetableEntryId")]
        timetable_entry_id: String,
    },
}

/// One rendered slot of a room's day schedule
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TimeSlot {
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub occupant: SlotOccupant,
    pub label: String,
    #[serde(default, rename = "metaInfo")]
    pub meta_info: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DaySchedule {
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}
