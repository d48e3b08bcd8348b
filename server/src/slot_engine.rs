//! The availability engine: partition of a room's day into the fixed booking slots
//!
//! [compute_daily_slots] is a pure function over a snapshot of the room's reservations and
//! timetable. It does not cache anything; whenever the underlying data changes, it is simply
//! invoked again with a fresh snapshot. [build_slots_for] fetches such a snapshot from the data
//! providers and calls the engine.

use crate::data_store::models::{Reservation, ReservationStatus, TimeRange, TimetableEntry};
use crate::data_store::{ReservationProvider, StoreError, TimetableProvider};
use chrono::{Datelike, NaiveDate, NaiveTime};
use log::debug;

const fn two_hour_slot(start_hour: u32) -> TimeRange {
    TimeRange {
        start: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(start_hour + 2, 0, 0).unwrap(),
    }
}

/// The six bookable windows of every day, in chronological order, covering 09:00 to 21:00 without
/// gaps.
pub const CANONICAL_SLOTS: [TimeRange; 6] = [
    two_hour_slot(9),
    two_hour_slot(11),
    two_hour_slot(13),
    two_hour_slot(15),
    two_hour_slot(17),
    two_hour_slot(19),
];

/// The source of a slot's occupation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotOccupant {
    Free,
    Reservation(Reservation),
    Class(TimetableEntry),
}

impl SlotOccupant {
    /// Check if both occupants are the same record (same kind and same id), regardless of the
    /// record's current contents.
    pub fn is_same_source(&self, other: &SlotOccupant) -> bool {
        match (self, other) {
            (SlotOccupant::Free, SlotOccupant::Free) => true,
            (SlotOccupant::Reservation(a), SlotOccupant::Reservation(b)) => a.id == b.id,
            (SlotOccupant::Class(a), SlotOccupant::Class(b)) => a.id == b.id,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub time: TimeRange,
    pub occupant: SlotOccupant,
}

impl TimeSlot {
    /// Classes don't have a status of their own. They always block their slots as RESERVED.
    pub fn status(&self) -> ReservationStatus {
        match &self.occupant {
            SlotOccupant::Free => ReservationStatus::Available,
            SlotOccupant::Reservation(reservation) => reservation.status,
            SlotOccupant::Class(_) => ReservationStatus::Reserved,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status() == ReservationStatus::Available
    }

    pub fn reservation(&self) -> Option<&Reservation> {
        match &self.occupant {
            SlotOccupant::Reservation(reservation) => Some(reservation),
            _ => None,
        }
    }

    pub fn timetable_entry(&self) -> Option<&TimetableEntry> {
        match &self.occupant {
            SlotOccupant::Class(entry) => Some(entry),
            _ => None,
        }
    }

    /// Identity of the slot within a sequence of schedules, e.g. for detecting changed slots
    /// between two computations.
    pub fn slot_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time.start)
    }

    /// Check if a renderer needs to redraw this slot when it has been replaced by `other`
    pub fn has_same_content(&self, other: &TimeSlot) -> bool {
        self.status() == other.status() && self.occupant.is_same_source(&other.occupant)
    }

    pub fn display_time(&self) -> String {
        self.time.to_string()
    }

    pub fn display_label(&self) -> String {
        match &self.occupant {
            SlotOccupant::Free => "Available".to_string(),
            SlotOccupant::Class(entry) => entry.course_name.clone(),
            SlotOccupant::Reservation(reservation) => match reservation.status {
                ReservationStatus::Available => "Available".to_string(),
                ReservationStatus::Reserved => reservation.title.clone(),
                ReservationStatus::Pending => format!("{} (pending approval)", reservation.title),
                ReservationStatus::CheckedIn => format!("{} (checked in)", reservation.title),
                ReservationStatus::Cancelled => format!("{} (cancelled)", reservation.title),
            },
        }
    }

    pub fn meta_info(&self) -> String {
        match &self.occupant {
            SlotOccupant::Free => String::new(),
            SlotOccupant::Reservation(reservation) => {
                format!("{} • {} attendees", reservation.owner, reservation.attendees)
            }
            SlotOccupant::Class(entry) => {
                format!("{} • {} attendees", entry.instructor, entry.attendees)
            }
        }
    }
}

impl From<TimeSlot> for slotplan_api_types::TimeSlot {
    fn from(value: TimeSlot) -> Self {
        let label = value.display_label();
        let meta_info = value.meta_info();
        let status = value.status().into();
        Self {
            date: value.date,
            start_time: value.time.start,
            end_time: value.time.end,
            status,
            occupant: match value.occupant {
                SlotOccupant::Free => slotplan_api_types::SlotOccupant::Free,
                SlotOccupant::Reservation(r) => slotplan_api_types::SlotOccupant::Reservation {
                    reservation_id: r.id,
                },
                SlotOccupant::Class(e) => slotplan_api_types::SlotOccupant::Class {
                    timetable_entry_id: e.id,
                },
            },
            label,
            meta_info,
        }
    }
}

/// An interval occupying the room, considered for resolving the slot's status
enum Block<'a> {
    Reservation(&'a Reservation),
    Class(&'a TimetableEntry),
}

impl Block<'_> {
    fn time(&self) -> &TimeRange {
        match self {
            Block::Reservation(reservation) => &reservation.time,
            Block::Class(entry) => &entry.time,
        }
    }

    fn to_occupant(&self) -> SlotOccupant {
        match self {
            Block::Reservation(reservation) => SlotOccupant::Reservation((*reservation).clone()),
            Block::Class(entry) => SlotOccupant::Class((*entry).clone()),
        }
    }
}

/// Calculate the occupation of each of the [CANONICAL_SLOTS] of a room on the given date.
///
/// `reservations` must already be restricted to the room and date by the caller. In particular,
/// cancelled reservations must have been filtered out: every given reservation occupies its slots.
/// `timetable_entries` may contain the room's entries of all weekdays; only those on the date's
/// weekday are considered.
///
/// A slot is attributed to the first block (reservations first, then timetable entries, each in
/// the given order) which overlaps the slot by any nonzero amount. Blocks just touching the slot's
/// boundaries don't count. Thus, the caller controls the precedence of competing reservations by
/// their order.
///
/// The result always consists of exactly six slots in chronological order.
pub fn compute_daily_slots(
    date: NaiveDate,
    reservations: &[Reservation],
    timetable_entries: &[TimetableEntry],
) -> Vec<TimeSlot> {
    let weekday = date.weekday();
    let blocks: Vec<Block> = reservations
        .iter()
        .map(Block::Reservation)
        .chain(
            timetable_entries
                .iter()
                .filter(|entry| entry.weekday == weekday)
                .map(Block::Class),
        )
        .collect();

    CANONICAL_SLOTS
        .iter()
        .map(|slot_time| TimeSlot {
            date,
            time: *slot_time,
            occupant: blocks
                .iter()
                .find(|block| block.time().overlaps(slot_time))
                .map(Block::to_occupant)
                .unwrap_or(SlotOccupant::Free),
        })
        .collect()
}

/// Fetch the current reservations and timetable of a room from the `provider` and calculate the
/// room's slots on the given date.
///
/// Failures of the provider are passed to the caller. No slots are calculated from partial data.
pub fn build_slots_for<P>(
    provider: &mut P,
    room_id: &str,
    date: NaiveDate,
) -> Result<Vec<TimeSlot>, StoreError>
where
    P: ReservationProvider + TimetableProvider + ?Sized,
{
    let reservations = provider.list_non_cancelled_reservations(room_id, date)?;
    let timetable_entries = provider.list_entries(room_id)?;
    debug!(
        "Calculating slots of room {} on {} from {} reservations and {} timetable entries",
        room_id,
        date,
        reservations.len(),
        timetable_entries.len()
    );
    Ok(compute_daily_slots(date, &reservations, &timetable_entries))
}

/// Get the seven dates (Monday to Sunday) of the week containing the given date.
///
/// Returns None if the week exceeds the range of representable dates.
pub fn week_dates(date: NaiveDate) -> Option<[NaiveDate; 7]> {
    let monday = date.checked_sub_signed(chrono::Duration::days(
        date.weekday().num_days_from_monday() as i64,
    ))?;
    let mut dates = [monday; 7];
    for (i, day) in dates.iter_mut().enumerate().skip(1) {
        *day = monday.checked_add_signed(chrono::Duration::days(i as i64))?;
    }
    Some(dates)
}

/// Calculate the room's slots for each day of the week containing the given date
pub fn build_week_slots_for<P>(
    provider: &mut P,
    room_id: &str,
    date: NaiveDate,
) -> Result<Vec<(NaiveDate, Vec<TimeSlot>)>, StoreError>
where
    P: ReservationProvider + TimetableProvider + ?Sized,
{
    week_dates(date)
        .ok_or_else(|| {
            StoreError::InvalidInputData(format!("The week of {} is out of range", date))
        })?
        .into_iter()
        .map(|day| Ok((day, build_slots_for(provider, room_id, day)?)))
        .collect()
}
