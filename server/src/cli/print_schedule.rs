use crate::cli_error::CliError;
use crate::data_store::SlotPlanStore;
use crate::reservation_overview::owner_reservations;
use crate::slot_engine::{build_slots_for, build_week_slots_for, CANONICAL_SLOTS};
use chrono::NaiveDate;

pub fn room_list_table(store: &impl SlotPlanStore) -> Result<comfy_table::Table, CliError> {
    let mut data_store = store.get_facade()?;
    let rooms = data_store.get_rooms()?;

    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(vec!["id", "name", "building", "floor", "capacity", "facilities"])
        .add_rows(rooms.into_iter().map(|room| {
            [
                room.id,
                room.name,
                room.building,
                room.floor,
                room.capacity.to_string(),
                room.facilities.join(", "),
            ]
        }));
    Ok(table)
}

pub fn day_schedule_table(
    store: &impl SlotPlanStore,
    room_id: &str,
    date: NaiveDate,
) -> Result<comfy_table::Table, CliError> {
    let mut data_store = store.get_facade()?;
    data_store.get_room(room_id)?;
    let slots = build_slots_for(&mut *data_store, room_id, date)?;

    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(vec!["time", "status", "occupied by", "details"])
        .add_rows(slots.into_iter().map(|slot| {
            [
                slot.display_time(),
                slot.status().to_string(),
                slot.display_label(),
                slot.meta_info(),
            ]
        }));
    Ok(table)
}

/// Grid of the room's slots in the week containing `date`, with one column per day
pub fn week_schedule_table(
    store: &impl SlotPlanStore,
    room_id: &str,
    date: NaiveDate,
) -> Result<comfy_table::Table, CliError> {
    let mut data_store = store.get_facade()?;
    data_store.get_room(room_id)?;
    let week = build_week_slots_for(&mut *data_store, room_id, date)?;

    let mut header = vec!["time".to_string()];
    header.extend(week.iter().map(|(day, _)| day.format("%a %m-%d").to_string()));

    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(header)
        .add_rows(CANONICAL_SLOTS.iter().enumerate().map(|(i, slot_time)| {
            let mut row = vec![slot_time.to_string()];
            row.extend(week.iter().map(|(_, slots)| {
                let slot = &slots[i];
                if slot.is_available() {
                    "-".to_string()
                } else {
                    slot.display_label()
                }
            }));
            row
        }));
    Ok(table)
}

/// All reservations of the given owner, grouped into upcoming, past and cancelled ones
pub fn owner_reservations_table(
    store: &impl SlotPlanStore,
    owner: &str,
    today: NaiveDate,
) -> Result<comfy_table::Table, CliError> {
    let mut data_store = store.get_facade()?;
    let overview = owner_reservations(&mut *data_store, owner, today)?;

    let groups = [
        ("upcoming", overview.upcoming),
        ("past", overview.past),
        ("cancelled", overview.cancelled),
    ];
    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(vec!["", "id", "date", "time", "room", "title", "status"])
        .add_rows(groups.into_iter().flat_map(|(group, reservations)| {
            reservations.into_iter().map(move |r| {
                [
                    group.to_string(),
                    r.id,
                    r.date.to_string(),
                    r.time.to_string(),
                    r.room_id,
                    r.title,
                    r.status.to_string(),
                ]
            })
        }));
    Ok(table)
}
