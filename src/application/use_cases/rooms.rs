//! Room listing over an imported batch.
//!
//! The room column is resolved through the same candidate mechanism as the
//! identifier, then rooms are listed distinct and sorted so the operator
//! can walk them in a stable order.

use std::collections::BTreeSet;

use crate::domain::error::Result;
use crate::domain::inventory::{InventoryRecord, REQUIRED_COLUMNS};

use super::column_resolver::{resolve_column, ROOM_COLUMN_CANDIDATES};

/// Distinct non-empty room names, alphabetically sorted.
pub fn list_rooms(items: &[InventoryRecord]) -> Result<Vec<String>> {
    let column = room_column()?;

    let rooms: BTreeSet<String> = items
        .iter()
        .filter_map(|item| item.field(&column))
        .map(str::trim)
        .filter(|room| !room.is_empty())
        .map(str::to_string)
        .collect();

    Ok(rooms.into_iter().collect())
}

/// Items whose room matches `room` exactly (after trimming both sides).
pub fn items_in_room<'a>(
    items: &'a [InventoryRecord],
    room: &str,
) -> Result<Vec<&'a InventoryRecord>> {
    let column = room_column()?;
    let room = room.trim();

    Ok(items
        .iter()
        .filter(|item| item.field(&column).map(str::trim) == Some(room))
        .collect())
}

fn room_column() -> Result<String> {
    let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    resolve_column(&headers, ROOM_COLUMN_CANDIDATES)
}
