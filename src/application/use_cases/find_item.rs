//! Item lookup over an imported batch.
//!
//! The identifier column is resolved through the candidate list instead of
//! being hardwired, so batches whose key column carries a different header
//! still look up correctly. Matching is case-sensitive on the trimmed
//! query; the first matching record wins when identifiers repeat.

use crate::domain::error::Result;
use crate::domain::inventory::{InventoryRecord, REQUIRED_COLUMNS};

use super::column_resolver::{resolve_column, ID_COLUMN_CANDIDATES};

/// First record whose identifier matches the trimmed query, if any.
pub fn find_item<'a>(
    items: &'a [InventoryRecord],
    query: &str,
) -> Result<Option<&'a InventoryRecord>> {
    Ok(find_item_position(items, query)?.map(|pos| &items[pos]))
}

/// Position of the first matching record, for callers that need to
/// mutate it in place.
pub fn find_item_position(items: &[InventoryRecord], query: &str) -> Result<Option<usize>> {
    let headers = canonical_headers();
    let column = resolve_column(&headers, ID_COLUMN_CANDIDATES)?;
    let query = query.trim();

    Ok(items
        .iter()
        .position(|item| item.field(&column) == Some(query)))
}

fn canonical_headers() -> Vec<String> {
    REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
}
