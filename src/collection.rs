use std::cmp::Ordering;

use serde_json::Value;
use tracing::trace;

use crate::raw::RawRecord;

/// Filter, order and map a nested array of sub-records.
///
/// Items whose `isActive` is exactly `false` are dropped first, the survivors
/// are stably sorted by `order`, and `item_normalizer` receives each item with
/// its position in that final sequence. Anything that is not an array yields
/// an empty vec without calling the normalizer.
pub fn process_collection<'a, T, F>(raw_items: Option<&'a Value>, mut item_normalizer: F) -> Vec<T>
where
    F: FnMut(RawRecord<'a>, usize) -> T,
{
    let Some(items) = raw_items.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut visible: Vec<RawRecord<'a>> = items
        .iter()
        .map(RawRecord::from)
        .filter(|item| item.flag_not_false("isActive"))
        .collect();
    trace!(total = items.len(), visible = visible.len(), "filtered collection");

    // sort_by is stable; equal orders keep their input positions
    visible.sort_by(|a, b| a.order().partial_cmp(&b.order()).unwrap_or(Ordering::Equal));

    visible
        .into_iter()
        .enumerate()
        .map(|(index, item)| item_normalizer(item, index))
        .collect()
}
