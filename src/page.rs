use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::process_collection;
use crate::raw::RawRecord;

/// One page of a listing, with navigation flags precomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self { items: Vec::new(), page: 1, page_size: 1, total: 0, total_pages: 1, has_next: false, has_prev: false }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

const ITEM_KEYS: [&str; 3] = ["items", "docs", "data"];

/// Count field as a positive integer, falling back to `default`.
fn count_or(raw: RawRecord<'_>, keys: &[&str], default: u64) -> u64 {
    keys.iter()
        .map(|k| raw.number_or(k, 0.0))
        .find(|n| *n >= 1.0)
        .map(|n| n as u64)
        .unwrap_or(default)
}

/// Build a [`Page`] from a listing payload.
///
/// Accepts either a bare array or an object carrying the items under
/// `items`, `docs` or `data` alongside `total`, `page`, `limit`/`pageSize`
/// and `totalPages`. Items go through [`process_collection`]; the counts are
/// taken from the backend as-is.
pub fn assemble_page<'a, T, F>(data: Option<&'a Value>, item_normalizer: F) -> Page<T>
where
    F: FnMut(RawRecord<'a>, usize) -> T,
{
    let (items, meta) = match data {
        Some(Value::Array(_)) => (data, RawRecord::absent()),
        Some(Value::Object(map)) => {
            let meta = RawRecord::from(map);
            let items = ITEM_KEYS.iter().find_map(|k| meta.get(k).filter(|v| v.is_array()));
            (items, meta)
        }
        _ => return Page::empty(),
    };

    let raw_len = items.and_then(Value::as_array).map(Vec::len).unwrap_or(0) as u64;
    let page = count_or(meta, &["page", "currentPage"], 1);
    let page_size = count_or(meta, &["limit", "pageSize", "perPage"], raw_len.max(1));
    let total = count_or(meta, &["total", "totalItems", "count"], raw_len);
    let total_pages = count_or(meta, &["totalPages", "pages"], total.div_ceil(page_size).max(1));

    Page {
        items: process_collection(items, item_normalizer),
        page,
        page_size,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles(raw: Option<Value>) -> Page<String> {
        assemble_page(raw.as_ref(), |item, _| item.text_or("title", ""))
    }

    #[test]
    fn bare_arrays_form_a_single_page() {
        let page = titles(Some(json!([{ "title": "a" }, { "title": "b" }])));
        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!((page.page, page.page_size, page.total, page.total_pages), (1, 2, 2, 1));
        assert!(!page.has_next && !page.has_prev);
    }

    #[test]
    fn paged_objects_carry_backend_counts() {
        let page = titles(Some(json!({
            "items": [{ "title": "c", "order": 2 }, { "title": "d", "order": 1 }],
            "total": 25,
            "page": "2",
            "limit": 10
        })));
        assert_eq!(page.items, vec!["d", "c"]);
        assert_eq!((page.page, page.page_size, page.total, page.total_pages), (2, 10, 25, 3));
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn explicit_total_pages_wins() {
        let page = titles(Some(json!({ "docs": [], "total": 0, "totalPages": 4, "page": 4 })));
        assert_eq!(page.total_pages, 4);
        assert!(!page.has_next);
    }

    #[test]
    fn zero_page_falls_back_to_first_page() {
        let page = titles(Some(json!({ "data": [{ "title": "x" }], "page": 0 })));
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec!["x"]);
    }

    #[test]
    fn unusable_payloads_give_an_empty_page() {
        for raw in [None, Some(json!(null)), Some(json!("x")), Some(json!({ "items": "nope" }))] {
            let page = titles(raw);
            assert!(page.items.is_empty());
            assert_eq!(page.total_pages, 1);
        }
    }
}
