//! Filter → sort → paginate derivation from the record store and view state.
//!
//! Everything here is pure and synchronous: the same inputs always give the
//! same output.

use crate::{SortDirection, UserRecord, ViewState};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of the filtered and sorted record set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSlice {
    pub records: Vec<UserRecord>,
    /// Never below 1, even for an empty filtered set.
    pub total_pages: usize,
    /// Number of records left after filtering.
    pub total_count: usize,
}

/// Filtered and sorted records, without pagination. This is what gets exported.
pub fn sorted_view(records: &[UserRecord], view: &ViewState) -> Vec<UserRecord> {
    let needle = view.search_text.to_lowercase();
    let mut filtered: Vec<UserRecord> = records
        .iter()
        .filter(|record| needle.is_empty() || record.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let key = view.sort_key;
    let direction = view.sort_direction;
    // `sort_by` is stable; the descending case swaps operands instead of
    // reversing the output so equal keys keep their input order.
    filtered.sort_by(|a, b| {
        let left = a.field(key).to_lowercase();
        let right = b.field(key).to_lowercase();
        match direction {
            SortDirection::Ascending => left.cmp(&right),
            SortDirection::Descending => right.cmp(&left),
        }
    });
    filtered
}

/// Derive the page selected by `view.current_page`.
///
/// A page past the end yields an empty slice; callers clamp navigation.
pub fn derive_page(records: &[UserRecord], view: &ViewState, page_size: usize) -> PageSlice {
    let page_size = page_size.max(1);
    let sorted = sorted_view(records, view);
    let total_count = sorted.len();
    let total_pages = total_pages(total_count, page_size);

    let start = view.current_page.saturating_sub(1).saturating_mul(page_size);
    let records = if start >= total_count {
        Vec::new()
    } else {
        let end = (start + page_size).min(total_count);
        sorted[start..end].to_vec()
    };

    PageSlice {
        records,
        total_pages,
        total_count,
    }
}

pub(crate) fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;

    fn record(id: u32, name: &str, email: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: String::new(),
            company_name: crate::PLACEHOLDER.to_string(),
        }
    }

    fn names(records: &[UserRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn sorts_by_name_ascending() {
        let records = vec![record(1, "Bob", "b@x"), record(2, "Alice", "a@x")];
        let page = derive_page(&records, &ViewState::default(), DEFAULT_PAGE_SIZE);
        assert_eq!(names(&page.records), vec!["Alice", "Bob"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let records = vec![
            record(1, "First", "same@x"),
            record(2, "Second", "SAME@x"),
            record(3, "Third", "a@x"),
        ];
        let mut view = ViewState {
            sort_key: Column::Email,
            ..ViewState::default()
        };
        let asc = sorted_view(&records, &view);
        assert_eq!(names(&asc), vec!["Third", "First", "Second"]);

        view.sort_direction = SortDirection::Descending;
        let desc = sorted_view(&records, &view);
        assert_eq!(names(&desc), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let records = vec![record(1, "Alice", "a@x"), record(2, "Bob", "b@x")];
        let view = ViewState {
            search_text: "AL".to_string(),
            ..ViewState::default()
        };
        assert_eq!(names(&sorted_view(&records, &view)), vec!["Alice"]);
    }

    #[test]
    fn pages_are_full_except_last() {
        let records: Vec<_> = (0..12)
            .map(|i| record(i, &format!("user {i:02}"), "e"))
            .collect();
        let mut view = ViewState::default();
        let mut seen = 0;
        for page_no in 1..=3 {
            view.current_page = page_no;
            let page = derive_page(&records, &view, 5);
            assert_eq!(page.total_pages, 3);
            assert!(page.records.len() <= 5);
            if page_no < 3 {
                assert_eq!(page.records.len(), 5);
            }
            seen += page.records.len();
        }
        assert_eq!(seen, 12);
    }

    #[test]
    fn page_past_end_is_empty() {
        let records = vec![record(1, "Alice", "a@x")];
        let view = ViewState {
            current_page: 4,
            ..ViewState::default()
        };
        let page = derive_page(&records, &view, 5);
        assert!(page.records.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn empty_filter_result_reports_one_page() {
        let records = vec![record(1, "Alice", "a@x")];
        let view = ViewState {
            search_text: "zz".to_string(),
            ..ViewState::default()
        };
        let page = derive_page(&records, &view, 5);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.records.is_empty());
    }

    #[test]
    fn derivation_is_idempotent() {
        let records = vec![record(1, "Bob", "b"), record(2, "alice", "a"), record(3, "Carl", "c")];
        let view = ViewState {
            sort_direction: SortDirection::Descending,
            ..ViewState::default()
        };
        assert_eq!(derive_page(&records, &view, 2), derive_page(&records, &view, 2));
    }
}
