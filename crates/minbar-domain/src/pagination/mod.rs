use serde::Serialize;

/// One window of a derived, already-sorted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub page_items: &'a [T],
    pub total_pages: u32,
    /// Zero-based index of the first item on this page
    pub start_index: usize,
    /// Zero-based index one past the last item on this page
    pub end_index: usize,
}

/// Deterministic, stateless windowing of `items` into fixed-size pages.
///
/// `total_pages` is `ceil(len / page_size)` with a floor of 1: the pager UI
/// always shows at least "page 1 of 1", even over an empty list. Pages are
/// 1-based. An out-of-range `page` yields an empty window; keeping the page
/// in `[1, total_pages]` is the coordinator's job, which resets to page 1
/// whenever the underlying list shrinks past the current page.
pub fn paginate<T>(items: &[T], page: u32, page_size: usize) -> Page<'_, T> {
    assert!(page_size > 0, "page_size must be positive");

    let total_pages = (items.len().div_ceil(page_size)).max(1) as u32;

    let start_index = (page.saturating_sub(1) as usize).saturating_mul(page_size);
    let end_index = start_index.saturating_add(page_size).min(items.len());

    let page_items = if start_index >= items.len() {
        &[]
    } else {
        &items[start_index..end_index]
    };

    Page {
        page_items,
        total_pages,
        start_index: start_index.min(items.len()),
        end_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_reconstruct_the_list() {
        let items: Vec<i32> = (0..23).collect();
        let first = paginate(&items, 1, 10);
        assert_eq!(first.total_pages, 3);

        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages {
            let window = paginate(&items, page, 10);
            assert!(window.page_items.len() <= 10);
            rebuilt.extend_from_slice(window.page_items);
        }
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn test_exact_multiple_has_no_spill_page() {
        let items: Vec<i32> = (0..20).collect();
        assert_eq!(paginate(&items, 1, 10).total_pages, 2);
        assert_eq!(paginate(&items, 2, 10).page_items.len(), 10);
    }

    #[test]
    fn test_empty_list_still_has_one_page() {
        let items: Vec<i32> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.page_items.is_empty());
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 0);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items: Vec<i32> = (0..5).collect();
        let page = paginate(&items, 4, 10);
        assert!(page.page_items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_indices_match_window() {
        let items: Vec<i32> = (0..25).collect();
        let second = paginate(&items, 2, 10);
        assert_eq!(second.start_index, 10);
        assert_eq!(second.end_index, 20);
        assert_eq!(second.page_items, &items[10..20]);

        let last = paginate(&items, 3, 10);
        assert_eq!(last.start_index, 20);
        assert_eq!(last.end_index, 25);
        assert_eq!(last.page_items.len(), 5);
    }
}
