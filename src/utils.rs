//! Forkful - Utility functions.
//!
//! Common utilities shared across the application.

/// A pagination window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page actually used (requests below 1 fall back to 1).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Offset of the first item of this page.
    pub offset: i64,
    /// ceil(total_items / per_page).
    pub total_pages: i64,
    /// Total number of items across all pages.
    pub total_items: i64,
}

impl PageWindow {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Compute the pagination window for a 1-based `requested_page`.
///
/// A page past the last one yields an offset beyond the result set, i.e. an
/// empty page rather than an error. Requests below 1 fall back to page 1.
///
/// # Examples
///
/// ```
/// use forkful::utils::page_window;
///
/// let w = page_window(5, 2, 2);
/// assert_eq!(w.offset, 2);
/// assert_eq!(w.total_pages, 3);
/// ```
pub fn page_window(total_items: i64, requested_page: i64, per_page: i64) -> PageWindow {
    let page = requested_page.max(1);
    let total_pages = if per_page > 0 {
        (total_items + per_page - 1) / per_page
    } else {
        0
    };
    let offset = (page - 1) * per_page;

    PageWindow {
        page,
        per_page,
        offset,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Slice a synthetic result set the way LIMIT/OFFSET does.
    fn window_of(items: &[i32], w: PageWindow) -> Vec<i32> {
        items
            .iter()
            .skip(w.offset as usize)
            .take(w.per_page as usize)
            .copied()
            .collect()
    }

    // ==================== Page Count Tests ====================

    #[test]
    fn test_page_count_five_items_size_two() {
        assert_eq!(page_window(5, 1, 2).total_pages, 3);
    }

    #[test]
    fn test_page_count_exact_multiple() {
        assert_eq!(page_window(4, 1, 2).total_pages, 2);
    }

    #[test]
    fn test_page_count_empty_set() {
        assert_eq!(page_window(0, 1, 2).total_pages, 0);
    }

    #[test]
    fn test_page_count_single_item() {
        assert_eq!(page_window(1, 1, 2).total_pages, 1);
    }

    // ==================== Window Tests ====================

    #[test]
    fn test_five_items_size_two_all_pages() {
        let items = [0, 1, 2, 3, 4];

        assert_eq!(window_of(&items, page_window(5, 1, 2)), vec![0, 1]);
        assert_eq!(window_of(&items, page_window(5, 2, 2)), vec![2, 3]);
        assert_eq!(window_of(&items, page_window(5, 3, 2)), vec![4]);
        // Past the last page: empty slice, not an error
        assert_eq!(window_of(&items, page_window(5, 4, 2)), Vec::<i32>::new());
    }

    #[test]
    fn test_offset_progression() {
        assert_eq!(page_window(10, 1, 2).offset, 0);
        assert_eq!(page_window(10, 2, 2).offset, 2);
        assert_eq!(page_window(10, 5, 2).offset, 8);
    }

    #[test]
    fn test_page_below_one_falls_back_to_first() {
        let w = page_window(5, 0, 2);
        assert_eq!(w.page, 1);
        assert_eq!(w.offset, 0);

        let w = page_window(5, -3, 2);
        assert_eq!(w.page, 1);
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn test_empty_set_first_page_is_empty() {
        let items: [i32; 0] = [];
        assert_eq!(
            window_of(&items, page_window(0, 1, 2)),
            Vec::<i32>::new()
        );
    }

    // ==================== Navigation Tests ====================

    #[test]
    fn test_has_previous_and_next() {
        let first = page_window(5, 1, 2);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = page_window(5, 2, 2);
        assert!(middle.has_previous());
        assert!(middle.has_next());

        let last = page_window(5, 3, 2);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_past_end_has_no_next() {
        let past = page_window(5, 9, 2);
        assert!(past.has_previous());
        assert!(!past.has_next());
    }

    #[test]
    fn test_zero_per_page_yields_no_pages() {
        let w = page_window(5, 1, 0);
        assert_eq!(w.total_pages, 0);
    }
}
