// CompanyScope - core/paginate.rs
//
// Page window arithmetic over an ordered view.
// A page past the end is a valid request and yields an empty slice.

use serde::Serialize;

/// Position of the visible page within the ordered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-based page number.
    pub current_page: usize,

    /// Rows per page.
    pub page_size: usize,

    /// Length of the whole ordered view.
    pub total_items: usize,

    /// `ceil(total_items / page_size)`; 0 for an empty view.
    pub total_pages: usize,

    /// Slice start, clamped to `total_items`.
    pub start: usize,

    /// Slice end (exclusive), clamped to `total_items`.
    pub end: usize,

    pub has_prev: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// Page count for display; an empty view still reads as one page.
    pub fn display_total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Status line in the form "Page X of Y", using the raw page count.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Compute the page window for a view of `total_items` rows.
///
/// `current_page` is 1-based; 0 is treated as 1. `page_size` must be non-zero
/// (configuration enforces this); 0 is treated as 1.
pub fn paginate(total_items: usize, current_page: usize, page_size: usize) -> PageInfo {
    let current_page = current_page.max(1);
    let page_size = page_size.max(1);

    let raw_start = (current_page - 1).saturating_mul(page_size);
    let raw_end = raw_start.saturating_add(page_size);

    PageInfo {
        current_page,
        page_size,
        total_items,
        total_pages: total_items.div_ceil(page_size),
        start: raw_start.min(total_items),
        end: raw_end.min(total_items),
        has_prev: current_page > 1,
        has_next: raw_end < total_items,
    }
}

/// The rows of `items` covered by `page`.
pub fn page_slice<'a, T>(items: &'a [T], page: &PageInfo) -> &'a [T] {
    let end = page.end.min(items.len());
    let start = page.start.min(end);
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = paginate(25, 1, 10);
        assert_eq!((page.start, page.end), (0, 10));
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_prev);
        assert!(page.has_next);
    }

    #[test]
    fn test_last_partial_page() {
        let items: Vec<usize> = (0..25).collect();
        let page = paginate(items.len(), 3, 10);
        assert_eq!(page_slice(&items, &page), &[20, 21, 22, 23, 24]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev);
        assert!(!page.has_next);
        assert_eq!(page.label(), "Page 3 of 3");
    }

    #[test]
    fn test_exact_multiple_has_no_next_on_last_page() {
        let page = paginate(20, 2, 10);
        assert_eq!(page.len(), 10);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let items: Vec<usize> = (0..25).collect();
        let page = paginate(items.len(), 7, 10);
        assert!(page_slice(&items, &page).is_empty());
        assert!(page.is_empty());
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_empty_view() {
        let page = paginate(0, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.display_total_pages(), 1);
        assert_eq!(page.label(), "Page 1 of 0");
        assert!(!page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_zero_page_treated_as_first() {
        let page = paginate(5, 0, 10);
        assert_eq!(page.current_page, 1);
        assert_eq!((page.start, page.end), (0, 5));
    }
}
