//! Current-page state and slicing.

use serde::Serialize;

use crate::PageSize;

/// Result of a page navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PageNavigation {
    /// The current page changed; views should scroll back to the top.
    Moved(usize),
    /// The requested page was out of range and nothing changed.
    Ignored,
}

/// Metadata describing the visible page of a sequence.
///
/// `start` and `end` are 1-indexed and inclusive. `end` is clipped to
/// `total_items`, so an empty sequence reports `start = 1, end = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page the slice was taken from, already clamped into range.
    pub current_page: usize,
    /// Number of pages, never less than one.
    pub total_pages: usize,
    /// Records per page.
    pub page_size: usize,
    /// Length of the paged sequence.
    pub total_items: usize,
    /// Record number of the first visible row.
    pub start: usize,
    /// Record number of the last visible row.
    pub end: usize,
}

/// Visible slice of a sequence together with its [`PageMeta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
    meta: PageMeta,
}

impl<'a, T> Page<'a, T> {
    /// Records on this page.
    #[must_use]
    pub const fn items(&self) -> &'a [T] {
        self.items
    }

    /// Navigation metadata for this page.
    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        self.meta
    }

    /// Whether the page holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Page size plus 1-indexed current page.
///
/// ## Invariants
/// - `current_page >= 1`.
/// - Slicing always uses the current page clamped to
///   `1..=total_pages(len)`, so a stale page never yields an out-of-range
///   window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: PageSize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::DEFAULT)
    }
}

impl Paginator {
    /// Start on page one with the given page size.
    #[must_use]
    pub const fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    /// Active page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Stored current page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages needed for `total_items`, never less than one.
    ///
    /// ```
    /// use pagination::{PageSize, Paginator};
    ///
    /// let paginator = Paginator::new(PageSize::new(10).expect("non-zero"));
    /// assert_eq!(paginator.total_pages(0), 1);
    /// assert_eq!(paginator.total_pages(23), 3);
    /// ```
    #[must_use]
    pub const fn total_pages(&self, total_items: usize) -> usize {
        let pages = total_items.div_ceil(self.page_size.get());
        if pages == 0 { 1 } else { pages }
    }

    /// Move to `page` when it lies within `1..=total_pages(total_items)`.
    pub const fn go_to_page(&mut self, page: usize, total_items: usize) -> PageNavigation {
        if page >= 1 && page <= self.total_pages(total_items) {
            self.current_page = page;
            PageNavigation::Moved(page)
        } else {
            PageNavigation::Ignored
        }
    }

    /// Replace the page size and return to page one.
    pub const fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Pull the current page back into range after the source changed.
    ///
    /// Returns `true` when the stored page moved.
    pub fn clamp(&mut self, total_items: usize) -> bool {
        let clamped = self.effective_page(total_items);
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }

    /// Slice the visible page out of `items`.
    #[must_use]
    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        let total_items = items.len();
        let size = self.page_size.get();
        let current_page = self.effective_page(total_items);
        let offset = current_page.saturating_sub(1).saturating_mul(size);
        let end = offset.saturating_add(size).min(total_items);
        let visible = items.get(offset..end).unwrap_or(&[]);

        Page {
            items: visible,
            meta: PageMeta {
                current_page,
                total_pages: self.total_pages(total_items),
                page_size: size,
                total_items,
                start: offset.saturating_add(1),
                end,
            },
        }
    }

    fn effective_page(&self, total_items: usize) -> usize {
        self.current_page.clamp(1, self.total_pages(total_items))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn size(value: usize) -> PageSize {
        PageSize::new(value).expect("valid page size")
    }

    #[fixture]
    fn records() -> Vec<usize> {
        (1..=23).collect()
    }

    #[rstest]
    fn twenty_three_records_span_three_pages(records: Vec<usize>) {
        let mut paginator = Paginator::new(size(10));
        assert_eq!(paginator.total_pages(records.len()), 3);

        assert_eq!(paginator.go_to_page(3, records.len()), PageNavigation::Moved(3));
        let page = paginator.page(&records);
        assert_eq!(page.items(), &[21, 22, 23]);
        assert_eq!(page.meta().start, 21);
        assert_eq!(page.meta().end, 23);
        assert_eq!(page.meta().total_items, 23);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    fn out_of_range_navigation_is_ignored(records: Vec<usize>, #[case] target: usize) {
        let mut paginator = Paginator::new(size(10));
        assert_eq!(paginator.go_to_page(3, records.len()), PageNavigation::Moved(3));

        assert_eq!(paginator.go_to_page(target, records.len()), PageNavigation::Ignored);
        assert_eq!(paginator.current_page(), 3);
    }

    #[test]
    fn empty_sequence_still_has_one_page() {
        let paginator = Paginator::new(size(10));
        let empty: [u8; 0] = [];
        let page = paginator.page(&empty);

        assert!(page.is_empty());
        assert_eq!(page.meta().total_pages, 1);
        assert_eq!(page.meta().current_page, 1);
        assert_eq!((page.meta().start, page.meta().end), (1, 0));
    }

    #[rstest]
    fn page_size_change_resets_to_first_page(records: Vec<usize>) {
        let mut paginator = Paginator::new(size(5));
        assert_eq!(paginator.go_to_page(4, records.len()), PageNavigation::Moved(4));

        paginator.set_page_size(size(20));
        assert_eq!(paginator.current_page(), 1);
    }

    #[rstest]
    fn stale_page_is_clamped_when_source_shrinks(records: Vec<usize>) {
        let mut paginator = Paginator::new(size(10));
        assert_eq!(paginator.go_to_page(3, records.len()), PageNavigation::Moved(3));

        let shrunk = records.get(..20).expect("twenty records");
        let page = paginator.page(shrunk);
        assert_eq!(page.meta().current_page, 2);
        assert_eq!(page.items().first(), Some(&11));

        assert!(paginator.clamp(shrunk.len()));
        assert_eq!(paginator.current_page(), 2);
        assert!(!paginator.clamp(shrunk.len()));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(7)]
    #[case(10)]
    #[case(23)]
    #[case(50)]
    fn pages_reconstruct_the_sequence(records: Vec<usize>, #[case] page_size: usize) {
        let mut paginator = Paginator::new(size(page_size));
        let total_pages = paginator.total_pages(records.len());
        let mut rebuilt = Vec::with_capacity(records.len());

        for page_number in 1..=total_pages {
            assert_eq!(
                paginator.go_to_page(page_number, records.len()),
                PageNavigation::Moved(page_number)
            );
            let page = paginator.page(&records);
            assert!(page.items().len() <= page_size);
            rebuilt.extend_from_slice(page.items());
        }

        assert_eq!(rebuilt, records);
    }

    #[test]
    fn meta_serializes_to_camel_case() {
        let paginator = Paginator::new(size(10));
        let records: Vec<u8> = vec![1, 2, 3];
        let json = serde_json::to_value(paginator.page(&records).meta()).expect("serialize");

        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["end"], 3);
    }
}
