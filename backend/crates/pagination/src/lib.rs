//! Page-number pagination primitives for directory listings.
//!
//! The crate keeps pagination state independent of the record type being
//! paged. Callers hand a sorted slice to [`Paginator::page`] and receive the
//! visible window plus the metadata needed for a "showing X–Y of Z"
//! indicator. Page counts are always derived from the slice length at the
//! time of the call, so a shrinking source never leaves stale totals behind.
//!
//! # Example
//!
//! ```
//! use pagination::{PageNavigation, PageSize, Paginator};
//!
//! let records: Vec<u32> = (1..=23).collect();
//! let mut paginator = Paginator::new(PageSize::new(10).expect("non-zero"));
//!
//! assert_eq!(paginator.go_to_page(3, records.len()), PageNavigation::Moved(3));
//! let page = paginator.page(&records);
//! assert_eq!(page.items(), &[21, 22, 23]);
//! assert_eq!((page.meta().start, page.meta().end), (21, 23));
//!
//! assert_eq!(paginator.go_to_page(4, records.len()), PageNavigation::Ignored);
//! assert_eq!(paginator.current_page(), 3);
//! ```

mod page_size;
mod paginator;
mod window;

pub use page_size::{PageSize, PageSizeError};
pub use paginator::{Page, PageMeta, PageNavigation, Paginator};
pub use window::{ELLIPSIS, PageToken, page_window};
