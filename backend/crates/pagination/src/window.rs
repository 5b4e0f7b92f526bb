//! Compact pager window with ellipsis markers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Marker rendered in place of skipped page numbers.
pub const ELLIPSIS: &str = "...";

/// Longest window rendered without condensing.
const MAX_TOKENS: usize = 7;

/// Pages shown next to the anchored edge when the current page is near it.
const EDGE_RUN: usize = 5;

/// Current pages up to this value keep the leading run expanded.
const LEADING_THRESHOLD: usize = 4;

/// Distance from the last page at which the trailing run stays expanded.
const TRAILING_THRESHOLD: usize = 3;

/// Entry in a pager window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// Link to a 1-indexed page.
    Page(usize),
    /// Gap of one or more pages.
    Ellipsis,
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(page) => page.serialize(serializer),
            Self::Ellipsis => serializer.serialize_str(ELLIPSIS),
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str(ELLIPSIS),
        }
    }
}

/// Build the pager window for `current` out of `total` pages.
///
/// Up to seven pages are listed in full. Longer ranges stay anchored to the
/// first and last page:
/// - `current <= 4`: pages 1–5, ellipsis, last;
/// - `current >= total - 3`: first, ellipsis, last five pages;
/// - otherwise: first, ellipsis, the current page with one neighbour on each
///   side, ellipsis, last.
///
/// ```
/// use pagination::{PageToken, page_window};
///
/// let window = page_window(8, 10);
/// assert_eq!(
///     window,
///     vec![
///         PageToken::Page(1),
///         PageToken::Ellipsis,
///         PageToken::Page(6),
///         PageToken::Page(7),
///         PageToken::Page(8),
///         PageToken::Page(9),
///         PageToken::Page(10),
///     ]
/// );
/// ```
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<PageToken> {
    if total <= MAX_TOKENS {
        return (1..=total).map(PageToken::Page).collect();
    }

    let mut tokens = Vec::with_capacity(MAX_TOKENS);
    if current <= LEADING_THRESHOLD {
        tokens.extend((1..=EDGE_RUN).map(PageToken::Page));
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total));
    } else if current >= total.saturating_sub(TRAILING_THRESHOLD) {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
        let first_trailing = total.saturating_sub(EDGE_RUN - 1);
        tokens.extend((first_trailing..=total).map(PageToken::Page));
    } else {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Ellipsis);
        tokens.extend((current.saturating_sub(1)..=current.saturating_add(1)).map(PageToken::Page));
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total));
    }
    tokens
}
