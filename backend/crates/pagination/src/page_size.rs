//! Validated page size.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    Zero,
}

/// Number of records shown per page.
///
/// ## Invariants
/// - Always at least one.
///
/// # Examples
/// ```
/// use pagination::{PageSize, PageSizeError};
///
/// assert_eq!(PageSize::new(25).map(PageSize::get), Ok(25));
/// assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Page size used when none is configured.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(9));

    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] when `value` is zero.
    pub fn new(value: usize) -> Result<Self, PageSizeError> {
        NonZeroUsize::new(value).map(Self).ok_or(PageSizeError::Zero)
    }

    /// Raw number of records per page.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_page_size_is_ten() {
        assert_eq!(PageSize::default().get(), 10);
    }

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(500)]
    fn accepts_positive_sizes(#[case] value: usize) {
        assert_eq!(PageSize::new(value).map(PageSize::get), Ok(value));
    }

    #[test]
    fn deserialization_rejects_zero() {
        let result: Result<PageSize, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let size = PageSize::new(20).expect("valid size");
        assert_eq!(serde_json::to_string(&size).expect("serialize"), "20");
    }
}
