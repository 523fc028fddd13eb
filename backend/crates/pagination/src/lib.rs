//! Offset pagination primitives.
//!
//! List endpoints page through results with a one-based page number and a
//! page size. [`PageRequest`] validates both values once at the edge so the
//! rest of the stack can compute offsets without re-checking them, and
//! [`Page`] carries one page of results alongside the total match count.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page number was zero; pages are one-based.
    #[error("page must be greater than or equal to 1")]
    ZeroPage,
    /// The page size was zero.
    #[error("per_page must be greater than or equal to 1")]
    ZeroPerPage,
}

/// A validated, one-based page selection.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 25).expect("valid page request");
/// assert_eq!(request.offset(), 50);
/// assert_eq!(request.limit(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    per_page: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.per_page)
    }
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero.
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PageRequestError::ZeroPerPage);
        }
        Ok(Self { page, per_page })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of rows to skip: `(page - 1) * per_page`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1).saturating_mul(i64::from(self.per_page))
    }

    /// Number of rows to fetch.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// One page of results plus the number of matches before pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    total: u64,
    request: PageRequest,
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from its parts.
    #[must_use]
    pub const fn new(total: u64, request: PageRequest, items: Vec<T>) -> Self {
        Self {
            total,
            request,
            items,
        }
    }

    /// Count of all matching items, ignoring pagination.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request that produced this page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            request: self.request,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
