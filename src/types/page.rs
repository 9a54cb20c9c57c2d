//! List filtering and the paged response envelope.

use serde::{Deserialize, Serialize};

/// Options for list operations.
///
/// The filter is sent verbatim as the `X-Filter` header. Only a single page
/// is requested; walking further pages is left to the caller.
///
/// ## Example
///
/// ```rust
/// use vpckit::ListOptions;
///
/// let opts = ListOptions::new()
///     .with_filter(serde_json::json!({ "region": "us-east" }))
///     .with_page(2);
/// assert_eq!(opts.page, Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    /// JSON filter expression.
    pub filter: Option<serde_json::Value>,
    /// Page number (1-based).
    pub page: Option<u32>,
}

impl ListOptions {
    /// Creates empty list options (no filter, first page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: serde_json::Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the page number.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// A page of results as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    pub data: Vec<T>,
    /// The current page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Total number of pages.
    #[serde(default = "first_page")]
    pub pages: u32,
    /// Total number of results across all pages.
    #[serde(default)]
    pub results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Returns `true` if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if there are more pages available.
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}
