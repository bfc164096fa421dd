//! Offset/limit window for list operations.

/// Largest page any list operation returns.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A window into an insertion-ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of records to skip from the start.
    pub skip: u32,
    /// Maximum number of records to return, at most [`MAX_PAGE_LIMIT`].
    pub limit: u32,
}

impl Page {
    /// Builds a page from optional query values.
    ///
    /// Missing `skip` starts at the first record; missing `limit` means
    /// [`MAX_PAGE_LIMIT`]. Larger limits are clamped.
    #[must_use]
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(MAX_PAGE_LIMIT).min(MAX_PAGE_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
