//! Cursor-based pagination
//!
//! Every list operation takes an opaque `next_key` cursor and a page size.
//! The cursor is the key of the last record on the previous page.

use serde::{Deserialize, Serialize};

/// Page size used when a caller gives none or a non-positive one
pub const FALLBACK_PAGE_SIZE: i64 = 10;

/// A request for one page of results
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// Key of the last record of the previous page
    pub next_key: Option<String>,
    /// Maximum number of records to return
    pub page_size: i64,
}

impl PageRequest {
    /// First page of the given size
    #[must_use]
    pub const fn first(page_size: i64) -> Self {
        Self {
            next_key: None,
            page_size,
        }
    }

    /// Page of the given size, resolving a missing size to `default_size`
    #[must_use]
    pub fn with_default(next_key: Option<String>, page_size: Option<i64>, default_size: i64) -> Self {
        Self {
            next_key,
            page_size: page_size.unwrap_or(default_size),
        }
    }

    /// Effective page size as a count
    #[must_use]
    pub fn limit(&self) -> usize {
        let size = if self.page_size > 0 {
            self.page_size
        } else {
            FALLBACK_PAGE_SIZE
        };
        usize::try_from(size).unwrap_or(usize::MAX)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Cursor for the next page; `None` on the last page
    pub last_key: Option<String>,
    /// Number of records on this page
    pub result_count: usize,
    /// Number of records across all pages
    pub total_count: usize,
}

impl<T> Page<T> {
    /// An empty page
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            last_key: None,
            result_count: 0,
            total_count: 0,
        }
    }

    /// Cut one page out of records already filtered and ordered by key
    ///
    /// Records with a key lower than or equal to the cursor are skipped.
    #[must_use]
    pub fn from_sorted<F>(records: Vec<T>, page: &PageRequest, key: F) -> Self
    where
        F: Fn(&T) -> &str,
    {
        let total_count = records.len();
        let limit = page.limit();

        let mut remaining = records
            .into_iter()
            .skip_while(|r| page.next_key.as_deref().is_some_and(|cursor| key(r) <= cursor))
            .peekable();

        let mut items = Vec::with_capacity(limit.min(total_count));
        while items.len() < limit {
            match remaining.next() {
                Some(record) => items.push(record),
                None => break,
            }
        }

        let last_key = if remaining.peek().is_some() {
            items.last().map(|r| key(r).to_string())
        } else {
            None
        };

        Self {
            result_count: items.len(),
            items,
            last_key,
            total_count,
        }
    }

    /// Transform every record, keeping the paging data
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            last_key: self.last_key,
            result_count: self.result_count,
            total_count: self.total_count,
        }
    }
}
