//! List response normalization
//!
//! List endpoints answer either with a bare JSON array or with a
//! `{count, results}` page envelope. Callers only ever see [`PageResult`].

use serde::{Deserialize, Serialize};

/// Raw list response as sent by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `{ "count": 42, "results": [...] }` (extra keys such as `next` are ignored)
    Page { count: u64, results: Vec<T> },
    /// `[...]`
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_page(self) -> PageResult<T> {
        match self {
            Self::Page { count, results } => PageResult {
                rows: results,
                total: Some(count),
            },
            Self::Bare(rows) => PageResult { rows, total: None },
        }
    }
}

impl<T> From<ListResponse<T>> for PageResult<T> {
    fn from(resp: ListResponse<T>) -> Self {
        resp.into_page()
    }
}

/// Normalized page of rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub rows: Vec<T>,
    /// Total across all pages; `None` means unknown (show no count), not zero
    pub total: Option<u64>,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: None,
        }
    }

    /// Number of pages for the given page size, when the total is known
    pub fn page_count(&self, page_size: u32) -> Option<u32> {
        if page_size == 0 {
            return None;
        }
        self.total
            .map(|total| total.div_ceil(u64::from(page_size)) as u32)
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
