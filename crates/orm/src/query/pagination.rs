//! Query Builder pagination operations

use serde::{Deserialize, Serialize};

use super::builder::QueryBuilder;
use crate::error::{StoreError, StoreResult};

/// One page of results: 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Validate a page request. Page numbers and sizes start at 1; anything
    /// lower is rejected rather than clamped.
    pub fn new(number: u32, size: u32) -> StoreResult<Self> {
        if number < 1 || size < 1 {
            return Err(StoreError::InvalidPagination {
                page: number,
                page_size: size,
            });
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows skipped before this page: `(number - 1) * size`
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl<M> QueryBuilder<M> {
    /// Cap the number of rows. Limits only ever shrink: applying a second,
    /// larger limit keeps the first.
    pub fn limit(mut self, count: u64) -> Self {
        self.limit_count = Some(match self.limit_count {
            Some(current) => current.min(count),
            None => count,
        });
        self
    }

    /// Add OFFSET clause
    pub fn offset(mut self, count: u64) -> Self {
        self.offset_value = Some(count);
        self
    }

    /// Add pagination (LIMIT + OFFSET)
    pub fn paginate(self, page: Page) -> Self {
        self.offset(page.offset()).limit(page.limit())
    }
}
