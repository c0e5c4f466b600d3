//! Lookups, listings, searches and counts

use super::RecordStore;
use crate::backends::DatabaseRowExt;
use crate::error::{StoreError, StoreResult};
use crate::model::{Entity, EntityId};
use crate::query::{apply_exact, apply_search, Page, Predicates, QueryBuilder, QueryOptions, SearchOperators};

impl<E: Entity> RecordStore<E> {
    /// Fetch the row with the given identifier
    pub async fn find_by_id(&self, id: EntityId) -> StoreResult<Option<E>> {
        let builder = self.select().where_eq(E::primary_key_name(), id).limit(1);
        self.run_fetch_optional(builder, "find", StoreError::into_query)
            .await?
            .map(|row| E::from_database_row(row.as_ref()))
            .transpose()
    }

    /// Every row, shaped by the given options
    pub async fn find_all(&self, options: &[QueryOptions]) -> StoreResult<Vec<E>> {
        let builder = QueryOptions::apply_all(options, self.select())?;
        self.run_fetch_all(builder, "find_all").await
    }

    /// Rows matching every predicate exactly. The matched-row count is the
    /// length of the result.
    pub async fn find_by_keys(&self, keys: &Predicates) -> StoreResult<Vec<E>> {
        let builder = apply_exact(self.select(), keys)?;
        self.run_fetch_all(builder, "find_by_keys").await
    }

    /// One page of rows in backend order
    pub async fn find_by_pages(&self, page: u32, page_size: u32) -> StoreResult<Vec<E>> {
        let page = Page::new(page, page_size)?;
        self.run_fetch_all(self.select().paginate(page), "find_by_pages").await
    }

    /// One page of rows matching every predicate exactly
    pub async fn find_by_pages_with_keys(
        &self,
        keys: &Predicates,
        page: u32,
        page_size: u32,
        options: &[QueryOptions],
    ) -> StoreResult<Vec<E>> {
        let page = Page::new(page, page_size)?;
        let builder = QueryOptions::apply_all(options, self.select().paginate(page))?;
        let builder = apply_exact(builder, keys)?;
        self.run_fetch_all(builder, "find_by_pages_with_keys").await
    }

    /// One page of rows matching the composed search group
    pub async fn search_by_pages_with_keys(
        &self,
        keys: &Predicates,
        operators: &SearchOperators,
        page: u32,
        page_size: u32,
        options: &[QueryOptions],
    ) -> StoreResult<Vec<E>> {
        let page = Page::new(page, page_size)?;
        let builder = QueryOptions::apply_all(options, self.select().paginate(page))?;
        let builder = apply_search(builder, keys, operators)?;
        self.run_fetch_all(builder, "search_by_pages_with_keys").await
    }

    /// Number of rows in the table
    pub async fn count(&self) -> StoreResult<u64> {
        self.run_count(self.select().count()).await
    }

    /// Number of rows matching the composed search group and option predicates.
    /// Sort, select and limit options do not affect the count.
    pub async fn count_with_keys(
        &self,
        keys: &Predicates,
        operators: &SearchOperators,
        options: &[QueryOptions],
    ) -> StoreResult<u64> {
        let builder = QueryOptions::apply_all(options, self.select())?;
        let builder = apply_search(builder, keys, operators)?;
        self.run_count(builder.count()).await
    }

    async fn run_count(&self, builder: QueryBuilder<E>) -> StoreResult<u64> {
        let count = match self.run_fetch_optional(builder, "count", StoreError::into_query).await? {
            Some(row) => row.integer("count")?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
