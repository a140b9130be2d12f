//! Row-limited bulk extraction with a retained NULL mask.

use colfetch_common::{Result, error::Error, verify_arg, verify_index};

use crate::{
    extract::RowContainer, extractor::Extractor, null_mask::NullMask,
    registry::BufferRegistry, transport::DataTransport,
};

/// Holds the rows of one bulk-extracted column, capped at a row limit.
#[derive(Debug, Clone)]
pub struct BulkExtraction<C> {
    limit: usize,
    values: C,
    nulls: NullMask,
}

impl<C: RowContainer> BulkExtraction<C> {
    /// Creates an empty extraction that keeps at most `limit` rows.
    pub fn new(limit: usize) -> Result<BulkExtraction<C>> {
        verify_arg!(limit, limit > 0);
        Ok(BulkExtraction {
            limit,
            values: C::default(),
            nulls: NullMask::default(),
        })
    }

    /// Extracts `column`, replacing any previously held rows. Returns the number
    /// of rows kept.
    pub fn extract<R, D>(
        &mut self,
        extractor: &mut Extractor<'_, R, D>,
        column: usize,
    ) -> Result<usize>
    where
        R: BufferRegistry + ?Sized,
        D: DataTransport + ?Sized,
    {
        let mut bulk = extractor.extract_bulk::<C>(column)?;
        if bulk.values.row_count() > self.limit {
            log::debug!(
                "column {column}: keeping {} of {} rows",
                self.limit,
                bulk.values.row_count()
            );
            bulk.values.truncate_rows(self.limit);
            bulk.nulls.truncate(self.limit);
        }
        self.values = bulk.values;
        self.nulls = bulk.nulls;
        Ok(self.values.row_count())
    }

    pub fn is_null(&self, row: usize) -> Result<bool> {
        self.nulls.is_null(row)
    }

    pub fn value(&self, index: usize) -> Result<&C::Item> {
        let rows = self.values.row_count();
        verify_index!("row", index, rows);
        self.values
            .row(index)
            .ok_or_else(|| Error::out_of_range("row", index, rows))
    }

    pub fn values(&self) -> &C {
        &self.values
    }

    pub fn nulls(&self) -> &NullMask {
        &self.nulls
    }

    pub fn rows_handled(&self) -> usize {
        self.values.row_count()
    }

    pub fn rows_allowed(&self) -> usize {
        self.limit
    }

    pub fn reset(&mut self) {
        self.values = C::default();
        self.nulls = NullMask::default();
    }

    pub fn into_parts(self) -> (C, NullMask) {
        (self.values, self.nulls)
    }
}
