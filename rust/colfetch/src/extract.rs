//! Extraction targets: scalars, dynamic values and row containers.

use std::collections::{LinkedList, VecDeque};

use colfetch_common::Result;
use colfetch_datetime::{Date, DateTime, Time};

use crate::{
    codec::Blob,
    extractor::{Extracted, Extractor},
    registry::BufferRegistry,
    transport::DataTransport,
    value::{DynamicValue, Value},
    vectorized,
};

/// A type that can be the target of [`Extractor::extract`].
pub trait Extract: Sized {
    fn extract_from<R, D>(
        extractor: &mut Extractor<'_, R, D>,
        column: usize,
    ) -> Result<Extracted<Self>>
    where
        R: BufferRegistry + ?Sized,
        D: DataTransport + ?Sized;
}

/// An element type of a row container.
pub trait BulkElement: Sized {
    /// Decodes every bound row of `column`.
    fn decode_rows<R>(registry: &R, column: usize) -> Result<Vec<Self>>
    where
        R: BufferRegistry + ?Sized;
}

macro_rules! scalar_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Extract for $ty {
                fn extract_from<R, D>(
                    extractor: &mut Extractor<'_, R, D>,
                    column: usize,
                ) -> Result<Extracted<Self>>
                where
                    R: BufferRegistry + ?Sized,
                    D: DataTransport + ?Sized,
                {
                    extractor.fetch_value::<$ty>(column)
                }
            }

            impl BulkElement for $ty {
                fn decode_rows<R>(registry: &R, column: usize) -> Result<Vec<Self>>
                where
                    R: BufferRegistry + ?Sized,
                {
                    vectorized::decode_rows::<$ty, R>(registry, column)
                }
            }
        )*
    };
}

scalar_target!(
    i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, bool, char, String, Blob, Date, Time, DateTime,
);

impl Extract for Value {
    fn extract_from<R, D>(
        extractor: &mut Extractor<'_, R, D>,
        column: usize,
    ) -> Result<Extracted<Self>>
    where
        R: BufferRegistry + ?Sized,
        D: DataTransport + ?Sized,
    {
        extractor.fetch_dynamic(column)
    }
}

impl BulkElement for Value {
    fn decode_rows<R>(registry: &R, column: usize) -> Result<Vec<Self>>
    where
        R: BufferRegistry + ?Sized,
    {
        vectorized::decode_value_rows(registry, column)
    }
}

impl Extract for DynamicValue {
    fn extract_from<R, D>(
        extractor: &mut Extractor<'_, R, D>,
        column: usize,
    ) -> Result<Extracted<Self>>
    where
        R: BufferRegistry + ?Sized,
        D: DataTransport + ?Sized,
    {
        Ok(extractor.fetch_dynamic(column)?.map(DynamicValue::from))
    }
}

impl BulkElement for DynamicValue {
    fn decode_rows<R>(registry: &R, column: usize) -> Result<Vec<Self>>
    where
        R: BufferRegistry + ?Sized,
    {
        let rows = vectorized::decode_value_rows(registry, column)?;
        Ok(rows.into_iter().map(DynamicValue::from).collect())
    }
}

/// An ordered container holding one element per extracted row.
pub trait RowContainer: Default {
    type Item: BulkElement;

    /// Decodes every bound row of `column` into a new container.
    fn extract_rows<R>(registry: &R, column: usize) -> Result<Self>
    where
        R: BufferRegistry + ?Sized,
    {
        Ok(Self::from_rows(Self::Item::decode_rows(registry, column)?))
    }

    fn from_rows(rows: Vec<Self::Item>) -> Self;

    fn row_count(&self) -> usize;

    fn row(&self, index: usize) -> Option<&Self::Item>;

    /// Drops every row at `len` and beyond.
    fn truncate_rows(&mut self, len: usize);
}

impl<T: BulkElement> RowContainer for Vec<T> {
    type Item = T;

    fn from_rows(rows: Vec<T>) -> Self {
        rows
    }

    fn row_count(&self) -> usize {
        self.len()
    }

    fn row(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn truncate_rows(&mut self, len: usize) {
        self.truncate(len);
    }
}

impl<T: BulkElement> RowContainer for VecDeque<T> {
    type Item = T;

    fn from_rows(rows: Vec<T>) -> Self {
        rows.into()
    }

    fn row_count(&self) -> usize {
        self.len()
    }

    fn row(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn truncate_rows(&mut self, len: usize) {
        self.truncate(len);
    }
}

impl<T: BulkElement> RowContainer for LinkedList<T> {
    type Item = T;

    fn from_rows(rows: Vec<T>) -> Self {
        rows.into_iter().collect()
    }

    fn row_count(&self) -> usize {
        self.len()
    }

    fn row(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    fn truncate_rows(&mut self, len: usize) {
        if len < self.len() {
            let _ = self.split_off(len);
        }
    }
}

macro_rules! container_target {
    ($($container:ident),*) => {
        $(
            /// Bound mode only; NULL rows are reported through the NULL mask.
            impl<T: BulkElement> Extract for $container<T> {
                fn extract_from<R, D>(
                    extractor: &mut Extractor<'_, R, D>,
                    column: usize,
                ) -> Result<Extracted<Self>>
                where
                    R: BufferRegistry + ?Sized,
                    D: DataTransport + ?Sized,
                {
                    let bulk = extractor.extract_bulk::<Self>(column)?;
                    Ok(Extracted::Value(bulk.values))
                }
            }
        )*
    };
}

container_target!(Vec, VecDeque, LinkedList);
