//! Bound-mode bulk decoding: slices a column's bound buffer into rows.

use colfetch_common::{Result, error::Error};

use crate::{
    buffer::{BoundBuffer, RawCell},
    codec::ColumnCodec,
    data_type::{Layout, dispatch_data_type},
    indicator::Indicator,
    null_mask::NullMask,
    registry::BufferRegistry,
    value::Value,
};

/// Returns the `row`-th slot of `stride` bytes.
pub fn slot(data: &[u8], row: usize, stride: usize) -> Result<&[u8]> {
    let start = row * stride;
    let end = start + stride;
    if end > data.len() {
        let rows = if stride == 0 { 0 } else { data.len() / stride };
        return Err(Error::out_of_range("row", row, rows));
    }
    Ok(&data[start..end])
}

/// Fails with `TypeMismatch` unless the registry reports `column` as `T`'s type.
pub fn verify_column_type<T, R>(registry: &R, column: usize) -> Result<()>
where
    T: ColumnCodec,
    R: BufferRegistry + ?Sized,
{
    let actual = registry.column_type(column)?;
    if actual != T::DATA_TYPE {
        return Err(Error::type_mismatch(column, T::DATA_TYPE.name(), actual.name()));
    }
    Ok(())
}

/// Decodes every bound row of `column` as `T`.
///
/// Fixed-width columns yield [`BufferRegistry::length`] rows, text and binary
/// columns [`BufferRegistry::bulk_size`] rows, temporal columns one row per
/// native structure. NULL rows decode from whatever the buffer holds, which is
/// the empty value for text and binary.
pub fn decode_rows<T, R>(registry: &R, column: usize) -> Result<Vec<T>>
where
    T: ColumnCodec,
    R: BufferRegistry + ?Sized,
{
    verify_column_type::<T, R>(registry, column)?;
    let buffer = registry.buffer(column)?;
    let layout = T::DATA_TYPE.layout();
    log::trace!(
        "column {column}: decoding {} rows from a {} buffer",
        T::DATA_TYPE,
        buffer.kind_name()
    );

    match (layout, buffer) {
        (Layout::Fixed(width), BoundBuffer::Fixed { width: bound, data }) if bound == width => {
            let rows = registry.length();
            let available = data.len() / width;
            if rows > available {
                return Err(Error::out_of_range("row", rows - 1, available));
            }
            data.chunks_exact(width)
                .take(rows)
                .map(|cell| T::decode(RawCell::Bytes(cell)))
                .collect()
        }
        (Layout::Text, BoundBuffer::Variable(data)) => {
            decode_strided(registry, column, data, registry.column_width(column)?)
        }
        (Layout::Binary, BoundBuffer::Variable(data)) => {
            decode_strided(registry, column, data, registry.max_data_size(column)?)
        }
        (Layout::Date, BoundBuffer::Date(cells)) => cells
            .iter()
            .map(|cell| T::decode(RawCell::Date(*cell)))
            .collect(),
        (Layout::Time, BoundBuffer::Time(cells)) => cells
            .iter()
            .map(|cell| T::decode(RawCell::Time(*cell)))
            .collect(),
        (Layout::Timestamp, BoundBuffer::Timestamp(cells)) => cells
            .iter()
            .map(|cell| T::decode(RawCell::Timestamp(*cell)))
            .collect(),
        (layout, buffer) => Err(Error::type_mismatch(
            column,
            layout.name(),
            buffer.kind_name(),
        )),
    }
}

fn decode_strided<T, R>(
    registry: &R,
    column: usize,
    data: &[u8],
    stride: usize,
) -> Result<Vec<T>>
where
    T: ColumnCodec,
    R: BufferRegistry + ?Sized,
{
    let rows = registry.bulk_size();
    let mut values = Vec::with_capacity(rows);
    for row in 0..rows {
        let slot = slot(data, row, stride)?;
        let len = match registry.actual_data_size(column, row)? {
            Indicator::Null => 0,
            Indicator::NoTotal => return Err(Error::unknown_length(column)),
            Indicator::Length(len) => len.min(stride),
        };
        values.push(T::decode(RawCell::Bytes(&slot[..len]))?);
    }
    Ok(values)
}

/// Decodes every bound row of `column` as the type the registry reports for it.
pub fn decode_value_rows<R>(registry: &R, column: usize) -> Result<Vec<Value>>
where
    R: BufferRegistry + ?Sized,
{
    let data_type = registry.column_type(column)?;
    dispatch_data_type!(data_type, T => {
        let rows = decode_rows::<T, R>(registry, column)?;
        Ok(rows.into_iter().map(Value::from).collect())
    })
}

/// Builds the NULL mask for the first `rows` rows of `column`.
pub fn null_mask<R>(registry: &R, column: usize, rows: usize) -> Result<NullMask>
where
    R: BufferRegistry + ?Sized,
{
    (0..rows)
        .map(|row| registry.actual_data_size(column, row).map(Indicator::is_null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot() {
        let data = b"abc_______hello_____";
        assert_eq!(slot(data, 0, 10).unwrap(), b"abc_______");
        assert_eq!(slot(data, 1, 10).unwrap(), b"hello_____");
        assert!(slot(data, 2, 10).is_err());
        assert_eq!(slot(data, 5, 0).unwrap(), b"");
    }
}
