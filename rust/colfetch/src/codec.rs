//! Per-type decode/encode capability shared by the bound and manual paths.
//!
//! A [`ColumnCodec`] knows how a single value of its type looks in driver-native
//! form. Everything else (NULL detection, chunking, striding over rows) lives in
//! the engine and is written once for all codecs.

use std::ops::Deref;

use colfetch_common::{Result, error::Error};
use colfetch_datetime::{Date, DateTime, Time};

use crate::{
    buffer::RawCell,
    c_type::CDataType,
    data_type::DataType,
    native::{SqlDate, SqlTime, SqlTimestamp},
};

/// Decoding and encoding of one scalar type in its driver-native form.
pub trait ColumnCodec: Sized {
    /// Logical type; its [`Layout`](crate::data_type::Layout) selects the
    /// buffer shape and the fetch strategy.
    const DATA_TYPE: DataType;

    /// Type tag passed to the driver when the value is fetched manually.
    const C_TYPE: CDataType;

    /// Decodes one value.
    fn decode(cell: RawCell<'_>) -> Result<Self>;

    /// Decodes a value assembled from streamed chunks.
    fn decode_owned(bytes: Vec<u8>) -> Result<Self> {
        Self::decode(RawCell::Bytes(&bytes))
    }

    /// Appends the driver-native bytes of this value to `out`.
    fn encode(&self, out: &mut Vec<u8>);
}

/// A binary large object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Blob(Vec<u8>);

impl Blob {
    pub fn new() -> Blob {
        Blob(Vec::new())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Blob(bytes.to_vec())
    }
}

fn cell_bytes<'a>(cell: RawCell<'a>, data_type: DataType) -> Result<&'a [u8]> {
    match cell {
        RawCell::Bytes(bytes) => Ok(bytes),
        other => Err(Error::invalid_format(
            data_type.name(),
            format!("expected raw bytes, got a {} structure", other.kind_name()),
        )),
    }
}

fn fixed_bytes(cell: RawCell<'_>, data_type: DataType, width: usize) -> Result<&[u8]> {
    let bytes = cell_bytes(cell, data_type)?;
    if bytes.len() != width {
        return Err(Error::invalid_format(
            data_type.name(),
            format!("expected {width} bytes, got {}", bytes.len()),
        ));
    }
    Ok(bytes)
}

macro_rules! numeric_codec {
    ($($ty:ty => $data_type:ident, $c_type:ident;)*) => {
        $(
            impl ColumnCodec for $ty {
                const DATA_TYPE: DataType = DataType::$data_type;
                const C_TYPE: CDataType = CDataType::$c_type;

                fn decode(cell: RawCell<'_>) -> Result<Self> {
                    let bytes = fixed_bytes(cell, Self::DATA_TYPE, std::mem::size_of::<$ty>())?;
                    Ok(bytemuck::pod_read_unaligned(bytes))
                }

                fn encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(bytemuck::bytes_of(self));
                }
            }
        )*
    };
}

numeric_codec! {
    i8 => Int8, STinyInt;
    u8 => UInt8, UTinyInt;
    i16 => Int16, SShort;
    u16 => UInt16, UShort;
    i32 => Int32, SLong;
    u32 => UInt32, ULong;
    i64 => Int64, SBigInt;
    u64 => UInt64, UBigInt;
    f32 => Float32, Float;
    f64 => Float64, Double;
}

impl ColumnCodec for bool {
    const DATA_TYPE: DataType = DataType::Boolean;
    const C_TYPE: CDataType = CDataType::Bit;

    fn decode(cell: RawCell<'_>) -> Result<Self> {
        Ok(fixed_bytes(cell, Self::DATA_TYPE, 1)?[0] != 0)
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.push(*self as u8);
    }
}

/// A single-byte character; bytes above 0x7F map to the Latin-1 code points.
impl ColumnCodec for char {
    const DATA_TYPE: DataType = DataType::Char;
    const C_TYPE: CDataType = CDataType::STinyInt;

    fn decode(cell: RawCell<'_>) -> Result<Self> {
        Ok(fixed_bytes(cell, Self::DATA_TYPE, 1)?[0] as char)
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.push(u8::try_from(*self).unwrap_or(b'?'));
    }
}

impl ColumnCodec for String {
    const DATA_TYPE: DataType = DataType::String;
    const C_TYPE: CDataType = CDataType::Char;

    fn decode(cell: RawCell<'_>) -> Result<Self> {
        let bytes = cell_bytes(cell, Self::DATA_TYPE)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn decode_owned(bytes: Vec<u8>) -> Result<Self> {
        Ok(String::from_utf8(bytes)?)
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl ColumnCodec for Blob {
    const DATA_TYPE: DataType = DataType::Binary;
    const C_TYPE: CDataType = CDataType::Binary;

    fn decode(cell: RawCell<'_>) -> Result<Self> {
        cell_bytes(cell, Self::DATA_TYPE).map(Blob::from)
    }

    fn decode_owned(bytes: Vec<u8>) -> Result<Self> {
        Ok(Blob(bytes))
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

macro_rules! temporal_codec {
    ($ty:ty, $native:ty, $variant:ident, $data_type:ident, $c_type:ident) => {
        impl ColumnCodec for $ty {
            const DATA_TYPE: DataType = DataType::$data_type;
            const C_TYPE: CDataType = CDataType::$c_type;

            fn decode(cell: RawCell<'_>) -> Result<Self> {
                match cell {
                    RawCell::$variant(native) => Ok(<$ty>::from(native)),
                    RawCell::Bytes(_) => {
                        let bytes =
                            fixed_bytes(cell, Self::DATA_TYPE, std::mem::size_of::<$native>())?;
                        Ok(<$ty>::from(bytemuck::pod_read_unaligned::<$native>(bytes)))
                    }
                    other => Err(Error::invalid_format(
                        Self::DATA_TYPE.name(),
                        format!("cannot decode from a {} structure", other.kind_name()),
                    )),
                }
            }

            fn encode(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(bytemuck::bytes_of(&<$native>::from(*self)));
            }
        }
    };
}

temporal_codec!(Date, SqlDate, Date, Date, Date);
temporal_codec!(Time, SqlTime, Time, Time, Time);
temporal_codec!(DateTime, SqlTimestamp, Timestamp, DateTime, Timestamp);

/// Encodes a value into a fresh byte vector.
pub fn encode_to_vec<T: ColumnCodec>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.encode(&mut out);
    out
}
