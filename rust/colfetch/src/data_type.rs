//! Column data types and the buffer layouts they are bound with.

use crate::native::{SqlDate, SqlTime, SqlTimestamp};

/// Logical type of a result-set column, as reported by the buffer registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Boolean,
    Char,
    String,
    Binary,
    Date,
    Time,
    DateTime,
}

/// Shape of the driver-side storage for one value of a [`DataType`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Fixed-width cells of the given byte width, packed back to back.
    Fixed(usize),
    /// Character data in fixed-stride slots.
    Text,
    /// Binary data in fixed-stride slots.
    Binary,
    Date,
    Time,
    Timestamp,
}

impl DataType {
    pub fn layout(self) -> Layout {
        match self {
            DataType::Int8 | DataType::UInt8 | DataType::Boolean | DataType::Char => {
                Layout::Fixed(1)
            }
            DataType::Int16 | DataType::UInt16 => Layout::Fixed(2),
            DataType::Int32 | DataType::UInt32 | DataType::Float32 => Layout::Fixed(4),
            DataType::Int64 | DataType::UInt64 | DataType::Float64 => Layout::Fixed(8),
            DataType::String => Layout::Text,
            DataType::Binary => Layout::Binary,
            DataType::Date => Layout::Date,
            DataType::Time => Layout::Time,
            DataType::DateTime => Layout::Timestamp,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::UInt8 => "uint8",
            DataType::Int16 => "int16",
            DataType::UInt16 => "uint16",
            DataType::Int32 => "int32",
            DataType::UInt32 => "uint32",
            DataType::Int64 => "int64",
            DataType::UInt64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Boolean => "boolean",
            DataType::Char => "char",
            DataType::String => "string",
            DataType::Binary => "binary",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::DateTime => "datetime",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Layout {
    /// Size of one value for layouts fetched in a single driver call, `None` for
    /// the streamed (text and binary) layouts.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Layout::Fixed(width) => Some(width),
            Layout::Date => Some(std::mem::size_of::<SqlDate>()),
            Layout::Time => Some(std::mem::size_of::<SqlTime>()),
            Layout::Timestamp => Some(std::mem::size_of::<SqlTimestamp>()),
            Layout::Text | Layout::Binary => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Fixed(_) => "fixed-width",
            Layout::Text => "text",
            Layout::Binary => "binary",
            Layout::Date => "date",
            Layout::Time => "time",
            Layout::Timestamp => "timestamp",
        }
    }
}

/// Evaluates `$body` with `$t` aliased to the Rust type that holds values of
/// the given [`DataType`].
macro_rules! dispatch_data_type {
    ($data_type:expr, $t:ident => $body:expr) => {
        match $data_type {
            $crate::data_type::DataType::Int8 => { type $t = i8; $body }
            $crate::data_type::DataType::UInt8 => { type $t = u8; $body }
            $crate::data_type::DataType::Int16 => { type $t = i16; $body }
            $crate::data_type::DataType::UInt16 => { type $t = u16; $body }
            $crate::data_type::DataType::Int32 => { type $t = i32; $body }
            $crate::data_type::DataType::UInt32 => { type $t = u32; $body }
            $crate::data_type::DataType::Int64 => { type $t = i64; $body }
            $crate::data_type::DataType::UInt64 => { type $t = u64; $body }
            $crate::data_type::DataType::Float32 => { type $t = f32; $body }
            $crate::data_type::DataType::Float64 => { type $t = f64; $body }
            $crate::data_type::DataType::Boolean => { type $t = bool; $body }
            $crate::data_type::DataType::Char => { type $t = char; $body }
            $crate::data_type::DataType::String => { type $t = String; $body }
            $crate::data_type::DataType::Binary => { type $t = $crate::codec::Blob; $body }
            $crate::data_type::DataType::Date => { type $t = colfetch_datetime::Date; $body }
            $crate::data_type::DataType::Time => { type $t = colfetch_datetime::Time; $body }
            $crate::data_type::DataType::DateTime => {
                type $t = colfetch_datetime::DateTime;
                $body
            }
        }
    };
}

pub(crate) use dispatch_data_type;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_widths() {
        assert_eq!(DataType::Int64.layout().fixed_width(), Some(8));
        assert_eq!(DataType::Boolean.layout().fixed_width(), Some(1));
        assert_eq!(DataType::Date.layout().fixed_width(), Some(6));
        assert_eq!(DataType::Time.layout().fixed_width(), Some(6));
        assert_eq!(DataType::DateTime.layout().fixed_width(), Some(16));
        assert_eq!(DataType::String.layout().fixed_width(), None);
        assert_eq!(DataType::Binary.layout().fixed_width(), None);
    }
}
