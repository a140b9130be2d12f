//! Dynamically typed extraction targets.
//!
//! [`Value`] holds exactly what the column contains, tagged with its type.
//! [`DynamicValue`] wraps a [`Value`] and adds lossless-or-checked conversions
//! between the supported scalar types.

use std::fmt;

use colfetch_common::{Result, error::Error};
use colfetch_datetime::{Date, DateTime, Time};

use crate::{codec::Blob, data_type::DataType};

/// A column value tagged with its type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Boolean(bool),
    Char(char),
    String(String),
    Binary(Blob),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int8(_) => DataType::Int8,
            Value::UInt8(_) => DataType::UInt8,
            Value::Int16(_) => DataType::Int16,
            Value::UInt16(_) => DataType::UInt16,
            Value::Int32(_) => DataType::Int32,
            Value::UInt32(_) => DataType::UInt32,
            Value::Int64(_) => DataType::Int64,
            Value::UInt64(_) => DataType::UInt64,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
            Value::Boolean(_) => DataType::Boolean,
            Value::Char(_) => DataType::Char,
            Value::String(_) => DataType::String,
            Value::Binary(_) => DataType::Binary,
            Value::Date(_) => DataType::Date,
            Value::Time(_) => DataType::Time,
            Value::DateTime(_) => DataType::DateTime,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::String(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int8(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Binary(v) => {
                for b in v.iter() {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Value::Date(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! value_variants {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            /// Exact-type cast: succeeds only when the value holds this type.
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(bad_cast(&other, DataType::$variant)),
                    }
                }
            }
        )*
    };
}

value_variants! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    bool => Boolean,
    char => Char,
    String => String,
    Blob => Binary,
    Date => Date,
    Time => Time,
    DateTime => DateTime,
}

#[cold]
fn bad_cast(value: &Value, target: DataType) -> Error {
    Error::invalid_arg(
        "value",
        format!("cannot convert {} '{value}' to {target}", value.data_type()),
    )
}

/// A column value with conversions between the supported scalar types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamicValue(Value);

impl DynamicValue {
    pub fn new(value: impl Into<Value>) -> DynamicValue {
        DynamicValue(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn data_type(&self) -> DataType {
        self.0.data_type()
    }

    /// Converts to a signed integer; floats are truncated toward zero and must fit.
    pub fn to_i64(&self) -> Result<i64> {
        let v = &self.0;
        match *v {
            Value::Int8(x) => Ok(x as i64),
            Value::UInt8(x) => Ok(x as i64),
            Value::Int16(x) => Ok(x as i64),
            Value::UInt16(x) => Ok(x as i64),
            Value::Int32(x) => Ok(x as i64),
            Value::UInt32(x) => Ok(x as i64),
            Value::Int64(x) => Ok(x),
            Value::UInt64(x) => i64::try_from(x).map_err(|_| bad_cast(v, DataType::Int64)),
            Value::Float32(x) => float_to_i64(x as f64).ok_or_else(|| bad_cast(v, DataType::Int64)),
            Value::Float64(x) => float_to_i64(x).ok_or_else(|| bad_cast(v, DataType::Int64)),
            Value::Boolean(x) => Ok(x as i64),
            Value::Char(x) => Ok(x as i64),
            Value::String(ref s) => s.trim().parse().map_err(|_| bad_cast(v, DataType::Int64)),
            _ => Err(bad_cast(v, DataType::Int64)),
        }
    }

    pub fn to_u64(&self) -> Result<u64> {
        let v = &self.0;
        match *v {
            Value::UInt64(x) => Ok(x),
            Value::String(ref s) => s.trim().parse().map_err(|_| bad_cast(v, DataType::UInt64)),
            _ => {
                let signed = self.to_i64().map_err(|_| bad_cast(v, DataType::UInt64))?;
                u64::try_from(signed).map_err(|_| bad_cast(v, DataType::UInt64))
            }
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        let v = &self.0;
        match *v {
            Value::Float32(x) => Ok(x as f64),
            Value::Float64(x) => Ok(x),
            Value::UInt64(x) => Ok(x as f64),
            Value::String(ref s) => s.trim().parse().map_err(|_| bad_cast(v, DataType::Float64)),
            _ => self
                .to_i64()
                .map(|x| x as f64)
                .map_err(|_| bad_cast(v, DataType::Float64)),
        }
    }

    pub fn to_bool(&self) -> Result<bool> {
        let v = &self.0;
        match *v {
            Value::Boolean(x) => Ok(x),
            Value::String(ref s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(bad_cast(v, DataType::Boolean)),
            },
            Value::Float32(_) | Value::Float64(_) => self
                .to_f64()
                .map(|x| x != 0.0)
                .map_err(|_| bad_cast(v, DataType::Boolean)),
            _ => self
                .to_i64()
                .map(|x| x != 0)
                .or_else(|_| self.to_u64().map(|x| x != 0))
                .map_err(|_| bad_cast(v, DataType::Boolean)),
        }
    }

    /// Renders the value as text; binary values must hold valid UTF-8.
    pub fn to_text(&self) -> Result<String> {
        match &self.0 {
            Value::Binary(blob) => String::from_utf8(blob.to_vec())
                .map_err(|_| bad_cast(&self.0, DataType::String)),
            other => Ok(other.to_string()),
        }
    }

    /// Converts to any supported scalar type.
    pub fn try_convert<T: FromDynamic>(&self) -> Result<T> {
        T::from_dynamic(self)
    }
}

fn float_to_i64(x: f64) -> Option<i64> {
    let t = x.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

impl From<Value> for DynamicValue {
    fn from(value: Value) -> Self {
        DynamicValue(value)
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Types a [`DynamicValue`] can be converted into.
pub trait FromDynamic: Sized {
    fn from_dynamic(value: &DynamicValue) -> Result<Self>;
}

macro_rules! from_dynamic_int {
    ($($ty:ty => $via:ident, $data_type:ident);* $(;)?) => {
        $(
            impl FromDynamic for $ty {
                fn from_dynamic(value: &DynamicValue) -> Result<Self> {
                    let wide = value.$via()?;
                    <$ty>::try_from(wide).map_err(|_| bad_cast(&value.0, DataType::$data_type))
                }
            }
        )*
    };
}

from_dynamic_int! {
    i8 => to_i64, Int8;
    i16 => to_i64, Int16;
    i32 => to_i64, Int32;
    i64 => to_i64, Int64;
    u8 => to_u64, UInt8;
    u16 => to_u64, UInt16;
    u32 => to_u64, UInt32;
    u64 => to_u64, UInt64;
}

impl FromDynamic for f32 {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        value.to_f64().map(|x| x as f32)
    }
}

impl FromDynamic for f64 {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        value.to_f64()
    }
}

impl FromDynamic for bool {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        value.to_bool()
    }
}

impl FromDynamic for char {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        match &value.0 {
            Value::Char(c) => Ok(*c),
            Value::String(s) if s.chars().count() == 1 => {
                s.chars().next().ok_or_else(|| bad_cast(&value.0, DataType::Char))
            }
            _ => value
                .to_u64()
                .ok()
                .and_then(|x| u8::try_from(x).ok())
                .map(char::from)
                .ok_or_else(|| bad_cast(&value.0, DataType::Char)),
        }
    }
}

impl FromDynamic for String {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        value.to_text()
    }
}

impl FromDynamic for Blob {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        match &value.0 {
            Value::Binary(blob) => Ok(blob.clone()),
            Value::String(s) => Ok(Blob::from(s.as_bytes())),
            other => Err(bad_cast(other, DataType::Binary)),
        }
    }
}

impl FromDynamic for Date {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        match &value.0 {
            Value::Date(d) => Ok(*d),
            Value::DateTime(dt) => Ok(dt.date()),
            Value::String(s) => s.parse().map_err(|_| bad_cast(&value.0, DataType::Date)),
            other => Err(bad_cast(other, DataType::Date)),
        }
    }
}

impl FromDynamic for Time {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        match &value.0 {
            Value::Time(t) => Ok(*t),
            Value::DateTime(dt) => Ok(dt.time()),
            Value::String(s) => s.parse().map_err(|_| bad_cast(&value.0, DataType::Time)),
            other => Err(bad_cast(other, DataType::Time)),
        }
    }
}

impl FromDynamic for DateTime {
    fn from_dynamic(value: &DynamicValue) -> Result<Self> {
        match &value.0 {
            Value::DateTime(dt) => Ok(*dt),
            Value::Date(d) => Ok(DateTime::from(*d)),
            Value::String(s) => s
                .parse()
                .map_err(|_| bad_cast(&value.0, DataType::DateTime)),
            other => Err(bad_cast(other, DataType::DateTime)),
        }
    }
}
