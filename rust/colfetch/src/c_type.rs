//! Driver-level "C data type" tags passed along with every chunked fetch.

/// The representation a driver is asked to convert a column value into.
///
/// Codes follow the ODBC `SQL_C_*` numbering so transports backed by an ODBC
/// driver manager can forward them unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CDataType {
    Char,
    Binary,
    Bit,
    STinyInt,
    UTinyInt,
    SShort,
    UShort,
    SLong,
    ULong,
    SBigInt,
    UBigInt,
    Float,
    Double,
    Date,
    Time,
    Timestamp,
}

impl CDataType {
    /// Numeric ODBC code of this type tag.
    pub fn code(self) -> i16 {
        match self {
            CDataType::Char => 1,
            CDataType::Binary => -2,
            CDataType::Bit => -7,
            CDataType::STinyInt => -26,
            CDataType::UTinyInt => -28,
            CDataType::SShort => -15,
            CDataType::UShort => -17,
            CDataType::SLong => -16,
            CDataType::ULong => -18,
            CDataType::SBigInt => -25,
            CDataType::UBigInt => -27,
            CDataType::Float => 7,
            CDataType::Double => 8,
            CDataType::Date => 91,
            CDataType::Time => 92,
            CDataType::Timestamp => 93,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CDataType::Char => "SQL_C_CHAR",
            CDataType::Binary => "SQL_C_BINARY",
            CDataType::Bit => "SQL_C_BIT",
            CDataType::STinyInt => "SQL_C_STINYINT",
            CDataType::UTinyInt => "SQL_C_UTINYINT",
            CDataType::SShort => "SQL_C_SSHORT",
            CDataType::UShort => "SQL_C_USHORT",
            CDataType::SLong => "SQL_C_SLONG",
            CDataType::ULong => "SQL_C_ULONG",
            CDataType::SBigInt => "SQL_C_SBIGINT",
            CDataType::UBigInt => "SQL_C_UBIGINT",
            CDataType::Float => "SQL_C_FLOAT",
            CDataType::Double => "SQL_C_DOUBLE",
            CDataType::Date => "SQL_C_TYPE_DATE",
            CDataType::Time => "SQL_C_TYPE_TIME",
            CDataType::Timestamp => "SQL_C_TYPE_TIMESTAMP",
        }
    }

    /// Returns `true` for the tags whose values are streamed in chunks.
    pub fn is_variable_length(self) -> bool {
        matches!(self, CDataType::Char | CDataType::Binary)
    }
}

impl std::fmt::Display for CDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
