use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_access(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidAccess {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(what: impl Into<String>, index: usize, bound: usize) -> Error {
        Error(
            ErrorKind::Range {
                what: what.into(),
                index,
                bound,
            }
            .into(),
        )
    }

    pub fn unknown_length(column: usize) -> Error {
        Error(ErrorKind::UnknownLength { column }.into())
    }

    pub fn size_exceeded(size: usize, max: usize) -> Error {
        Error(ErrorKind::SizeExceeded { size, max }.into())
    }

    pub fn driver(context: impl Into<String>, source: impl Into<StdErrorBoxed>) -> Error {
        Error(
            ErrorKind::Driver {
                context: context.into(),
                source: source.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn type_mismatch(
        column: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::TypeMismatch {
                column,
                expected: expected.into(),
                actual: actual.into(),
            }
            .into(),
        )
    }

    /// Returns `true` if this error reports a value over the maximum field size.
    pub fn is_size_exceeded(&self) -> bool {
        matches!(self.kind(), ErrorKind::SizeExceeded { .. })
    }

    /// Returns `true` if the driver could not report the total size of a streamed value.
    pub fn is_unknown_length(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnknownLength { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid access: {message}")]
    InvalidAccess { message: String },

    #[error("{what} index {index} is out of range (tracked: {bound})")]
    Range {
        what: String,
        index: usize,
        bound: usize,
    },

    #[error("could not determine returned data length for column {column}")]
    UnknownLength { column: usize },

    #[error(
        "specified data size ({size} bytes) exceeds maximum value ({max}); \
         raise the max_field_size property to allow larger values"
    )]
    SizeExceeded { size: usize, max: usize },

    #[error("driver failure: {context}: {source}")]
    Driver {
        context: String,
        source: StdErrorBoxed,
    },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid data format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("column {column} holds {actual} data, cannot decode as {expected}")]
    TypeMismatch {
        column: usize,
        expected: String,
        actual: String,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::invalid_format("text", e.to_string())
    }
}
