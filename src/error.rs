//! Error types for option validation and codec operations.

use thiserror::Error;

/// Coarse classification of a [`CodecError`].
///
/// Option validation distinguishes a value of the wrong kind ([`Type`]),
/// a value of the right kind outside the accepted token or arity set
/// ([`Argument`]), and a numeric value outside its bounds ([`Range`]).
///
/// [`Type`]: ErrorKind::Type
/// [`Argument`]: ErrorKind::Argument
/// [`Range`]: ErrorKind::Range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong value kind for an option.
    Type,
    /// Right kind, value not in the accepted token or arity set.
    Argument,
    /// Numeric value outside the accepted bounds.
    Range,
    /// Caller buffer does not match the declared geometry.
    BufferLength,
    /// Image exceeds a configured resource limit.
    Limit,
    /// The codec engine rejected the stream or operation.
    CodecFailure,
}

/// Unified error type for jpegkit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// An option value has the wrong kind.
    #[error("invalid type for `{option}`: expected {expected}")]
    InvalidType {
        option: &'static str,
        expected: &'static str,
    },
    /// An option value or argument list is not accepted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A numeric option is out of bounds.
    #[error("`{option}` out of range: {detail}")]
    OutOfRange {
        option: &'static str,
        detail: String,
    },
    /// Pixel buffer is shorter than the geometry requires.
    #[error("buffer too short: {required} bytes required, {actual} given")]
    BufferTooShort { required: usize, actual: usize },
    /// Pixel buffer is longer than `stride * height`.
    #[error("buffer too large: at most {limit} bytes expected, {actual} given")]
    BufferTooLarge { limit: usize, actual: usize },
    /// Resource limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
    /// Underlying codec engine error.
    #[error("codec failure: {source}")]
    Codec {
        source: Box<dyn core::error::Error + Send + Sync>,
    },
}

impl CodecError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidType { .. } => ErrorKind::Type,
            CodecError::InvalidArgument(_) => ErrorKind::Argument,
            CodecError::OutOfRange { .. } => ErrorKind::Range,
            CodecError::BufferTooShort { .. } | CodecError::BufferTooLarge { .. } => {
                ErrorKind::BufferLength
            }
            CodecError::LimitExceeded(_) => ErrorKind::Limit,
            CodecError::Codec { .. } => ErrorKind::CodecFailure,
        }
    }

    /// Wrap an error reported by the codec engine. Its message is shown
    /// verbatim and the error itself stays reachable through
    /// [`source`](core::error::Error::source).
    pub fn from_engine<E>(error: E) -> Self
    where
        E: Into<Box<dyn core::error::Error + Send + Sync>>,
    {
        CodecError::Codec {
            source: error.into(),
        }
    }

    pub(crate) fn invalid_type(option: &'static str, expected: &'static str) -> Self {
        CodecError::InvalidType { option, expected }
    }

    pub(crate) fn out_of_range(option: &'static str, detail: impl Into<String>) -> Self {
        CodecError::OutOfRange {
            option,
            detail: detail.into(),
        }
    }
}
