use crate::DeserializationError;
use thiserror::Error;

/// A list specifying categories of [`RfError`](crate::RfError).
///
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RfError {
    /// A required argument of a public entry point was missing or empty.
    #[error("Invalid argument: {}", _0)]
    ArgumentInvalid(&'static str),

    /// A required argument of a public entry point was missing or empty.
    #[error("Invalid argument: {}", _0)]
    ArgumentInvalidDetailed(String),

    /// A requested column has no match in the cursor's schema, and missing columns
    /// are not tolerated.
    #[error("Column `{column}` is not part of the result schema")]
    SchemaMismatch {
        /// The name of the missing column, as it was requested.
        column: String,
    },

    /// A property of the target type rejected the value that was read for it.
    #[error("Mapping failed for property `{property}`")]
    InvalidMapping {
        /// The property (serde field name) of the target type.
        property: String,
        /// The causing Error.
        source: DeserializationError,
    },

    /// Mapping of a row failed for a reason that is not bound to a single property,
    /// e.g. because the target type is not a struct with named fields.
    #[error("Error occured in deserialization")]
    Deserialization {
        /// The causing Error.
        #[from]
        source: DeserializationError,
    },

    /// The single connection of a `SingleConnectionPool` was taken a second time
    /// before it was given back.
    #[error("The connection of the single-connection pool is already in use")]
    ConcurrentUse,

    /// The consumer side of a sink was faulted; the message describes the cause.
    #[error("Sink was faulted: {}", _0)]
    SinkFaulted(String),

    /// The operation was cancelled cooperatively.
    #[error("Operation was cancelled")]
    Cancelled,

    /// The underlying cursor reported an error.
    #[error("The row cursor failed")]
    Cursor {
        /// The causing Error.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Error occured in thread synchronization.
    #[error("Error occured in thread synchronization")]
    Poison,

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    Impl(&'static str),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    Usage(&'static str),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    UsageDetailed(String),
}

/// Abbreviation of `Result<T, RfError>`.
pub type RfResult<T> = std::result::Result<T, RfError>;

impl RfError {
    /// Wraps an error that was produced by a cursor implementation.
    pub fn cursor<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Cursor {
            source: Box::new(error),
        }
    }

    /// Returns the name of the offending property, if this is a mapping error.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::InvalidMapping { property, .. } => Some(property),
            _ => None,
        }
    }

    /// Returns true if the error was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Reveal the inner error
    pub fn inner(&self) -> Option<&dyn std::error::Error> {
        match self {
            Self::InvalidMapping { source, .. } | Self::Deserialization { source } => Some(source),
            Self::Cursor { source } => Some(&**source),
            _ => None,
        }
    }
}

impl<G> From<std::sync::PoisonError<G>> for RfError {
    fn from(_error: std::sync::PoisonError<G>) -> Self {
        Self::Poison
    }
}

/// Creates an [`RfError::UsageDetailed`](crate::RfError::UsageDetailed) with a formatted message.
#[macro_export]
macro_rules! usage_err {
    ($($arg:tt)*) => {
        $crate::RfError::UsageDetailed(format!($($arg)*))
    };
}
