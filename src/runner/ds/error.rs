use thiserror::Error;

use crate::runner::ds::cast::HostType;

/// Errors that escape the object model. Misses are never errors: they are
/// reported through `Lookup::NotFound` or a `false` acceptance flag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JErrorType {
    #[error("Uncaught reference error: {0}.")]
    ReferenceError(String),
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    #[error("Uncaught range error: {0}.")]
    RangeError(String),
    #[error("Uncaught conversion error: {0}.")]
    ConversionError(#[from] ConversionError),
    /// Raised while building prototypes, never during lookup.
    #[error("Object model misuse: {0}")]
    MisuseError(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("{value} has no host representation as {target:?}")]
    NoHostRepresentation { value: String, target: HostType },
    #[error("{value} has no script representation")]
    NoScriptRepresentation { value: String },
}
