//! Error types for container construction, dispatch and transformation.

use thiserror::Error;

use crate::core::TypeTag;

/// Errors raised by the container core.
///
/// Every variant carries enough context to point at the offending value or
/// position, so callers (encoders, graph model, statistics) can report the
/// failure close to its cause instead of propagating a null-like sentinel.
#[derive(Debug, Error)]
pub enum ListError {
    /// IO error occurred while reading a source file.
    #[error("IO error reading file: {0}")]
    Io(#[from] std::io::Error),

    /// A type name could not be mapped to any known tag.
    #[error("Unknown type: '{0}'")]
    UnknownType(String),

    /// The tag is known but no constructor exists for it with the given arguments.
    #[error("Type '{0}' cannot be instantiated from the given arguments")]
    NotInstantiable(TypeTag),

    /// An element could not be stored in a container of the given kind.
    #[error("Element at index {index} ({found}) cannot be stored in a {list}")]
    ElementKind {
        index: usize,
        list: TypeTag,
        found: TypeTag,
    },

    /// Co-indexed inputs have incompatible lengths.
    #[error("Shape mismatch in {operation}: expected length {expected}, found {found}")]
    ShapeMismatch {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    /// A direct index mutator was given an index past the end.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An id-indexed list already holds an element with this id.
    #[error("Duplicate id '{0}'")]
    DuplicateId(String),

    /// The operation would break a container invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A string could not be read as a date under the active convention.
    #[error("Cannot parse '{0}' as a date")]
    InvalidDate(String),

    /// Delimited text could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ListError>;
