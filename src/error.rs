//! Errors raised while turning a tabular display request into an expression tree.

use crate::request::ColumnType;

/// Errors that can occur while building a lambda pipeline.
///
/// All of them are raised at the point of detection and none are retried:
/// the builder has no side effects to roll back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TdsError {
    /// A filter operation or aggregation function with no construction rule
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A request shape the builder does not handle (e.g. multi-column grouping)
    #[error("Unsupported request shape: {0}")]
    UnsupportedShape(String),

    /// A request value whose representation does not match its column type
    #[error("Type mismatch: {column_type} column expects {expected}, found {found}")]
    TypeMismatch {
        column_type: ColumnType,
        expected: &'static str,
        found: String,
    },

    /// A vocabulary token that names no known variant
    #[error("Unknown {vocabulary} token '{token}'")]
    UnknownToken {
        vocabulary: &'static str,
        token: String,
    },

    /// A pipeline stage fired but the base body had no anchor expression
    #[error("Cannot compose a pipeline stage onto an empty expression body")]
    MissingAnchor,
}

pub type Result<T> = std::result::Result<T, TdsError>;
