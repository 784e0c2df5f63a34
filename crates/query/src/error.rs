//! Query building and evaluation errors.

use thiserror::Error;

pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The operator symbol is not one the search layer understands.
    #[error("unknown operator {0:?}")]
    UnknownOperator(String),

    /// The clause value has a shape the operator cannot take.
    #[error("operator {operator} cannot take value {value}")]
    InvalidValue { operator: &'static str, value: String },

    /// Two values could not be compared or combined.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// `CAST(... AS INTEGER)` on text that is not an integer.
    #[error("invalid integer cast of {0:?}")]
    InvalidCast(String),

    #[error("unknown table alias {0:?}")]
    UnknownTable(String),

    #[error("unknown column {table}.{column}")]
    UnknownColumn { table: String, column: String },
}
