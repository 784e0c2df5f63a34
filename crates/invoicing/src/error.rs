use thiserror::Error;

use origin_query::QueryError;

/// Errors raised while reading or searching derived origin fields.
///
/// Unresolvable origins are not errors: they produce empty values and empty
/// search contributions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Not an origin field at all.
    #[error("unknown field {0:?}")]
    UnknownField(String),

    /// An origin field whose companion module is not installed.
    #[error("field {0} is not registered (missing module)")]
    UnregisteredField(&'static str),

    /// The clause value cannot be searched on this field.
    #[error("invalid value {value} for field {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error(transparent)]
    Query(#[from] QueryError),
}
