use thiserror::Error;

use origin_invoicing::SearchError;
use origin_query::QueryError;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("query failed: {0}")]
    Query(#[from] QueryError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A search subquery produced something other than an integer id.
    #[error("unexpected id value {0}")]
    UnexpectedId(String),

    #[error("cannot bind parameter {0}")]
    UnsupportedParameter(String),
}
