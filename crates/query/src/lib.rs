//! A small SQL query model.
//!
//! Derived invoice line fields have no backing column, so searching them means
//! building a query over the real tables. This crate provides the pieces the
//! search translators need: aliased tables, joins, scalar functions, search
//! operators keyed by their symbol, rendering to Postgres SQL with positional
//! parameters, and an in-memory evaluator with SQL NULL semantics.

pub mod domain;
pub mod error;
pub mod eval;
pub mod expr;
pub mod operator;
pub mod render;
pub mod select;
pub mod value;

mod like;

pub use domain::{Clause, SearchDomain};
pub use error::{QueryError, QueryResult};
pub use eval::{Row, TableSource, execute};
pub use expr::{ColumnRef, Expr, cast_integer, position, substring};
pub use operator::Operator;
pub use render::Sql;
pub use select::{Join, JoinType, Query, Select, Table};
pub use value::Value;
