//! Search clauses and the domains they are rewritten into.

use crate::error::QueryResult;
use crate::operator::Operator;
use crate::render::Sql;
use crate::select::Select;
use crate::value::Value;

/// A user search clause `(field, operator, value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl Clause {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Build from the host's string operator symbol.
    pub fn parse(
        field: impl Into<String>,
        symbol: &str,
        value: impl Into<Value>,
    ) -> QueryResult<Self> {
        Ok(Self::new(field, Operator::from_symbol(symbol)?, value))
    }
}

/// A search rewritten over stored columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDomain {
    /// `id IN (subquery)`; the subquery selects record ids.
    IdIn(Select),
}

impl SearchDomain {
    pub fn subquery(&self) -> &Select {
        match self {
            SearchDomain::IdIn(select) => select,
        }
    }

    /// `"id" IN (SELECT ...)` with positional parameters.
    pub fn to_sql(&self) -> Sql {
        match self {
            SearchDomain::IdIn(select) => {
                let inner = select.to_sql();
                Sql {
                    text: format!("\"id\" IN ({})", inner.text),
                    params: inner.params,
                }
            }
        }
    }
}
