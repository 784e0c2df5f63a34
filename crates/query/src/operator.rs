//! Search operators keyed by the symbol the host uses in search clauses.

use core::str::FromStr;

use crate::error::{QueryError, QueryResult};
use crate::expr::Expr;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Like,
    NotLike,
    ILike,
    NotILike,
    In,
    NotIn,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Like,
        Operator::NotLike,
        Operator::ILike,
        Operator::NotILike,
        Operator::In,
        Operator::NotIn,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::ILike => "ilike",
            Operator::NotILike => "not ilike",
            Operator::In => "in",
            Operator::NotIn => "not in",
        }
    }

    pub fn from_symbol(symbol: &str) -> QueryResult<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| QueryError::UnknownOperator(symbol.to_string()))
    }

    /// Operators that exclude matches rather than include them.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            Operator::NotEqual | Operator::NotLike | Operator::NotILike | Operator::NotIn
        )
    }

    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Operator::Like | Operator::NotLike | Operator::ILike | Operator::NotILike
        )
    }

    pub fn takes_list(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Pattern operators become plain (in)equality; others are unchanged.
    ///
    /// Used when a pattern search value turns out to be an exact date.
    pub fn to_exact(self) -> Self {
        match self {
            Operator::Like | Operator::ILike => Operator::Equal,
            Operator::NotLike | Operator::NotILike => Operator::NotEqual,
            other => other,
        }
    }

    /// Build `left <op> value`.
    ///
    /// `=`/`!=` against NULL become `IS NULL`/`IS NOT NULL`; list operators
    /// require a list value and scalar operators reject one.
    pub fn apply(self, left: Expr, value: &Value) -> QueryResult<Expr> {
        match (self, value) {
            (Operator::In | Operator::NotIn, Value::List(_)) => {}
            (Operator::In | Operator::NotIn, _) | (_, Value::List(_)) => {
                return Err(QueryError::InvalidValue {
                    operator: self.symbol(),
                    value: value.to_string(),
                });
            }
            (Operator::Equal, Value::Null) => return Ok(Expr::is_null(left)),
            (Operator::NotEqual, Value::Null) => return Ok(Expr::is_not_null(left)),
            _ => {}
        }
        Ok(Expr::compare(self, left, Expr::Literal(value.clone())))
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_symbol(s)
    }
}

impl core::fmt::Display for Operator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Table;

    #[test]
    fn every_symbol_round_trips() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()).unwrap(), op);
        }
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        let err = "child_of".parse::<Operator>().unwrap_err();
        assert_eq!(err, QueryError::UnknownOperator("child_of".into()));
    }

    #[test]
    fn pattern_operators_collapse_to_exact() {
        assert_eq!(Operator::Like.to_exact(), Operator::Equal);
        assert_eq!(Operator::ILike.to_exact(), Operator::Equal);
        assert_eq!(Operator::NotLike.to_exact(), Operator::NotEqual);
        assert_eq!(Operator::NotILike.to_exact(), Operator::NotEqual);
        assert_eq!(Operator::GreaterEqual.to_exact(), Operator::GreaterEqual);
    }

    #[test]
    fn equality_with_null_becomes_is_null() {
        let t = Table::new("sale_sale", "s");
        let e = Operator::Equal.apply(t.column("reference"), &Value::Null).unwrap();
        assert_eq!(e, Expr::is_null(t.column("reference")));
        let e = Operator::NotEqual.apply(t.column("reference"), &Value::Null).unwrap();
        assert_eq!(e, Expr::is_not_null(t.column("reference")));
    }

    #[test]
    fn list_shape_is_checked() {
        let t = Table::new("sale_sale", "s");
        assert!(Operator::In.apply(t.column("number"), &"1".into()).is_err());
        assert!(
            Operator::Equal
                .apply(t.column("number"), &Value::from(vec!["1", "2"]))
                .is_err()
        );
        assert!(
            Operator::NotIn
                .apply(t.column("number"), &Value::from(vec!["1"]))
                .is_ok()
        );
    }
}
