//! Expression tree for select lists, join conditions and WHERE clauses.

use crate::operator::Operator;
use crate::value::Value;

/// A column qualified by its table alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Column(ColumnRef),
    Literal(Value),
    /// `SUBSTRING(string FROM start)`, 1-based.
    Substring {
        string: Box<Expr>,
        start: Box<Expr>,
    },
    /// `POSITION(needle IN haystack)`, 1-based, 0 when absent.
    Position {
        needle: Box<Expr>,
        haystack: Box<Expr>,
    },
    Add(Box<Expr>, Box<Expr>),
    /// `CAST(expr AS INTEGER)`.
    CastInteger(Box<Expr>),
    Compare {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn compare(op: Operator, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_null(expr: Expr) -> Self {
        Expr::IsNull {
            expr: Box::new(expr),
            negated: false,
        }
    }

    pub fn is_not_null(expr: Expr) -> Self {
        Expr::IsNull {
            expr: Box::new(expr),
            negated: true,
        }
    }

    pub fn equals(self, other: Expr) -> Self {
        Expr::compare(Operator::Equal, self, other)
    }

    pub fn like(self, pattern: impl Into<String>) -> Self {
        Expr::compare(Operator::Like, self, Expr::Literal(Value::Text(pattern.into())))
    }

    pub fn plus(self, other: Expr) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }

    /// Conjunction, flattening nested `AND`s.
    pub fn and(self, other: Expr) -> Self {
        Expr::all([self, other])
    }

    /// Disjunction, flattening nested `OR`s.
    pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Self {
        let mut flat = Vec::new();
        for e in exprs {
            match e {
                Expr::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Expr::And(flat)
        }
    }

    pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Self {
        let mut flat = Vec::new();
        for e in exprs {
            match e {
                Expr::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Expr::Or(flat)
        }
    }
}

pub fn substring(string: Expr, start: Expr) -> Expr {
    Expr::Substring {
        string: Box::new(string),
        start: Box::new(start),
    }
}

pub fn position(needle: Expr, haystack: Expr) -> Expr {
    Expr::Position {
        needle: Box::new(needle),
        haystack: Box::new(haystack),
    }
}

pub fn cast_integer(expr: Expr) -> Expr {
    Expr::CastInteger(Box::new(expr))
}
