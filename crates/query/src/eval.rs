//! In-memory evaluation of [`Select`] statements.
//!
//! Joins are nested loops applied in FROM order. Predicates follow SQL
//! three-valued logic: any comparison involving NULL is unknown, and only rows
//! whose join condition / WHERE clause is known to be true survive. A LEFT JOIN
//! that finds no match keeps the row with every column of the joined table
//! NULL.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{QueryError, QueryResult};
use crate::expr::Expr;
use crate::like::like_match;
use crate::operator::Operator;
use crate::select::{JoinType, Select};
use crate::value::Value;

/// A stored row: column name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

/// Read access to stored tables by name.
pub trait TableSource {
    /// Rows of `table`; an unknown table has no rows.
    fn rows(&self, table: &str) -> &[Row];
}

struct Scope<'a> {
    aliases: Vec<&'a str>,
    rows: Vec<Option<&'a Row>>,
}

impl<'a> Scope<'a> {
    fn column(&self, table: &str, column: &str) -> QueryResult<Value> {
        let idx = self
            .aliases
            .iter()
            .position(|a| *a == table)
            .ok_or_else(|| QueryError::UnknownTable(table.to_string()))?;
        match self.rows.get(idx).copied().flatten() {
            None => Ok(Value::Null),
            Some(row) => row.get(column).cloned().ok_or_else(|| QueryError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
        }
    }
}

/// Run `select` against `source`, returning the projected rows.
pub fn execute<S: TableSource + ?Sized>(
    select: &Select,
    source: &S,
) -> QueryResult<Vec<Vec<Value>>> {
    let from = &select.from;
    let mut aliases: Vec<&str> = vec![from.base.alias()];
    let mut frames: Vec<Vec<Option<&Row>>> = source
        .rows(from.base.name())
        .iter()
        .map(|r| vec![Some(r)])
        .collect();

    for join in &from.joins {
        aliases.push(join.table.alias());
        let right = source.rows(join.table.name());
        let mut next = Vec::with_capacity(frames.len());
        for frame in frames {
            let mut matched = false;
            for candidate in right {
                let mut rows = frame.clone();
                rows.push(Some(candidate));
                let scope = Scope {
                    aliases: aliases.clone(),
                    rows,
                };
                if eval(&join.condition, &scope)?.truth() == Some(true) {
                    matched = true;
                    next.push(scope.rows);
                }
            }
            if !matched && join.kind == JoinType::Left {
                let mut rows = frame;
                rows.push(None);
                next.push(rows);
            }
        }
        frames = next;
    }

    let mut out = Vec::new();
    for rows in frames {
        let scope = Scope {
            aliases: aliases.clone(),
            rows,
        };
        if let Some(filter) = &select.filter {
            if eval(filter, &scope)?.truth() != Some(true) {
                continue;
            }
        }
        let projected = select
            .columns
            .iter()
            .map(|c| eval(c, &scope))
            .collect::<QueryResult<Vec<_>>>()?;
        out.push(projected);
    }
    tracing::trace!(
        table = from.base.name(),
        joins = from.joins.len(),
        rows = out.len(),
        "select evaluated"
    );
    Ok(out)
}

fn eval(expr: &Expr, scope: &Scope<'_>) -> QueryResult<Value> {
    match expr {
        Expr::Column(c) => scope.column(&c.table, &c.column),
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Substring { string, start } => match (eval(string, scope)?, eval(start, scope)?) {
            (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
            (Value::Text(s), Value::Integer(n)) => {
                let skip = usize::try_from(n.saturating_sub(1)).unwrap_or(0);
                Ok(Value::Text(s.chars().skip(skip).collect()))
            }
            (s, n) => Err(QueryError::TypeMismatch(format!("SUBSTRING({s} FROM {n})"))),
        },
        Expr::Position { needle, haystack } => {
            match (eval(needle, scope)?, eval(haystack, scope)?) {
                (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
                (Value::Text(n), Value::Text(h)) => {
                    let pos = h
                        .find(&n)
                        .map_or(0, |byte| h[..byte].chars().count() as i64 + 1);
                    Ok(Value::Integer(pos))
                }
                (n, h) => Err(QueryError::TypeMismatch(format!("POSITION({n} IN {h})"))),
            }
        }
        Expr::Add(l, r) => match (eval(l, scope)?, eval(r, scope)?) {
            (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_add(b)
                .map(Value::Integer)
                .ok_or_else(|| QueryError::TypeMismatch(format!("{a} + {b} overflows"))),
            (a, b) => Err(QueryError::TypeMismatch(format!("{a} + {b}"))),
        },
        Expr::CastInteger(e) => match eval(e, scope)? {
            Value::Null => Ok(Value::Null),
            Value::Integer(i) => Ok(Value::Integer(i)),
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| QueryError::InvalidCast(s)),
            other => Err(QueryError::InvalidCast(other.to_string())),
        },
        Expr::Compare { op, left, right } => compare(*op, eval(left, scope)?, eval(right, scope)?),
        Expr::IsNull { expr, negated } => Ok(Value::Bool(eval(expr, scope)?.is_null() != *negated)),
        Expr::And(exprs) => {
            let mut unknown = false;
            for e in exprs {
                match truth(eval(e, scope)?)? {
                    Some(false) => return Ok(Value::Bool(false)),
                    None => unknown = true,
                    Some(true) => {}
                }
            }
            Ok(if unknown { Value::Null } else { Value::Bool(true) })
        }
        Expr::Or(exprs) => {
            let mut unknown = false;
            for e in exprs {
                match truth(eval(e, scope)?)? {
                    Some(true) => return Ok(Value::Bool(true)),
                    None => unknown = true,
                    Some(false) => {}
                }
            }
            Ok(if unknown { Value::Null } else { Value::Bool(false) })
        }
    }
}

fn truth(value: Value) -> QueryResult<Option<bool>> {
    match value {
        Value::Bool(b) => Ok(Some(b)),
        Value::Null => Ok(None),
        other => Err(QueryError::TypeMismatch(format!("{other} is not a boolean"))),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Order two non-null scalars, applying the implicit literal casts Postgres
/// performs (text to date, text to integer).
fn order(left: &Value, right: &Value) -> QueryResult<Ordering> {
    let mismatch = || QueryError::TypeMismatch(format!("cannot compare {left} with {right}"));
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::Date(a), Value::Text(b)) => {
            parse_iso_date(b).map(|b| a.cmp(&b)).ok_or_else(mismatch)
        }
        (Value::Text(a), Value::Date(b)) => {
            parse_iso_date(a).map(|a| a.cmp(b)).ok_or_else(mismatch)
        }
        (Value::Integer(a), Value::Text(b)) => {
            b.trim().parse::<i64>().map(|b| a.cmp(&b)).map_err(|_| mismatch())
        }
        (Value::Text(a), Value::Integer(b)) => {
            a.trim().parse::<i64>().map(|a| a.cmp(b)).map_err(|_| mismatch())
        }
        _ => Err(mismatch()),
    }
}

fn compare(op: Operator, left: Value, right: Value) -> QueryResult<Value> {
    if op.takes_list() {
        let Value::List(items) = right else {
            return Err(QueryError::InvalidValue {
                operator: op.symbol(),
                value: right.to_string(),
            });
        };
        if left.is_null() {
            return Ok(Value::Null);
        }
        let mut unknown = false;
        let mut found = false;
        for item in &items {
            if item.is_null() {
                unknown = true;
            } else if order(&left, item)? == Ordering::Equal {
                found = true;
                break;
            }
        }
        let member = if found {
            Some(true)
        } else if unknown {
            None
        } else {
            Some(false)
        };
        return Ok(match member {
            Some(m) => Value::Bool(m == (op == Operator::In)),
            None => Value::Null,
        });
    }

    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }

    if op.is_pattern() {
        let (Value::Text(text), Value::Text(pattern)) = (&left, &right) else {
            return Err(QueryError::TypeMismatch(format!("{left} {op} {right}")));
        };
        let ci = matches!(op, Operator::ILike | Operator::NotILike);
        let matched = like_match(text, pattern, ci);
        return Ok(Value::Bool(matched != matches!(op, Operator::NotLike | Operator::NotILike)));
    }

    let ord = order(&left, &right)?;
    let holds = match op {
        Operator::Equal => ord == Ordering::Equal,
        Operator::NotEqual => ord != Ordering::Equal,
        Operator::Less => ord == Ordering::Less,
        Operator::LessEqual => ord != Ordering::Greater,
        Operator::Greater => ord == Ordering::Greater,
        Operator::GreaterEqual => ord != Ordering::Less,
        Operator::Like
        | Operator::NotLike
        | Operator::ILike
        | Operator::NotILike
        | Operator::In
        | Operator::NotIn => {
            return Err(QueryError::TypeMismatch(format!("{left} {op} {right}")));
        }
    };
    Ok(Value::Bool(holds))
}
