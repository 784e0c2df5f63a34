//! Rendering to Postgres SQL with positional parameters.
//!
//! Literals never appear inline: each one becomes a `$n` placeholder and is
//! pushed onto [`Sql::params`] in order, ready to be bound by the executor.

use crate::expr::Expr;
use crate::operator::Operator;
use crate::select::Select;
use crate::value::Value;

/// Rendered statement plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql {
    pub text: String,
    pub params: Vec<Value>,
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[derive(Default)]
struct Writer {
    out: String,
    params: Vec<Value>,
}

impl Writer {
    fn param(&mut self, value: &Value) {
        self.params.push(value.clone());
        self.out.push_str(&format!("${}", self.params.len()));
    }

    fn group(&mut self, exprs: &[Expr], joiner: &str, empty: &str) {
        if exprs.is_empty() {
            self.out.push_str(empty);
            return;
        }
        self.out.push('(');
        for (i, e) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(joiner);
            }
            self.expr(e);
        }
        self.out.push(')');
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Column(c) => {
                self.out.push_str(&format!("{}.{}", quote(&c.table), quote(&c.column)));
            }
            Expr::Literal(Value::List(items)) => {
                self.out.push('(');
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.param(v);
                }
                self.out.push(')');
            }
            Expr::Literal(v) => self.param(v),
            Expr::Substring { string, start } => {
                self.out.push_str("SUBSTRING(");
                self.expr(string);
                self.out.push_str(" FROM ");
                self.expr(start);
                self.out.push(')');
            }
            Expr::Position { needle, haystack } => {
                self.out.push_str("POSITION(");
                self.expr(needle);
                self.out.push_str(" IN ");
                self.expr(haystack);
                self.out.push(')');
            }
            Expr::Add(l, r) => {
                self.out.push('(');
                self.expr(l);
                self.out.push_str(" + ");
                self.expr(r);
                self.out.push(')');
            }
            Expr::CastInteger(e) => {
                self.out.push_str("CAST(");
                self.expr(e);
                self.out.push_str(" AS INTEGER)");
            }
            Expr::Compare { op, left, right } => {
                if let (Operator::In | Operator::NotIn, Expr::Literal(Value::List(items))) =
                    (op, right.as_ref())
                {
                    if items.is_empty() {
                        self.out
                            .push_str(if *op == Operator::In { "FALSE" } else { "TRUE" });
                        return;
                    }
                }
                self.out.push('(');
                self.expr(left);
                self.out.push_str(match op {
                    Operator::Equal => " = ",
                    Operator::NotEqual => " != ",
                    Operator::Less => " < ",
                    Operator::LessEqual => " <= ",
                    Operator::Greater => " > ",
                    Operator::GreaterEqual => " >= ",
                    Operator::Like => " LIKE ",
                    Operator::NotLike => " NOT LIKE ",
                    Operator::ILike => " ILIKE ",
                    Operator::NotILike => " NOT ILIKE ",
                    Operator::In => " IN ",
                    Operator::NotIn => " NOT IN ",
                });
                self.expr(right);
                self.out.push(')');
            }
            Expr::IsNull { expr, negated } => {
                self.out.push('(');
                self.expr(expr);
                self.out
                    .push_str(if *negated { " IS NOT NULL)" } else { " IS NULL)" });
            }
            Expr::And(exprs) => self.group(exprs, " AND ", "TRUE"),
            Expr::Or(exprs) => self.group(exprs, " OR ", "FALSE"),
        }
    }

    fn select(&mut self, select: &Select) {
        self.out.push_str("SELECT ");
        for (i, c) in select.columns.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(c);
        }
        let base = &select.from.base;
        self.out
            .push_str(&format!(" FROM {} AS {}", quote(base.name()), quote(base.alias())));
        for join in &select.from.joins {
            self.out.push_str(&format!(
                " {} {} AS {} ON ",
                join.kind.as_sql(),
                quote(join.table.name()),
                quote(join.table.alias())
            ));
            self.expr(&join.condition);
        }
        if let Some(filter) = &select.filter {
            self.out.push_str(" WHERE ");
            self.expr(filter);
        }
    }
}

impl Select {
    pub fn to_sql(&self) -> Sql {
        let mut w = Writer::default();
        w.select(self);
        Sql {
            text: w.out,
            params: w.params,
        }
    }
}

impl Expr {
    pub fn to_sql(&self) -> Sql {
        let mut w = Writer::default();
        w.expr(self);
        Sql {
            text: w.out,
            params: w.params,
        }
    }
}
