//! Tables, joins and select statements.

use crate::expr::{ColumnRef, Expr};

/// A table under an alias. The same table can appear several times in one
/// query under different aliases (an invoice line joined to its origin line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    alias: String,
}

impl Table {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn column(&self, column: impl Into<String>) -> Expr {
        Expr::Column(ColumnRef {
            table: self.alias.clone(),
            column: column.into(),
        })
    }
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinType,
    pub table: Table,
    pub condition: Expr,
}

/// A FROM clause: a base table followed by joins, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub base: Table,
    pub joins: Vec<Join>,
}

impl Query {
    pub fn from(base: Table) -> Self {
        Self {
            base,
            joins: Vec::new(),
        }
    }

    pub fn join(mut self, kind: JoinType, table: Table, condition: Expr) -> Self {
        self.joins.push(Join {
            kind,
            table,
            condition,
        });
        self
    }

    pub fn inner_join(self, table: Table, condition: Expr) -> Self {
        self.join(JoinType::Inner, table, condition)
    }

    pub fn left_join(self, table: Table, condition: Expr) -> Self {
        self.join(JoinType::Left, table, condition)
    }

    /// Every table in FROM order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        core::iter::once(&self.base).chain(self.joins.iter().map(|j| &j.table))
    }

    pub fn select(self, columns: Vec<Expr>, filter: Option<Expr>) -> Select {
        Select {
            from: self,
            columns,
            filter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub from: Query,
    pub columns: Vec<Expr>,
    pub filter: Option<Expr>,
}
