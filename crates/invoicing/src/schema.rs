//! Stored tables the search translators join, and the polymorphic join
//! condition shared by origin and shipment lookups.

use origin_core::Reference;
use origin_core::reference::SEPARATOR;
use origin_query::{Expr, Table, cast_integer, position, substring};

pub const INVOICE_LINE: &str = "account_invoice_line";
pub const INVOICE: &str = "account_invoice";
pub const SALE_LINE: &str = "sale_line";
pub const SALE: &str = "sale_sale";
pub const PURCHASE_LINE: &str = "purchase_line";
pub const PURCHASE: &str = "purchase_purchase";
pub const LINE_MOVE: &str = "account_invoice_line_stock_move";
pub const MOVE: &str = "stock_move";

/// Id part of a stored `"<model>,<id>"` column, as an integer.
///
/// The offset is cast to `INTEGER`: Postgres has no `SUBSTRING(text FROM
/// bigint)`, and a bound `i64` parameter is typed `bigint`.
pub fn referenced_id(column: Expr) -> Expr {
    let separator = position(Expr::literal(SEPARATOR.to_string()), column.clone());
    cast_integer(substring(
        column,
        separator.plus(cast_integer(Expr::literal(1i64))),
    ))
}

/// `column` references `model` and its id is `target.id`.
///
/// The model test comes first so ids are only cast for matching references.
pub fn references(column: Expr, model: &str, target: &Table) -> Expr {
    column
        .clone()
        .like(Reference::like_pattern(model))
        .and(referenced_id(column).equals(target.column("id")))
}
