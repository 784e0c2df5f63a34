//! Rewriting searches on derived origin fields into stored-column queries.
//!
//! The derived fields have no column, so each clause becomes
//! `id IN (SELECT line.id FROM <joins> WHERE <predicate>)`.

use chrono::NaiveDate;

use origin_core::{Context, InstalledModules};
use origin_query::{Clause, Expr, Operator, Query, SearchDomain, Table, Value};
use origin_stock::ShipmentKind;

use crate::error::SearchError;
use crate::origin::OriginKind;
use crate::resolve::DocumentField;
use crate::schema::{self, references};

/// One document family joined into a reference/date search.
struct Family {
    kind: OriginKind,
    document: Table,
}

impl Family {
    fn columns(&self, field: DocumentField) -> Vec<Expr> {
        match field {
            DocumentField::Reference => vec![
                self.document.column("reference"),
                self.document.column("number"),
            ],
            DocumentField::Number => vec![self.document.column("number")],
            DocumentField::Date => vec![self.document.column(self.kind.date_field())],
        }
    }

    /// Matching predicate for this family.
    ///
    /// Positive operators match when any column matches. Negated operators
    /// exclude a document only when every column passes the negated test, so
    /// a document matched through its number is not returned because its
    /// reference differs.
    fn predicate(
        &self,
        field: DocumentField,
        op: Operator,
        value: &Value,
    ) -> Result<Expr, SearchError> {
        let preds = self
            .columns(field)
            .into_iter()
            .map(|c| op.apply(c, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(if op.is_negated() {
            Expr::all(preds)
        } else {
            Expr::any(preds)
        })
    }
}

fn field_name(field: DocumentField) -> &'static str {
    match field {
        DocumentField::Reference => "origin_reference",
        DocumentField::Number => "origin_number",
        DocumentField::Date => "origin_date",
    }
}

fn parse_date(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), format)
        .or_else(|_| NaiveDate::parse_from_str(text.trim(), origin_core::DEFAULT_DATE_FORMAT))
        .ok()
}

/// Coerce a date clause value: text is read with the locale pattern.
fn date_value(field: DocumentField, value: &Value, ctx: &Context) -> Result<Value, SearchError> {
    let invalid = || SearchError::InvalidValue {
        field: field_name(field),
        value: value.to_string(),
    };
    match value {
        Value::Null | Value::Date(_) => Ok(value.clone()),
        Value::Text(s) => parse_date(s, ctx.date_format()).map(Value::Date).ok_or_else(invalid),
        Value::List(items) => items
            .iter()
            .map(|v| date_value(field, v, ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        _ => Err(invalid()),
    }
}

/// Translate a clause on `origin_reference`, `origin_number` or `origin_date`.
///
/// The base query reaches invoices through invoice-line origins. Sale and
/// purchase branches are joined only when their module is installed and the
/// context's invoice type covers them (`out` for sales, `in` for purchases).
pub fn translate_reference_clause(
    clause: &Clause,
    field: DocumentField,
    ctx: &Context,
    modules: &InstalledModules,
) -> Result<SearchDomain, SearchError> {
    let value = match field {
        DocumentField::Date => date_value(field, &clause.value, ctx)?,
        DocumentField::Reference | DocumentField::Number => clause.value.clone(),
    };
    let op = clause.operator;

    let line = Table::new(schema::INVOICE_LINE, "line");
    let origin_line = Table::new(schema::INVOICE_LINE, "origin_line");
    let invoice = Table::new(schema::INVOICE, "origin_invoice");

    let mut query = Query::from(line.clone())
        .left_join(
            origin_line.clone(),
            references(line.column("origin"), OriginKind::InvoiceLine.model(), &origin_line),
        )
        .left_join(
            invoice.clone(),
            origin_line.column("invoice").equals(invoice.column("id")),
        );
    let mut families = vec![Family {
        kind: OriginKind::InvoiceLine,
        document: invoice,
    }];

    let with_sales = modules.sale && ctx.invoice_type.includes_out();
    if with_sales {
        let sale_line = Table::new(schema::SALE_LINE, "sale_line");
        let sale = Table::new(schema::SALE, "sale");
        query = query
            .left_join(
                sale_line.clone(),
                references(line.column("origin"), OriginKind::SaleLine.model(), &sale_line),
            )
            .left_join(sale.clone(), sale_line.column("sale").equals(sale.column("id")));
        families.push(Family {
            kind: OriginKind::SaleLine,
            document: sale,
        });
    }

    let with_purchases = modules.purchase && ctx.invoice_type.includes_in();
    if with_purchases {
        let purchase_line = Table::new(schema::PURCHASE_LINE, "purchase_line");
        let purchase = Table::new(schema::PURCHASE, "purchase");
        query = query
            .left_join(
                purchase_line.clone(),
                references(line.column("origin"), OriginKind::PurchaseLine.model(), &purchase_line),
            )
            .left_join(
                purchase.clone(),
                purchase_line.column("purchase").equals(purchase.column("id")),
            );
        families.push(Family {
            kind: OriginKind::PurchaseLine,
            document: purchase,
        });
    }

    let filter = Expr::any(
        families
            .iter()
            .map(|f| f.predicate(field, op, &value))
            .collect::<Result<Vec<_>, _>>()?,
    );

    tracing::debug!(
        field = field_name(field),
        operator = %op,
        sales = with_sales,
        purchases = with_purchases,
        "translated origin document search"
    );

    Ok(SearchDomain::IdIn(
        query.select(vec![line.column("id")], Some(filter)),
    ))
}

/// Interpret a shipment search value as a date, if it is one.
///
/// `%` wildcards are ignored so `"%10/19/2024%"` still counts as a date.
fn shipment_date_value(value: &Value, ctx: &Context) -> Option<Value> {
    match value {
        Value::Date(_) => Some(value.clone()),
        Value::Text(s) => NaiveDate::parse_from_str(s.replace('%', "").trim(), ctx.date_format())
            .ok()
            .map(Value::Date),
        Value::List(items) if !items.is_empty() => items
            .iter()
            .map(|v| shipment_date_value(v, ctx))
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
        _ => None,
    }
}

/// Translate a clause on `origin_shipment`.
///
/// Values that parse as a date in the locale pattern search the shipments'
/// effective dates, with pattern operators narrowed to (in)equality; any other
/// value searches shipment numbers. Each shipment family is left-joined by the
/// move's shipment reference and the per-family predicates are OR-ed.
pub fn translate_shipment_clause(
    clause: &Clause,
    ctx: &Context,
) -> Result<SearchDomain, SearchError> {
    let line = Table::new(schema::INVOICE_LINE, "line");
    let line_move = Table::new(schema::LINE_MOVE, "line_move");
    let stock_move = Table::new(schema::MOVE, "move");

    let mut query = Query::from(line.clone())
        .inner_join(
            line_move.clone(),
            line.column("id").equals(line_move.column("invoice_line")),
        )
        .inner_join(
            stock_move.clone(),
            stock_move.column("id").equals(line_move.column("stock_move")),
        );

    let shipments: Vec<Table> = ShipmentKind::ALL
        .into_iter()
        .map(|kind| Table::new(kind.table(), kind.table()))
        .collect();
    for (kind, shipment) in ShipmentKind::ALL.into_iter().zip(&shipments) {
        query = query.left_join(
            shipment.clone(),
            references(stock_move.column("shipment"), kind.model(), shipment),
        );
    }

    let (op, column, value) = match shipment_date_value(&clause.value, ctx) {
        Some(date) => (clause.operator.to_exact(), "effective_date", date),
        None => (clause.operator, "number", clause.value.clone()),
    };

    let filter = Expr::any(
        shipments
            .iter()
            .map(|s| op.apply(s.column(column), &value))
            .collect::<Result<Vec<_>, _>>()?,
    );

    tracing::debug!(operator = %op, column, "translated origin shipment search");

    Ok(SearchDomain::IdIn(
        query.select(vec![line.column("id")], Some(filter)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use origin_core::InvoiceType;

    fn aliases(domain: &SearchDomain) -> Vec<String> {
        domain
            .subquery()
            .from
            .tables()
            .map(|t| t.alias().to_string())
            .collect()
    }

    #[test]
    fn reference_search_joins_every_installed_family() {
        let clause = Clause::new("origin_reference", Operator::Equal, "ABC");
        let d = translate_reference_clause(
            &clause,
            DocumentField::Reference,
            &Context::default(),
            &InstalledModules::all(),
        )
        .unwrap();
        assert_eq!(
            aliases(&d),
            [
                "line",
                "origin_line",
                "origin_invoice",
                "sale_line",
                "sale",
                "purchase_line",
                "purchase"
            ]
        );
        let Some(Expr::Or(preds)) = &d.subquery().filter else {
            panic!("expected a disjunction");
        };
        assert_eq!(preds.len(), 6);
    }

    #[test]
    fn invoice_type_limits_branches() {
        let clause = Clause::new("origin_reference", Operator::Equal, "ABC");
        let d = translate_reference_clause(
            &clause,
            DocumentField::Reference,
            &Context::new(InvoiceType::In),
            &InstalledModules::all(),
        )
        .unwrap();
        assert!(!aliases(&d).contains(&"sale".to_string()));
        assert!(aliases(&d).contains(&"purchase".to_string()));

        let d = translate_reference_clause(
            &clause,
            DocumentField::Reference,
            &Context::new(InvoiceType::Out),
            &InstalledModules::all(),
        )
        .unwrap();
        assert!(aliases(&d).contains(&"sale".to_string()));
        assert!(!aliases(&d).contains(&"purchase".to_string()));
    }

    #[test]
    fn missing_modules_omit_their_branch() {
        let clause = Clause::new("origin_date", Operator::Equal, Value::Null);
        let d = translate_reference_clause(
            &clause,
            DocumentField::Date,
            &Context::default(),
            &InstalledModules::none(),
        )
        .unwrap();
        assert_eq!(aliases(&d), ["line", "origin_line", "origin_invoice"]);
        assert_eq!(
            d.subquery().filter,
            Some(Expr::is_null(
                Table::new(schema::INVOICE, "origin_invoice").column("invoice_date")
            ))
        );
    }

    #[test]
    fn negated_operators_require_every_column_of_a_family() {
        let clause = Clause::new("origin_reference", Operator::NotILike, "%abc%");
        let d = translate_reference_clause(
            &clause,
            DocumentField::Reference,
            &Context::new(InvoiceType::Out),
            &InstalledModules::all(),
        )
        .unwrap();
        let Some(Expr::Or(families)) = &d.subquery().filter else {
            panic!("expected a disjunction of families");
        };
        assert_eq!(families.len(), 2);
        assert!(families.iter().all(|f| matches!(f, Expr::And(cols) if cols.len() == 2)));
    }

    #[test]
    fn date_search_reads_locale_formatted_text() {
        let clause = Clause::new("origin_date", Operator::GreaterEqual, "10/19/2024");
        let ctx = Context::default().with_date_format("%m/%d/%Y");
        let d = translate_reference_clause(
            &clause,
            DocumentField::Date,
            &ctx,
            &InstalledModules::all(),
        )
        .unwrap();
        let sql = d.to_sql();
        assert!(sql.text.contains("\"sale\".\"sale_date\" >= "));
        assert!(sql.text.contains("\"purchase\".\"purchase_date\" >= "));
        assert!(sql.params.contains(&Value::Date(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap())));
    }

    #[test]
    fn date_search_rejects_non_dates() {
        let clause = Clause::new("origin_date", Operator::Equal, "soon");
        let err = translate_reference_clause(
            &clause,
            DocumentField::Date,
            &Context::default(),
            &InstalledModules::all(),
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidValue { field: "origin_date", .. }));
    }

    #[test]
    fn shipment_text_search_uses_numbers() {
        let clause = Clause::new("origin_shipment", Operator::NotEqual, "1");
        let d = translate_shipment_clause(&clause, &Context::default()).unwrap();
        let sql = d.to_sql();
        assert!(sql.text.starts_with(
            "\"id\" IN (SELECT \"line\".\"id\" FROM \"account_invoice_line\" AS \"line\" INNER JOIN"
        ));
        assert_eq!(sql.text.matches("LEFT JOIN").count(), 4);
        assert_eq!(sql.text.matches("\"number\" != ").count(), 4);
        assert!(!sql.text.contains("effective_date"));
    }

    #[test]
    fn shipment_date_search_narrows_pattern_operators() {
        let ctx = Context::default().with_date_format("%m/%d/%Y");
        let clause = Clause::new("origin_shipment", Operator::ILike, "%10/19/2024%");
        let d = translate_shipment_clause(&clause, &ctx).unwrap();
        let Some(Expr::Or(preds)) = &d.subquery().filter else {
            panic!("expected a disjunction");
        };
        assert_eq!(preds.len(), 4);
        let date = Value::Date(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap());
        for (pred, kind) in preds.iter().zip(ShipmentKind::ALL) {
            let table = Table::new(kind.table(), kind.table());
            assert_eq!(
                pred,
                &Operator::Equal.apply(table.column("effective_date"), &date).unwrap()
            );
        }

        let clause = Clause::new("origin_shipment", Operator::NotLike, "10/19/2024");
        let d = translate_shipment_clause(&clause, &ctx).unwrap();
        assert!(d.to_sql().text.contains("\"effective_date\" != "));
    }

    #[test]
    fn shipment_value_in_wrong_date_format_is_text() {
        let clause = Clause::new("origin_shipment", Operator::Equal, "2024-10-19");
        let ctx = Context::default().with_date_format("%m/%d/%Y");
        let d = translate_shipment_clause(&clause, &ctx).unwrap();
        assert!(d.to_sql().text.contains("\"number\" = "));
    }
}
