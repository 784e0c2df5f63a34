//! Forward computation of origin fields.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use chrono::NaiveDate;

use origin_core::{Context, DEFAULT_DATE_FORMAT};

use crate::field::FieldValue;
use crate::invoice::InvoiceLine;
use crate::origin::ParentDocument;
use crate::store::RecordStore;

/// Parent-document field an origin resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentField {
    /// `"number / reference"`, falling back to the document's display name.
    Reference,
    Number,
    Date,
}

/// Compute a document-derived field of `line`.
///
/// Empty, unsupported or dangling origins resolve to [`FieldValue::Null`].
pub fn resolve_origin<S>(store: &S, line: &InvoiceLine, field: DocumentField) -> FieldValue
where
    S: RecordStore + ?Sized,
{
    let Some(origin) = &line.origin else {
        return FieldValue::Null;
    };
    let Some(document) = store.parent_document(origin) else {
        return FieldValue::Null;
    };
    match field {
        DocumentField::Reference => FieldValue::Char(reference_label(&document)),
        DocumentField::Number => document.number().map(str::to_string).into(),
        DocumentField::Date => document.date().into(),
    }
}

fn reference_label(document: &ParentDocument) -> String {
    let parts: Vec<&str> = [document.number(), document.reference()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        document.rec_name()
    } else {
        parts.join(" / ")
    }
}

/// Format `date` with a strftime pattern, ISO when the pattern is invalid.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        out.clear();
        out.push_str(&date.format(DEFAULT_DATE_FORMAT).to_string());
    }
    out
}

/// Distinct `"<shipment> - <effective date>"` labels of the shipments behind
/// `line`'s stock moves, joined with `", "` in sorted order. A line without
/// shipments gets an empty string.
pub fn resolve_origin_shipment<S>(store: &S, line: &InvoiceLine, ctx: &Context) -> FieldValue
where
    S: RecordStore + ?Sized,
{
    let format = ctx.date_format();
    let labels: BTreeSet<String> = store
        .line_moves(line.id)
        .iter()
        .filter_map(|m| m.shipment.as_ref()?.target())
        .filter_map(|(kind, id)| store.shipment(kind, id))
        .map(|shipment| match shipment.effective_date {
            Some(date) => format!("{} - {}", shipment.rec_name(), format_date(date, format)),
            None => shipment.rec_name(),
        })
        .collect();

    FieldValue::Char(labels.into_iter().collect::<Vec<_>>().join(", "))
}
