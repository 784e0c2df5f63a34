//! Derived origin fields registered on invoice lines.

use chrono::NaiveDate;

use origin_core::{Context, InstalledModules, Module};
use origin_query::{Clause, SearchDomain, Value};

use crate::error::SearchError;
use crate::invoice::InvoiceLine;
use crate::resolve::{DocumentField, resolve_origin, resolve_origin_shipment};
use crate::search::{translate_reference_clause, translate_shipment_clause};
use crate::store::RecordStore;

/// Computed value of a derived field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Null,
    Char(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_char(&self) -> Option<&str> {
        match self {
            FieldValue::Char(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Char)
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Date)
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Char(s) => Value::Text(s),
            FieldValue::Date(d) => Value::Date(d),
        }
    }
}

/// The derived fields this crate adds to `account.invoice.line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginField {
    Reference,
    Number,
    Date,
    /// Requires the stock module (invoice lines then have stock moves).
    Shipment,
}

impl OriginField {
    pub const ALL: [OriginField; 4] = [
        OriginField::Reference,
        OriginField::Number,
        OriginField::Date,
        OriginField::Shipment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OriginField::Reference => "origin_reference",
            OriginField::Number => "origin_number",
            OriginField::Date => "origin_date",
            OriginField::Shipment => "origin_shipment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        OriginField::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn required_module(self) -> Option<Module> {
        match self {
            OriginField::Shipment => Some(Module::Stock),
            _ => None,
        }
    }

    fn document_field(self) -> Option<DocumentField> {
        match self {
            OriginField::Reference => Some(DocumentField::Reference),
            OriginField::Number => Some(DocumentField::Number),
            OriginField::Date => Some(DocumentField::Date),
            OriginField::Shipment => None,
        }
    }
}

/// Field registration for one module set: getters and searchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginFields {
    modules: InstalledModules,
}

impl OriginFields {
    pub fn new(modules: InstalledModules) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &InstalledModules {
        &self.modules
    }

    pub fn is_registered(&self, field: OriginField) -> bool {
        field
            .required_module()
            .is_none_or(|m| self.modules.contains(m))
    }

    /// Fields present on invoice lines with these modules.
    pub fn registered(&self) -> Vec<OriginField> {
        OriginField::ALL
            .into_iter()
            .filter(|f| self.is_registered(*f))
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<OriginField, SearchError> {
        let field = OriginField::from_name(name)
            .ok_or_else(|| SearchError::UnknownField(name.to_string()))?;
        if !self.is_registered(field) {
            return Err(SearchError::UnregisteredField(field.name()));
        }
        Ok(field)
    }

    /// Compute `name` for `line`.
    pub fn get<S>(
        &self,
        store: &S,
        line: &InvoiceLine,
        name: &str,
        ctx: &Context,
    ) -> Result<FieldValue, SearchError>
    where
        S: RecordStore + ?Sized,
    {
        let field = self.lookup(name)?;
        Ok(match field.document_field() {
            Some(doc) => resolve_origin(store, line, doc),
            None => resolve_origin_shipment(store, line, ctx),
        })
    }

    /// Rewrite a clause on a derived field into an `id IN (...)` domain.
    pub fn search(&self, clause: &Clause, ctx: &Context) -> Result<SearchDomain, SearchError> {
        let field = self.lookup(&clause.field)?;
        match field.document_field() {
            Some(doc) => translate_reference_clause(clause, doc, ctx, &self.modules),
            None => translate_shipment_clause(clause, ctx),
        }
    }
}
