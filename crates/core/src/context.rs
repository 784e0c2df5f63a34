//! Request-scoped context read by resolvers and search translators.
//!
//! The host keeps a per-transaction context map. Only two keys matter here:
//! `invoice_type` (which side of the ledger the user is browsing) and
//! `locale.date` (the strftime pattern dates are displayed and typed in).
//! The context is passed explicitly and never mutated.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Date pattern used when no locale is active.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Invoice side filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    /// Supplier side.
    In,
    /// Customer side.
    Out,
    #[default]
    Both,
}

impl InvoiceType {
    /// Customer documents (sales) are visible.
    pub fn includes_out(self) -> bool {
        matches!(self, InvoiceType::Out | InvoiceType::Both)
    }

    /// Supplier documents (purchases) are visible.
    pub fn includes_in(self) -> bool {
        matches!(self, InvoiceType::In | InvoiceType::Both)
    }
}

impl core::str::FromStr for InvoiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim() {
            "in" => Ok(InvoiceType::In),
            "out" => Ok(InvoiceType::Out),
            "both" => Ok(InvoiceType::Both),
            other => Err(DomainError::validation(format!("unknown invoice type {other:?}"))),
        }
    }
}

/// Locale settings relevant to date handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    #[serde(default)]
    pub date: Option<String>,
}

/// Transaction-scoped context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub invoice_type: InvoiceType,
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl Context {
    pub fn new(invoice_type: InvoiceType) -> Self {
        Self {
            invoice_type,
            locale: None,
        }
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.locale = Some(Locale {
            date: Some(format.into()),
        });
        self
    }

    /// Build from the host's JSON context map; unknown keys are ignored.
    pub fn from_json(value: &serde_json::Value) -> DomainResult<Self> {
        Context::deserialize(value).map_err(|e| DomainError::validation(format!("context: {e}")))
    }

    /// Active strftime date pattern, [`DEFAULT_DATE_FORMAT`] without a locale.
    pub fn date_format(&self) -> &str {
        self.locale
            .as_ref()
            .and_then(|l| l.date.as_deref())
            .unwrap_or(DEFAULT_DATE_FORMAT)
    }
}

impl ValueObject for Context {}
