use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use origin_core::{Entity, record_id};
use origin_stock::MoveId;

use crate::origin::Origin;

record_id!(
    /// Invoice identifier.
    pub InvoiceId
);
record_id!(
    /// Invoice line identifier.
    pub InvoiceLineId
);

/// Invoice header (only the fields origins expose).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Assigned when the invoice is posted.
    pub number: Option<String>,
    pub reference: Option<String>,
    pub invoice_date: Option<NaiveDate>,
}

impl Invoice {
    pub fn new(id: InvoiceId) -> Self {
        Self {
            id,
            number: None,
            reference: None,
            invoice_date: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = Some(date);
        self
    }

    pub fn rec_name(&self) -> String {
        match &self.number {
            Some(n) if !n.is_empty() => n.clone(),
            _ => format!("({})", self.id),
        }
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;
    const MODEL: &'static str = "account.invoice";

    fn id(&self) -> InvoiceId {
        self.id
    }
}

/// Invoice line.
///
/// Standalone lines (not yet grouped into an invoice) have no `invoice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub id: InvoiceLineId,
    pub invoice: Option<InvoiceId>,
    pub origin: Option<Origin>,
}

impl InvoiceLine {
    pub fn new(id: InvoiceLineId) -> Self {
        Self {
            id,
            invoice: None,
            origin: None,
        }
    }

    pub fn in_invoice(mut self, invoice: InvoiceId) -> Self {
        self.invoice = Some(invoice);
        self
    }

    pub fn with_origin(mut self, origin: impl Into<Origin>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

impl Entity for InvoiceLine {
    type Id = InvoiceLineId;
    const MODEL: &'static str = "account.invoice.line";

    fn id(&self) -> InvoiceLineId {
        self.id
    }
}

/// Row of the `account.invoice.line-stock.move` association.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineMove {
    pub invoice_line: InvoiceLineId,
    pub stock_move: MoveId,
}
