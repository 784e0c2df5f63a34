use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use origin_core::{Entity, record_id};

record_id!(
    /// Sale identifier.
    pub SaleId
);
record_id!(
    /// Sale line identifier.
    pub SaleLineId
);

/// Sale header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    /// Assigned on confirmation.
    pub number: Option<String>,
    /// Customer's own reference.
    pub reference: Option<String>,
    pub sale_date: Option<NaiveDate>,
}

impl Sale {
    pub fn new(id: SaleId) -> Self {
        Self {
            id,
            number: None,
            reference: None,
            sale_date: None,
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

    pub fn with_sale_date(mut self, date: NaiveDate) -> Self {
        self.sale_date = Some(date);
        self
    }

    /// Display name: the number, or the id in parentheses before confirmation.
    pub fn rec_name(&self) -> String {
        match &self.number {
            Some(n) if !n.is_empty() => n.clone(),
            _ => format!("({})", self.id),
        }
    }
}

impl Entity for Sale {
    type Id = SaleId;
    const MODEL: &'static str = "sale.sale";

    fn id(&self) -> SaleId {
        self.id
    }
}

/// Sale line; `sale` is empty while the line is detached from a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: SaleLineId,
    pub sale: Option<SaleId>,
}

impl SaleLine {
    pub fn new(id: SaleLineId, sale: SaleId) -> Self {
        Self { id, sale: Some(sale) }
    }
}

impl Entity for SaleLine {
    type Id = SaleLineId;
    const MODEL: &'static str = "sale.line";

    fn id(&self) -> SaleLineId {
        self.id
    }
}
