use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use origin_core::{Entity, record_id};

record_id!(
    /// Purchase identifier.
    pub PurchaseId
);
record_id!(
    /// Purchase line identifier.
    pub PurchaseLineId
);

/// Purchase header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub number: Option<String>,
    /// Supplier's reference for the order.
    pub reference: Option<String>,
    pub purchase_date: Option<NaiveDate>,
}

impl Purchase {
    pub fn new(id: PurchaseId) -> Self {
        Self {
            id,
            number: None,
            reference: None,
            purchase_date: None,
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

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    pub fn rec_name(&self) -> String {
        match &self.number {
            Some(n) if !n.is_empty() => n.clone(),
            _ => format!("({})", self.id),
        }
    }
}

impl Entity for Purchase {
    type Id = PurchaseId;
    const MODEL: &'static str = "purchase.purchase";

    fn id(&self) -> PurchaseId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub id: PurchaseLineId,
    pub purchase: Option<PurchaseId>,
}

impl PurchaseLine {
    pub fn new(id: PurchaseLineId, purchase: PurchaseId) -> Self {
        Self {
            id,
            purchase: Some(purchase),
        }
    }
}

impl Entity for PurchaseLine {
    type Id = PurchaseLineId;
    const MODEL: &'static str = "purchase.line";

    fn id(&self) -> PurchaseLineId {
        self.id
    }
}
