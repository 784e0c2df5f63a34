use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use origin_core::{RecordId, Reference, record_id};

record_id!(
    /// Shipment identifier, unique within one [`ShipmentKind`].
    pub ShipmentId
);

/// Concrete shipment family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipmentKind {
    /// Customer shipment.
    Out,
    /// Goods returned by a customer.
    OutReturn,
    /// Supplier shipment.
    In,
    /// Goods sent back to a supplier.
    InReturn,
}

impl ShipmentKind {
    pub const ALL: [ShipmentKind; 4] = [
        ShipmentKind::Out,
        ShipmentKind::OutReturn,
        ShipmentKind::In,
        ShipmentKind::InReturn,
    ];

    pub fn model(self) -> &'static str {
        match self {
            ShipmentKind::Out => "stock.shipment.out",
            ShipmentKind::OutReturn => "stock.shipment.out.return",
            ShipmentKind::In => "stock.shipment.in",
            ShipmentKind::InReturn => "stock.shipment.in.return",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            ShipmentKind::Out => "stock_shipment_out",
            ShipmentKind::OutReturn => "stock_shipment_out_return",
            ShipmentKind::In => "stock_shipment_in",
            ShipmentKind::InReturn => "stock_shipment_in_return",
        }
    }

    pub fn from_model(model: &str) -> Option<Self> {
        ShipmentKind::ALL.into_iter().find(|k| k.model() == model)
    }
}

/// A move's polymorphic `shipment` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShipmentRef {
    Out(ShipmentId),
    OutReturn(ShipmentId),
    In(ShipmentId),
    InReturn(ShipmentId),
    /// Names a model outside the shipment families.
    Unsupported(Reference),
}

impl ShipmentRef {
    pub fn new(kind: ShipmentKind, id: ShipmentId) -> Self {
        match kind {
            ShipmentKind::Out => ShipmentRef::Out(id),
            ShipmentKind::OutReturn => ShipmentRef::OutReturn(id),
            ShipmentKind::In => ShipmentRef::In(id),
            ShipmentKind::InReturn => ShipmentRef::InReturn(id),
        }
    }

    /// Family and id, `None` for unsupported models.
    pub fn target(&self) -> Option<(ShipmentKind, ShipmentId)> {
        match self {
            ShipmentRef::Out(id) => Some((ShipmentKind::Out, *id)),
            ShipmentRef::OutReturn(id) => Some((ShipmentKind::OutReturn, *id)),
            ShipmentRef::In(id) => Some((ShipmentKind::In, *id)),
            ShipmentRef::InReturn(id) => Some((ShipmentKind::InReturn, *id)),
            ShipmentRef::Unsupported(_) => None,
        }
    }

    pub fn to_reference(&self) -> Reference {
        let (kind, id) = match self {
            ShipmentRef::Out(id) => (ShipmentKind::Out, id),
            ShipmentRef::OutReturn(id) => (ShipmentKind::OutReturn, id),
            ShipmentRef::In(id) => (ShipmentKind::In, id),
            ShipmentRef::InReturn(id) => (ShipmentKind::InReturn, id),
            ShipmentRef::Unsupported(r) => return r.clone(),
        };
        Reference::new(kind.model(), id.record_id())
    }
}

impl From<Reference> for ShipmentRef {
    fn from(reference: Reference) -> Self {
        match ShipmentKind::from_model(reference.model()) {
            Some(kind) => ShipmentRef::new(kind, ShipmentId(reference.id())),
            None => {
                tracing::warn!(
                    model = reference.model(),
                    "shipment reference to unsupported model"
                );
                ShipmentRef::Unsupported(reference)
            }
        }
    }
}

/// Shipment header of any family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub kind: ShipmentKind,
    pub id: ShipmentId,
    pub number: Option<String>,
    /// Set once the shipment is done.
    pub effective_date: Option<NaiveDate>,
}

impl Shipment {
    pub fn new(kind: ShipmentKind, id: ShipmentId) -> Self {
        Self {
            kind,
            id,
            number: None,
            effective_date: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }

    pub fn shipment_ref(&self) -> ShipmentRef {
        ShipmentRef::new(self.kind, self.id)
    }

    /// Display name: the number, or the raw id when unnumbered.
    pub fn rec_name(&self) -> String {
        match &self.number {
            Some(n) if !n.is_empty() => n.clone(),
            _ => RecordId::from(self.id).to_string(),
        }
    }
}
