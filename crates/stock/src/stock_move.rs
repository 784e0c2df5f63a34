
use origin_core::{Entity, record_id};

use crate::shipment::ShipmentRef;

record_id!(
    /// Stock move identifier.
    pub MoveId
);

/// Stock move; `shipment` is empty until the move is planned in a shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub id: MoveId,
    pub shipment: Option<ShipmentRef>,
}

impl Move {
    pub fn new(id: MoveId) -> Self {
        Self { id, shipment: None }
    }

    pub fn in_shipment(mut self, shipment: ShipmentRef) -> Self {
        self.shipment = Some(shipment);
        self
    }
}

impl Entity for Move {
    type Id = MoveId;
    const MODEL: &'static str = "stock.move";

    fn id(&self) -> MoveId {
        self.id
    }
}
