//! Stock moves and the four shipment families they can belong to.

pub mod shipment;
pub mod stock_move;

pub use shipment::{Shipment, ShipmentId, ShipmentKind, ShipmentRef};
pub use stock_move::{Move, MoveId};
