//! Purchase records reachable from invoice line origins.

pub mod purchase;

pub use purchase::{Purchase, PurchaseId, PurchaseLine, PurchaseLineId};
