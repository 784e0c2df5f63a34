//! Sales records reachable from invoice line origins.
//!
//! Only the fields the origin resolver reads are modelled: a sale's number,
//! customer reference and sale date, and the sale a line belongs to.

pub mod sale;

pub use sale::{Sale, SaleId, SaleLine, SaleLineId};
