//! Invoice line origin tracing.
//!
//! Invoice lines carry a polymorphic `origin` pointing at the sale line,
//! purchase line or invoice line that produced them. This crate derives
//! read-only fields from that origin (`origin_reference`, `origin_number`,
//! `origin_date`, and `origin_shipment` when stock is installed) and rewrites
//! searches on those fields into queries over the stored tables.
//!
//! Everything here is deterministic: records come in through [`RecordStore`],
//! context and installed modules are explicit arguments, and searches come out
//! as [`origin_query::SearchDomain`] values for the host to execute.

pub mod error;
pub mod field;
pub mod invoice;
pub mod origin;
pub mod resolve;
pub mod schema;
pub mod search;
pub mod store;

pub use error::SearchError;
pub use field::{FieldValue, OriginField, OriginFields};
pub use invoice::{Invoice, InvoiceId, InvoiceLine, InvoiceLineId, LineMove};
pub use origin::{Origin, OriginKind, ParentDocument};
pub use resolve::{DocumentField, resolve_origin, resolve_origin_shipment};
pub use search::{translate_reference_clause, translate_shipment_clause};
pub use store::RecordStore;
