//! Shared building blocks for invoice line origin tracing.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! record identifiers, polymorphic references, the request context and the
//! set of installed companion modules.

pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub mod modules;
pub mod reference;
pub mod value_object;

pub use context::{Context, InvoiceType, Locale, DEFAULT_DATE_FORMAT};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use modules::{InstalledModules, Module};
pub use reference::Reference;
pub use value_object::ValueObject;
