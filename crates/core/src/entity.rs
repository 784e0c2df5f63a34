//! Entity trait: identity + the host model name the record belongs to.

use crate::id::RecordId;
use crate::reference::Reference;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + Into<RecordId>;

    /// Host model name (e.g. `sale.line`).
    const MODEL: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Polymorphic reference pointing at this record.
    fn reference(&self) -> Reference {
        Reference::new(Self::MODEL, self.id().into())
    }
}
