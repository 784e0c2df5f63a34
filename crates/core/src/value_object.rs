//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two references
/// naming the same model and id are the same reference, whatever record they
/// were read from.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
