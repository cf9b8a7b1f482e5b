//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances with the same attribute
/// values are interchangeable (`Money::from_cents(100)` equals any other
/// `Money::from_cents(100)`). They are immutable; "changing" one means
/// constructing a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
