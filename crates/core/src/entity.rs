//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An invoice record stays the same entity while its milestone dates are
/// filled in; equality of entities is a question of `id()`, not of fields.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` denotes the same entity.
    fn same_entity(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.id() == other.id()
    }
}
