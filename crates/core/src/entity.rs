//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    ///
    /// `None` until the entity has been persisted and the store assigned one.
    fn id(&self) -> Option<&Self::Id>;

    /// Whether the store has assigned an identity yet.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
