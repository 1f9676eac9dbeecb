//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products and attribute metadata are entities: two snapshots with the same id
/// describe the same catalog record even when their data differs. In-memory
/// stores key records by this id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
