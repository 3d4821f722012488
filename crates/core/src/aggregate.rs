//! Aggregate root trait for domain models that own a collection of entities.

use std::collections::HashSet;

use crate::entity::Entity;

/// Aggregate root marker + minimal interface.
///
/// An aggregate owns an ordered collection of member entities and is the only
/// way to reach them. Members are exposed read-only; every structural change
/// goes through the aggregate so its invariants are checked in one place.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Entity type held by the aggregate.
    type Member: Entity;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Members in insertion order.
    fn members(&self) -> &[Self::Member];

    /// First member carrying `id`, if any.
    fn member(&self, id: <Self::Member as Entity>::Id) -> Option<&Self::Member> {
        self.members().iter().find(|m| m.id() == id)
    }
}

/// Returns the first id (in iteration order) that already appeared earlier
/// in `members`.
pub fn first_duplicate_id<E: Entity>(members: &[E]) -> Option<E::Id> {
    let mut seen = HashSet::with_capacity(members.len());
    members.iter().map(E::id).find(|id| !seen.insert(*id))
}

/// True iff no two members share an id.
pub fn ids_are_unique<E: Entity>(members: &[E]) -> bool {
    first_duplicate_id(members).is_none()
}
