//! Entity trait: identity that survives edits to the rest of the record.

/// Something addressed by a stable identifier (an expense by its id, ...).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Index of the first entity in `items` whose id equals `id`.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
