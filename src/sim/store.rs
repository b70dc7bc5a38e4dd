//! Entity storage with stable ids
//!
//! Removal is two-phase: systems mark entities while scanning, then a single
//! `compact` pass drops them. Nothing is removed mid-iteration.

use serde::{Deserialize, Serialize};

/// Stable entity identifier (allocated in increasing order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Anything stored in an [`EntityStore`]
pub trait Entity {
    fn id(&self) -> EntityId;
}

/// Entities kept sorted by id, with pending removals
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    items: Vec<T>,
    marked: Vec<EntityId>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            marked: Vec::new(),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entities, including ones marked but not yet compacted
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Add an entity; its id must be greater than every id already stored
    pub fn insert(&mut self, item: T) {
        debug_assert!(
            self.items.last().is_none_or(|last| last.id() < item.id()),
            "entity ids must be inserted in increasing order"
        );
        self.items.push(item);
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items
            .binary_search_by_key(&id, |e| e.id())
            .ok()
            .map(|i| &self.items[i])
    }

    /// Schedule an entity for removal
    ///
    /// Returns false if the entity is unknown or already marked.
    pub fn mark(&mut self, id: EntityId) -> bool {
        if self.get(id).is_none() || self.is_marked(id) {
            return false;
        }
        self.marked.push(id);
        true
    }

    pub fn is_marked(&self, id: EntityId) -> bool {
        self.marked.contains(&id)
    }

    /// Drop every marked entity, returning how many were removed
    pub fn compact(&mut self) -> usize {
        if self.marked.is_empty() {
            return 0;
        }
        let before = self.items.len();
        let marked = std::mem::take(&mut self.marked);
        self.items.retain(|e| !marked.contains(&e.id()));
        before - self.items.len()
    }

    /// Remove everything (and forget pending marks)
    pub fn clear(&mut self) {
        self.items.clear();
        self.marked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Dummy(u32);

    impl Entity for Dummy {
        fn id(&self) -> EntityId {
            EntityId(self.0)
        }
    }

    fn store_with(ids: &[u32]) -> EntityStore<Dummy> {
        let mut store = EntityStore::new();
        for &id in ids {
            store.insert(Dummy(id));
        }
        store
    }

    #[test]
    fn test_mark_then_compact() {
        let mut store = store_with(&[1, 2, 3, 4]);
        assert!(store.mark(EntityId(2)));
        assert!(store.mark(EntityId(4)));

        // Still present until compacted
        assert_eq!(store.len(), 4);
        assert!(store.is_marked(EntityId(2)));

        assert_eq!(store.compact(), 2);
        let ids: Vec<u32> = store.iter().map(|d| d.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(!store.is_marked(EntityId(2)));
    }

    #[test]
    fn test_mark_twice_is_rejected() {
        let mut store = store_with(&[1, 2]);
        assert!(store.mark(EntityId(1)));
        assert!(!store.mark(EntityId(1)));
        assert_eq!(store.compact(), 1);
    }

    #[test]
    fn test_mark_unknown_is_rejected() {
        let mut store = store_with(&[1, 2]);
        assert!(!store.mark(EntityId(9)));
        assert_eq!(store.compact(), 0);
    }

    #[test]
    fn test_get_by_id() {
        let store = store_with(&[3, 7, 11]);
        assert_eq!(store.get(EntityId(7)).map(|d| d.0), Some(7));
        assert!(store.get(EntityId(8)).is_none());
    }

    #[test]
    fn test_clear_forgets_marks() {
        let mut store = store_with(&[1, 2]);
        store.mark(EntityId(1));
        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_marked(EntityId(1)));
    }
}
