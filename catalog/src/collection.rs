//! Generic entity collection for catalog storage
//!
//! `Collection<E>` keeps entities in insertion order and indexes them by
//! their name folded under the catalog's [`IdentifierCase`].

use std::collections::HashMap;

use crate::traits::{Entity, EntityKind, IdentifierCase};

// =============================================================================
// Generic Entity Collection
// =============================================================================

/// Named entities with O(1) lookup.
#[derive(Debug, Clone)]
pub struct Collection<E: Entity> {
    entities: Vec<E>,
    /// Index from folded name to position in `entities`
    index: HashMap<String, usize>,
    case: IdentifierCase,
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self::new(IdentifierCase::default())
    }
}

impl<E: Entity> Collection<E> {
    /// Create an empty collection
    pub fn new(case: IdentifierCase) -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
            case,
        }
    }

    /// The entity kind stored here
    pub const fn kind(&self) -> EntityKind {
        E::KIND
    }

    pub const fn case(&self) -> IdentifierCase {
        self.case
    }

    /// Push an entity, returns true if inserted, false if the name is taken
    pub fn push(&mut self, entity: E) -> bool {
        let key = self.case.fold(entity.name()).into_owned();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entities.len());
        self.entities.push(entity);
        true
    }

    /// Get an entity by name
    pub fn get(&self, name: &str) -> Option<&E> {
        self.index
            .get(self.case.fold(name).as_ref())
            .map(|&idx| &self.entities[idx])
    }

    /// Get mutable access to an entity by name. The name must not be changed
    /// through this reference; use [`Collection::rename`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut E> {
        let idx = *self.index.get(self.case.fold(name).as_ref())?;
        self.entities.get_mut(idx)
    }

    /// Check if an entity with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(self.case.fold(name).as_ref())
    }

    /// Delete an entity by name, keeping the order of the rest
    pub fn delete(&mut self, name: &str) -> Option<E> {
        let idx = self.index.remove(self.case.fold(name).as_ref())?;
        let removed = self.entities.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Rename an entity in place. Returns false if `old` is missing or `new`
    /// is taken by another entity.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let old_key = self.case.fold(old).into_owned();
        let new_key = self.case.fold(new).into_owned();
        let Some(&idx) = self.index.get(&old_key) else {
            return false;
        };
        if old_key != new_key && self.index.contains_key(&new_key) {
            return false;
        }
        self.index.remove(&old_key);
        self.index.insert(new_key, idx);
        self.entities[idx].set_name(new.to_string());
        true
    }

    /// List all entities in insertion order
    pub fn list(&self) -> &[E] {
        &self.entities
    }

    /// Check if collection is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Get the count of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over entities
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entities.iter()
    }

    /// Update entities matching a predicate. Names must not change.
    pub fn update_where<P, F>(&mut self, predicate: P, mut transform: F)
    where
        P: Fn(&E) -> bool,
        F: FnMut(&mut E),
    {
        for entity in self.entities.iter_mut() {
            if predicate(entity) {
                transform(entity);
            }
        }
    }

    /// Remove every entity matching a predicate, returning them
    pub fn delete_where<P>(&mut self, predicate: P) -> Vec<E>
    where
        P: Fn(&E) -> bool,
    {
        let (removed, kept): (Vec<E>, Vec<E>) =
            std::mem::take(&mut self.entities).into_iter().partition(|e| predicate(e));
        self.entities = kept;
        self.rebuild_index();
        removed
    }

    /// Filter entities matching a predicate
    pub fn filter<P>(&self, predicate: P) -> Vec<&E>
    where
        P: Fn(&E) -> bool,
    {
        self.entities.iter().filter(|e| predicate(e)).collect()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, entity) in self.entities.iter().enumerate() {
            self.index
                .insert(self.case.fold(entity.name()).into_owned(), idx);
        }
    }
}
