//! Entity collections and scoping maps.
//!
//! A collection owns one kind of mesh entity in its implicit zero-based
//! order and answers id -> position queries. `map_scoping` turns an
//! arbitrary list of ids into the paired (indices, mask) vectors used to
//! scatter sparse field data into dense arrays.

use std::collections::HashMap;

use fv_core::EntityId;

use crate::error::{MeshError, MeshResult};

/// Anything stored in an [`EntityCollection`].
pub trait Entity {
    fn id(&self) -> EntityId;
}

/// Ordered entities with O(1) id -> position lookup.
#[derive(Debug, Clone)]
pub struct EntityCollection<T> {
    items: Vec<T>,
    id_to_idx: HashMap<EntityId, usize>,
}

/// Result of mapping a scoping onto a collection.
///
/// `indices[k]` is the position in the collection of the entity named by
/// `scoping[mask[k]]`. Both vectors have equal length and ascending `mask`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopingMap {
    pub indices: Vec<usize>,
    pub mask: Vec<usize>,
    /// Length of the scoping that was mapped.
    pub scoped: usize,
}

impl ScopingMap {
    /// Number of scoped ids with no entity in the collection.
    pub fn dropped(&self) -> usize {
        self.scoped - self.indices.len()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<T: Entity> EntityCollection<T> {
    /// Build a collection, rejecting duplicate ids.
    pub(crate) fn new(items: Vec<T>, what: &'static str) -> MeshResult<Self> {
        let mut id_to_idx = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if id_to_idx.insert(item.id(), i).is_some() {
                return Err(MeshError::DuplicateId {
                    what,
                    id: item.id(),
                });
            }
        }
        Ok(Self { items, id_to_idx })
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entity at a zero-based position (None if out of bounds).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Entity with the given id.
    pub fn by_id(&self, id: EntityId) -> Option<&T> {
        self.index_of(id).map(|i| &self.items[i])
    }

    /// Position of the entity with the given id.
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.id_to_idx.get(&id).copied()
    }

    /// Entities in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// All ids in index order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(|e| e.id()).collect()
    }

    /// Map a scoping (list of ids) onto this collection.
    ///
    /// Ids absent from the collection are dropped silently: a scoping may
    /// reference entities outside the loaded mesh.
    pub fn map_scoping(&self, scoping: &[EntityId]) -> ScopingMap {
        let mut indices = Vec::with_capacity(scoping.len());
        let mut mask = Vec::with_capacity(scoping.len());
        for (position, id) in scoping.iter().enumerate() {
            if let Some(index) = self.index_of(*id) {
                indices.push(index);
                mask.push(position);
            }
        }
        ScopingMap {
            indices,
            mask,
            scoped: scoping.len(),
        }
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
