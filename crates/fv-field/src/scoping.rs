use fv_core::EntityId;

/// Ordered entity ids a field's values correspond to.
///
/// Not necessarily dense, not necessarily covering the whole mesh, and may
/// name ids that the loaded mesh doesn't contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoping {
    ids: Vec<EntityId>,
}

impl Scoping {
    pub fn new(ids: Vec<EntityId>) -> Self {
        Self { ids }
    }

    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self {
            ids: fv_core::ids(raw),
        }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityId> {
        self.ids.iter()
    }
}

impl From<Vec<EntityId>> for Scoping {
    fn from(ids: Vec<EntityId>) -> Self {
        Self { ids }
    }
}

impl FromIterator<EntityId> for Scoping {
    fn from_iter<T: IntoIterator<Item = EntityId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
