use core::fmt;

/// External identifier of a mesh entity (node or element).
///
/// Ids come from the result source: they are neither dense nor
/// guaranteed to start at zero. Positions inside a collection are
/// plain `usize` indices and never mix with ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(u32);

impl EntityId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Domain-specific aliases for clarity (no runtime cost).
pub type NodeId = EntityId;
pub type ElementId = EntityId;

/// Build a list of ids from raw values.
pub fn ids<I>(raw: I) -> Vec<EntityId>
where
    I: IntoIterator<Item = u32>,
{
    raw.into_iter().map(EntityId::new).collect()
}
