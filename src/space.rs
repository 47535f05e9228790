// Space-level schema lookup and mutation (the `box` subsystem)

use crate::error::BoxResult;
use crate::host::registry;
use crate::tuple::Tuple;
use crate::types::{Index, IndexId, Space, SpaceId, TupleHandle};

/// Current database schema version.
pub fn schema_version() -> BoxResult<u64> {
    registry::current("box.schema_version")?.schema_version()
}

/// Resolve a space id by name.
pub fn space_id_by_name(name: &str) -> BoxResult<SpaceId> {
    registry::current("box.space_id_by_name")?.space_id_by_name(name)
}

/// Resolve a space by name.
pub fn space_by_name(name: &str) -> BoxResult<Space> {
    Ok(Space { id: space_id_by_name(name)? })
}

/// Resolve an index id by name within a space.
pub fn index_id_by_name(space_id: SpaceId, name: &str) -> BoxResult<IndexId> {
    registry::current("box.index_id_by_name")?.index_id_by_name(space_id, name)
}

/// Resolve an index by name, recording the caller's field-numbering base.
pub fn index_by_name(space_id: SpaceId, name: &str, index_base: u32) -> BoxResult<Index> {
    Ok(Index { id: index_id_by_name(space_id, name)?, space_id, index_base })
}

/// Insert a tuple, returning the handle of the stored tuple.
pub fn insert(space: Space, tuple: &[u8]) -> BoxResult<TupleHandle> {
    registry::current("box.insert")?.insert(space.id, tuple)
}

/// Insert a tuple, replacing any tuple with the same primary key.
pub fn replace(space: Space, tuple: &[u8]) -> BoxResult<TupleHandle> {
    registry::current("box.replace")?.replace(space.id, tuple)
}

/// Delete all tuples of a space.
pub fn truncate(space: Space) -> BoxResult<()> {
    registry::current("box.truncate")?.truncate(space.id)
}

/// Delete the tuple matching `key`, returning it if one existed.
pub fn delete(index: Index, key: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("box.delete")?.delete(index, key)
}

/// Apply raw update operations to the tuple matching `key`.
///
/// `ops` must be a MessagePack array of operation arrays.
pub fn update(index: Index, key: &[u8], ops: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("box.update")?.update(index, key, ops)
}

/// Insert `tuple`, or apply `ops` to the existing tuple with the same
/// primary key.
pub fn upsert(index: Index, tuple: &[u8], ops: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("box.upsert")?.upsert(index, tuple, ops)
}

impl Space {
    /// Find a space by name.
    pub fn find(name: &str) -> BoxResult<Space> {
        space_by_name(name)
    }

    /// Reference a space by a known id. The id is not checked here;
    /// an invalid id surfaces as a host error on first use.
    pub fn from_id(id: SpaceId) -> Space {
        Space { id }
    }

    pub fn id(&self) -> SpaceId {
        self.id
    }

    /// Find an index of this space by name, with 0-based field numbering.
    pub fn index(&self, name: &str) -> BoxResult<Index> {
        self.index_with_base(name, 0)
    }

    /// Find an index of this space by name, recording `index_base` for
    /// update operations.
    pub fn index_with_base(&self, name: &str, index_base: u32) -> BoxResult<Index> {
        index_by_name(self.id, name, index_base)
    }

    /// Insert a value, returning the stored tuple.
    pub fn insert(&self, value: &[u8]) -> BoxResult<Tuple> {
        let host = registry::current("box.insert")?;
        let handle = host.insert(self.id, value)?;
        Ok(Tuple::from_raw(host, handle))
    }

    /// Insert a value, replacing any tuple with the same primary key.
    pub fn replace(&self, value: &[u8]) -> BoxResult<Tuple> {
        let host = registry::current("box.replace")?;
        let handle = host.replace(self.id, value)?;
        Ok(Tuple::from_raw(host, handle))
    }

    /// Delete all tuples of this space.
    pub fn truncate(&self) -> BoxResult<()> {
        truncate(*self)
    }
}

impl Index {
    pub fn id(&self) -> IndexId {
        self.id
    }

    pub fn space_id(&self) -> SpaceId {
        self.space_id
    }

    /// Reference an index by known ids with 0-based field numbering. The
    /// ids are not checked here.
    pub fn from_ids(space_id: SpaceId, id: IndexId) -> Index {
        Index { id, space_id, index_base: 0 }
    }

    /// Delete the tuple matching `key`, returning it if one existed.
    pub fn delete(&self, key: &[u8]) -> BoxResult<Option<Tuple>> {
        let host = registry::current("box.delete")?;
        let handle = host.delete(*self, key)?;
        Ok(handle.map(|handle| Tuple::from_raw(host, handle)))
    }

    /// Apply raw update operations to the tuple matching `key`, returning
    /// the updated tuple. `ops` must be a MessagePack array of operation
    /// arrays.
    pub fn update(&self, key: &[u8], ops: &[u8]) -> BoxResult<Option<Tuple>> {
        let host = registry::current("box.update")?;
        let handle = host.update(*self, key, ops)?;
        Ok(handle.map(|handle| Tuple::from_raw(host, handle)))
    }

    /// Insert `value`, or apply `ops` to the existing tuple with the same
    /// primary key.
    pub fn upsert(&self, value: &[u8], ops: &[u8]) -> BoxResult<Option<Tuple>> {
        let host = registry::current("box.upsert")?;
        let handle = host.upsert(*self, value, ops)?;
        Ok(handle.map(|handle| Tuple::from_raw(host, handle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_from_id() {
        let space = Space::from_id(512);
        assert_eq!(space.id(), 512);
    }

    #[test]
    fn test_index_from_ids_defaults_to_base_zero() {
        let index = Index::from_ids(512, 0);
        assert_eq!(index.space_id(), 512);
        assert_eq!(index.id(), 0);
        assert_eq!(index.index_base, 0);
    }
}
