// Index queries, iteration and maintenance

use std::fmt;
use std::sync::Arc;

use crate::error::BoxResult;
use crate::host::{IndexOps, registry};
use crate::types::{
    Index, IndexStat, IndexType, IteratorHandle, IteratorType, KeyPartDef, PairsOpts, SelectOpts,
    TupleHandle, UpdateOp,
};

/// Number of tuples in the index.
pub fn len(index: Index) -> BoxResult<u64> {
    registry::current("index.len")?.index_len(index)
}

/// Memory consumed by the index, in bytes.
pub fn bsize(index: Index) -> BoxResult<u64> {
    registry::current("index.bsize")?.index_bsize(index)
}

/// A pseudo-random tuple of the index, picked from `seed`.
pub fn random(index: Index, seed: u32) -> BoxResult<Option<TupleHandle>> {
    registry::current("index.random")?.index_random(index, seed)
}

/// The tuple matching `key` exactly, if any.
pub fn get(index: Index, key: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("index.get")?.index_get(index, key)
}

/// The first tuple of the `key` range in index order.
pub fn min(index: Index, key: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("index.min")?.index_min(index, key)
}

/// The last tuple of the `key` range in index order.
pub fn max(index: Index, key: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("index.max")?.index_max(index, key)
}

/// Number of tuples matched by `key` under the given scan mode.
pub fn count(index: Index, iterator: IteratorType, key: &[u8]) -> BoxResult<u64> {
    registry::current("index.count")?.index_count(index, iterator, key)
}

/// Whether the index enforces uniqueness.
pub fn unique(index: Index) -> BoxResult<bool> {
    registry::current("index.unique")?.index_unique(index)
}

/// The index organization.
pub fn type_of(index: Index) -> BoxResult<IndexType> {
    registry::current("index.type")?.index_type(index)
}

/// The key parts of the index.
pub fn parts(index: Index) -> BoxResult<Vec<KeyPartDef>> {
    registry::current("index.parts")?.index_parts(index)
}

/// Open a cursor over the index.
pub fn pairs(index: Index, opts: &PairsOpts) -> BoxResult<Iterator> {
    let host = registry::current("index.pairs")?;
    let handle = host.index_pairs(index, opts)?;
    Ok(Iterator::from_raw(host, handle))
}

/// Tuples matching `key`, materialized in one call.
pub fn select(index: Index, key: &[u8], opts: SelectOpts) -> BoxResult<Vec<TupleHandle>> {
    registry::current("index.select")?.index_select(index, key, opts)
}

/// Apply typed update operations to the tuple matching `key`.
pub fn update(index: Index, key: &[u8], ops: &[UpdateOp]) -> BoxResult<Option<TupleHandle>> {
    registry::current("index.update")?.index_update(index, key, ops)
}

/// Delete the tuple matching `key`, returning it if one existed.
pub fn delete(index: Index, key: &[u8]) -> BoxResult<Option<TupleHandle>> {
    registry::current("index.delete")?.index_delete(index, key)
}

/// Change uniqueness and key parts of the index.
pub fn alter(index: Index, unique: bool, parts: &[KeyPartDef]) -> BoxResult<()> {
    registry::current("index.alter")?.index_alter(index, unique, parts)
}

/// Drop the index.
pub fn drop(index: Index) -> BoxResult<()> {
    registry::current("index.drop")?.index_drop(index)
}

/// Rename the index.
pub fn rename(index: Index, new_name: &str) -> BoxResult<()> {
    registry::current("index.rename")?.index_rename(index, new_name)
}

/// Size statistics of the index.
pub fn stat(index: Index) -> BoxResult<IndexStat> {
    registry::current("index.stat")?.index_stat(index)
}

/// Trigger compaction of the index.
pub fn compact(index: Index) -> BoxResult<()> {
    registry::current("index.compact")?.index_compact(index)
}

/// Position of the tuple matching `key` within the index order.
pub fn tuple_pos(index: Index, key: &[u8]) -> BoxResult<u64> {
    registry::current("index.tuple_pos")?.index_tuple_pos(index, key)
}

/// A host-side index cursor.
///
/// Unlike spaces and indexes, a cursor is owned by the application: it
/// holds host-side state and is released exactly once, either through
/// [`Iterator::close`] or when the value is dropped.
pub struct Iterator {
    ops: Arc<dyn IndexOps>,
    handle: IteratorHandle,
    released: bool,
}

impl Iterator {
    /// Wrap a cursor handle against the host that created it.
    pub fn from_raw(ops: Arc<dyn IndexOps>, handle: IteratorHandle) -> Self {
        Self { ops, handle, released: false }
    }

    pub fn handle(&self) -> IteratorHandle {
        self.handle
    }

    /// Advance the cursor. `Ok(None)` marks the end of the scan.
    pub fn next(&mut self) -> BoxResult<Option<TupleHandle>> {
        self.ops.iterator_next(self.handle)
    }

    /// Release the cursor, surfacing any host error. Dropping the value
    /// releases it as well, discarding the error.
    pub fn close(mut self) -> BoxResult<()> {
        self.released = true;
        self.ops.iterator_release(self.handle)
    }
}

impl Drop for Iterator {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.ops.iterator_release(self.handle) {
            tracing::warn!(handle = self.handle, %err, "iterator release failed");
        }
    }
}

impl fmt::Debug for Iterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iterator")
            .field("handle", &self.handle)
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use crate::host::MockIndexOps;

    use super::*;

    #[test]
    fn test_iterator_releases_once_on_drop() {
        let mut ops = MockIndexOps::new();
        ops.expect_iterator_release().with(eq(9)).times(1).returning(|_| Ok(()));
        let iterator = Iterator::from_raw(Arc::new(ops), 9);
        std::mem::drop(iterator);
    }

    #[test]
    fn test_iterator_close_is_the_only_release() {
        let mut ops = MockIndexOps::new();
        ops.expect_iterator_release().with(eq(3)).times(1).returning(|_| Ok(()));
        let iterator = Iterator::from_raw(Arc::new(ops), 3);
        iterator.close().unwrap();
        // Drop runs here; the mock verifies no second release.
    }

    #[test]
    fn test_iterator_next_forwards_until_exhausted() {
        let mut ops = MockIndexOps::new();
        let mut handles = vec![Ok(Some(11)), Ok(Some(12)), Ok(None)].into_iter();
        ops.expect_iterator_next().times(3).returning(move |_| handles.next().unwrap());
        ops.expect_iterator_release().times(1).returning(|_| Ok(()));

        let mut iterator = Iterator::from_raw(Arc::new(ops), 1);
        assert_eq!(iterator.next().unwrap(), Some(11));
        assert_eq!(iterator.next().unwrap(), Some(12));
        assert_eq!(iterator.next().unwrap(), None);
    }

    #[test]
    fn test_iterator_drop_survives_release_failure() {
        let mut ops = MockIndexOps::new();
        ops.expect_iterator_release()
            .times(1)
            .returning(|_| Err(crate::error::BoxError::new("gone", "ClientError", 0)));
        let iterator = Iterator::from_raw(Arc::new(ops), 5);
        std::mem::drop(iterator);
    }

    #[test]
    fn test_iterator_close_surfaces_release_failure_once() {
        let mut ops = MockIndexOps::new();
        ops.expect_iterator_release()
            .times(1)
            .returning(|_| Err(crate::error::BoxError::new("gone", "ClientError", 0)));
        let iterator = Iterator::from_raw(Arc::new(ops), 5);
        assert!(iterator.close().is_err());
        // Even a failed close counts as the one release attempt.
    }

    #[test]
    fn test_iterator_debug_does_not_require_host_debug() {
        let mut ops = MockIndexOps::new();
        ops.expect_iterator_release().returning(|_| Ok(()));
        let iterator = Iterator::from_raw(Arc::new(ops), 7);
        let rendered = format!("{iterator:?}");
        assert!(rendered.contains("handle: 7"));
    }
}
