// Key definitions: construction, comparison, validation

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxResult;
use crate::host::{KeyDefOps, registry};
use crate::types::{KeyDefHandle, KeyPartDef, TupleHandle};

/// A host-side key definition.
///
/// Key definitions are created, duplicated and merged by the application,
/// so unlike spaces and indexes they carry a release obligation: the
/// handle is deleted exactly once, through [`KeyDef::close`] or on drop.
pub struct KeyDef {
    ops: Arc<dyn KeyDefOps>,
    handle: KeyDefHandle,
    released: bool,
}

impl KeyDef {
    /// Build a key definition from its parts.
    pub fn new(parts: &[KeyPartDef]) -> BoxResult<KeyDef> {
        let host = registry::current("key_def.new")?;
        let handle = host.key_def_new(parts)?;
        Ok(KeyDef::from_raw(host, handle))
    }

    /// Take ownership of a key-definition handle against the host that
    /// issued it.
    pub fn from_raw(ops: Arc<dyn KeyDefOps>, handle: KeyDefHandle) -> KeyDef {
        KeyDef { ops, handle, released: false }
    }

    pub fn handle(&self) -> KeyDefHandle {
        self.handle
    }

    /// An independent copy of this key definition.
    pub fn dup(&self) -> BoxResult<KeyDef> {
        let handle = self.ops.key_def_dup(self.handle)?;
        Ok(KeyDef::from_raw(self.ops.clone(), handle))
    }

    /// A key definition covering the parts of `self` followed by the
    /// parts of `other` that `self` does not already cover.
    pub fn merge(&self, other: &KeyDef) -> BoxResult<KeyDef> {
        let handle = self.ops.key_def_merge(self.handle, other.handle)?;
        Ok(KeyDef::from_raw(self.ops.clone(), handle))
    }

    /// Validate a possibly partial key. Returns the verdict and the
    /// number of validated parts.
    pub fn validate_key(&self, key: &[u8]) -> BoxResult<(bool, u32)> {
        self.ops.key_def_validate_key(self.handle, key)
    }

    /// Validate a key that must cover every part.
    pub fn validate_full_key(&self, key: &[u8]) -> BoxResult<(bool, u32)> {
        self.ops.key_def_validate_full_key(self.handle, key)
    }

    /// Compare two tuples under this key definition.
    pub fn compare(&self, left: TupleHandle, right: TupleHandle) -> BoxResult<Ordering> {
        Ok(sign(self.ops.key_def_compare(self.handle, left, right)?))
    }

    /// Compare two serialized keys under this key definition.
    pub fn compare_keys(&self, left: &[u8], right: &[u8]) -> BoxResult<Ordering> {
        Ok(sign(self.ops.key_def_compare_keys(self.handle, left, right)?))
    }

    /// Extract the key of a tuple as a new tuple handle.
    pub fn extract_key(&self, tuple: TupleHandle) -> BoxResult<TupleHandle> {
        self.ops.key_def_extract_key(self.handle, tuple)
    }

    pub fn part_count(&self) -> BoxResult<u32> {
        self.ops.key_def_part_count(self.handle)
    }

    /// Whether a tuple has every field this key definition requires.
    pub fn validate_tuple(&self, tuple: TupleHandle) -> BoxResult<bool> {
        self.ops.key_def_validate_tuple(self.handle, tuple)
    }

    /// The parts this key definition was built from.
    pub fn dump_parts(&self) -> BoxResult<Vec<KeyPartDef>> {
        self.ops.key_def_dump_parts(self.handle)
    }

    /// Delete the key definition, surfacing any host error. Dropping the
    /// value deletes it as well, discarding the error.
    pub fn close(mut self) -> BoxResult<()> {
        self.released = true;
        self.ops.key_def_delete(self.handle)
    }
}

fn sign(raw: i32) -> Ordering {
    raw.cmp(&0)
}

impl Drop for KeyDef {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.ops.key_def_delete(self.handle) {
            tracing::warn!(handle = self.handle, %err, "key def delete failed");
        }
    }
}

impl fmt::Debug for KeyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDef")
            .field("handle", &self.handle)
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use crate::host::MockKeyDefOps;

    use super::*;

    #[test]
    fn test_key_def_deletes_once_on_drop() {
        let mut ops = MockKeyDefOps::new();
        ops.expect_key_def_delete().with(eq(3)).times(1).returning(|_| Ok(()));
        let key_def = KeyDef::from_raw(Arc::new(ops), 3);
        std::mem::drop(key_def);
    }

    #[test]
    fn test_key_def_close_is_the_only_delete() {
        let mut ops = MockKeyDefOps::new();
        ops.expect_key_def_delete().with(eq(3)).times(1).returning(|_| Ok(()));
        let key_def = KeyDef::from_raw(Arc::new(ops), 3);
        key_def.close().unwrap();
    }

    #[test]
    fn test_dup_owns_an_independent_handle() {
        let mut ops = MockKeyDefOps::new();
        ops.expect_key_def_dup().with(eq(3)).times(1).returning(|_| Ok(4));
        ops.expect_key_def_delete().with(eq(3)).times(1).returning(|_| Ok(()));
        ops.expect_key_def_delete().with(eq(4)).times(1).returning(|_| Ok(()));

        let key_def = KeyDef::from_raw(Arc::new(ops), 3);
        let copy = key_def.dup().unwrap();
        assert_eq!(copy.handle(), 4);
    }

    #[test]
    fn test_compare_maps_host_sign_to_ordering() {
        let mut ops = MockKeyDefOps::new();
        let mut verdicts = vec![Ok(-7), Ok(0), Ok(3)].into_iter();
        ops.expect_key_def_compare().times(3).returning(move |_, _, _| verdicts.next().unwrap());
        ops.expect_key_def_delete().returning(|_| Ok(()));

        let key_def = KeyDef::from_raw(Arc::new(ops), 1);
        assert_eq!(key_def.compare(10, 11).unwrap(), Ordering::Less);
        assert_eq!(key_def.compare(10, 11).unwrap(), Ordering::Equal);
        assert_eq!(key_def.compare(10, 11).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_keys_maps_host_sign_to_ordering() {
        let mut ops = MockKeyDefOps::new();
        ops.expect_key_def_compare_keys().times(1).returning(|_, _, _| Ok(1));
        ops.expect_key_def_delete().returning(|_| Ok(()));

        let key_def = KeyDef::from_raw(Arc::new(ops), 1);
        assert_eq!(key_def.compare_keys(&[0x91], &[0x90]).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_key_def_drop_survives_delete_failure() {
        let mut ops = MockKeyDefOps::new();
        ops.expect_key_def_delete()
            .times(1)
            .returning(|_| Err(crate::error::BoxError::new("gone", "ClientError", 0)));
        let key_def = KeyDef::from_raw(Arc::new(ops), 8);
        std::mem::drop(key_def);
    }
}
