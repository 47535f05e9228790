// Raw tuple handles, the owning Tuple wrapper and the field cursor

use std::fmt;
use std::sync::Arc;

use crate::error::BoxResult;
use crate::host::{TupleOps, registry};
use crate::types::{TupleFormatHandle, TupleHandle, TupleIteratorHandle};

/// Build a tuple from a MessagePack array, returning its raw handle.
///
/// The encoding is validated by the host, not here. The handle is owned
/// by the caller; prefer [`Tuple`], which releases it automatically.
pub fn new(format: TupleFormatHandle, data: &[u8]) -> BoxResult<TupleHandle> {
    registry::current("tuple.new")?.tuple_new(format, data)
}

/// Increment the host-side reference count of a tuple.
pub fn retain(tuple: TupleHandle) -> BoxResult<()> {
    registry::current("tuple.ref")?.tuple_ref(tuple)
}

/// Decrement the host-side reference count of a tuple.
pub fn release(tuple: TupleHandle) -> BoxResult<()> {
    registry::current("tuple.unref")?.tuple_unref(tuple)
}

/// Number of fields in a tuple.
pub fn field_count(tuple: TupleHandle) -> BoxResult<u32> {
    registry::current("tuple.field_count")?.tuple_field_count(tuple)
}

/// Size of a tuple in bytes.
pub fn bsize(tuple: TupleHandle) -> BoxResult<u64> {
    registry::current("tuple.bsize")?.tuple_bsize(tuple)
}

/// Tuple contents as a MessagePack-encoded array.
pub fn to_buf(tuple: TupleHandle) -> BoxResult<Vec<u8>> {
    registry::current("tuple.to_buf")?.tuple_to_buf(tuple)
}

/// The format a tuple was built with.
pub fn format_of(tuple: TupleHandle) -> BoxResult<TupleFormatHandle> {
    registry::current("tuple.format")?.tuple_format_of(tuple)
}

/// A single field as MessagePack bytes; `Ok(None)` past the end.
pub fn field(tuple: TupleHandle, field_no: u32) -> BoxResult<Option<Vec<u8>>> {
    registry::current("tuple.field")?.tuple_field(tuple, field_no)
}

/// A field addressed by a JSON path, numbered from `index_base`.
pub fn field_by_path(
    tuple: TupleHandle,
    path: &str,
    index_base: u32,
) -> BoxResult<Option<Vec<u8>>> {
    registry::current("tuple.field_by_path")?.tuple_field_by_path(tuple, path, index_base)
}

/// Apply a MessagePack-encoded update expression, returning a new tuple.
pub fn update(tuple: TupleHandle, expr: &[u8]) -> BoxResult<TupleHandle> {
    registry::current("tuple.update")?.tuple_update(tuple, expr)
}

/// Apply a MessagePack-encoded upsert expression, returning a new tuple.
pub fn upsert(tuple: TupleHandle, expr: &[u8]) -> BoxResult<TupleHandle> {
    registry::current("tuple.upsert")?.tuple_upsert(tuple, expr)
}

/// Check a tuple against a format.
pub fn validate(tuple: TupleHandle, format: TupleFormatHandle) -> BoxResult<bool> {
    registry::current("tuple.validate")?.tuple_validate(tuple, format)
}

/// A tuple whose host-side reference is owned by this value.
///
/// The reference is released exactly once, either through
/// [`Tuple::close`] or when the value is dropped.
pub struct Tuple {
    ops: Arc<dyn TupleOps>,
    handle: TupleHandle,
    released: bool,
}

impl Tuple {
    /// Build a tuple from a MessagePack array using the host's default
    /// format.
    pub fn new(data: &[u8]) -> BoxResult<Tuple> {
        let host = registry::current("tuple.new")?;
        let format = host.tuple_format_default()?;
        let handle = host.tuple_new(format, data)?;
        Ok(Tuple::from_raw(host, handle))
    }

    /// Take ownership of a tuple handle against the host that issued it.
    pub fn from_raw(ops: Arc<dyn TupleOps>, handle: TupleHandle) -> Tuple {
        Tuple { ops, handle, released: false }
    }

    pub fn handle(&self) -> TupleHandle {
        self.handle
    }

    /// Tuple contents as a MessagePack-encoded array.
    pub fn to_vec(&self) -> BoxResult<Vec<u8>> {
        self.ops.tuple_to_buf(self.handle)
    }

    pub fn field_count(&self) -> BoxResult<u32> {
        self.ops.tuple_field_count(self.handle)
    }

    pub fn bsize(&self) -> BoxResult<u64> {
        self.ops.tuple_bsize(self.handle)
    }

    /// A single field as MessagePack bytes; `Ok(None)` past the end.
    pub fn field(&self, field_no: u32) -> BoxResult<Option<Vec<u8>>> {
        self.ops.tuple_field(self.handle, field_no)
    }

    /// A field addressed by a JSON path, numbered from `index_base`.
    pub fn field_by_path(&self, path: &str, index_base: u32) -> BoxResult<Option<Vec<u8>>> {
        self.ops.tuple_field_by_path(self.handle, path, index_base)
    }

    /// Apply a MessagePack-encoded update expression, returning the new
    /// tuple. This tuple is left untouched.
    pub fn update(&self, expr: &[u8]) -> BoxResult<Tuple> {
        let handle = self.ops.tuple_update(self.handle, expr)?;
        Ok(Tuple::from_raw(self.ops.clone(), handle))
    }

    /// Apply a MessagePack-encoded upsert expression, returning the new
    /// tuple.
    pub fn upsert(&self, expr: &[u8]) -> BoxResult<Tuple> {
        let handle = self.ops.tuple_upsert(self.handle, expr)?;
        Ok(Tuple::from_raw(self.ops.clone(), handle))
    }

    /// Check this tuple against a format.
    pub fn validate(&self, format: TupleFormatHandle) -> BoxResult<bool> {
        self.ops.tuple_validate(self.handle, format)
    }

    /// A second owned reference to the same tuple. Fallible, so not
    /// `Clone`: the host has to grant the new reference.
    pub fn try_clone(&self) -> BoxResult<Tuple> {
        self.ops.tuple_ref(self.handle)?;
        Ok(Tuple::from_raw(self.ops.clone(), self.handle))
    }

    /// Open a cursor over the fields of this tuple.
    pub fn iter(&self) -> BoxResult<TupleIterator> {
        let handle = self.ops.tuple_iterator_new(self.handle)?;
        Ok(TupleIterator::from_raw(self.ops.clone(), handle))
    }

    /// Release the reference, surfacing any host error. Dropping the
    /// value releases it as well, discarding the error.
    pub fn close(mut self) -> BoxResult<()> {
        self.released = true;
        self.ops.tuple_unref(self.handle)
    }
}

impl Drop for Tuple {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.ops.tuple_unref(self.handle) {
            tracing::warn!(handle = self.handle, %err, "tuple unref failed");
        }
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tuple")
            .field("handle", &self.handle)
            .field("released", &self.released)
            .finish()
    }
}

/// A host-side cursor over the fields of one tuple.
///
/// Released exactly once, like [`crate::index::Iterator`].
pub struct TupleIterator {
    ops: Arc<dyn TupleOps>,
    handle: TupleIteratorHandle,
    released: bool,
}

impl TupleIterator {
    /// Wrap a field-cursor handle against the host that created it.
    pub fn from_raw(ops: Arc<dyn TupleOps>, handle: TupleIteratorHandle) -> Self {
        Self { ops, handle, released: false }
    }

    pub fn handle(&self) -> TupleIteratorHandle {
        self.handle
    }

    /// Zero-based position of the next field to be read.
    pub fn position(&self) -> BoxResult<u32> {
        self.ops.tuple_iterator_position(self.handle)
    }

    /// Rewind to the first field.
    pub fn rewind(&mut self) -> BoxResult<()> {
        self.ops.tuple_iterator_rewind(self.handle)
    }

    /// Position the cursor and return the field there, if any.
    pub fn seek(&mut self, position: u32) -> BoxResult<Option<Vec<u8>>> {
        self.ops.tuple_iterator_seek(self.handle, position)
    }

    /// The next field as MessagePack bytes; `Ok(None)` past the end.
    pub fn next(&mut self) -> BoxResult<Option<Vec<u8>>> {
        self.ops.tuple_iterator_next(self.handle)
    }

    /// Release the cursor, surfacing any host error.
    pub fn close(mut self) -> BoxResult<()> {
        self.released = true;
        self.ops.tuple_iterator_release(self.handle)
    }
}

impl Drop for TupleIterator {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.ops.tuple_iterator_release(self.handle) {
            tracing::warn!(handle = self.handle, %err, "tuple iterator release failed");
        }
    }
}

impl fmt::Debug for TupleIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleIterator")
            .field("handle", &self.handle)
            .field("released", &self.released)
            .finish()
    }
}
