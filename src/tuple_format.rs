// Tuple format lifecycle

use std::fmt;
use std::sync::Arc;

use crate::error::BoxResult;
use crate::host::{TupleFormatOps, registry};
use crate::key_def::KeyDef;
use crate::types::TupleFormatHandle;

/// Increment the host-side reference count of a format.
pub fn retain(format: TupleFormatHandle) -> BoxResult<()> {
    registry::current("tuple_format.ref")?.tuple_format_ref(format)
}

/// Decrement the host-side reference count of a format.
pub fn release(format: TupleFormatHandle) -> BoxResult<()> {
    registry::current("tuple_format.unref")?.tuple_format_unref(format)
}

/// A tuple format.
///
/// Formats built with [`TupleFormat::new`] own one host-side reference
/// and drop it exactly once. The host's shared default format is
/// borrowed, never released.
pub struct TupleFormat {
    ops: Arc<dyn TupleFormatOps>,
    handle: TupleFormatHandle,
    owned: bool,
}

impl TupleFormat {
    /// The host's shared default format.
    pub fn default_format() -> BoxResult<TupleFormat> {
        let host = registry::current("tuple_format.default")?;
        let handle = host.tuple_format_default()?;
        Ok(TupleFormat { ops: host, handle, owned: false })
    }

    /// Build a format from key definitions.
    pub fn new(key_defs: &[&KeyDef]) -> BoxResult<TupleFormat> {
        let host = registry::current("tuple_format.new")?;
        let handles: Vec<_> = key_defs.iter().map(|key_def| key_def.handle()).collect();
        let handle = host.tuple_format_new(&handles)?;
        Ok(TupleFormat { ops: host, handle, owned: true })
    }

    /// Wrap a format handle against the host that issued it. `owned`
    /// decides whether dropping the value releases a reference.
    pub fn from_raw(ops: Arc<dyn TupleFormatOps>, handle: TupleFormatHandle, owned: bool) -> Self {
        Self { ops, handle, owned }
    }

    pub fn handle(&self) -> TupleFormatHandle {
        self.handle
    }

    /// A second owned reference to the same format.
    pub fn try_clone(&self) -> BoxResult<TupleFormat> {
        self.ops.tuple_format_ref(self.handle)?;
        Ok(TupleFormat { ops: self.ops.clone(), handle: self.handle, owned: true })
    }

    /// Release the owned reference, surfacing any host error.
    pub fn close(mut self) -> BoxResult<()> {
        if !self.owned {
            return Ok(());
        }
        self.owned = false;
        self.ops.tuple_format_unref(self.handle)
    }
}

impl Drop for TupleFormat {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        self.owned = false;
        if let Err(err) = self.ops.tuple_format_unref(self.handle) {
            tracing::warn!(handle = self.handle, %err, "tuple format unref failed");
        }
    }
}

impl fmt::Debug for TupleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TupleFormat")
            .field("handle", &self.handle)
            .field("owned", &self.owned)
            .finish()
    }
}
