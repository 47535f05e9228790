// Process-wide registry of the attached host

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{BoxError, BoxResult};

use super::Host;

static ACTIVE: RwLock<Option<Arc<dyn Host>>> = RwLock::new(None);

/// Attach the embedder's host, replacing any previous one. Calls made
/// after this point are forwarded to `host`.
pub fn attach(host: Arc<dyn Host>) {
    let mut active = write_active();
    let replaced = active.replace(host).is_some();
    tracing::debug!(replaced, "host attached");
}

/// Detach the current host, returning it. Subsequent boundary calls
/// report not-implemented.
pub fn detach() -> Option<Arc<dyn Host>> {
    let detached = write_active().take();
    if detached.is_some() {
        tracing::debug!("host detached");
    }
    detached
}

/// Whether a host is currently attached.
pub fn is_attached() -> bool {
    read_active().is_some()
}

/// The attached host, or the deterministic not-implemented error for `op`.
pub(crate) fn current(op: &str) -> BoxResult<Arc<dyn Host>> {
    read_active().clone().ok_or_else(|| BoxError::not_implemented(op))
}

// A poisoned lock only means another thread panicked mid-swap of the
// Option; the Option itself is still coherent.
fn read_active() -> RwLockReadGuard<'static, Option<Arc<dyn Host>>> {
    match ACTIVE.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_active() -> RwLockWriteGuard<'static, Option<Arc<dyn Host>>> {
    match ACTIVE.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
