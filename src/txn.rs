// Transaction control

use crate::error::BoxResult;
use crate::host::registry;
use crate::types::TxnIsolationLevel;

/// Id of the current transaction.
pub fn id() -> BoxResult<i64> {
    registry::current("txn.id")?.txn_id()
}

/// Isolation level of the current transaction.
pub fn isolation() -> BoxResult<TxnIsolationLevel> {
    registry::current("txn.isolation")?.txn_isolation()
}

/// Whether a transaction is open.
pub fn is_active() -> BoxResult<bool> {
    registry::current("txn.is_active")?.txn_is_active()
}

/// Open a transaction. Nesting is a host error.
pub fn begin() -> BoxResult<()> {
    registry::current("txn.begin")?.txn_begin()
}

/// Commit the open transaction.
pub fn commit() -> BoxResult<()> {
    registry::current("txn.commit")?.txn_commit()
}

/// Roll back the open transaction.
pub fn rollback() -> BoxResult<()> {
    registry::current("txn.rollback")?.txn_rollback()
}

/// Set the isolation level of the open transaction. Must be called
/// before its first statement.
pub fn set_isolation(level: TxnIsolationLevel) -> BoxResult<()> {
    registry::current("txn.set_isolation")?.txn_set_isolation(level)
}

/// Make the open transaction wait for synchronous replication on commit.
pub fn make_sync() -> BoxResult<()> {
    registry::current("txn.make_sync")?.txn_make_sync()
}
