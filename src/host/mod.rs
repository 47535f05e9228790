// Host abstraction - the embedder side of the boundary
//
// One synchronous trait per host subsystem, methods named after the C
// symbol families they forward to. Every method has a default body that
// reports not-implemented, so a partial host is automatically stubbed for
// the rest of the surface. `NullHost` is the fully inert host.

#[cfg(any(test, feature = "mockall"))]
use mockall::automock;

use crate::error::{BoxError, BoxResult};
use crate::types::{
    Index, IndexId, IndexStat, IndexType, IteratorHandle, IteratorType, KeyDefHandle, KeyPartDef,
    LogLevel, PairsOpts, Peer, SelectOpts, Sequence, SequenceOptions, Session, SpaceId,
    TupleFormatHandle, TupleHandle, TupleIteratorHandle, TxnIsolationLevel, UpdateOp,
};

pub mod registry;

pub use registry::{attach, detach, is_attached};

/// Schema lookup and space-level mutation (`box_*`).
///
/// Tuple, key and update-operation buffers must be valid MessagePack
/// arrays; the boundary passes them through unvalidated and the host
/// reports violations. Returned tuple handles are owned by the caller.
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait BoxOps: Send + Sync {
    fn schema_version(&self) -> BoxResult<u64> {
        Err(BoxError::not_implemented("box.schema_version"))
    }

    fn space_id_by_name(&self, _name: &str) -> BoxResult<SpaceId> {
        Err(BoxError::not_implemented("box.space_id_by_name"))
    }

    fn index_id_by_name(&self, _space_id: SpaceId, _name: &str) -> BoxResult<IndexId> {
        Err(BoxError::not_implemented("box.index_id_by_name"))
    }

    fn insert(&self, _space_id: SpaceId, _tuple: &[u8]) -> BoxResult<TupleHandle> {
        Err(BoxError::not_implemented("box.insert"))
    }

    fn replace(&self, _space_id: SpaceId, _tuple: &[u8]) -> BoxResult<TupleHandle> {
        Err(BoxError::not_implemented("box.replace"))
    }

    fn truncate(&self, _space_id: SpaceId) -> BoxResult<()> {
        Err(BoxError::not_implemented("box.truncate"))
    }

    fn delete(&self, _index: Index, _key: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("box.delete"))
    }

    fn update(&self, _index: Index, _key: &[u8], _ops: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("box.update"))
    }

    fn upsert(&self, _index: Index, _tuple: &[u8], _ops: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("box.upsert"))
    }
}

/// Index queries, iteration and maintenance (`box_index_*`).
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait IndexOps: Send + Sync {
    fn index_len(&self, _index: Index) -> BoxResult<u64> {
        Err(BoxError::not_implemented("index.len"))
    }

    fn index_bsize(&self, _index: Index) -> BoxResult<u64> {
        Err(BoxError::not_implemented("index.bsize"))
    }

    fn index_random(&self, _index: Index, _seed: u32) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.random"))
    }

    fn index_get(&self, _index: Index, _key: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.get"))
    }

    fn index_min(&self, _index: Index, _key: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.min"))
    }

    fn index_max(&self, _index: Index, _key: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.max"))
    }

    fn index_count(
        &self,
        _index: Index,
        _iterator: IteratorType,
        _key: &[u8],
    ) -> BoxResult<u64> {
        Err(BoxError::not_implemented("index.count"))
    }

    fn index_unique(&self, _index: Index) -> BoxResult<bool> {
        Err(BoxError::not_implemented("index.unique"))
    }

    fn index_type(&self, _index: Index) -> BoxResult<IndexType> {
        Err(BoxError::not_implemented("index.type"))
    }

    fn index_parts(&self, _index: Index) -> BoxResult<Vec<KeyPartDef>> {
        Err(BoxError::not_implemented("index.parts"))
    }

    /// Open a cursor. The returned handle references host-side state and
    /// must be paired with exactly one `iterator_release`.
    fn index_pairs(&self, _index: Index, _opts: &PairsOpts) -> BoxResult<IteratorHandle> {
        Err(BoxError::not_implemented("index.pairs"))
    }

    fn index_select(
        &self,
        _index: Index,
        _key: &[u8],
        _opts: SelectOpts,
    ) -> BoxResult<Vec<TupleHandle>> {
        Err(BoxError::not_implemented("index.select"))
    }

    fn index_update(
        &self,
        _index: Index,
        _key: &[u8],
        _ops: &[UpdateOp],
    ) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.update"))
    }

    fn index_delete(&self, _index: Index, _key: &[u8]) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.delete"))
    }

    fn index_alter(&self, _index: Index, _unique: bool, _parts: &[KeyPartDef]) -> BoxResult<()> {
        Err(BoxError::not_implemented("index.alter"))
    }

    fn index_drop(&self, _index: Index) -> BoxResult<()> {
        Err(BoxError::not_implemented("index.drop"))
    }

    fn index_rename(&self, _index: Index, _new_name: &str) -> BoxResult<()> {
        Err(BoxError::not_implemented("index.rename"))
    }

    fn index_stat(&self, _index: Index) -> BoxResult<IndexStat> {
        Err(BoxError::not_implemented("index.stat"))
    }

    fn index_compact(&self, _index: Index) -> BoxResult<()> {
        Err(BoxError::not_implemented("index.compact"))
    }

    fn index_tuple_pos(&self, _index: Index, _key: &[u8]) -> BoxResult<u64> {
        Err(BoxError::not_implemented("index.tuple_pos"))
    }

    /// Advance a cursor. `Ok(None)` marks the end of the scan.
    fn iterator_next(&self, _iterator: IteratorHandle) -> BoxResult<Option<TupleHandle>> {
        Err(BoxError::not_implemented("index.iterator_next"))
    }

    fn iterator_release(&self, _iterator: IteratorHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("index.iterator_release"))
    }
}

/// Key definition construction, comparison and validation
/// (`box_key_def_*`). Key definitions are host-side resources released
/// with `key_def_delete`.
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait KeyDefOps: Send + Sync {
    fn key_def_new(&self, _parts: &[KeyPartDef]) -> BoxResult<KeyDefHandle> {
        Err(BoxError::not_implemented("key_def.new"))
    }

    fn key_def_dup(&self, _key_def: KeyDefHandle) -> BoxResult<KeyDefHandle> {
        Err(BoxError::not_implemented("key_def.dup"))
    }

    fn key_def_merge(&self, _left: KeyDefHandle, _right: KeyDefHandle) -> BoxResult<KeyDefHandle> {
        Err(BoxError::not_implemented("key_def.merge"))
    }

    /// Validate a possibly partial key. Returns the verdict and the number
    /// of validated parts.
    fn key_def_validate_key(&self, _key_def: KeyDefHandle, _key: &[u8]) -> BoxResult<(bool, u32)> {
        Err(BoxError::not_implemented("key_def.validate_key"))
    }

    fn key_def_validate_full_key(
        &self,
        _key_def: KeyDefHandle,
        _key: &[u8],
    ) -> BoxResult<(bool, u32)> {
        Err(BoxError::not_implemented("key_def.validate_full_key"))
    }

    /// Compare two tuples; negative, zero or positive like `memcmp`.
    fn key_def_compare(
        &self,
        _key_def: KeyDefHandle,
        _left: TupleHandle,
        _right: TupleHandle,
    ) -> BoxResult<i32> {
        Err(BoxError::not_implemented("key_def.compare"))
    }

    /// Compare two serialized keys; negative, zero or positive.
    fn key_def_compare_keys(
        &self,
        _key_def: KeyDefHandle,
        _left: &[u8],
        _right: &[u8],
    ) -> BoxResult<i32> {
        Err(BoxError::not_implemented("key_def.compare_keys"))
    }

    fn key_def_extract_key(
        &self,
        _key_def: KeyDefHandle,
        _tuple: TupleHandle,
    ) -> BoxResult<TupleHandle> {
        Err(BoxError::not_implemented("key_def.extract_key"))
    }

    fn key_def_part_count(&self, _key_def: KeyDefHandle) -> BoxResult<u32> {
        Err(BoxError::not_implemented("key_def.part_count"))
    }

    fn key_def_validate_tuple(
        &self,
        _key_def: KeyDefHandle,
        _tuple: TupleHandle,
    ) -> BoxResult<bool> {
        Err(BoxError::not_implemented("key_def.validate_tuple"))
    }

    fn key_def_dump_parts(&self, _key_def: KeyDefHandle) -> BoxResult<Vec<KeyPartDef>> {
        Err(BoxError::not_implemented("key_def.dump_parts"))
    }

    fn key_def_delete(&self, _key_def: KeyDefHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("key_def.delete"))
    }
}

/// Sequence lifecycle and arithmetic (`box_sequence_*`).
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait SequenceOps: Send + Sync {
    fn sequence_create(
        &self,
        _name: &str,
        _opts: Option<SequenceOptions>,
    ) -> BoxResult<Sequence> {
        Err(BoxError::not_implemented("sequence.create"))
    }

    fn sequence_next(&self, _seq: Sequence) -> BoxResult<i64> {
        Err(BoxError::not_implemented("sequence.next"))
    }

    fn sequence_current(&self, _seq: Sequence) -> BoxResult<i64> {
        Err(BoxError::not_implemented("sequence.current"))
    }

    fn sequence_set(&self, _seq: Sequence, _value: i64) -> BoxResult<()> {
        Err(BoxError::not_implemented("sequence.set"))
    }

    fn sequence_reset(&self, _seq: Sequence) -> BoxResult<()> {
        Err(BoxError::not_implemented("sequence.reset"))
    }

    fn sequence_alter(&self, _seq: Sequence, _opts: SequenceOptions) -> BoxResult<()> {
        Err(BoxError::not_implemented("sequence.alter"))
    }

    fn sequence_drop(&self, _seq: Sequence) -> BoxResult<()> {
        Err(BoxError::not_implemented("sequence.drop"))
    }
}

/// Session identity and the binary-protocol side channel
/// (`box_session_*`).
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait SessionOps: Send + Sync {
    fn session_current(&self) -> BoxResult<Session> {
        Err(BoxError::not_implemented("session.current"))
    }

    fn session_exists(&self) -> BoxResult<bool> {
        Err(BoxError::not_implemented("session.exists"))
    }

    fn session_id(&self, _session: Session) -> BoxResult<u64> {
        Err(BoxError::not_implemented("session.id"))
    }

    fn session_peer(&self, _session: Session) -> BoxResult<Peer> {
        Err(BoxError::not_implemented("session.peer"))
    }

    fn session_sync(&self) -> BoxResult<u64> {
        Err(BoxError::not_implemented("session.sync"))
    }

    fn session_user(&self) -> BoxResult<String> {
        Err(BoxError::not_implemented("session.user"))
    }

    fn session_type(&self, _session: Session) -> BoxResult<String> {
        Err(BoxError::not_implemented("session.type"))
    }

    fn session_su(&self, _session: Session, _user: &str) -> BoxResult<()> {
        Err(BoxError::not_implemented("session.su"))
    }

    fn session_uid(&self, _session: Session) -> BoxResult<u64> {
        Err(BoxError::not_implemented("session.uid"))
    }

    fn session_euid(&self, _session: Session) -> BoxResult<u64> {
        Err(BoxError::not_implemented("session.euid"))
    }

    fn session_storage(&self, _session: Session) -> BoxResult<Vec<(String, String)>> {
        Err(BoxError::not_implemented("session.storage"))
    }

    fn iproto_send(&self, _session: Session, _header: &[u8], _body: &[u8]) -> BoxResult<()> {
        Err(BoxError::not_implemented("session.iproto_send"))
    }
}

/// Transaction control (`box_txn_*`). Begin/commit/rollback ordering is
/// caller discipline; the host enforces its own invariants.
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait TxnOps: Send + Sync {
    fn txn_id(&self) -> BoxResult<i64> {
        Err(BoxError::not_implemented("txn.id"))
    }

    fn txn_isolation(&self) -> BoxResult<TxnIsolationLevel> {
        Err(BoxError::not_implemented("txn.isolation"))
    }

    fn txn_is_active(&self) -> BoxResult<bool> {
        Err(BoxError::not_implemented("txn.is_active"))
    }

    fn txn_begin(&self) -> BoxResult<()> {
        Err(BoxError::not_implemented("txn.begin"))
    }

    fn txn_commit(&self) -> BoxResult<()> {
        Err(BoxError::not_implemented("txn.commit"))
    }

    fn txn_rollback(&self) -> BoxResult<()> {
        Err(BoxError::not_implemented("txn.rollback"))
    }

    fn txn_set_isolation(&self, _level: TxnIsolationLevel) -> BoxResult<()> {
        Err(BoxError::not_implemented("txn.set_isolation"))
    }

    fn txn_make_sync(&self) -> BoxResult<()> {
        Err(BoxError::not_implemented("txn.make_sync"))
    }
}

/// The host diagnostics area (`box_error_*`).
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait ErrorOps: Send + Sync {
    fn error_set(&self, _err: &BoxError) -> BoxResult<()> {
        Err(BoxError::not_implemented("error.set"))
    }

    fn error_last(&self) -> BoxResult<Option<BoxError>> {
        Err(BoxError::not_implemented("error.last"))
    }

    fn error_clear(&self) -> BoxResult<()> {
        Err(BoxError::not_implemented("error.clear"))
    }
}

/// The host logging sink (`say`).
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait SayOps: Send + Sync {
    fn say(&self, _level: LogLevel, _msg: &str) -> BoxResult<()> {
        Err(BoxError::not_implemented("say.say"))
    }
}

/// Raw tuple construction, reference counting and field access
/// (`box_tuple_*`).
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait TupleOps: Send + Sync {
    /// Build a tuple from a MessagePack array. Encoding is validated here,
    /// on the host side, not by the boundary.
    fn tuple_new(&self, _format: TupleFormatHandle, _data: &[u8]) -> BoxResult<TupleHandle> {
        Err(BoxError::not_implemented("tuple.new"))
    }

    fn tuple_ref(&self, _tuple: TupleHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("tuple.ref"))
    }

    fn tuple_unref(&self, _tuple: TupleHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("tuple.unref"))
    }

    fn tuple_field_count(&self, _tuple: TupleHandle) -> BoxResult<u32> {
        Err(BoxError::not_implemented("tuple.field_count"))
    }

    fn tuple_bsize(&self, _tuple: TupleHandle) -> BoxResult<u64> {
        Err(BoxError::not_implemented("tuple.bsize"))
    }

    /// Tuple contents as a MessagePack-encoded array.
    fn tuple_to_buf(&self, _tuple: TupleHandle) -> BoxResult<Vec<u8>> {
        Err(BoxError::not_implemented("tuple.to_buf"))
    }

    fn tuple_format_of(&self, _tuple: TupleHandle) -> BoxResult<TupleFormatHandle> {
        Err(BoxError::not_implemented("tuple.format"))
    }

    /// A single field as MessagePack bytes; `Ok(None)` for a field past the
    /// end of the tuple.
    fn tuple_field(&self, _tuple: TupleHandle, _field_no: u32) -> BoxResult<Option<Vec<u8>>> {
        Err(BoxError::not_implemented("tuple.field"))
    }

    fn tuple_field_by_path(
        &self,
        _tuple: TupleHandle,
        _path: &str,
        _index_base: u32,
    ) -> BoxResult<Option<Vec<u8>>> {
        Err(BoxError::not_implemented("tuple.field_by_path"))
    }

    fn tuple_update(&self, _tuple: TupleHandle, _expr: &[u8]) -> BoxResult<TupleHandle> {
        Err(BoxError::not_implemented("tuple.update"))
    }

    fn tuple_upsert(&self, _tuple: TupleHandle, _expr: &[u8]) -> BoxResult<TupleHandle> {
        Err(BoxError::not_implemented("tuple.upsert"))
    }

    fn tuple_validate(&self, _tuple: TupleHandle, _format: TupleFormatHandle) -> BoxResult<bool> {
        Err(BoxError::not_implemented("tuple.validate"))
    }

    /// Open a field cursor over a tuple; must be paired with exactly one
    /// `tuple_iterator_release`.
    fn tuple_iterator_new(&self, _tuple: TupleHandle) -> BoxResult<TupleIteratorHandle> {
        Err(BoxError::not_implemented("tuple.iterator_new"))
    }

    fn tuple_iterator_position(&self, _iterator: TupleIteratorHandle) -> BoxResult<u32> {
        Err(BoxError::not_implemented("tuple.iterator_position"))
    }

    fn tuple_iterator_rewind(&self, _iterator: TupleIteratorHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("tuple.iterator_rewind"))
    }

    fn tuple_iterator_seek(
        &self,
        _iterator: TupleIteratorHandle,
        _position: u32,
    ) -> BoxResult<Option<Vec<u8>>> {
        Err(BoxError::not_implemented("tuple.iterator_seek"))
    }

    fn tuple_iterator_next(&self, _iterator: TupleIteratorHandle) -> BoxResult<Option<Vec<u8>>> {
        Err(BoxError::not_implemented("tuple.iterator_next"))
    }

    fn tuple_iterator_release(&self, _iterator: TupleIteratorHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("tuple.iterator_release"))
    }
}

/// Tuple format lifecycle (`box_tuple_format_*`). Formats are refcounted
/// host objects.
#[cfg_attr(any(test, feature = "mockall"), automock)]
pub trait TupleFormatOps: Send + Sync {
    fn tuple_format_default(&self) -> BoxResult<TupleFormatHandle> {
        Err(BoxError::not_implemented("tuple_format.default"))
    }

    fn tuple_format_new(&self, _key_defs: &[KeyDefHandle]) -> BoxResult<TupleFormatHandle> {
        Err(BoxError::not_implemented("tuple_format.new"))
    }

    fn tuple_format_ref(&self, _format: TupleFormatHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("tuple_format.ref"))
    }

    fn tuple_format_unref(&self, _format: TupleFormatHandle) -> BoxResult<()> {
        Err(BoxError::not_implemented("tuple_format.unref"))
    }
}

/// The full boundary an embedder provides. Blanket-implemented for any
/// type covering every subsystem.
pub trait Host:
    BoxOps
    + IndexOps
    + KeyDefOps
    + SequenceOps
    + SessionOps
    + TxnOps
    + ErrorOps
    + SayOps
    + TupleOps
    + TupleFormatOps
{
}

impl<T> Host for T where
    T: BoxOps
        + IndexOps
        + KeyDefOps
        + SequenceOps
        + SessionOps
        + TxnOps
        + ErrorOps
        + SayOps
        + TupleOps
        + TupleFormatOps
{
}

/// The inert host: every operation reports not-implemented. Attaching it
/// is equivalent to running the boundary without an embedder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl BoxOps for NullHost {}
impl IndexOps for NullHost {}
impl KeyDefOps for NullHost {}
impl SequenceOps for NullHost {}
impl SessionOps for NullHost {}
impl TxnOps for NullHost {}
impl ErrorOps for NullHost {}
impl SayOps for NullHost {}
impl TupleOps for NullHost {}
impl TupleFormatOps for NullHost {}
