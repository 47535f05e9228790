// Core identifiers, records and enumerations of the host boundary

use serde::{Deserialize, Serialize};

/// Host-side space identifier.
pub type SpaceId = u32;
/// Host-side index identifier, scoped to a space.
pub type IndexId = u32;
/// Host-side sequence identifier.
pub type SequenceId = u32;
/// Host-side session identifier.
pub type SessionId = u64;

/// Raw reference to a tuple living in the host's tuple arena.
///
/// Returned handles are owned by the caller and must be released through
/// the tuple reference-counting operations; the [`crate::tuple::Tuple`]
/// wrapper does this automatically.
pub type TupleHandle = u32;
/// Raw handle to a host-side index cursor.
pub type IteratorHandle = u32;
/// Raw handle to a host-side tuple field cursor.
pub type TupleIteratorHandle = u32;
/// Raw handle to a host-side key definition.
pub type KeyDefHandle = u32;
/// Raw handle to a host-side tuple format.
pub type TupleFormatHandle = u32;

/// A space, referenced by id.
///
/// Spaces are owned by the host for its whole lifetime; the record carries
/// no release obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
}

/// An index, referenced by id within its space.
///
/// `index_base` records the field-numbering convention (0 or 1) the caller
/// uses for update operations against this index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub id: IndexId,
    pub space_id: SpaceId,
    pub index_base: u32,
}

/// A sequence, referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: SequenceId,
}

/// A session, referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
}

/// Severity levels of the host logging sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Fatal = 0,
    SysError = 1,
    Error = 2,
    Crit = 3,
    Warn = 4,
    Info = 5,
    Verbose = 6,
    Debug = 7,
}

/// Index scan direction and matching mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IteratorType {
    Eq = 0,
    Req = 1,
    All = 2,
    Lt = 3,
    Le = 4,
    Ge = 5,
    Gt = 6,
    BitsAllSet = 7,
    BitsAnySet = 8,
    BitsAllNotSet = 9,
    Overlaps = 10,
    Neighbor = 11,
    Np = 12,
    Pp = 13,
}

/// Transaction isolation levels understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TxnIsolationLevel {
    #[default]
    Default = 0,
    ReadCommitted = 1,
    ReadConfirmed = 2,
    BestEffort = 3,
    Linearizable = 4,
}

/// Index organizations supported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexType {
    Tree = 0,
    Hash = 1,
    Bitset = 2,
    Rtree = 3,
}

/// A key part can address its field by position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldIdentifier {
    Number(u32),
    Name(String),
}

/// Nullability flags of a key part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyPartFlags {
    pub is_nullable: bool,
    pub exclude_null: bool,
}

impl KeyPartFlags {
    /// Flags for a nullable key part.
    pub fn nullable() -> Self {
        Self { is_nullable: true, ..Default::default() }
    }

    /// Additionally exclude null values from the index.
    pub fn with_exclude_null(mut self) -> Self {
        self.exclude_null = true;
        self
    }
}

/// One part of a key definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPartDef {
    pub field: FieldIdentifier,
    pub field_type: String,
    pub collation: Option<String>,
    pub path: Option<String>,
    pub flags: KeyPartFlags,
}

impl KeyPartDef {
    /// A key part addressing a field by position.
    pub fn numbered(field_no: u32, field_type: impl Into<String>) -> Self {
        Self {
            field: FieldIdentifier::Number(field_no),
            field_type: field_type.into(),
            collation: None,
            path: None,
            flags: KeyPartFlags::default(),
        }
    }

    /// A key part addressing a field by name.
    pub fn named(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field: FieldIdentifier::Name(name.into()),
            field_type: field_type.into(),
            collation: None,
            path: None,
            flags: KeyPartFlags::default(),
        }
    }
}

/// Options for creating or altering a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceOptions {
    pub start: i64,
    pub increment: i64,
    pub min: i64,
    pub max: i64,
    pub cycle: bool,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self { start: 1, increment: 1, min: 1, max: i64::MAX, cycle: false }
    }
}

/// Remote endpoint of a binary-protocol session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub host: String,
    pub port: u16,
}

/// Options of a `select` query. Unset fields use host defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectOpts {
    pub iterator: Option<IteratorType>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub after: Option<TupleHandle>,
    pub fetch_pos: Option<bool>,
}

/// Options of a `pairs` iteration. Unset fields use host defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PairsOpts {
    pub key: Option<Vec<u8>>,
    pub iterator: Option<IteratorType>,
    pub after: Option<TupleHandle>,
}

/// A single typed update operation.
///
/// `op` is the operation mnemonic the host understands (`"="`, `"+"`,
/// `"-"`, `"&"`, `"|"`, `"^"`, `":"`, `"!"`, `"#"`); `operand` is a
/// MessagePack-encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOp {
    pub field_no: i32,
    pub op: String,
    pub operand: Vec<u8>,
}

impl UpdateOp {
    pub fn new(op: impl Into<String>, field_no: i32, operand: Vec<u8>) -> Self {
        Self { field_no, op: op.into(), operand }
    }
}

/// Size statistics of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStat {
    pub bsize: u64,
    pub len: u64,
}
