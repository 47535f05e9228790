//! Typed guest-side boundary to an embedded Tarantool host.
//!
//! Application code links against this crate; the embedding Tarantool
//! process supplies the other side by implementing the [`host`] traits
//! and attaching itself with [`host::attach`]. Every storage call is a
//! single synchronous request/response forwarded to the attached host.
//! Without one, every call deterministically reports not-implemented as
//! a [`BoxError`] value; the boundary itself never panics on behalf of
//! the host.
//!
//! # Architecture
//!
//! - **host**: the embedder-side traits, the inert [`host::NullHost`]
//!   and the process-wide registry
//! - **space**: schema lookup and space-level mutation
//! - **index**: queries, iteration and maintenance; the cursor resource
//! - **tuple** / **tuple_format**: refcounted tuples, field access,
//!   formats
//! - **key_def**: key definitions, comparison and validation
//! - **sequence** / **session** / **txn**: host-state subsystems
//! - **error** / **say**: error records, diagnostics area, log sink
//! - **msgpack**: the JSON-convention codec (pure, host-free)
//!
//! # Ownership
//!
//! Spaces, indexes, sequences and sessions are referenced by id and
//! owned by the host permanently; the records carry no release
//! obligation. Cursors, key definitions, formats and tuple references
//! are application-owned resources: each is released exactly once,
//! explicitly via `close()` or implicitly on drop.
//!
//! # Example
//!
//! ```no_run
//! use tarlink::{Space, msgpack};
//!
//! # fn main() -> anyhow::Result<()> {
//! let row = msgpack::encode(br#"[1,"Alice",25]"#)?;
//! let space = Space::find("test_space")?;
//! let tuple = space.insert(&row)?;
//!
//! let key = msgpack::encode(b"[1]")?;
//! let ops = msgpack::encode(br#"[["=",2,26]]"#)?;
//! let index = space.index("primary")?;
//! if let Some(updated) = index.update(&key, &ops)? {
//!     println!("{}", String::from_utf8_lossy(&msgpack::decode(&updated.to_vec()?)?));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod index;
pub mod key_def;
pub mod msgpack;
pub mod say;
pub mod sequence;
pub mod session;
pub mod space;
pub mod tuple;
pub mod tuple_format;
pub mod txn;
pub mod types;

pub use config::Config;
pub use error::{BoxError, BoxResult, MsgpackError, MsgpackResult};
pub use host::{Host, NullHost};
pub use key_def::KeyDef;
pub use tuple::Tuple;
pub use tuple_format::TupleFormat;
pub use types::{
    Index, IndexType, IteratorType, LogLevel, Peer, Sequence, Session, Space, TxnIsolationLevel,
};
