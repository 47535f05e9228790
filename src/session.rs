// Session identity and the binary-protocol side channel

use crate::error::BoxResult;
use crate::host::registry;
use crate::types::{Peer, Session};

/// The session the current request runs under.
pub fn current() -> BoxResult<Session> {
    registry::current("session.current")?.session_current()
}

/// Whether a session exists for the current request.
pub fn exists() -> BoxResult<bool> {
    registry::current("session.exists")?.session_exists()
}

/// The identifier of a session.
pub fn id(session: Session) -> BoxResult<u64> {
    registry::current("session.id")?.session_id(session)
}

/// Remote endpoint of a binary-protocol session.
pub fn peer(session: Session) -> BoxResult<Peer> {
    registry::current("session.peer")?.session_peer(session)
}

/// Sync value of the request currently being processed.
pub fn sync() -> BoxResult<u64> {
    registry::current("session.sync")?.session_sync()
}

/// Name of the current user.
pub fn user() -> BoxResult<String> {
    registry::current("session.user")?.session_user()
}

/// Kind of a session (`"binary"`, `"console"`, ...).
pub fn type_of(session: Session) -> BoxResult<String> {
    registry::current("session.type")?.session_type(session)
}

/// Switch the session to another user.
pub fn su(session: Session, user: &str) -> BoxResult<()> {
    registry::current("session.su")?.session_su(session, user)
}

/// Id of the session's user.
pub fn uid(session: Session) -> BoxResult<u64> {
    registry::current("session.uid")?.session_uid(session)
}

/// Effective id of the session's user.
pub fn euid(session: Session) -> BoxResult<u64> {
    registry::current("session.euid")?.session_euid(session)
}

/// Key/value storage attached to a session.
pub fn storage(session: Session) -> BoxResult<Vec<(String, String)>> {
    registry::current("session.storage")?.session_storage(session)
}

/// Push a raw packet over the session's binary-protocol connection.
pub fn iproto_send(session: Session, header: &[u8], body: &[u8]) -> BoxResult<()> {
    registry::current("session.iproto_send")?.iproto_send(session, header, body)
}
