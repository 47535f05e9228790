// Boundary inertness tests
//
// Without an embedder the boundary must be deterministically inert:
// every host-backed operation returns the structured NotImplemented
// error, never a panic. The codec is the documented exception.

use std::sync::Arc;

use serial_test::serial;

use tarlink::error::ER_UNSUPPORTED;
use tarlink::types::{
    Index, IteratorType, LogLevel, PairsOpts, SelectOpts, Sequence, SequenceOptions, Session,
    TxnIsolationLevel, UpdateOp,
};
use tarlink::{
    BoxError, KeyDef, NullHost, Space, Tuple, TupleFormat, host, index, msgpack, say, sequence,
    session, space, tuple, tuple_format, txn,
};

fn assert_stubbed(err: BoxError) {
    assert!(err.is_not_implemented(), "unexpected error: {err}");
    assert_eq!(err.error_type, "NotImplemented");
    assert_eq!(err.code, ER_UNSUPPORTED);
    assert!(err.message.ends_with("is not implemented"), "message: {}", err.message);
}

fn sample_index() -> Index {
    Index { id: 0, space_id: 512, index_base: 0 }
}

#[test]
#[serial(host_registry)]
fn test_every_subsystem_is_inert_without_a_host() {
    host::detach();

    // box
    assert_stubbed(space::schema_version().unwrap_err());
    assert_stubbed(Space::find("test_space").unwrap_err());
    assert_stubbed(space::insert(Space::from_id(512), &[0x90]).unwrap_err());
    assert_stubbed(space::update(sample_index(), &[0x91], &[0x90]).unwrap_err());

    // index
    assert_stubbed(index::len(sample_index()).unwrap_err());
    assert_stubbed(index::get(sample_index(), &[0x91]).unwrap_err());
    assert_stubbed(index::count(sample_index(), IteratorType::All, &[0x90]).unwrap_err());
    assert_stubbed(index::pairs(sample_index(), &PairsOpts::default()).unwrap_err());
    assert_stubbed(index::select(sample_index(), &[0x90], SelectOpts::default()).unwrap_err());
    assert_stubbed(
        index::update(sample_index(), &[0x91], &[UpdateOp::new("=", 2, vec![0x1a])]).unwrap_err(),
    );

    // key_def
    assert_stubbed(KeyDef::new(&[]).unwrap_err());

    // sequence
    assert_stubbed(sequence::create("ids", Some(SequenceOptions::default())).unwrap_err());
    assert_stubbed(sequence::next(Sequence { id: 1 }).unwrap_err());

    // session
    assert_stubbed(session::current().unwrap_err());
    assert_stubbed(session::peer(Session { id: 1 }).unwrap_err());

    // txn
    assert_stubbed(txn::begin().unwrap_err());
    assert_stubbed(txn::set_isolation(TxnIsolationLevel::BestEffort).unwrap_err());

    // error
    assert_stubbed(tarlink::error::last().unwrap_err());

    // say
    assert_stubbed(say::say(LogLevel::Info, "hello").unwrap_err());
    assert_stubbed(say::info("hello").unwrap_err());

    // tuple
    assert_stubbed(Tuple::new(&[0x90]).unwrap_err());
    assert_stubbed(tuple::new(0, &[0x90]).unwrap_err());
    assert_stubbed(tuple::retain(1).unwrap_err());

    // tuple_format
    assert_stubbed(TupleFormat::default_format().unwrap_err());
    assert_stubbed(tuple_format::release(1).unwrap_err());
}

#[test]
#[serial(host_registry)]
fn test_null_host_behaves_like_no_host() {
    host::attach(Arc::new(NullHost));

    assert_stubbed(space::schema_version().unwrap_err());
    assert_stubbed(Space::find("test_space").unwrap_err());
    assert_stubbed(index::len(sample_index()).unwrap_err());
    assert_stubbed(txn::commit().unwrap_err());
    assert_stubbed(say::debug("quiet").unwrap_err());

    host::detach();
}

#[test]
#[serial(host_registry)]
fn test_stub_errors_name_the_failing_operation() {
    host::detach();

    let err = txn::begin().unwrap_err();
    assert_eq!(err.message, "txn.begin is not implemented");

    let err = index::pairs(sample_index(), &PairsOpts::default()).unwrap_err();
    assert_eq!(err.message, "index.pairs is not implemented");
}

#[test]
#[serial(host_registry)]
fn test_codec_works_without_a_host() {
    host::detach();

    let packed = msgpack::encode(br#"[1,"Alice",25]"#).unwrap();
    assert_eq!(msgpack::decode(&packed).unwrap(), br#"[1,"Alice",25]"#);
}
