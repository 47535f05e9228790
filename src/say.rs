// The host logging sink

use crate::error::BoxResult;
use crate::host::registry;
use crate::types::LogLevel;

/// Write a message to the host log at the given level.
pub fn say(level: LogLevel, msg: &str) -> BoxResult<()> {
    registry::current("say.say")?.say(level, msg)
}

/// Log at `error` level.
pub fn error(msg: &str) -> BoxResult<()> {
    say(LogLevel::Error, msg)
}

/// Log at `crit` level.
pub fn crit(msg: &str) -> BoxResult<()> {
    say(LogLevel::Crit, msg)
}

/// Log at `warn` level.
pub fn warn(msg: &str) -> BoxResult<()> {
    say(LogLevel::Warn, msg)
}

/// Log at `info` level.
pub fn info(msg: &str) -> BoxResult<()> {
    say(LogLevel::Info, msg)
}

/// Log at `verbose` level.
pub fn verbose(msg: &str) -> BoxResult<()> {
    say(LogLevel::Verbose, msg)
}

/// Log at `debug` level.
pub fn debug(msg: &str) -> BoxResult<()> {
    say(LogLevel::Debug, msg)
}

/// Log at `syserror` level.
pub fn syserror(msg: &str) -> BoxResult<()> {
    say(LogLevel::SysError, msg)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serial_test::serial;

    use crate::error::BoxResult;
    use crate::host::{
        self, BoxOps, ErrorOps, IndexOps, KeyDefOps, SayOps, SequenceOps, SessionOps, TupleFormatOps,
        TupleOps, TxnOps,
    };

    use super::*;

    /// A host providing only the logging sink; every other subsystem
    /// stays stubbed.
    #[derive(Default)]
    struct CapturingSay {
        messages: Mutex<Vec<(LogLevel, String)>>,
    }

    impl SayOps for CapturingSay {
        fn say(&self, level: LogLevel, msg: &str) -> BoxResult<()> {
            self.messages.lock().unwrap().push((level, msg.to_string()));
            Ok(())
        }
    }

    impl BoxOps for CapturingSay {}
    impl IndexOps for CapturingSay {}
    impl KeyDefOps for CapturingSay {}
    impl SequenceOps for CapturingSay {}
    impl SessionOps for CapturingSay {}
    impl TxnOps for CapturingSay {}
    impl ErrorOps for CapturingSay {}
    impl TupleOps for CapturingSay {}
    impl TupleFormatOps for CapturingSay {}

    #[test]
    #[serial(host_registry)]
    fn test_helpers_forward_their_level() {
        let sink = Arc::new(CapturingSay::default());
        host::attach(sink.clone());

        info("one").unwrap();
        warn("two").unwrap();
        debug("three").unwrap();
        syserror("four").unwrap();
        say(LogLevel::Fatal, "five").unwrap();

        host::detach();

        let messages = sink.messages.lock().unwrap();
        assert_eq!(
            *messages,
            vec![
                (LogLevel::Info, "one".to_string()),
                (LogLevel::Warn, "two".to_string()),
                (LogLevel::Debug, "three".to_string()),
                (LogLevel::SysError, "four".to_string()),
                (LogLevel::Fatal, "five".to_string()),
            ]
        );
    }

    #[test]
    #[serial(host_registry)]
    fn test_logging_only_host_keeps_storage_stubbed() {
        host::attach(Arc::new(CapturingSay::default()));
        let err = crate::space::schema_version().unwrap_err();
        assert!(err.is_not_implemented());
        host::detach();
    }
}
