// Sequence lifecycle and arithmetic

use crate::error::BoxResult;
use crate::host::registry;
use crate::types::{Sequence, SequenceOptions};

/// Create a sequence. `None` options use the host defaults.
pub fn create(name: &str, opts: Option<SequenceOptions>) -> BoxResult<Sequence> {
    registry::current("sequence.create")?.sequence_create(name, opts)
}

/// Advance the sequence and return the new value.
pub fn next(seq: Sequence) -> BoxResult<i64> {
    registry::current("sequence.next")?.sequence_next(seq)
}

/// The last value returned by the sequence.
pub fn current(seq: Sequence) -> BoxResult<i64> {
    registry::current("sequence.current")?.sequence_current(seq)
}

/// Set the sequence so that the next call to [`next`] continues from
/// `value`.
pub fn set(seq: Sequence, value: i64) -> BoxResult<()> {
    registry::current("sequence.set")?.sequence_set(seq, value)
}

/// Reset the sequence to its start value.
pub fn reset(seq: Sequence) -> BoxResult<()> {
    registry::current("sequence.reset")?.sequence_reset(seq)
}

/// Change the sequence options.
pub fn alter(seq: Sequence, opts: SequenceOptions) -> BoxResult<()> {
    registry::current("sequence.alter")?.sequence_alter(seq, opts)
}

/// Drop the sequence.
pub fn drop(seq: Sequence) -> BoxResult<()> {
    registry::current("sequence.drop")?.sequence_drop(seq)
}
