use crate::wire::message::Command;
use thiserror::Error;

/// Errors produced while decoding a wire payload.
///
/// Malformed input on this boundary is adversary-controlled: the codec never
/// retries, and callers are expected to treat any of these as "drop this
/// message, potentially this peer".
///
/// Encoding has no error paths; writing a valid typed value is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes remain in the buffer than the field declares.
    #[error("truncated buffer: {0}")]
    TruncatedBuffer(&'static str),

    /// A varint prefix declares more bytes than remain, or a decoded length
    /// is otherwise implausible.
    #[error("malformed length: {0}")]
    MalformedLength(&'static str),

    /// Unconsumed bytes were left after a decode completed. Trailing bytes
    /// indicate a protocol mismatch or a corrupt/malicious peer and are
    /// never silently ignored.
    #[error("{0} trailing byte(s) after payload")]
    TrailingBytes(usize),

    /// A payload was routed to a codec for a different command.
    #[error("command mismatch: expected {expected:?}, got {got:?}")]
    TypeMismatch { expected: Command, got: Command },
}
