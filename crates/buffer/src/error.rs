// Chunk: docs/chunks/buffer_errors - Decode and config error types

//! Error types.
//!
//! [`ConfigError`] is returned to callers that build a buffer from a custom
//! [`BufferConfig`](crate::BufferConfig). [`DecodeError`] never reaches a
//! caller: the buffer only ever stores whole UTF-8 characters, so a failed
//! decode means the storage is corrupted and the operation panics with the
//! error's message.

use std::str::Utf8Error;

/// Failure to decode a single UTF-8 character from the buffer storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The byte at `offset` cannot start a UTF-8 sequence.
    #[error("byte {byte:#04x} at offset {offset} is not a UTF-8 lead byte")]
    InvalidLeadByte { offset: usize, byte: u8 },

    /// The sequence starting at `offset` runs past the end of its region.
    #[error("UTF-8 sequence at offset {offset} is truncated")]
    Truncated { offset: usize },

    /// The sequence starting at `offset` has the right length but is invalid.
    #[error("malformed UTF-8 sequence at offset {offset}")]
    Malformed {
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    /// No lead byte was found within four bytes before `offset`.
    #[error("no character ends at offset {offset}")]
    NoCharacterBefore { offset: usize },
}

/// Rejected [`BufferConfig`](crate::BufferConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("line capacity divisor must be at least 1")]
    ZeroLineCapacityDivisor,

    #[error("minimum line slot count must be at least 1")]
    ZeroMinLineSlots,

    #[error("growth factor must be at least 2, got {0}")]
    GrowthFactorTooSmall(usize),
}
