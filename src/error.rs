//! Error types for packing and unpacking value graphs.

use thiserror::Error;

/// Errors produced while packing a value graph.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A table key was neither a number nor a string.
    #[error("unsupported table key kind: {kind}")]
    UnsupportedKey {
        /// Kind name of the offending key.
        kind: &'static str,
    },

    /// Value graph nests deeper than the serializer allows.
    #[error("nesting depth exceeds the limit of {limit}")]
    TooDeep {
        /// Maximum permitted nesting depth.
        limit: usize,
    },

    /// Value graph contains more items than the serializer allows.
    #[error("value count exceeds the limit of {limit}")]
    TooManyItems {
        /// Maximum permitted item count.
        limit: usize,
    },

    /// A count was too large for its wire representation.
    #[error("value too large: {value} exceeds maximum {max}")]
    Overflow {
        /// The count that did not fit.
        value: u64,
        /// Largest count the wire format can carry.
        max: u64,
    },

    /// The decision stack and the writer disagreed during replay.
    ///
    /// Indicates a bug in the probe or the encoder; never fires on valid input.
    #[error("decision stack and encoder diverged during replay")]
    DecisionMismatch,

    /// The writer produced a different byte count than the probe sized.
    ///
    /// Indicates a bug in the probe or the encoder; never fires on valid input.
    #[error("probe sized {probed} bytes but encoder wrote {written}")]
    SizeDivergence {
        /// Byte count the probe computed.
        probed: usize,
        /// Byte count the encoder actually wrote.
        written: usize,
    },
}

/// Errors produced while unpacking a payload.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload was produced by an incompatible format version.
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build understands.
        expected: u8,
        /// Version byte found in the payload.
        actual: u8,
    },

    /// A read would run past the end of the payload.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof {
        /// Offset at which the read was attempted.
        offset: usize,
    },

    /// A tag byte has no assigned meaning.
    #[error("invalid tag byte {tag:#04x} at offset {offset}")]
    InvalidTag {
        /// The unassigned tag byte.
        tag: u8,
        /// Offset of the tag byte.
        offset: usize,
    },

    /// A string reference pointed past the end of the intern table.
    #[error("invalid string reference: {index} >= {table_size}")]
    InvalidStringRef {
        /// The referenced id.
        index: u64,
        /// Number of strings defined so far.
        table_size: usize,
    },

    /// A varint had a continuation bit set on its final permitted byte.
    #[error("invalid varint encoding")]
    InvalidVarint,

    /// A varint encoded a value wider than 64 bits.
    #[error("varint overflow: value exceeds 64 bits")]
    VarintOverflow,

    /// Bytes remained after the single top-level value.
    #[error("{count} trailing bytes after the top-level value")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        count: usize,
    },

    /// The payload nests deeper than the serializer allows.
    #[error("nesting depth exceeds the limit of {limit}")]
    TooDeep {
        /// Maximum permitted nesting depth.
        limit: usize,
    },
}
