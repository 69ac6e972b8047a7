//! Public entry points for packing and unpacking value graphs.

use std::cell::RefCell;

use tracing::{debug, trace};

use crate::encoding::probe::Decision;
use crate::encoding::{decoder, encoder, probe, tags};
use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// Wire format version; the first byte of every payload.
pub const VERSION: u8 = tags::VERSION;

/// Reusable packing state.
///
/// Owns the decision stack so repeated calls reuse its allocation instead of
/// growing a fresh one each time. A `Serializer` is single-threaded by
/// construction; [`compress`] keeps one per thread, and callers that want
/// parallel packing create one instance per thread themselves.
#[derive(Debug, Default)]
pub struct Serializer {
    decisions: Vec<Decision>,
}

impl Serializer {
    /// Creates a serializer with an empty decision stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Packs a value graph into a self-describing byte buffer.
    ///
    /// The returned payload starts with the [`VERSION`] byte. The result
    /// buffer is the only allocation sized to the output; it is allocated
    /// exactly once, to the byte count the probe computed.
    ///
    /// # Errors
    ///
    /// Fails if a table key is neither a number nor a string, or if the
    /// graph exceeds the depth or item limits. Nothing is written on failure.
    pub fn compress(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let plan = probe::probe(value, &mut self.decisions)?;
        trace!("probe sized {} bytes across {} decisions", plan.size, plan.decisions.len());
        let bytes = encoder::encode(&plan)?;
        debug!("compressed {} graph into {} bytes", value.kind(), bytes.len());
        Ok(bytes)
    }
}

thread_local! {
    static SCRATCH: RefCell<Serializer> = RefCell::new(Serializer::new());
}

/// Packs a value graph using the calling thread's serializer.
///
/// # Errors
///
/// See [`Serializer::compress`].
pub fn compress(value: &Value) -> Result<Vec<u8>, EncodeError> {
    SCRATCH.with(|scratch| scratch.borrow_mut().compress(value))
}

/// Reconstructs a value graph from a payload produced by [`compress`].
///
/// # Errors
///
/// Fails on a version mismatch, a truncated payload, an unassigned tag
/// byte, a dangling string reference, or trailing bytes after the single
/// top-level value.
pub fn decompress(bytes: &[u8]) -> Result<Value, DecodeError> {
    let value = decoder::decode(bytes)?;
    debug!("decompressed {} bytes into a {} value", bytes.len(), value.kind());
    Ok(value)
}
