//! valpak: compact self-describing binary serialization for dynamic engine values.
//!
//! Packs a dynamically-typed value graph (primitives, byte strings,
//! heterogeneous tables, opaque buffers, and a fixed catalog of engine
//! geometry/color/time values) into a single contiguous byte buffer, and
//! reconstructs the graph from that buffer.
//!
//! # Design
//!
//! Packing separates measuring from writing. A probe traversal classifies
//! every value, computes the exact output size, and logs each classification
//! on a decision stack; the encoder then allocates the result buffer exactly
//! once and replays the stack into bytes. Because the writer only ever
//! replays recorded decisions, the sizing pass and the writing pass cannot
//! disagree about anything, interning choices included. Decoding is a
//! tag-dispatched recursive descent with bounds validation on every read.
//!
//! Numbers are narrowed to the smallest wire form that holds them exactly,
//! strings repeated within one payload are interned and referenced by id,
//! and array-shaped tables drop their keys entirely.
//!
//! # Example
//!
//! ```
//! use valpak::{compress, decompress, Table, Value};
//!
//! let mut profile = Table::new();
//! profile.insert("name", "ada");
//! profile.insert("level", 42);
//! profile.insert("scores", Value::from(vec![Value::from(10), Value::from(12)]));
//!
//! let payload = compress(&Value::Table(profile.clone())).unwrap();
//! assert_eq!(decompress(&payload).unwrap(), Value::Table(profile));
//! ```
//!
//! # Limits
//!
//! Graphs may nest at most 64 levels deep and contain at most one million
//! items; both limits are checked before any output is allocated. Values
//! outside the supported catalog are rejected, never silently dropped.

mod api;
mod encoding;
mod error;
mod geometry;
mod value;

#[cfg(test)]
mod tests;

pub use api::{compress, decompress, Serializer, VERSION};
pub use error::{DecodeError, EncodeError};
pub use geometry::{
    CFrame, Color3, ColorSequence, ColorSequenceKeypoint, EnumItem, NumberRange, NumberSequence,
    NumberSequenceKeypoint, Quaternion, Rect, UDim, UDim2, Vector2, Vector3,
};
pub use value::{Table, Value};
