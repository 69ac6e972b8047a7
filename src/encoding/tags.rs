//! Tag catalog and wire constants.
//!
//! Every encoded value starts with a one-byte tag. Ranges are inclusive:
//!
//! | Range         | Kind                                              |
//! |---------------|---------------------------------------------------|
//! | `0x00..=0x03` | nil, false, true, numeric zero                    |
//! | `0x10..=0x4F` | immediate integer, ZigZag slot in the tag         |
//! | `0x50..=0x53` | fixed-width number (`u8`, `i16`, `i32`, `f64`)    |
//! | `0x60..=0x8F` | immediate string, length in the tag (0..=47)      |
//! | `0x90..=0x92` | variable / interned / referenced string           |
//! | `0xA0..=0xA2` | array, map, sparse array                          |
//! | `0xB0..=0xBC` | engine catalog                                    |
//! | `0xF0`        | raw byte buffer                                   |
//!
//! All other tag bytes are reserved; decoding one is an error.

/// Wire format version; the first byte of every payload.
pub(crate) const VERSION: u8 = 2;

pub(crate) const NIL: u8 = 0x00;
pub(crate) const FALSE: u8 = 0x01;
pub(crate) const TRUE: u8 = 0x02;
pub(crate) const ZERO: u8 = 0x03;

/// First immediate-integer tag; the ZigZag slot is `tag - INT_BASE`.
pub(crate) const INT_BASE: u8 = 0x10;
/// Smallest integer an immediate tag can hold.
pub(crate) const INT_MIN: i64 = -32;
/// Largest integer an immediate tag can hold.
pub(crate) const INT_MAX: i64 = 31;

pub(crate) const U8: u8 = 0x50;
pub(crate) const I16: u8 = 0x51;
pub(crate) const I32: u8 = 0x52;
pub(crate) const F64: u8 = 0x53;

/// First immediate-string tag; the byte length is `tag - STR_BASE`.
pub(crate) const STR_BASE: u8 = 0x60;
/// Longest string an immediate tag can describe.
pub(crate) const STR_IMMEDIATE_MAX: usize = 47;

pub(crate) const STR_VAR: u8 = 0x90;
pub(crate) const STR_NEW: u8 = 0x91;
pub(crate) const STR_REF: u8 = 0x92;

pub(crate) const ARRAY: u8 = 0xA0;
pub(crate) const MAP: u8 = 0xA1;
pub(crate) const SPARSE: u8 = 0xA2;

pub(crate) const VECTOR2: u8 = 0xB0;
pub(crate) const VECTOR3: u8 = 0xB1;
pub(crate) const CFRAME: u8 = 0xB2;
pub(crate) const COLOR3: u8 = 0xB3;
pub(crate) const BRICK_COLOR: u8 = 0xB4;
pub(crate) const UDIM: u8 = 0xB5;
pub(crate) const UDIM2: u8 = 0xB6;
pub(crate) const ENUM_ITEM: u8 = 0xB7;
pub(crate) const RECT: u8 = 0xB8;
pub(crate) const NUMBER_RANGE: u8 = 0xB9;
pub(crate) const NUMBER_SEQUENCE: u8 = 0xBA;
pub(crate) const COLOR_SEQUENCE: u8 = 0xBB;
pub(crate) const DATE_TIME: u8 = 0xBC;

pub(crate) const BUFFER: u8 = 0xF0;

/// Maximum nesting depth of a value graph, enforced on both ends.
pub(crate) const MAX_DEPTH: usize = 64;
/// Maximum number of visited items per pack call.
pub(crate) const MAX_ITEMS: usize = 1_000_000;

/// Integer-keyed tables denser than this ratio use the map layout.
pub(crate) const SPARSE_MAX_DENSITY: f64 = 0.5;
