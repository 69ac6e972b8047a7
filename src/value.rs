//! Dynamic values the serializer understands.
//!
//! [`Value`] is a tagged sum over the primitives, strings, tables, byte
//! buffers, and the fixed engine catalog the wire format carries. Strings are
//! byte sequences and need not be valid UTF-8.
//!
//! # Example
//!
//! ```
//! use valpak::{Table, Value};
//!
//! let mut settings = Table::new();
//! settings.insert("volume", 0.8);
//! settings.insert("muted", false);
//!
//! let value = Value::Table(settings);
//! assert_eq!(value.kind(), "table");
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{
    CFrame, Color3, ColorSequence, EnumItem, NumberRange, NumberSequence, Rect, UDim, UDim2,
    Vector2, Vector3,
};

/// A dynamically-typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A byte string, not necessarily UTF-8.
    Str(Vec<u8>),
    /// An opaque byte buffer.
    Buffer(Vec<u8>),
    /// A table of key/value pairs.
    Table(Table),
    /// A 2D vector.
    Vector2(Vector2),
    /// A 3D vector.
    Vector3(Vector3),
    /// A coordinate frame.
    CFrame(CFrame),
    /// An RGB color.
    Color3(Color3),
    /// A palette color index.
    BrickColor(u16),
    /// A UI dimension.
    UDim(UDim),
    /// A 2D UI dimension.
    UDim2(UDim2),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A numeric interval.
    NumberRange(NumberRange),
    /// A numeric curve.
    NumberSequence(NumberSequence),
    /// A color gradient.
    ColorSequence(ColorSequence),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
    /// A named enum member.
    EnumItem(EnumItem),
}

impl Value {
    /// Returns `true` if the value is nil.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a number if it is one.
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as string bytes if it is a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&[u8]> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a table if it is one.
    #[inline]
    #[must_use]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Human-readable kind name, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Buffer(_) => "buffer",
            Self::Table(_) => "table",
            Self::Vector2(_) => "Vector2",
            Self::Vector3(_) => "Vector3",
            Self::CFrame(_) => "CFrame",
            Self::Color3(_) => "Color3",
            Self::BrickColor(_) => "BrickColor",
            Self::UDim(_) => "UDim",
            Self::UDim2(_) => "UDim2",
            Self::Rect(_) => "Rect",
            Self::NumberRange(_) => "NumberRange",
            Self::NumberSequence(_) => "NumberSequence",
            Self::ColorSequence(_) => "ColorSequence",
            Self::DateTime(_) => "DateTime",
            Self::EnumItem(_) => "EnumItem",
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Str(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::Str(s.into_bytes())
    }
}

impl From<Table> for Value {
    #[inline]
    fn from(t: Table) -> Self {
        Self::Table(t)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(values: Vec<Value>) -> Self {
        Self::Table(Table::from(values))
    }
}

/// A table of key/value pairs in insertion order.
///
/// Keys are restricted to numbers and strings; other key kinds are rejected
/// when the table is packed. Equality is order-insensitive, since map-shaped
/// tables carry no ordering guarantee on the wire. Array-shaped tables (keys
/// exactly `1..=n` in order) keep their index order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    entries: Vec<(Value, Value)>,
}

impl Table {
    /// Creates an empty table.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates an empty table with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a key/value pair, replacing the value of an equal key.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Appends an entry without checking for an existing equal key.
    ///
    /// Decoded layouts cannot contain duplicate keys, so the decoder skips
    /// the replace scan.
    #[inline]
    pub(crate) fn push(&mut self, key: Value, value: Value) {
        self.entries.push((key, value));
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl From<Vec<Value>> for Table {
    fn from(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Value::Number((i + 1) as f64), v))
            .collect();
        Self { entries }
    }
}

impl FromIterator<(Value, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}
