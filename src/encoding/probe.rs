//! Probe pass: classification, exact sizing, and decision recording.
//!
//! Packing runs in two read-only traversals before any output byte exists.
//! The scan pass enforces the depth and item limits and counts string
//! occurrences, so the probe can tell singletons from repeated strings. The
//! probe then classifies every value, computes the exact output byte count,
//! and appends one [`Decision`] per classification. The encoder replays
//! those decisions verbatim, which is what makes the sizing pass and the
//! writing pass incapable of disagreeing.

use crate::encoding::intern::{Interner, StrClass};
use crate::encoding::{tags, varint};
use crate::error::EncodeError;
use crate::geometry::{
    CFrame, Color3, ColorSequenceKeypoint, NumberRange, NumberSequenceKeypoint, Rect, UDim, UDim2,
    Vector2, Vector3,
};
use crate::value::{Table, Value};

/// Largest integer a double can represent exactly (2^53).
const MAX_SAFE_INT: f64 = 9_007_199_254_740_992.0;

/// One classification made by the probe, replayed verbatim by the encoder.
///
/// String and buffer payloads are borrowed slices held in [`EncodePlan`]
/// side tables, referenced here by index, so the stack itself is plain data
/// and its allocation survives across pack calls.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Decision {
    Nil,
    True,
    False,
    Zero,
    /// ZigZag slot in `0..=63`, stored in the tag byte itself.
    IntImmediate(u8),
    U8(u8),
    I16(i16),
    I32(i32),
    F64(f64),
    /// Inline string of at most 47 bytes; chunk index.
    StrImmediate(u32),
    /// Length-prefixed singleton string; chunk index.
    StrVar(u32),
    /// Intern definition; chunk index. Ids are implicit in replay order.
    StrNew(u32),
    /// Intern reference by id.
    StrRef(u32),
    /// Raw byte buffer; chunk index.
    Buffer(u32),
    /// Array of `n` values; the next `n` decisions are its elements.
    Array(u32),
    /// Sparse array of `n` pairs; the next `2n` decisions alternate key, value.
    Sparse(u32),
    /// Map of `n` pairs; the next `2n` decisions alternate key, value.
    Map(u32),
    Vector2(Vector2),
    Vector3(Vector3),
    CFrame(CFrame),
    Color3(Color3),
    BrickColor(u16),
    UDim(UDim),
    UDim2(UDim2),
    Rect(Rect),
    NumberRange(NumberRange),
    /// Index into the number-sequence side table.
    NumberSequence(u32),
    /// Index into the color-sequence side table.
    ColorSequence(u32),
    DateTime(i64),
    /// The next two decisions are the class and name strings.
    EnumItem,
}

/// Everything the encoder needs to replay one pack call.
#[derive(Debug)]
pub(crate) struct EncodePlan<'v, 's> {
    /// Exact output size in bytes, version byte included.
    pub(crate) size: usize,
    /// Decisions in traversal order.
    pub(crate) decisions: &'s [Decision],
    /// String and buffer payloads referenced by chunk index.
    pub(crate) chunks: Vec<&'v [u8]>,
    /// Number-sequence keypoint slices referenced by index.
    pub(crate) number_seqs: Vec<&'v [NumberSequenceKeypoint]>,
    /// Color-sequence keypoint slices referenced by index.
    pub(crate) color_seqs: Vec<&'v [ColorSequenceKeypoint]>,
}

/// Classifies and sizes `value`, recording decisions into `stack`.
///
/// The stack is cleared first; its allocation is reused across calls.
pub(crate) fn probe<'v, 's>(
    value: &'v Value,
    stack: &'s mut Vec<Decision>,
) -> Result<EncodePlan<'v, 's>, EncodeError> {
    let mut interner = Interner::new();
    let mut items = 0usize;
    scan(value, 0, &mut items, &mut interner)?;

    stack.clear();
    let mut probe = Probe {
        stack,
        chunks: Vec::new(),
        number_seqs: Vec::new(),
        color_seqs: Vec::new(),
        interner,
    };
    let size = 1 + probe.value(value)?;
    let Probe { stack, chunks, number_seqs, color_seqs, .. } = probe;
    Ok(EncodePlan { size, decisions: stack.as_slice(), chunks, number_seqs, color_seqs })
}

/// Limit enforcement and string frequency counting, ahead of the probe.
///
/// Runs before anything is allocated for the output, so limit violations
/// abort the call with no side effects.
fn scan<'v>(
    value: &'v Value,
    depth: usize,
    items: &mut usize,
    interner: &mut Interner<'v>,
) -> Result<(), EncodeError> {
    if depth > tags::MAX_DEPTH {
        return Err(EncodeError::TooDeep { limit: tags::MAX_DEPTH });
    }
    *items += 1;
    if *items > tags::MAX_ITEMS {
        return Err(EncodeError::TooManyItems { limit: tags::MAX_ITEMS });
    }
    match value {
        Value::Str(s) => interner.record(s),
        Value::EnumItem(item) => {
            interner.record(&item.class);
            interner.record(&item.name);
        }
        Value::Table(table) => {
            for (key, child) in table.iter() {
                *items += 1;
                match key {
                    Value::Number(_) => {}
                    Value::Str(s) => interner.record(s),
                    other => return Err(EncodeError::UnsupportedKey { kind: other.kind() }),
                }
                scan(child, depth + 1, items, interner)?;
            }
        }
        _ => {}
    }
    Ok(())
}

struct Probe<'v, 's> {
    stack: &'s mut Vec<Decision>,
    chunks: Vec<&'v [u8]>,
    number_seqs: Vec<&'v [NumberSequenceKeypoint]>,
    color_seqs: Vec<&'v [ColorSequenceKeypoint]>,
    interner: Interner<'v>,
}

impl<'v> Probe<'v, '_> {
    fn chunk(&mut self, bytes: &'v [u8]) -> u32 {
        let index = self.chunks.len() as u32;
        self.chunks.push(bytes);
        index
    }

    /// Classifies one value; returns its exact encoded size in bytes.
    fn value(&mut self, value: &'v Value) -> Result<usize, EncodeError> {
        match value {
            Value::Nil => {
                self.stack.push(Decision::Nil);
                Ok(1)
            }
            Value::Bool(true) => {
                self.stack.push(Decision::True);
                Ok(1)
            }
            Value::Bool(false) => {
                self.stack.push(Decision::False);
                Ok(1)
            }
            Value::Number(n) => Ok(self.number(*n)),
            Value::Str(s) => Ok(self.string(s)),
            Value::Buffer(bytes) => {
                let index = self.chunk(bytes);
                self.stack.push(Decision::Buffer(index));
                Ok(1 + varint::varint_len(bytes.len() as u64) + bytes.len())
            }
            Value::Table(table) => self.table(table),
            Value::Vector2(v) => {
                self.stack.push(Decision::Vector2(*v));
                Ok(1 + 8)
            }
            Value::Vector3(v) => {
                self.stack.push(Decision::Vector3(*v));
                Ok(1 + 12)
            }
            Value::CFrame(frame) => {
                self.stack.push(Decision::CFrame(*frame));
                Ok(1 + 28)
            }
            Value::Color3(color) => {
                self.stack.push(Decision::Color3(*color));
                Ok(1 + 12)
            }
            Value::BrickColor(index) => {
                self.stack.push(Decision::BrickColor(*index));
                Ok(1 + 2)
            }
            Value::UDim(dim) => {
                self.stack.push(Decision::UDim(*dim));
                Ok(1 + 8)
            }
            Value::UDim2(dim) => {
                self.stack.push(Decision::UDim2(*dim));
                Ok(1 + 16)
            }
            Value::Rect(rect) => {
                self.stack.push(Decision::Rect(*rect));
                Ok(1 + 16)
            }
            Value::NumberRange(range) => {
                self.stack.push(Decision::NumberRange(*range));
                Ok(1 + 8)
            }
            Value::NumberSequence(seq) => {
                let count = seq.keypoints.len();
                if count > usize::from(u16::MAX) {
                    return Err(EncodeError::Overflow {
                        value: count as u64,
                        max: u64::from(u16::MAX),
                    });
                }
                let index = self.number_seqs.len() as u32;
                self.number_seqs.push(&seq.keypoints);
                self.stack.push(Decision::NumberSequence(index));
                Ok(1 + 2 + count * 12)
            }
            Value::ColorSequence(seq) => {
                let count = seq.keypoints.len();
                if count > usize::from(u16::MAX) {
                    return Err(EncodeError::Overflow {
                        value: count as u64,
                        max: u64::from(u16::MAX),
                    });
                }
                let index = self.color_seqs.len() as u32;
                self.color_seqs.push(&seq.keypoints);
                self.stack.push(Decision::ColorSequence(index));
                Ok(1 + 2 + count * 17)
            }
            Value::DateTime(millis) => {
                self.stack.push(Decision::DateTime(*millis));
                Ok(1 + 8)
            }
            Value::EnumItem(item) => {
                self.stack.push(Decision::EnumItem);
                let class = self.string(&item.class);
                let name = self.string(&item.name);
                Ok(1 + class + name)
            }
        }
    }

    /// Picks the narrowest wire form for a number.
    fn number(&mut self, n: f64) -> usize {
        if n == 0.0 {
            // Negative zero keeps its sign bit only in the f64 form.
            if n.is_sign_positive() {
                self.stack.push(Decision::Zero);
                return 1;
            }
            self.stack.push(Decision::F64(n));
            return 9;
        }
        match exact_int(n) {
            Some(i) if (tags::INT_MIN..=tags::INT_MAX).contains(&i) => {
                self.stack.push(Decision::IntImmediate(varint::zigzag(i) as u8));
                1
            }
            Some(i) if (0..=255).contains(&i) => {
                self.stack.push(Decision::U8(i as u8));
                2
            }
            Some(i) if (-32_768..=32_767).contains(&i) => {
                self.stack.push(Decision::I16(i as i16));
                3
            }
            Some(i) if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&i) => {
                self.stack.push(Decision::I32(i as i32));
                5
            }
            _ => {
                self.stack.push(Decision::F64(n));
                9
            }
        }
    }

    fn string(&mut self, s: &'v [u8]) -> usize {
        match self.interner.classify(s) {
            StrClass::Ref(id) => {
                self.stack.push(Decision::StrRef(id));
                1 + varint::varint_len(u64::from(id))
            }
            StrClass::New(_) => {
                let index = self.chunk(s);
                self.stack.push(Decision::StrNew(index));
                1 + varint::varint_len(s.len() as u64) + s.len()
            }
            StrClass::Single => {
                let index = self.chunk(s);
                if s.len() <= tags::STR_IMMEDIATE_MAX {
                    self.stack.push(Decision::StrImmediate(index));
                    1 + s.len()
                } else {
                    self.stack.push(Decision::StrVar(index));
                    1 + varint::varint_len(s.len() as u64) + s.len()
                }
            }
        }
    }

    /// Classifies a table's layout and sizes it with its children.
    fn table(&mut self, table: &'v Table) -> Result<usize, EncodeError> {
        let len = table.len();
        if len == 0 {
            self.stack.push(Decision::Map(0));
            return Ok(1 + varint::varint_len(0));
        }

        if is_array_shaped(table) {
            self.stack.push(Decision::Array(len as u32));
            let mut size = 1 + varint::varint_len(len as u64);
            for (_, child) in table.iter() {
                size += self.value(child)?;
            }
            return Ok(size);
        }

        self.stack.push(if is_sparse_shaped(table) {
            Decision::Sparse(len as u32)
        } else {
            Decision::Map(len as u32)
        });
        let mut size = 1 + varint::varint_len(len as u64);
        for (key, child) in table.iter() {
            size += self.key(key)?;
            size += self.value(child)?;
        }
        Ok(size)
    }

    fn key(&mut self, key: &'v Value) -> Result<usize, EncodeError> {
        match key {
            Value::Number(n) => Ok(self.number(*n)),
            Value::Str(s) => Ok(self.string(s)),
            other => Err(EncodeError::UnsupportedKey { kind: other.kind() }),
        }
    }
}

/// `n` as an exact integer, if it is one within the safe range.
///
/// NaN, infinities, fractional values, and magnitudes past 2^53 are not
/// integers for classification purposes.
fn exact_int(n: f64) -> Option<i64> {
    if n.is_finite() && n.trunc() == n && n.abs() <= MAX_SAFE_INT {
        Some(n as i64)
    } else {
        None
    }
}

/// True if the keys are exactly `1, 2, .., len` in entry order.
fn is_array_shaped(table: &Table) -> bool {
    table
        .iter()
        .enumerate()
        .all(|(i, (key, _))| matches!(key, Value::Number(n) if *n == (i + 1) as f64))
}

/// True if every key is an integer and the keys cover their range thinly.
fn is_sparse_shaped(table: &Table) -> bool {
    let mut max_key = i64::MIN;
    for (key, _) in table.iter() {
        match key {
            Value::Number(n) => match exact_int(*n) {
                Some(i) => max_key = max_key.max(i),
                None => return false,
            },
            _ => return false,
        }
    }
    max_key >= 1 && (table.len() as f64) / (max_key as f64) < tags::SPARSE_MAX_DENSITY
}
