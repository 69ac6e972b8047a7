//! Tag-dispatched decoder with per-read bounds validation.
//!
//! Decoding is a recursive descent keyed entirely by the next tag byte.
//! Every reader validates that its bytes exist before touching them, so
//! truncated or corrupted payloads produce errors instead of panics.
//! Interned strings are appended to the pool before the value is returned,
//! so a reference can never observe a half-defined table.

use crate::encoding::intern::StringPool;
use crate::encoding::{tags, varint};
use crate::error::DecodeError;
use crate::geometry::{
    CFrame, Color3, ColorSequence, ColorSequenceKeypoint, EnumItem, NumberRange, NumberSequence,
    NumberSequenceKeypoint, Quaternion, Rect, UDim, UDim2, Vector2, Vector3,
};
use crate::value::{Table, Value};

/// Reconstructs the value graph from a full payload, version byte included.
pub(crate) fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u8()?;
    if version != tags::VERSION {
        return Err(DecodeError::VersionMismatch { expected: tags::VERSION, actual: version });
    }

    let mut pool = StringPool::default();
    let value = read_value(&mut reader, &mut pool, 0)?;

    let remaining = reader.remaining();
    if remaining != 0 {
        return Err(DecodeError::TrailingBytes { count: remaining });
    }
    Ok(value)
}

/// Cursor over the payload with bounds-checked reads.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Takes the next `n` bytes, or fails with a truncation error.
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::UnexpectedEof { offset: self.pos });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let slice = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    fn read_varint(&mut self) -> Result<u64, DecodeError> {
        varint::read_varint(self.buf, &mut self.pos)
    }

    /// Reads a varint that counts bytes or elements still to come.
    ///
    /// Each counted unit occupies at least one byte, so a count beyond the
    /// remaining input is already a truncation; rejecting it here also keeps
    /// hostile length headers from driving huge allocations.
    fn read_count(&mut self) -> Result<usize, DecodeError> {
        let n = self.read_varint()?;
        if n > self.remaining() as u64 {
            return Err(DecodeError::UnexpectedEof { offset: self.pos });
        }
        Ok(n as usize)
    }
}

/// Reads one value, dispatching on its tag byte.
fn read_value(
    reader: &mut Reader<'_>,
    pool: &mut StringPool,
    depth: usize,
) -> Result<Value, DecodeError> {
    if depth > tags::MAX_DEPTH {
        return Err(DecodeError::TooDeep { limit: tags::MAX_DEPTH });
    }
    let tag_offset = reader.position();
    let tag = reader.read_u8()?;

    match tag {
        tags::NIL => Ok(Value::Nil),
        tags::FALSE => Ok(Value::Bool(false)),
        tags::TRUE => Ok(Value::Bool(true)),
        tags::ZERO => Ok(Value::Number(0.0)),

        0x10..=0x4F => {
            let slot = u64::from(tag - tags::INT_BASE);
            Ok(Value::Number(varint::unzigzag(slot) as f64))
        }
        tags::U8 => Ok(Value::Number(f64::from(reader.read_u8()?))),
        tags::I16 => Ok(Value::Number(f64::from(reader.read_i16()?))),
        tags::I32 => Ok(Value::Number(f64::from(reader.read_i32()?))),
        tags::F64 => Ok(Value::Number(reader.read_f64()?)),

        0x60..=0x8F | tags::STR_VAR | tags::STR_NEW | tags::STR_REF => {
            read_string_payload(reader, pool, tag).map(Value::Str)
        }

        tags::ARRAY => {
            let len = reader.read_count()?;
            let mut table = Table::with_capacity(len);
            for i in 0..len {
                let child = read_value(reader, pool, depth + 1)?;
                table.push(Value::Number((i + 1) as f64), child);
            }
            Ok(Value::Table(table))
        }
        tags::MAP | tags::SPARSE => {
            let len = reader.read_count()?;
            let mut table = Table::with_capacity(len);
            for _ in 0..len {
                let key = read_value(reader, pool, depth + 1)?;
                let child = read_value(reader, pool, depth + 1)?;
                table.push(key, child);
            }
            Ok(Value::Table(table))
        }

        tags::VECTOR2 => Ok(Value::Vector2(read_vector2(reader)?)),
        tags::VECTOR3 => Ok(Value::Vector3(read_vector3(reader)?)),
        tags::CFRAME => {
            let position = read_vector3(reader)?;
            let rotation = Quaternion::new(
                reader.read_f32()?,
                reader.read_f32()?,
                reader.read_f32()?,
                reader.read_f32()?,
            );
            Ok(Value::CFrame(CFrame::new(position, rotation)))
        }
        tags::COLOR3 => Ok(Value::Color3(read_color3(reader)?)),
        tags::BRICK_COLOR => Ok(Value::BrickColor(reader.read_u16()?)),
        tags::UDIM => Ok(Value::UDim(read_udim(reader)?)),
        tags::UDIM2 => {
            let x = read_udim(reader)?;
            let y = read_udim(reader)?;
            Ok(Value::UDim2(UDim2 { x, y }))
        }
        tags::ENUM_ITEM => {
            let class = read_string(reader, pool)?;
            let name = read_string(reader, pool)?;
            Ok(Value::EnumItem(EnumItem { class, name }))
        }
        tags::RECT => {
            let min = read_vector2(reader)?;
            let max = read_vector2(reader)?;
            Ok(Value::Rect(Rect::new(min, max)))
        }
        tags::NUMBER_RANGE => {
            let min = reader.read_f32()?;
            let max = reader.read_f32()?;
            Ok(Value::NumberRange(NumberRange::new(min, max)))
        }
        tags::NUMBER_SEQUENCE => {
            let count = usize::from(reader.read_u16()?);
            let mut keypoints = Vec::with_capacity(count);
            for _ in 0..count {
                let time = reader.read_f32()?;
                let value = reader.read_f32()?;
                let envelope = reader.read_f32()?;
                keypoints.push(NumberSequenceKeypoint { time, value, envelope });
            }
            Ok(Value::NumberSequence(NumberSequence::new(keypoints)))
        }
        tags::COLOR_SEQUENCE => {
            let count = usize::from(reader.read_u16()?);
            let mut keypoints = Vec::with_capacity(count);
            for _ in 0..count {
                let time = reader.read_f32()?;
                let color = read_color3(reader)?;
                let interpolation = reader.read_u8()?;
                keypoints.push(ColorSequenceKeypoint { time, color, interpolation });
            }
            Ok(Value::ColorSequence(ColorSequence::new(keypoints)))
        }
        tags::DATE_TIME => Ok(Value::DateTime(reader.read_i64()?)),

        tags::BUFFER => {
            let len = reader.read_count()?;
            Ok(Value::Buffer(reader.take(len)?.to_vec()))
        }

        _ => Err(DecodeError::InvalidTag { tag, offset: tag_offset }),
    }
}

/// Reads a value that must be a string, as inside an enum item.
fn read_string(reader: &mut Reader<'_>, pool: &mut StringPool) -> Result<Vec<u8>, DecodeError> {
    let tag_offset = reader.position();
    let tag = reader.read_u8()?;
    match tag {
        0x60..=0x8F | tags::STR_VAR | tags::STR_NEW | tags::STR_REF => {
            read_string_payload(reader, pool, tag)
        }
        _ => Err(DecodeError::InvalidTag { tag, offset: tag_offset }),
    }
}

/// Reads the payload of a string whose tag byte has been consumed.
fn read_string_payload(
    reader: &mut Reader<'_>,
    pool: &mut StringPool,
    tag: u8,
) -> Result<Vec<u8>, DecodeError> {
    match tag {
        0x60..=0x8F => {
            let len = usize::from(tag - tags::STR_BASE);
            Ok(reader.take(len)?.to_vec())
        }
        tags::STR_VAR => {
            let len = reader.read_count()?;
            Ok(reader.take(len)?.to_vec())
        }
        tags::STR_NEW => {
            let len = reader.read_count()?;
            let bytes = reader.take(len)?.to_vec();
            pool.push(bytes.clone());
            Ok(bytes)
        }
        tags::STR_REF => {
            let id = reader.read_varint()?;
            Ok(pool.resolve(id)?.to_vec())
        }
        _ => Err(DecodeError::InvalidTag { tag, offset: reader.position() }),
    }
}

fn read_vector2(reader: &mut Reader<'_>) -> Result<Vector2, DecodeError> {
    let x = reader.read_f32()?;
    let y = reader.read_f32()?;
    Ok(Vector2::new(x, y))
}

fn read_vector3(reader: &mut Reader<'_>) -> Result<Vector3, DecodeError> {
    let x = reader.read_f32()?;
    let y = reader.read_f32()?;
    let z = reader.read_f32()?;
    Ok(Vector3::new(x, y, z))
}

fn read_color3(reader: &mut Reader<'_>) -> Result<Color3, DecodeError> {
    let r = reader.read_f32()?;
    let g = reader.read_f32()?;
    let b = reader.read_f32()?;
    Ok(Color3::new(r, g, b))
}

fn read_udim(reader: &mut Reader<'_>) -> Result<UDim, DecodeError> {
    let scale = reader.read_f32()?;
    let offset = reader.read_i32()?;
    Ok(UDim::new(scale, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert_eq!(decode(&[]).unwrap_err(), DecodeError::UnexpectedEof { offset: 0 });
    }

    #[test]
    fn rejects_wrong_version() {
        assert_eq!(
            decode(&[0x01, tags::NIL]).unwrap_err(),
            DecodeError::VersionMismatch { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn rejects_reserved_tags() {
        for tag in [0x04u8, 0x0F, 0x54, 0x93, 0xA3, 0xBD, 0xEF, 0xFF] {
            assert_eq!(
                decode(&[tags::VERSION, tag]).unwrap_err(),
                DecodeError::InvalidTag { tag, offset: 1 },
                "tag {tag:#04x}"
            );
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(
            decode(&[tags::VERSION, tags::NIL, 0x00]).unwrap_err(),
            DecodeError::TrailingBytes { count: 1 }
        );
    }

    #[test]
    fn rejects_dangling_string_reference() {
        assert_eq!(
            decode(&[tags::VERSION, tags::STR_REF, 0x00]).unwrap_err(),
            DecodeError::InvalidStringRef { index: 0, table_size: 0 }
        );
    }

    #[test]
    fn rejects_hostile_length_headers() {
        // STR_VAR claiming u32::MAX bytes with only a handful present.
        let payload = [tags::VERSION, tags::STR_VAR, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0x00, 0x00];
        assert!(matches!(
            decode(&payload).unwrap_err(),
            DecodeError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn rejects_runaway_nesting() {
        // One array of one element per level, nested past the depth limit.
        let mut payload = vec![tags::VERSION];
        for _ in 0..80 {
            payload.extend_from_slice(&[tags::ARRAY, 0x01]);
        }
        payload.push(tags::NIL);
        assert_eq!(
            decode(&payload).unwrap_err(),
            DecodeError::TooDeep { limit: tags::MAX_DEPTH }
        );
    }

    #[test]
    fn enum_item_requires_string_payloads() {
        let payload = [tags::VERSION, tags::ENUM_ITEM, tags::ZERO, tags::ZERO];
        assert_eq!(
            decode(&payload).unwrap_err(),
            DecodeError::InvalidTag { tag: tags::ZERO, offset: 2 }
        );
    }

    #[test]
    fn immediate_integers_cover_the_zigzag_range() {
        for (tag, expected) in [(0x10u8, 0.0), (0x11, -1.0), (0x12, 1.0), (0x4E, 31.0), (0x4F, -32.0)]
        {
            assert_eq!(decode(&[tags::VERSION, tag]).unwrap(), Value::Number(expected));
        }
    }
}
