//! Replay encoder: writes bytes by consuming probe decisions in order.
//!
//! The writer allocates the output buffer exactly once, to the size the
//! probe computed, and then replays the decision stack. It never inspects
//! the original value graph and never re-classifies anything; a divergence
//! between the stack and the bytes written is surfaced as an internal
//! invariant error rather than papered over.

use crate::encoding::probe::{Decision, EncodePlan};
use crate::encoding::{tags, varint};
use crate::error::EncodeError;
use crate::geometry::{Color3, UDim, Vector2, Vector3};

/// Replays `plan` into a freshly allocated buffer of exactly `plan.size` bytes.
pub(crate) fn encode(plan: &EncodePlan<'_, '_>) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(plan.size);
    out.push(tags::VERSION);

    let mut cursor = 0usize;
    replay(plan, &mut cursor, &mut out)?;

    if cursor != plan.decisions.len() {
        return Err(EncodeError::DecisionMismatch);
    }
    if out.len() != plan.size {
        return Err(EncodeError::SizeDivergence { probed: plan.size, written: out.len() });
    }
    Ok(out)
}

/// Writes one value by consuming one decision plus any children it names.
fn replay(plan: &EncodePlan<'_, '_>, cursor: &mut usize, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let decision = *plan.decisions.get(*cursor).ok_or(EncodeError::DecisionMismatch)?;
    *cursor += 1;

    match decision {
        Decision::Nil => out.push(tags::NIL),
        Decision::True => out.push(tags::TRUE),
        Decision::False => out.push(tags::FALSE),
        Decision::Zero => out.push(tags::ZERO),
        Decision::IntImmediate(slot) => out.push(tags::INT_BASE + slot),
        Decision::U8(v) => {
            out.push(tags::U8);
            out.push(v);
        }
        Decision::I16(v) => {
            out.push(tags::I16);
            out.extend_from_slice(&v.to_le_bytes());
        }
        Decision::I32(v) => {
            out.push(tags::I32);
            out.extend_from_slice(&v.to_le_bytes());
        }
        Decision::F64(v) => {
            out.push(tags::F64);
            out.extend_from_slice(&v.to_le_bytes());
        }
        Decision::StrImmediate(index) => {
            let bytes = chunk(plan, index)?;
            out.push(tags::STR_BASE + bytes.len() as u8);
            out.extend_from_slice(bytes);
        }
        Decision::StrVar(index) => {
            let bytes = chunk(plan, index)?;
            out.push(tags::STR_VAR);
            varint::write_varint(out, bytes.len() as u64);
            out.extend_from_slice(bytes);
        }
        Decision::StrNew(index) => {
            let bytes = chunk(plan, index)?;
            out.push(tags::STR_NEW);
            varint::write_varint(out, bytes.len() as u64);
            out.extend_from_slice(bytes);
        }
        Decision::StrRef(id) => {
            out.push(tags::STR_REF);
            varint::write_varint(out, u64::from(id));
        }
        Decision::Buffer(index) => {
            let bytes = chunk(plan, index)?;
            out.push(tags::BUFFER);
            varint::write_varint(out, bytes.len() as u64);
            out.extend_from_slice(bytes);
        }
        Decision::Array(len) => {
            out.push(tags::ARRAY);
            varint::write_varint(out, u64::from(len));
            for _ in 0..len {
                replay(plan, cursor, out)?;
            }
        }
        Decision::Sparse(len) => {
            out.push(tags::SPARSE);
            varint::write_varint(out, u64::from(len));
            for _ in 0..2 * len {
                replay(plan, cursor, out)?;
            }
        }
        Decision::Map(len) => {
            out.push(tags::MAP);
            varint::write_varint(out, u64::from(len));
            for _ in 0..2 * len {
                replay(plan, cursor, out)?;
            }
        }
        Decision::Vector2(v) => {
            out.push(tags::VECTOR2);
            put_vector2(out, v);
        }
        Decision::Vector3(v) => {
            out.push(tags::VECTOR3);
            put_vector3(out, v);
        }
        Decision::CFrame(frame) => {
            out.push(tags::CFRAME);
            put_vector3(out, frame.position);
            put_f32(out, frame.rotation.x);
            put_f32(out, frame.rotation.y);
            put_f32(out, frame.rotation.z);
            put_f32(out, frame.rotation.w);
        }
        Decision::Color3(color) => {
            out.push(tags::COLOR3);
            put_color3(out, color);
        }
        Decision::BrickColor(index) => {
            out.push(tags::BRICK_COLOR);
            out.extend_from_slice(&index.to_le_bytes());
        }
        Decision::UDim(dim) => {
            out.push(tags::UDIM);
            put_udim(out, dim);
        }
        Decision::UDim2(dim) => {
            out.push(tags::UDIM2);
            put_udim(out, dim.x);
            put_udim(out, dim.y);
        }
        Decision::Rect(rect) => {
            out.push(tags::RECT);
            put_vector2(out, rect.min);
            put_vector2(out, rect.max);
        }
        Decision::NumberRange(range) => {
            out.push(tags::NUMBER_RANGE);
            put_f32(out, range.min);
            put_f32(out, range.max);
        }
        Decision::NumberSequence(index) => {
            let keypoints =
                plan.number_seqs.get(index as usize).ok_or(EncodeError::DecisionMismatch)?;
            out.push(tags::NUMBER_SEQUENCE);
            out.extend_from_slice(&(keypoints.len() as u16).to_le_bytes());
            for kp in *keypoints {
                put_f32(out, kp.time);
                put_f32(out, kp.value);
                put_f32(out, kp.envelope);
            }
        }
        Decision::ColorSequence(index) => {
            let keypoints =
                plan.color_seqs.get(index as usize).ok_or(EncodeError::DecisionMismatch)?;
            out.push(tags::COLOR_SEQUENCE);
            out.extend_from_slice(&(keypoints.len() as u16).to_le_bytes());
            for kp in *keypoints {
                put_f32(out, kp.time);
                put_color3(out, kp.color);
                out.push(kp.interpolation);
            }
        }
        Decision::DateTime(millis) => {
            out.push(tags::DATE_TIME);
            out.extend_from_slice(&millis.to_le_bytes());
        }
        Decision::EnumItem => {
            out.push(tags::ENUM_ITEM);
            replay(plan, cursor, out)?;
            replay(plan, cursor, out)?;
        }
    }
    Ok(())
}

fn chunk<'v>(plan: &EncodePlan<'v, '_>, index: u32) -> Result<&'v [u8], EncodeError> {
    plan.chunks.get(index as usize).copied().ok_or(EncodeError::DecisionMismatch)
}

#[inline]
fn put_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_vector2(out: &mut Vec<u8>, v: Vector2) {
    put_f32(out, v.x);
    put_f32(out, v.y);
}

fn put_vector3(out: &mut Vec<u8>, v: Vector3) {
    put_f32(out, v.x);
    put_f32(out, v.y);
    put_f32(out, v.z);
}

fn put_color3(out: &mut Vec<u8>, color: Color3) {
    put_f32(out, color.r);
    put_f32(out, color.g);
    put_f32(out, color.b);
}

fn put_udim(out: &mut Vec<u8>, dim: UDim) {
    put_f32(out, dim.scale);
    out.extend_from_slice(&dim.offset.to_le_bytes());
}
