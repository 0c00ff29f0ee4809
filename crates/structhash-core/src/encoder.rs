//! # Value Encoder — Canonical Byte Rules
//!
//! Maps one [`Value`] to its canonical bytes, or tells the traversal engine
//! to descend into it.
//!
//! | Kind | Bytes |
//! |---|---|
//! | text | member override or hasher default [`StringEncoding`] |
//! | bool | one byte, `0` or `1` |
//! | `u8` / `i8` | the byte itself |
//! | wider integers, `f32`, `f64` | little-endian, native width |
//! | `char` | scalar value as `u32`, little-endian |
//! | decimal | four `u32` LE words: `lo`, `mid`, `hi`, `flags` |
//! | date-time | `i64` LE count of 100 ns ticks since 0001-01-01T00:00:00 |
//! | UUID | 16 bytes, RFC 4122 order |
//!
//! Sequences, objects and nulls are not encoded here; they come back as a
//! [`Step`] for the engine to act on.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::encoding::StringEncoding;
use crate::error::{Result, StructHashError};
use crate::reflect::Object;
use crate::value::{Seq, Value};

/// Seconds between 0001-01-01T00:00:00 and the Unix epoch.
pub const EPOCH_OFFSET_SECS: i64 = 62_135_596_800;

/// Ticks per second (100 ns resolution).
pub const TICKS_PER_SEC: i64 = 10_000_000;

const NANOS_PER_TICK: u32 = 100;

/// What the engine does with a value after encoding.
pub enum Step<'a> {
    /// Canonical bytes were written to the output buffer.
    Emit,
    /// The value contributes no bytes.
    Skip,
    /// Traverse the object's members.
    Recurse(&'a dyn Object),
    /// Dispatch each element of the sequence.
    Iterate(Seq<'a>),
}

/// Encode `value`, writing canonical bytes to `out` for primitive kinds.
///
/// `text` is the string encoding in force for this value. `out` is only
/// written when the returned step is [`Step::Emit`].
pub fn encode<'a>(value: Value<'a>, text: StringEncoding, out: &mut Vec<u8>) -> Result<Step<'a>> {
    match value {
        Value::Null => return Ok(Step::Skip),
        Value::Object(object) => return Ok(Step::Recurse(object)),
        Value::Seq(seq) => return Ok(Step::Iterate(seq)),
        Value::Unsupported(type_name) => {
            return Err(StructHashError::UnsupportedType {
                type_name,
                member: None,
            })
        }
        Value::Text(s) => text.encode_into(s, out),
        Value::Bool(v) => out.push(u8::from(v)),
        Value::U8(v) => out.push(v),
        Value::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::I64(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::U128(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::I128(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::F32(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::F64(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::Char(v) => out.extend_from_slice(&u32::from(v).to_le_bytes()),
        Value::Decimal(v) => {
            for word in decimal_words(&v) {
                out.extend_from_slice(&word.to_le_bytes());
            }
        }
        Value::DateTime(v) => {
            let ticks = ticks(&v).ok_or(StructHashError::UnsupportedType {
                type_name: "chrono::NaiveDateTime (outside 0001-01-01..=9999-12-31)",
                member: None,
            })?;
            out.extend_from_slice(&ticks.to_le_bytes());
        }
        Value::Uuid(v) => out.extend_from_slice(v.as_bytes()),
    }
    Ok(Step::Emit)
}

/// The four 32-bit words of a decimal: 96-bit mantissa low to high, then
/// the flags word carrying the scale in bits 16..24 and the sign in bit 31.
pub fn decimal_words(value: &Decimal) -> [u32; 4] {
    let mantissa = value.mantissa().unsigned_abs();
    let lo = mantissa as u32;
    let mid = (mantissa >> 32) as u32;
    let hi = (mantissa >> 64) as u32;
    let sign = if value.is_sign_negative() { 1u32 << 31 } else { 0 };
    let flags = (value.scale() << 16) | sign;
    [lo, mid, hi, flags]
}

/// 100 ns ticks elapsed since 0001-01-01T00:00:00.
///
/// Returns `None` for instants before year 1 or after year 9999, which
/// have no tick representation.
pub fn ticks(value: &NaiveDateTime) -> Option<i64> {
    let utc = value.and_utc();
    let secs = utc.timestamp().checked_add(EPOCH_OFFSET_SECS)?;
    let sub = i64::from(utc.timestamp_subsec_nanos() / NANOS_PER_TICK);
    let ticks = secs.checked_mul(TICKS_PER_SEC)?.checked_add(sub)?;
    (0..=MAX_TICKS).contains(&ticks).then_some(ticks)
}

/// Ticks at 9999-12-31T23:59:59.9999999.
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;
