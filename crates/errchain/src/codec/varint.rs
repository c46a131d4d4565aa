//! Base-128 variable-length integers.
//!
//! Each byte carries 7 payload bits, least significant group first; the high
//! bit is set on every byte except the last. Signed values are zig-zag mapped
//! so small magnitudes of either sign stay short.

/// Longest encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Why a varint could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// The buffer ended before the terminal byte.
    Truncated,
    /// The value does not fit in 64 bits.
    Overflow,
}

/// Append `value` as an unsigned varint.
pub fn put_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Append `value` as a zig-zag signed varint.
pub fn put_varint(out: &mut Vec<u8>, value: i64) {
    put_uvarint(out, zigzag(value));
}

/// Number of bytes `put_uvarint` writes for `value`.
pub fn uvarint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Number of bytes `put_varint` writes for `value`.
pub fn varint_len(value: i64) -> usize {
    uvarint_len(zigzag(value))
}

/// Read an unsigned varint, returning the value and the bytes consumed.
pub fn read_uvarint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for (i, &byte) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(VarintError::Overflow);
        }
        if byte < 0x80 {
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(VarintError::Overflow);
            }
            return Ok((value | (u64::from(byte) << shift), i + 1));
        }
        value |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }
    Err(VarintError::Truncated)
}

/// Read a zig-zag signed varint, returning the value and the bytes consumed.
pub fn read_varint(buf: &[u8]) -> Result<(i64, usize), VarintError> {
    let (raw, len) = read_uvarint(buf)?;
    Ok((unzigzag(raw), len))
}

fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn unzigzag(raw: u64) -> i64 {
    ((raw >> 1) as i64) ^ -((raw & 1) as i64)
}
