//! Length-encoded integers.
//!
//! | value range              | encoding                  |
//! |--------------------------|---------------------------|
//! | `0..251`                 | 1 byte, the value itself  |
//! | `251..=0xFFFF`           | `0xFC` + 2 bytes LE       |
//! | `0x1_0000..=0xFF_FFFF`   | `0xFD` + 3 bytes LE       |
//! | `0x100_0000..`           | `0xFE` + 8 bytes LE       |
//!
//! `0xFB` (NULL) and `0xFF` (error packet) are never produced here.

use bytes::{BufMut, BytesMut};

/// Largest value encoded as a single literal byte.
pub const MAX_LITERAL: u64 = 250;

/// Prefix for a 2-byte value.
pub const PREFIX_U16: u8 = 0xFC;

/// Prefix for a 3-byte value.
pub const PREFIX_U24: u8 = 0xFD;

/// Prefix for an 8-byte value.
pub const PREFIX_U64: u8 = 0xFE;

/// Width class of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Literal,
    U16,
    U24,
    U64,
}

impl Width {
    /// Pick the narrowest encoding for `value`.
    pub fn of(value: u64) -> Self {
        match value {
            0..=MAX_LITERAL => Width::Literal,
            251..=0xFFFF => Width::U16,
            0x1_0000..=0xFF_FFFF => Width::U24,
            _ => Width::U64,
        }
    }

    /// Prefix byte, or `None` for literals.
    pub fn prefix(self) -> Option<u8> {
        match self {
            Width::Literal => None,
            Width::U16 => Some(PREFIX_U16),
            Width::U24 => Some(PREFIX_U24),
            Width::U64 => Some(PREFIX_U64),
        }
    }

    /// Total encoded size including the prefix.
    pub fn encoded_len(self) -> usize {
        match self {
            Width::Literal => 1,
            Width::U16 => 3,
            Width::U24 => 4,
            Width::U64 => 9,
        }
    }
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u64) -> usize {
    Width::of(value).encoded_len()
}

/// Encode `value` into `dst` without any fragment framing.
pub fn encode(value: u64, dst: &mut BytesMut) {
    let width = Width::of(value);
    dst.reserve(width.encoded_len());
    match width.prefix() {
        None => dst.put_u8(value as u8),
        Some(prefix) => {
            dst.put_u8(prefix);
            let bytes = value.to_le_bytes();
            dst.put_slice(&bytes[..width.encoded_len() - 1]);
        }
    }
}
