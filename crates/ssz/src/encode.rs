// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! SSZ encoding (serialization) via [`Encode`].
//!
//! A container composes the fixed-length and variable-length regions of its fields with
//! [`SszEncoder`]; see the crate-level docs for a worked example.

use ssz_primitives::{U128, U256};

use crate::{BYTES_PER_LENGTH_OFFSET, MAX_LENGTH_VALUE};

/// Implemented by all types that can be encoded to SSZ bytes.
///
/// The most common pattern for implementing this for a container is via [`SszEncoder`].
pub trait Encode {
    /// Returns `true` if this type always encodes to a fixed number of bytes.
    fn is_ssz_fixed_len() -> bool;

    /// The number of bytes this type uses if [`Encode::is_ssz_fixed_len`] is `true`.
    ///
    /// By default, returns the length required to store an offset (i.e the type is assumed to
    /// be variable-length).
    fn ssz_fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// Appends the SSZ encoding of `self` onto `buf`.
    fn ssz_append(&self, buf: &mut Vec<u8>);

    /// Returns the number of bytes `self` encodes to.
    ///
    /// The default implementation is correct but, for variable-length types, wasteful; override
    /// it when the length can be computed without encoding.
    fn ssz_bytes_len(&self) -> usize {
        if Self::is_ssz_fixed_len() {
            Self::ssz_fixed_len()
        } else {
            let mut buf = vec![];
            self.ssz_append(&mut buf);
            buf.len()
        }
    }

    /// Returns the SSZ encoding of `self`.
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut buf = vec![];
        self.ssz_append(&mut buf);
        buf
    }
}

/// Encodes `len` as a little-endian `BYTES_PER_LENGTH_OFFSET`-byte offset.
///
/// # Panics
///
/// Panics (in debug builds) if `len` exceeds [`MAX_LENGTH_VALUE`], which would indicate the
/// encoded container has grown far beyond what a `u32` offset table can address.
pub fn encode_length(len: usize) -> [u8; BYTES_PER_LENGTH_OFFSET] {
    debug_assert!(
        len <= MAX_LENGTH_VALUE,
        "length {len} exceeds MAX_LENGTH_VALUE"
    );
    let mut bytes = [0; BYTES_PER_LENGTH_OFFSET];
    bytes.copy_from_slice(&(len as u32).to_le_bytes());
    bytes
}

/// Composes a container's fixed-length and variable-length regions.
///
/// Fixed-length fields (and the 4-byte offsets of variable-length fields) are appended directly
/// to the caller's buffer as they're registered; the variable-length bytes themselves accumulate
/// separately and are appended by [`SszEncoder::finalize`].
pub struct SszEncoder<'a> {
    offset: usize,
    buf: &'a mut Vec<u8>,
    variable_bytes: Vec<u8>,
}

impl<'a> SszEncoder<'a> {
    /// Creates an encoder for a container whose fixed-length portion (including offsets) is
    /// `num_fixed_bytes` long.
    pub fn container(buf: &'a mut Vec<u8>, num_fixed_bytes: usize) -> Self {
        Self {
            offset: num_fixed_bytes,
            buf,
            variable_bytes: vec![],
        }
    }

    /// Appends the next field, in declaration order.
    pub fn append<T: Encode>(&mut self, item: &T) {
        if T::is_ssz_fixed_len() {
            item.ssz_append(self.buf);
        } else {
            self.buf.extend_from_slice(&encode_length(self.offset));
            let previous_len = self.variable_bytes.len();
            item.ssz_append(&mut self.variable_bytes);
            self.offset += self.variable_bytes.len() - previous_len;
        }
    }

    /// Appends the accumulated variable-length bytes to the buffer, completing the encoding.
    pub fn finalize(&mut self) -> &mut Vec<u8> {
        self.buf.append(&mut self.variable_bytes);
        self.buf
    }
}

macro_rules! impl_encodable_for_uint {
    ($type: ident, $bit_size: expr) => {
        impl Encode for $type {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $bit_size / 8
            }

            fn ssz_bytes_len(&self) -> usize {
                $bit_size / 8
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_encodable_for_uint!(u8, 8);
impl_encodable_for_uint!(u16, 16);
impl_encodable_for_uint!(u32, 32);
impl_encodable_for_uint!(u64, 64);
impl_encodable_for_uint!(u128, 128);

#[cfg(target_pointer_width = "64")]
impl_encodable_for_uint!(usize, 64);
#[cfg(target_pointer_width = "32")]
impl_encodable_for_uint!(usize, 32);

impl Encode for bool {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        1
    }

    fn ssz_bytes_len(&self) -> usize {
        1
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.push(*self as u8);
    }
}

impl Encode for U128 {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        16
    }

    fn ssz_bytes_len(&self) -> usize {
        16
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_le_bytes::<16>());
    }
}

impl Encode for U256 {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        32
    }

    fn ssz_bytes_len(&self) -> usize {
        32
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_le_bytes::<32>());
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        N
    }

    fn ssz_bytes_len(&self) -> usize {
        N
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        if T::is_ssz_fixed_len() {
            self.len() * T::ssz_fixed_len()
        } else {
            self.iter()
                .map(|item| item.ssz_bytes_len() + BYTES_PER_LENGTH_OFFSET)
                .sum()
        }
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        if T::is_ssz_fixed_len() {
            for item in self {
                item.ssz_append(buf);
            }
        } else {
            let offsets_len = self.len() * BYTES_PER_LENGTH_OFFSET;
            let variable_parts: Vec<Vec<u8>> = self.iter().map(Encode::as_ssz_bytes).collect();

            let mut offset = offsets_len;
            for part in &variable_parts {
                buf.extend_from_slice(&encode_length(offset));
                offset += part.len();
            }
            for part in &variable_parts {
                buf.extend_from_slice(part);
            }
        }
    }
}

/// Union[None, T]: a 1-byte selector (`0` for `None`, `1` for `Some`) precedes the body bytes,
/// matching [`crate::decode::Decode`]'s counterpart and the `tree_hash` crate's selector
/// convention for the same type.
impl<T: Encode> Encode for Option<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        crate::BYTES_PER_UNION_SELECTOR
            + match self {
                None => 0,
                Some(inner) => inner.ssz_bytes_len(),
            }
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        match self {
            None => buf.push(0u8),
            Some(inner) => {
                buf.push(1u8);
                inner.ssz_append(buf);
            }
        }
    }
}
