// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! SSZ decoding (deserialization) via [`Decode`].
//!
//! A container composes the fixed-length and variable-length regions of its fields with
//! [`SszDecoderBuilder`]; see the crate-level docs for a worked example.

use ssz_primitives::{U128, U256};
use thiserror::Error;

use crate::{BYTES_PER_LENGTH_OFFSET, MAX_LENGTH_VALUE, UnionSelector};

pub mod impls;
pub mod try_from_iter;

/// Returned when SSZ decoding fails.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum DecodeError {
    /// The given bytes were the wrong length for the item being decoded.
    #[error("invalid byte length {len}, expected {expected}")]
    InvalidByteLength {
        /// The length of the given bytes.
        len: usize,
        /// The expected length of the bytes.
        expected: usize,
    },
    /// A fixed-length offset table was shorter than `BYTES_PER_LENGTH_OFFSET`.
    #[error("invalid length prefix {len}, expected at least {expected}")]
    InvalidLengthPrefix {
        /// The length of the given bytes.
        len: usize,
        /// The minimum length expected.
        expected: usize,
    },
    /// A variable-length offset pointed inside the fixed-length portion of a container.
    #[error("offset {0} points into the fixed-length portion")]
    OffsetIntoFixedPortion(usize),
    /// Offsets were not monotonically non-decreasing.
    #[error("offset {0} is lower than a preceding offset")]
    OffsetsAreDecreasing(usize),
    /// An offset pointed beyond the bytes being decoded.
    #[error("offset {0} is out of bounds")]
    OffsetOutOfBounds(usize),
    /// An offset exceeded [`crate::MAX_LENGTH_VALUE`] once parsed.
    #[error("offset {0} overflows the maximum representable length")]
    OffsetOverflow(usize),
    /// Attempted to read a byte index that does not exist.
    #[error("out of bounds byte index {i}")]
    OutOfBoundsByte {
        /// The index that was out of bounds.
        i: usize,
    },
    /// The bytes themselves were invalid for the type being decoded (e.g. a bitfield with
    /// excess bits, or a boolean byte that was neither 0 nor 1).
    #[error("bytes invalid: {0}")]
    BytesInvalid(String),
    /// A variable-length list or bitfield exceeded the limit declared by its type.
    #[error("limit exceeded: {len} items found, limit is {limit}")]
    LimitExceeded {
        /// The number of items actually found.
        len: usize,
        /// The maximum permitted.
        limit: usize,
    },
    /// A `Vector[T, N]` was declared with `N == 0`, which SSZ does not permit.
    #[error("zero-length vectors are not permitted")]
    ZeroLengthVector,
    /// A union selector byte was outside of the permitted range, or did not correspond to a
    /// variant of the union being decoded.
    #[error("union selector {0} is invalid")]
    UnionSelectorInvalid(u8),
    /// No bytes were provided to decode a union, which requires at least a selector byte.
    #[error("union requires at least one byte for its selector")]
    UnionSelectorMissing,
}

/// Implemented by all types that can be decoded from SSZ bytes.
///
/// The most common pattern for implementing this for a container is via [`SszDecoderBuilder`].
pub trait Decode: Sized {
    /// Returns `true` if this type always decodes from a fixed number of bytes.
    ///
    /// If this returns `false`, the concrete length must be read from a length-prefix or an
    /// offset, depending on context.
    fn is_ssz_fixed_len() -> bool;

    /// The number of bytes this type uses if [`Decode::is_ssz_fixed_len`] is `true`.
    ///
    /// By default, returns the length required to store an offset (i.e the type is assumed to
    /// be variable-length).
    fn ssz_fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// Decodes `bytes` as `Self`.
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// Reads a little-endian `BYTES_PER_LENGTH_OFFSET`-byte offset from `bytes` and validates it does
/// not exceed [`MAX_LENGTH_VALUE`].
pub fn read_offset(bytes: &[u8]) -> Result<usize, DecodeError> {
    if bytes.len() != BYTES_PER_LENGTH_OFFSET {
        return Err(DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected: BYTES_PER_LENGTH_OFFSET,
        });
    }

    let mut array = [0; BYTES_PER_LENGTH_OFFSET];
    array.copy_from_slice(bytes);
    let offset = u32::from_le_bytes(array) as usize;

    if offset > MAX_LENGTH_VALUE {
        return Err(DecodeError::OffsetOverflow(offset));
    }

    Ok(offset)
}

/// Splits `bytes` into a validated union selector and the remaining body bytes.
pub fn split_union_bytes(bytes: &[u8]) -> Result<(UnionSelector, &[u8]), DecodeError> {
    let (selector_byte, body) = bytes
        .split_first()
        .ok_or(DecodeError::UnionSelectorMissing)?;
    let selector = UnionSelector::new(*selector_byte)
        .map_err(|_| DecodeError::UnionSelectorInvalid(*selector_byte))?;
    Ok((selector, body))
}

/// Whether a field occupies a fixed number of bytes in a container's layout, or an offset into
/// the variable-length region.
#[derive(Debug, Clone, Copy)]
enum FieldLen {
    Fixed(usize),
    Variable,
}

/// Builds a [`SszDecoder`] by registering the type of each field of a container, in order.
///
/// See the crate-level docs for a worked example.
pub struct SszDecoderBuilder<'a> {
    bytes: &'a [u8],
    lengths: Vec<FieldLen>,
}

impl<'a> SszDecoderBuilder<'a> {
    /// Creates a new builder over the full bytes of a container (i.e. not a single field).
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            lengths: vec![],
        }
    }

    /// Declares the next field of the container as being of type `T`.
    pub fn register_type<T: Decode>(&mut self) -> Result<(), DecodeError> {
        self.lengths.push(if T::is_ssz_fixed_len() {
            FieldLen::Fixed(T::ssz_fixed_len())
        } else {
            FieldLen::Variable
        });
        Ok(())
    }

    /// Validates the fixed-length and offset portions of the container and returns a
    /// [`SszDecoder`] ready to decode each field in registration order.
    pub fn build(self) -> Result<SszDecoder<'a>, DecodeError> {
        let mut fixed_len = 0usize;
        for length in &self.lengths {
            fixed_len = match length {
                FieldLen::Fixed(n) => fixed_len
                    .checked_add(*n)
                    .ok_or(DecodeError::OffsetOverflow(fixed_len))?,
                FieldLen::Variable => fixed_len
                    .checked_add(BYTES_PER_LENGTH_OFFSET)
                    .ok_or(DecodeError::OffsetOverflow(fixed_len))?,
            };
        }

        if self.bytes.len() < fixed_len {
            return Err(DecodeError::InvalidByteLength {
                len: self.bytes.len(),
                expected: fixed_len,
            });
        }

        let mut slices: Vec<&'a [u8]> = Vec::with_capacity(self.lengths.len());
        let mut variable_field_indices = vec![];
        let mut variable_offsets = vec![];
        let mut cursor = 0usize;

        for (i, length) in self.lengths.iter().enumerate() {
            match length {
                FieldLen::Fixed(n) => {
                    slices.push(&self.bytes[cursor..cursor + n]);
                    cursor += n;
                }
                FieldLen::Variable => {
                    let offset = read_offset(&self.bytes[cursor..cursor + BYTES_PER_LENGTH_OFFSET])?;

                    if let Some(&previous) = variable_offsets.last() {
                        if offset <= previous {
                            return Err(DecodeError::OffsetsAreDecreasing(offset));
                        }
                    } else if offset != fixed_len {
                        return Err(DecodeError::OffsetIntoFixedPortion(offset));
                    }
                    if offset > self.bytes.len() {
                        return Err(DecodeError::OffsetOutOfBounds(offset));
                    }

                    variable_offsets.push(offset);
                    variable_field_indices.push(i);
                    slices.push(&[]);
                    cursor += BYTES_PER_LENGTH_OFFSET;
                }
            }
        }

        for (k, &field_index) in variable_field_indices.iter().enumerate() {
            let start = variable_offsets[k];
            let end = variable_offsets
                .get(k + 1)
                .copied()
                .unwrap_or(self.bytes.len());
            slices[field_index] = &self.bytes[start..end];
        }

        Ok(SszDecoder { slices, index: 0 })
    }
}

/// Decodes the fields of a container, one at a time, in the order they were registered with
/// [`SszDecoderBuilder`].
pub struct SszDecoder<'a> {
    slices: Vec<&'a [u8]>,
    index: usize,
}

impl<'a> SszDecoder<'a> {
    /// Decodes the next field as `T`.
    ///
    /// # Panics
    ///
    /// Panics if called more times than fields were registered with the builder.
    pub fn decode_next<T: Decode>(&mut self) -> Result<T, DecodeError> {
        let slice = self
            .slices
            .get(self.index)
            .expect("decode_next called more times than fields were registered");
        self.index += 1;
        T::from_ssz_bytes(slice)
    }
}

macro_rules! impl_decodable_for_uint {
    ($type: ident, $bit_size: expr) => {
        impl Decode for $type {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $bit_size / 8
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let len = bytes.len();
                let expected = <Self as Decode>::ssz_fixed_len();

                if len != expected {
                    Err(DecodeError::InvalidByteLength { len, expected })
                } else {
                    let mut array: [u8; $bit_size / 8] = [0; $bit_size / 8];
                    array.copy_from_slice(bytes);
                    Ok(Self::from_le_bytes(array))
                }
            }
        }
    };
}

impl_decodable_for_uint!(u8, 8);
impl_decodable_for_uint!(u16, 16);
impl_decodable_for_uint!(u32, 32);
impl_decodable_for_uint!(u64, 64);
impl_decodable_for_uint!(u128, 128);

#[cfg(target_pointer_width = "64")]
impl_decodable_for_uint!(usize, 64);
#[cfg(target_pointer_width = "32")]
impl_decodable_for_uint!(usize, 32);

impl Decode for bool {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        1
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        match bytes.len() {
            1 => match bytes[0] {
                0b0000_0000 => Ok(false),
                0b0000_0001 => Ok(true),
                byte => Err(DecodeError::BytesInvalid(format!(
                    "invalid boolean byte: {byte:x}"
                ))),
            },
            len => Err(DecodeError::InvalidByteLength { len, expected: 1 }),
        }
    }
}

macro_rules! impl_decodable_for_u256_like {
    ($type: ty, $byte_size: expr) => {
        impl Decode for $type {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $byte_size
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let len = bytes.len();
                let expected = $byte_size;

                if len != expected {
                    Err(DecodeError::InvalidByteLength { len, expected })
                } else {
                    Ok(<$type>::from_le_slice(bytes))
                }
            }
        }
    };
}

impl_decodable_for_u256_like!(U128, 16);
impl_decodable_for_u256_like!(U256, 32);

impl<const N: usize> Decode for [u8; N] {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        N
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let len = bytes.len();

        if len != N {
            Err(DecodeError::InvalidByteLength { len, expected: N })
        } else {
            let mut array = [0; N];
            array.copy_from_slice(bytes);
            Ok(array)
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if T::is_ssz_fixed_len() {
            let fixed_len = T::ssz_fixed_len();

            if fixed_len == 0 {
                return Err(DecodeError::ZeroLengthVector);
            }
            if bytes.is_empty() {
                return Ok(vec![]);
            }
            if bytes.len() % fixed_len != 0 {
                return Err(DecodeError::InvalidByteLength {
                    len: bytes.len(),
                    expected: fixed_len,
                });
            }

            bytes
                .chunks(fixed_len)
                .map(T::from_ssz_bytes)
                .collect::<Result<Vec<_>, _>>()
        } else {
            impls::decode_list_of_variable_length_items(bytes, None)
        }
    }
}

/// Union[None, T]: a 1-byte selector precedes the body, `0` for `None` (whose body must then be
/// empty) and `1` for `Some`, matching `tree_hash`'s selector convention for the same type.
impl<T: Decode> Decode for Option<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (selector, body) = split_union_bytes(bytes)?;
        match selector.into_u8() {
            0 => {
                if body.is_empty() {
                    Ok(None)
                } else {
                    Err(DecodeError::BytesInvalid(
                        "non-empty body for None selector of Option<T>".to_string(),
                    ))
                }
            }
            1 => T::from_ssz_bytes(body).map(Some),
            other => Err(DecodeError::UnionSelectorInvalid(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_offset_accepts_le_bytes() {
        assert_eq!(read_offset(&[4, 0, 0, 0]).unwrap(), 4);
    }

    #[test]
    fn read_offset_rejects_wrong_length() {
        assert!(read_offset(&[4, 0, 0]).is_err());
    }

    #[test]
    fn split_union_bytes_rejects_empty() {
        assert_eq!(split_union_bytes(&[]), Err(DecodeError::UnionSelectorMissing));
    }

    #[test]
    fn split_union_bytes_rejects_invalid_selector() {
        assert!(matches!(
            split_union_bytes(&[200, 1, 2, 3]),
            Err(DecodeError::UnionSelectorInvalid(200))
        ));
    }

    #[test]
    fn uint_round_trip() {
        assert_eq!(u32::from_ssz_bytes(&42u32.to_le_bytes()).unwrap(), 42);
        assert!(u32::from_ssz_bytes(&[0, 0, 0]).is_err());
    }

    #[test]
    fn bool_rejects_non_canonical_byte() {
        assert!(bool::from_ssz_bytes(&[2]).is_err());
    }

    #[test]
    fn vec_of_fixed_len_items() {
        let bytes = vec![1, 0, 2, 0, 3, 0];
        let decoded: Vec<u16> = Decode::from_ssz_bytes(&bytes).unwrap();
        assert_eq!(decoded, vec![1, 2, 3]);
    }

    #[test]
    fn vec_of_fixed_len_items_rejects_partial_chunk() {
        let bytes = vec![1, 0, 2];
        let result: Result<Vec<u16>, _> = Decode::from_ssz_bytes(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn option_decode() {
        assert_eq!(Option::<u64>::from_ssz_bytes(&[0]).unwrap(), None);

        let mut some_bytes = vec![1u8];
        some_bytes.extend_from_slice(&7u64.to_le_bytes());
        assert_eq!(
            Option::<u64>::from_ssz_bytes(&some_bytes).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn option_decode_rejects_missing_selector() {
        assert_eq!(
            Option::<u64>::from_ssz_bytes(&[]),
            Err(DecodeError::UnionSelectorMissing)
        );
    }

    #[test]
    fn option_decode_rejects_non_empty_body_for_none_selector() {
        assert!(matches!(
            Option::<u64>::from_ssz_bytes(&[0, 1, 2, 3]),
            Err(DecodeError::BytesInvalid(_))
        ));
    }

    #[test]
    fn option_decode_rejects_invalid_selector() {
        assert!(matches!(
            Option::<u64>::from_ssz_bytes(&[2, 1, 2, 3]),
            Err(DecodeError::UnionSelectorInvalid(2))
        ));
    }

    #[test]
    fn option_some_of_empty_vec_round_trips_through_decode() {
        assert_eq!(
            Option::<Vec<u8>>::from_ssz_bytes(&[1]).unwrap(),
            Some(vec![])
        );
    }

    struct TwoFields {
        a: u16,
        b: Vec<u16>,
    }

    impl Decode for TwoFields {
        fn is_ssz_fixed_len() -> bool {
            false
        }

        fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
            let mut builder = SszDecoderBuilder::new(bytes);
            builder.register_type::<u16>()?;
            builder.register_type::<Vec<u16>>()?;
            let mut decoder = builder.build()?;
            Ok(Self {
                a: decoder.decode_next()?,
                b: decoder.decode_next()?,
            })
        }
    }

    #[test]
    fn container_with_trailing_variable_field() {
        // a = 7u16, offset = 6, b = [1, 2]
        let mut bytes = vec![];
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.extend_from_slice(&6u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());

        let decoded = TwoFields::from_ssz_bytes(&bytes).unwrap();
        assert_eq!(decoded.a, 7);
        assert_eq!(decoded.b, vec![1, 2]);
    }

    #[test]
    fn container_rejects_offset_into_fixed_portion() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());

        assert!(matches!(
            TwoFields::from_ssz_bytes(&bytes),
            Err(DecodeError::OffsetIntoFixedPortion(1))
        ));
    }

    #[test]
    fn container_rejects_first_offset_past_fixed_portion() {
        // fixed region size is 6 (2-byte a + 4-byte offset); offset of 7 skips a byte of the
        // variable region without it belonging to any field.
        let mut bytes = vec![];
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.extend_from_slice(&7u32.to_le_bytes());
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        assert!(matches!(
            TwoFields::from_ssz_bytes(&bytes),
            Err(DecodeError::OffsetIntoFixedPortion(7))
        ));
    }

    struct ThreeVariableFields {
        a: Vec<u16>,
        b: Vec<u16>,
    }

    impl Decode for ThreeVariableFields {
        fn is_ssz_fixed_len() -> bool {
            false
        }

        fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
            let mut builder = SszDecoderBuilder::new(bytes);
            builder.register_type::<Vec<u16>>()?;
            builder.register_type::<Vec<u16>>()?;
            let mut decoder = builder.build()?;
            Ok(Self {
                a: decoder.decode_next()?,
                b: decoder.decode_next()?,
            })
        }
    }

    #[test]
    fn container_rejects_equal_consecutive_offsets() {
        // fixed region size is 8 (two 4-byte offsets); both point at offset 8, so `a` would
        // decode as empty and the one trailing byte is silently unowned.
        let mut bytes = vec![];
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&[0xFF, 0xFF]);

        assert!(matches!(
            ThreeVariableFields::from_ssz_bytes(&bytes),
            Err(DecodeError::OffsetsAreDecreasing(8))
        ));
    }
}
