// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Decoding helpers shared by collection types built on top of [`super::Decode`].

use super::{Decode, DecodeError, read_offset};
use crate::BYTES_PER_LENGTH_OFFSET;

/// Decodes `bytes` as a sequence of variable-length `T` items, using the container layout
/// protocol's offset table to find each item's boundaries.
///
/// `max_len`, if given, bounds the number of items that may be present; exceeding it is an
/// error rather than being silently truncated.
pub fn decode_list_of_variable_length_items<T: Decode>(
    bytes: &[u8],
    max_len: Option<usize>,
) -> Result<Vec<T>, DecodeError> {
    if bytes.is_empty() {
        return Ok(vec![]);
    }

    let first_offset_bytes =
        bytes
            .get(0..BYTES_PER_LENGTH_OFFSET)
            .ok_or(DecodeError::InvalidLengthPrefix {
                len: bytes.len(),
                expected: BYTES_PER_LENGTH_OFFSET,
            })?;
    let first_offset = read_offset(first_offset_bytes)?;

    if first_offset == 0 || first_offset % BYTES_PER_LENGTH_OFFSET != 0 {
        return Err(DecodeError::OffsetIntoFixedPortion(first_offset));
    }

    let num_items = first_offset / BYTES_PER_LENGTH_OFFSET;

    if let Some(max_len) = max_len {
        if num_items > max_len {
            return Err(DecodeError::LimitExceeded {
                len: num_items,
                limit: max_len,
            });
        }
    }

    let mut offsets = Vec::with_capacity(num_items + 1);
    offsets.push(first_offset);

    for i in 1..num_items {
        let start = i * BYTES_PER_LENGTH_OFFSET;
        let offset_bytes = bytes
            .get(start..start + BYTES_PER_LENGTH_OFFSET)
            .ok_or(DecodeError::OffsetOutOfBounds(start))?;
        let offset = read_offset(offset_bytes)?;

        if offset <= *offsets.last().expect("offsets is non-empty") {
            return Err(DecodeError::OffsetsAreDecreasing(offset));
        }
        if offset > bytes.len() {
            return Err(DecodeError::OffsetOutOfBounds(offset));
        }

        offsets.push(offset);
    }

    if first_offset > bytes.len() {
        return Err(DecodeError::OffsetOutOfBounds(first_offset));
    }

    offsets.push(bytes.len());

    offsets
        .windows(2)
        .map(|pair| T::from_ssz_bytes(&bytes[pair[0]..pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_offsets(offsets: &[u32]) -> Vec<u8> {
        offsets.iter().flat_map(|o| o.to_le_bytes()).collect()
    }

    #[test]
    fn empty_bytes_decode_to_empty_vec() {
        let decoded: Vec<Vec<u8>> = decode_list_of_variable_length_items(&[], None).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn two_variable_items_round_trip() {
        // Two items: [1, 2] and [3, 4, 5], each encoded as `Vec<u8>` (itself variable-length,
        // here used raw without a nested offset table for simplicity in the test).
        let mut bytes = encode_offsets(&[8, 10]);
        bytes.extend_from_slice(&[1, 2]);
        bytes.extend_from_slice(&[3, 4, 5]);

        let items: Vec<Vec<u8>> = decode_list_of_variable_length_items(&bytes, None).unwrap();
        assert_eq!(items, vec![vec![1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn respects_max_len() {
        let bytes = encode_offsets(&[8, 10]);
        let result: Result<Vec<Vec<u8>>, _> = decode_list_of_variable_length_items(&bytes, Some(1));
        assert!(matches!(result, Err(DecodeError::LimitExceeded { len: 2, limit: 1 })));
    }

    #[test]
    fn rejects_decreasing_offsets() {
        let bytes = encode_offsets(&[12, 8]);
        let result: Result<Vec<Vec<u8>>, _> = decode_list_of_variable_length_items(&bytes, None);
        assert!(matches!(result, Err(DecodeError::OffsetsAreDecreasing(8))));
    }
}
