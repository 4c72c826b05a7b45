// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! `Encode`/`Decode` for the primitive byte types in [`ssz_primitives`].

pub use ssz_primitives::{FixedBytes, Hash256, U128, U256};

use crate::decode::{Decode, DecodeError};
use crate::encode::Encode;

impl<const N: usize> Encode for FixedBytes<N> {
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
        buf.extend_from_slice(self.as_slice());
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        N
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != N {
            Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: N,
            })
        } else {
            Ok(Self::from_slice(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash256_round_trips() {
        let hash = Hash256::repeat_byte(0xab);
        let bytes = hash.as_ssz_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(Hash256::from_ssz_bytes(&bytes).unwrap(), hash);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Hash256::from_ssz_bytes(&[0u8; 31]).is_err());
    }
}
