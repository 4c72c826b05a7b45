// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Tree hash implementations for different types

use std::sync::Arc;

use ssz::{Bitfield, Fixed, Variable};
use ssz_primitives::{FixedBytes, U128, U256};

use super::*;

fn int_to_hasher_output<H: TreeHashDigest>(int: u64) -> H::Output {
    let mut bytes = vec![0; H::HASH_SIZE];
    bytes[0..8].copy_from_slice(&int.to_le_bytes());
    H::from_bytes(&bytes)
}

macro_rules! impl_for_bitsize {
    ($type: ident, $bit_size: expr) => {
        impl<H: TreeHashDigest> TreeHash<H> for $type {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> PackedEncoding {
                PackedEncoding::from_slice(&self.to_le_bytes())
            }

            fn tree_hash_packing_factor() -> usize {
                H::HASH_SIZE / ($bit_size / 8)
            }

            #[allow(clippy::cast_lossless)] // Lint does not apply to all uses of this macro.
            fn tree_hash_root(&self) -> H::Output {
                int_to_hasher_output::<H>(*self as u64)
            }
        }
    };
}

impl_for_bitsize!(u8, 8);
impl_for_bitsize!(u16, 16);
impl_for_bitsize!(u32, 32);
impl_for_bitsize!(u64, 64);
impl_for_bitsize!(usize, 64);

impl<H: TreeHashDigest> TreeHash<H> for bool {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        <u8 as TreeHash<H>>::tree_hash_packed_encoding(&(*self as u8))
    }

    fn tree_hash_packing_factor() -> usize {
        <u8 as TreeHash<H>>::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> H::Output {
        int_to_hasher_output::<H>(*self as u64)
    }
}

impl<const N: usize, H: TreeHashDigest> TreeHash<H> for [u8; N] {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        let values_per_chunk = BYTES_PER_CHUNK;
        let minimum_chunk_count = N.div_ceil(values_per_chunk);
        merkle_root_with_hasher::<H>(self, minimum_chunk_count)
    }
}

impl<H: TreeHashDigest> TreeHash<H> for U128 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        PackedEncoding::from_slice(&self.to_le_bytes::<{ Self::BYTES }>())
    }

    fn tree_hash_packing_factor() -> usize {
        2
    }

    fn tree_hash_root(&self) -> H::Output {
        H::from_bytes(&self.to_le_bytes::<{ Self::BYTES }>())
    }
}

impl<H: TreeHashDigest> TreeHash<H> for U256 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        PackedEncoding::from(self.to_le_bytes::<{ Self::BYTES }>())
    }

    fn tree_hash_packing_factor() -> usize {
        1
    }

    fn tree_hash_root(&self) -> H::Output {
        H::from_bytes(&self.to_le_bytes::<{ Self::BYTES }>())
    }
}

// This implementation covers `Hash256`/`B256` as well.
impl<const N: usize, H: TreeHashDigest> TreeHash<H> for FixedBytes<N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        if N <= 32 {
            H::from_bytes(&self.0)
        } else {
            let values_per_chunk = BYTES_PER_CHUNK;
            let minimum_chunk_count = N.div_ceil(values_per_chunk);
            merkle_root_with_hasher::<H>(&self.0, minimum_chunk_count)
        }
    }
}

impl<T: TreeHash<H>, H: TreeHashDigest> TreeHash<H> for Arc<T> {
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        self.as_ref().tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> H::Output {
        self.as_ref().tree_hash_root()
    }
}

/// A helper function providing common functionality for finding the Merkle root of some bytes that
/// represent a bitfield.
pub fn bitfield_bytes_tree_hash_root<const N: usize, H: TreeHashDigest>(bytes: &[u8]) -> H::Output {
    let byte_size = N.div_ceil(8);
    let leaf_count = byte_size.div_ceil(BYTES_PER_CHUNK);

    let mut hasher = MerkleHasher::<H>::with_leaves(leaf_count);
    hasher
        .write(bytes)
        .expect("bitfield should not exceed tree hash leaf limit");
    hasher
        .finish()
        .expect("bitfield tree hash buffer should not exceed leaf limit")
}

impl<const N: usize, H: TreeHashDigest> TreeHash<H> for Bitfield<Variable<N>> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        // Note: we use `as_slice` because it does _not_ have the length-delimiting bit set (or
        // present).
        let root = bitfield_bytes_tree_hash_root::<N, H>(self.as_slice());
        mix_in_length_with_hasher::<H>(&root, self.len())
    }
}

impl<const N: usize, H: TreeHashDigest> TreeHash<H> for Bitfield<Fixed<N>> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        bitfield_bytes_tree_hash_root::<N, H>(self.as_slice())
    }
}

// `Option<T>` represents `Union[None, T]`
impl<T: TreeHash<H>, H: TreeHashDigest> TreeHash<H> for Option<T> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Container
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Enum should never be packed")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Enum should never be packed")
    }

    fn tree_hash_root(&self) -> H::Output {
        match self {
            None => {
                let root = H::get_zero_hash(0);
                let selector = 0u8;
                mix_in_selector_with_hasher::<H>(&root, selector)
                    .expect("derive macro should prevent out-of-bounds selectors")
            }
            Some(inner) => {
                let root = inner.tree_hash_root();
                let selector = 1u8;
                mix_in_selector_with_hasher::<H>(&root, selector)
                    .expect("derive macro should prevent out-of-bounds selectors")
            }
        }
    }
}
