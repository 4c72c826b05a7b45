// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

use super::*;

/// Merkleizes `bytes`, treating it as a sequence of `H::HASH_SIZE`-byte chunks padded with zero
/// chunks up to `minimum_leaf_count` (rounded up to the next power of two), and returns the root.
///
/// This is the bare chunking + padding + pairwise-reduction primitive; callers that need the
/// length or a union selector mixed into the result should do so with
/// [`crate::mix_in_length_with_hasher`] or [`crate::mix_in_selector_with_hasher`] afterwards.
pub fn merkleize_padded_with_hasher<H: TreeHashDigest>(
    bytes: &[u8],
    minimum_leaf_count: usize,
) -> H::Output {
    let leaves = std::cmp::max(bytes.len().div_ceil(H::HASH_SIZE), minimum_leaf_count);

    if leaves <= 1 {
        return H::from_bytes(bytes);
    }

    let mut hasher = MerkleHasher::<H>::with_leaves(leaves);
    hasher
        .write(bytes)
        .expect("minimum_leaf_count accounts for the full length of bytes");
    hasher
        .finish()
        .expect("a freshly sized hasher can always be finished")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_chunk_is_returned_unhashed() {
        let chunk = [7u8; 32];
        assert_eq!(
            merkleize_padded_with_hasher::<Sha256Hasher>(&chunk, 0),
            Hash256::from_slice(&chunk)
        );
    }

    #[test]
    fn matches_merkleize_standard_for_several_leaves() {
        let data: Vec<u8> = (0..5u8).flat_map(|i| vec![i; 32]).collect();
        let padded = merkleize_padded_with_hasher::<Sha256Hasher>(&data, 0);
        let standard = merkleize_standard_with_hasher::<Sha256Hasher>(&data);
        assert_eq!(padded, standard);
    }

    #[test]
    fn minimum_leaf_count_extends_padding() {
        let data = vec![1u8; 32];
        let narrow = merkleize_padded_with_hasher::<Sha256Hasher>(&data, 0);
        let widened = merkleize_padded_with_hasher::<Sha256Hasher>(&data, 4);
        assert_ne!(narrow, widened);
    }
}
