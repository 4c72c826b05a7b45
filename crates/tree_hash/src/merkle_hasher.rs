// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

use super::*;

/// Reasons a [`MerkleHasher`] was unable to accept more data or produce a root.
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// More leaves were written than the hasher was constructed to hold.
    MaximumLeavesExceeded {
        /// The number of leaves the hasher was constructed to hold.
        max_leaves: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MaximumLeavesExceeded { max_leaves } => {
                write!(f, "merkle hasher exceeded its maximum of {max_leaves} leaves")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Merkleizes bytes that are pushed into it incrementally, without requiring all the data to be
/// materialized in memory at once.
///
/// Maintains one pending ("half-complete") node per level of the tree. When a leaf completes it is
/// folded upward: each level either stores the node (it is waiting for its sibling) or combines it
/// with the node already stored there and continues folding one level up. This is the same
/// incremental algorithm the eth2 deposit contract uses to maintain its running Merkle root.
pub struct MerkleHasher<H: TreeHashDigest> {
    buffer: SmallVec<[u8; SMALLVEC_SIZE]>,
    depth: usize,
    /// Leaf capacity of the tree (always a power of two).
    capacity: usize,
    next_leaf: usize,
    half_nodes: Vec<Option<H::Output>>,
}

impl<H: TreeHashDigest> MerkleHasher<H> {
    /// Creates a new hasher that can accept at most `leaves` chunks of `H::HASH_SIZE` bytes each.
    ///
    /// `leaves` is rounded up to the next power of two to determine the shape of the underlying
    /// tree; a value of zero is treated as one (an empty tree still has a root).
    pub fn with_leaves(leaves: usize) -> Self {
        let capacity = leaves.max(1).next_power_of_two();
        let depth = capacity.trailing_zeros() as usize;

        Self {
            buffer: SmallVec::new(),
            depth,
            capacity,
            next_leaf: 0,
            half_nodes: vec![None; depth],
        }
    }

    /// Appends `bytes` to the hasher, splitting it into `H::HASH_SIZE`-byte leaves as they
    /// complete. `bytes` need not align to chunk boundaries between calls.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.buffer.extend_from_slice(bytes);

        while self.buffer.len() >= H::HASH_SIZE {
            let leaf: SmallVec<[u8; SMALLVEC_SIZE]> = self.buffer.drain(..H::HASH_SIZE).collect();
            self.process_leaf(H::from_bytes(&leaf))?;
        }

        Ok(())
    }

    fn process_leaf(&mut self, leaf: H::Output) -> Result<(), Error> {
        if self.next_leaf >= self.capacity {
            return Err(Error::MaximumLeavesExceeded {
                max_leaves: self.capacity,
            });
        }
        self.next_leaf += 1;

        let mut node = leaf;
        for level in 0..self.depth {
            match self.half_nodes[level].take() {
                Some(left) => node = H::hash32_concat(left.as_ref(), node.as_ref()),
                None => {
                    self.half_nodes[level] = Some(node);
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    /// Pads any remaining leaves with zero hashes and returns the root.
    ///
    /// A partially-written final leaf (fewer than `H::HASH_SIZE` bytes buffered) is zero-padded
    /// and flushed first.
    pub fn finish(mut self) -> Result<H::Output, Error> {
        if !self.buffer.is_empty() {
            let mut padded = self.buffer.to_vec();
            padded.resize(H::HASH_SIZE, 0);
            self.buffer.clear();
            self.process_leaf(H::from_bytes(&padded))?;
        }

        let mut node = H::get_zero_hash(0);
        for (height, half_node) in self.half_nodes.into_iter().enumerate() {
            node = match half_node {
                Some(left) => H::hash32_concat(left.as_ref(), node.as_ref()),
                None => H::hash32_concat(node.as_ref(), H::get_zero_hash(height).as_ref()),
            };
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_of(n_leaves: usize, data: &[u8]) -> Hash256 {
        let mut hasher = Sha256MerkleHasher::with_leaves(n_leaves);
        hasher.write(data).unwrap();
        hasher.finish().unwrap()
    }

    #[test]
    fn empty_tree_is_zero_hash() {
        assert_eq!(root_of(1, &[]), Hash256::zero());
        assert_eq!(root_of(4, &[]), ZERO_HASHES_SHA256[2]);
    }

    #[test]
    fn single_full_leaf() {
        let leaf = [0xff; 32];
        assert_eq!(root_of(1, &leaf), Hash256::from_slice(&leaf));
    }

    #[test]
    fn two_leaves_matches_direct_hash() {
        let mut data = vec![1u8; 32];
        data.extend(vec![2u8; 32]);
        let expected = Sha256Hasher::hash32_concat(&[1u8; 32], &[2u8; 32]);
        assert_eq!(root_of(2, &data), expected);
    }

    #[test]
    fn partial_final_leaf_is_zero_padded() {
        let mut hasher = Sha256MerkleHasher::with_leaves(2);
        hasher.write(&[9u8; 32]).unwrap();
        hasher.write(&[1, 2, 3]).unwrap();
        let root = hasher.finish().unwrap();

        let mut padded_second = vec![1, 2, 3];
        padded_second.resize(32, 0);
        let expected = Sha256Hasher::hash32_concat(&[9u8; 32], &padded_second);
        assert_eq!(root, expected);
    }

    #[test]
    fn writing_beyond_capacity_errors() {
        let mut hasher = Sha256MerkleHasher::with_leaves(1);
        hasher.write(&[0u8; 32]).unwrap();
        let err = hasher.write(&[0u8; 32]).unwrap_err();
        assert_eq!(err, Error::MaximumLeavesExceeded { max_leaves: 1 });
    }

    #[test]
    fn four_leaves_matches_merkleize_standard() {
        let data: Vec<u8> = (0..4u8).flat_map(|i| vec![i; 32]).collect();
        let incremental = root_of(4, &data);
        let standard = crate::merkleize_standard_with_hasher::<Sha256Hasher>(&data);
        assert_eq!(incremental, standard);
    }
}
