// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Tree hash tests

use ssz_primitives::{U128, U256};
use ssz_types::VariableList;
use tree_hash::{
    BYTES_PER_CHUNK, Hash256, MerkleHasher, PackedEncoding, Sha256Hasher, TreeHash, TreeHashDigest,
    TreeHashType, hash32_concat, mix_in_length_with_hasher, mix_in_selector_with_hasher,
};

/// A hand-written `List[u8, 64]`-equivalent, used to confirm that a manually implemented
/// `TreeHash` agrees with the generic `VariableList` implementation it mirrors.
struct HashVec {
    vec: Vec<u8>,
}

impl From<Vec<u8>> for HashVec {
    fn from(vec: Vec<u8>) -> Self {
        Self { vec }
    }
}

impl TreeHash<Sha256Hasher> for HashVec {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        let mut hasher =
            MerkleHasher::<Sha256Hasher>::with_leaves(self.vec.len().div_ceil(BYTES_PER_CHUNK));

        for item in &self.vec {
            hasher
                .write(&TreeHash::<Sha256Hasher>::tree_hash_packed_encoding(item))
                .unwrap();
        }

        let root = hasher.finish().unwrap();
        mix_in_length_with_hasher::<Sha256Hasher>(&root, self.vec.len())
    }
}

#[test]
fn hand_written_list_matches_variable_list() {
    let list: VariableList<u8, 64> = vec![0x42].into();
    let hash_vec = HashVec::from(vec![0x42]);

    assert_eq!(
        TreeHash::<Sha256Hasher>::tree_hash_root(&hash_vec),
        TreeHash::<Sha256Hasher>::tree_hash_root(&list)
    );
}

fn mix_in_selector(a: Hash256, selector: u8) -> Hash256 {
    mix_in_selector_with_hasher::<Sha256Hasher>(&a, selector).unwrap()
}

/// A two-field fixed-size container, hashed by hand as `hash(hash(a) || hash(b))`.
struct FixedPair {
    a: u64,
    b: u64,
}

impl TreeHash<Sha256Hasher> for FixedPair {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Container
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Container should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Container should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(2);
        hasher
            .write(self.a.tree_hash_root().as_slice())
            .unwrap();
        hasher
            .write(self.b.tree_hash_root().as_slice())
            .unwrap();
        hasher.finish().unwrap()
    }
}

#[test]
fn fixed_container_is_pairwise_hash_of_fields() {
    let pair = FixedPair { a: 1, b: 2 };
    let direct = Hash256::from_slice(&hash32_concat::<sha2::Sha256>(
        pair.a.tree_hash_root().as_slice(),
        pair.b.tree_hash_root().as_slice(),
    ));
    assert_eq!(pair.tree_hash_root(), direct);
}

/// `Option<T>` represents `Union[None, T]`; selector 0 mixes in the zero hash, selector 1 mixes
/// in the inner root.
#[test]
fn option_union_selectors() {
    let none: Option<u64> = None;
    let some: Option<u64> = Some(7);

    assert_eq!(
        TreeHash::<Sha256Hasher>::tree_hash_root(&none),
        mix_in_selector(Hash256::zero(), 0)
    );
    assert_eq!(
        TreeHash::<Sha256Hasher>::tree_hash_root(&some),
        mix_in_selector(some.unwrap().tree_hash_root(), 1)
    );
}

/// Test that the packed encodings for different types are equal.
#[test]
fn packed_encoding_example() {
    let val = 0xfff0eee0ddd0ccc0bbb0aaa099908880_u128;
    let canonical = <U256 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&U256::from(val));
    let encodings = [
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0x8880_u16), 0),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0x9990_u16), 2),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0xaaa0_u16), 4),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0xbbb0_u16), 6),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0xccc0_u16), 8),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0xddd0_u16), 10),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0xeee0_u16), 12),
        (<u16 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&0xfff0_u16), 14),
        (
            <U128 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&U128::from(val)),
            0,
        ),
        (
            <U128 as TreeHash<Sha256Hasher>>::tree_hash_packed_encoding(&U128::from(0)),
            16,
        ),
    ];
    for (i, (encoding, offset)) in encodings.into_iter().enumerate() {
        assert_eq!(
            &encoding[..],
            &canonical[offset..offset + encoding.len()],
            "encoding {i} is wrong"
        );
    }
}
