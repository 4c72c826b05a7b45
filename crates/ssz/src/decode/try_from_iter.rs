// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Fallible construction from an iterator, for collections with a capacity limit.

use super::DecodeError;

/// Build `Self` from an iterator, failing if the iterator yields more items than `Self` can
/// hold.
///
/// Implemented by `ssz_types`'s `FixedVector`/`VariableList` so that decoding (and `arbitrary`
/// fuzzing) can reuse one code path for "collect, but bail out over the limit".
pub trait TryFromIter<T>: Sized {
    /// Consumes `iter`, returning `Err` if it yields more items than `Self` permits.
    fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, DecodeError>;
}

impl<T> TryFromIter<T> for Vec<T> {
    fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, DecodeError> {
        Ok(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_try_from_iter_never_fails() {
        let v: Vec<u8> = TryFromIter::try_from_iter(vec![1, 2, 3]).unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }
}
