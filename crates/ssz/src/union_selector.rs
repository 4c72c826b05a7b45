// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! The selector byte prefixing an SSZ union's encoded value.

use crate::MAX_UNION_SELECTOR;

/// A validated union selector: a byte in the range `[0, MAX_UNION_SELECTOR]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnionSelector(u8);

impl UnionSelector {
    /// Creates a new `UnionSelector`, returning `Err` if `selector` exceeds
    /// [`MAX_UNION_SELECTOR`].
    pub fn new(selector: u8) -> Result<Self, String> {
        if selector <= MAX_UNION_SELECTOR {
            Ok(Self(selector))
        } else {
            Err(format!(
                "union selector {selector} exceeds the maximum of {MAX_UNION_SELECTOR}"
            ))
        }
    }

    /// Returns the selector as a raw `u8`.
    pub fn into_u8(self) -> u8 {
        self.0
    }

    /// Returns the selector as a `usize`, for indexing into a union's variants.
    pub fn into_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for UnionSelector {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnionSelector> for u8 {
    fn from(selector: UnionSelector) -> Self {
        selector.0
    }
}

impl std::fmt::Display for UnionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_selectors() {
        assert!(UnionSelector::new(0).is_ok());
        assert!(UnionSelector::new(127).is_ok());
    }

    #[test]
    fn rejects_out_of_range_selectors() {
        assert!(UnionSelector::new(128).is_err());
        assert!(UnionSelector::new(255).is_err());
    }
}
