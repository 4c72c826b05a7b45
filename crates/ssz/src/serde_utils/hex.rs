// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! `0x`-prefixed hex encoding, used by [`crate::bitfield::Bitfield`]'s serde impls.

use serde::de::{self, Visitor};

/// Encodes `bytes` as a `0x`-prefixed lowercase hex string.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes a `0x`-prefixed (or bare) hex string into bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, String> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| format!("invalid hex string: {e}"))
}

/// A serde [`Visitor`] that decodes a `0x`-prefixed hex string into `Vec<u8>`.
pub struct PrefixedHexVisitor;

impl<'de> Visitor<'de> for PrefixedHexVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a 0x-prefixed hex string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        decode(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let bytes = vec![0xde, 0xad, 0xbe, 0xef];
        let encoded = encode(&bytes);
        assert_eq!(encoded, "0xdeadbeef");
        assert_eq!(decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn decode_accepts_bare_hex() {
        assert_eq!(decode("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_rejects_invalid_hex() {
        assert!(decode("0xzz").is_err());
    }
}
