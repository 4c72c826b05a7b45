// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Serde (de)serialization helpers matching the Ethereum consensus YAML/JSON test format, where
//! SSZ byte strings are represented as `0x`-prefixed hex.

pub mod hex;
