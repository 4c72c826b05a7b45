// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Serialize `VariableList<u64, N>` as a JSON array of quoted decimal strings, matching the
//! Ethereum consensus spec test format (JSON numbers cannot losslessly roundtrip a `u64`).

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserializer, Serializer};

use crate::VariableList;

/// Serialize a `VariableList<u64, N>` as a list of quoted decimal strings.
pub fn serialize<S, const N: usize>(
    list: &VariableList<u64, N>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(list.len()))?;
    for value in list.iter() {
        seq.serialize_element(&value.to_string())?;
    }
    seq.end()
}

struct QuotedU64SeqVisitor<const N: usize>;

impl<'de, const N: usize> Visitor<'de> for QuotedU64SeqVisitor<N> {
    type Value = VariableList<u64, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a list of quoted u64 strings")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = vec![];
        while let Some(s) = seq.next_element::<String>()? {
            values.push(s.parse::<u64>().map_err(de::Error::custom)?);
        }
        VariableList::new(values)
            .map_err(|e| de::Error::custom(format!("invalid variable list: {e:?}")))
    }
}

/// Deserialize a `VariableList<u64, N>` from a list of quoted decimal strings.
pub fn deserialize<'de, D, const N: usize>(
    deserializer: D,
) -> Result<VariableList<u64, N>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_seq(QuotedU64SeqVisitor::<N>)
}
