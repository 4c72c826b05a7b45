// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Provides encoding (serialization) and decoding (deserialization) in the SimpleSerialize (SSZ)
//! format designed for use in Ethereum 2.0.
//!
//! Adheres to the Ethereum 2.0 [SSZ
//! specification](https://github.com/ethereum/eth2.0-specs/blob/v0.12.1/ssz/simple-serialize.md)
//! at v0.12.1.
//!
//! Implementations of [`Encode`]/[`Decode`] are written by hand, one `impl` per type; this crate
//! does not provide a derive macro. A fixed-size container composes the wire format with
//! [`SszEncoder`]/[`SszDecoderBuilder`]:
//!
//! ```rust
//! use ssz::{Decode, DecodeError, Encode, SszDecoderBuilder, SszEncoder};
//!
//! #[derive(PartialEq, Debug)]
//! struct Foo {
//!     a: u64,
//!     b: Vec<u16>,
//! }
//!
//! impl Encode for Foo {
//!     fn is_ssz_fixed_len() -> bool {
//!         false
//!     }
//!
//!     fn ssz_bytes_len(&self) -> usize {
//!         <u64 as Encode>::ssz_fixed_len() + ssz::BYTES_PER_LENGTH_OFFSET + self.b.ssz_bytes_len()
//!     }
//!
//!     fn ssz_append(&self, buf: &mut Vec<u8>) {
//!         let offset = <u64 as Encode>::ssz_fixed_len() + ssz::BYTES_PER_LENGTH_OFFSET;
//!         let mut encoder = SszEncoder::container(buf, offset);
//!         encoder.append(&self.a);
//!         encoder.append(&self.b);
//!         encoder.finalize();
//!     }
//! }
//!
//! impl Decode for Foo {
//!     fn is_ssz_fixed_len() -> bool {
//!         false
//!     }
//!
//!     fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
//!         let mut builder = SszDecoderBuilder::new(bytes);
//!         builder.register_type::<u64>()?;
//!         builder.register_type::<Vec<u16>>()?;
//!         let mut decoder = builder.build()?;
//!         Ok(Self {
//!             a: decoder.decode_next()?,
//!             b: decoder.decode_next()?,
//!         })
//!     }
//! }
//!
//! fn ssz_encode_decode_example() {
//!     let foo = Foo {
//!         a: 42,
//!         b: vec![1, 3, 3, 7],
//!     };
//!
//!     let ssz_bytes: Vec<u8> = foo.as_ssz_bytes();
//!     let decoded_foo = Foo::from_ssz_bytes(&ssz_bytes).unwrap();
//!     assert_eq!(foo, decoded_foo);
//! }
//! ```
//!
//! [`Option<T>`] is the degenerate `Union(None | T)` case; a general `Union(T_0 | T_1 | ... )`
//! with more than one payload variant is encoded by hand the same way, writing a
//! [`UnionSelector`] byte ahead of whichever variant's bytes follow:
//!
//! ```rust
//! use ssz::{Decode, DecodeError, Encode, UnionSelector, split_union_bytes};
//!
//! #[derive(PartialEq, Debug)]
//! enum Shape {
//!     Point,
//!     Circle(u32),
//!     Line { from: u16, to: u16 },
//! }
//!
//! impl Encode for Shape {
//!     fn is_ssz_fixed_len() -> bool {
//!         false
//!     }
//!
//!     fn ssz_bytes_len(&self) -> usize {
//!         ssz::BYTES_PER_UNION_SELECTOR
//!             + match self {
//!                 Shape::Point => 0,
//!                 Shape::Circle(radius) => radius.ssz_bytes_len(),
//!                 Shape::Line { from, to } => from.ssz_bytes_len() + to.ssz_bytes_len(),
//!             }
//!     }
//!
//!     fn ssz_append(&self, buf: &mut Vec<u8>) {
//!         match self {
//!             Shape::Point => buf.push(0),
//!             Shape::Circle(radius) => {
//!                 buf.push(1);
//!                 radius.ssz_append(buf);
//!             }
//!             Shape::Line { from, to } => {
//!                 buf.push(2);
//!                 from.ssz_append(buf);
//!                 to.ssz_append(buf);
//!             }
//!         }
//!     }
//! }
//!
//! impl Decode for Shape {
//!     fn is_ssz_fixed_len() -> bool {
//!         false
//!     }
//!
//!     fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
//!         let (selector, body) = split_union_bytes(bytes)?;
//!         match selector.into_u8() {
//!             0 => Ok(Shape::Point),
//!             1 => Ok(Shape::Circle(u32::from_ssz_bytes(body)?)),
//!             2 => {
//!                 let from = u16::from_ssz_bytes(&body[0..2])?;
//!                 let to = u16::from_ssz_bytes(&body[2..4])?;
//!                 Ok(Shape::Line { from, to })
//!             }
//!             other => Err(DecodeError::UnionSelectorInvalid(other)),
//!         }
//!     }
//! }
//!
//! fn ssz_union_example() {
//!     let circle = Shape::Circle(10);
//!     let bytes = circle.as_ssz_bytes();
//!     assert_eq!(bytes[0], 1);
//!     assert_eq!(Shape::from_ssz_bytes(&bytes).unwrap(), circle);
//! }
//! ```

pub mod bitfield;
pub mod decode;
pub mod encode;
pub mod layout;
pub mod primitives;
/// Serde utilities for SSZ types.
#[cfg(feature = "serde")]
pub mod serde_utils;
mod union_selector;

pub use bitfield::bitvector_dynamic::{BitVectorDynamic, Dynamic};
#[doc(hidden)]
pub use bitfield::{BitList, BitVector, Bitfield, Error as BitfieldError, Fixed, Variable};
pub use decode::{
    Decode, DecodeError, SszDecoder, SszDecoderBuilder,
    impls::decode_list_of_variable_length_items, read_offset, split_union_bytes,
    try_from_iter::TryFromIter,
};
pub use encode::{Encode, SszEncoder, encode_length};
pub use union_selector::UnionSelector;

/// The number of bytes used to represent an offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
/// The maximum value that can be represented using `BYTES_PER_LENGTH_OFFSET`.
#[cfg(target_pointer_width = "32")]
pub const MAX_LENGTH_VALUE: usize = (u32::MAX >> (8 * (4 - BYTES_PER_LENGTH_OFFSET))) as usize;
/// The maximum value that can be represented using `BYTES_PER_LENGTH_OFFSET`.
#[cfg(target_pointer_width = "64")]
pub const MAX_LENGTH_VALUE: usize = (u64::MAX >> (8 * (8 - BYTES_PER_LENGTH_OFFSET))) as usize;

/// The number of bytes used to indicate the variant of a union.
pub const BYTES_PER_UNION_SELECTOR: usize = 1;
/// The highest possible union selector value (higher values are reserved for backwards compatible
/// extensions).
pub const MAX_UNION_SELECTOR: u8 = 127;

/// Convenience function to SSZ encode an object supporting ssz::Encode.
///
/// Equivalent to `val.as_ssz_bytes()`.
pub fn ssz_encode<T>(val: &T) -> Vec<u8>
where
    T: Encode,
{
    val.as_ssz_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq, Debug)]
    enum Shape {
        Point,
        Circle(u32),
        Line { from: u16, to: u16 },
    }

    impl Encode for Shape {
        fn is_ssz_fixed_len() -> bool {
            false
        }

        fn ssz_bytes_len(&self) -> usize {
            BYTES_PER_UNION_SELECTOR
                + match self {
                    Shape::Point => 0,
                    Shape::Circle(radius) => radius.ssz_bytes_len(),
                    Shape::Line { from, to } => from.ssz_bytes_len() + to.ssz_bytes_len(),
                }
        }

        fn ssz_append(&self, buf: &mut Vec<u8>) {
            match self {
                Shape::Point => buf.push(0),
                Shape::Circle(radius) => {
                    buf.push(1);
                    radius.ssz_append(buf);
                }
                Shape::Line { from, to } => {
                    buf.push(2);
                    from.ssz_append(buf);
                    to.ssz_append(buf);
                }
            }
        }
    }

    impl Decode for Shape {
        fn is_ssz_fixed_len() -> bool {
            false
        }

        fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
            let (selector, body) = split_union_bytes(bytes)?;
            match selector.into_u8() {
                0 => Ok(Shape::Point),
                1 => Ok(Shape::Circle(u32::from_ssz_bytes(body)?)),
                2 => {
                    let from = u16::from_ssz_bytes(&body[0..2])?;
                    let to = u16::from_ssz_bytes(&body[2..4])?;
                    Ok(Shape::Line { from, to })
                }
                other => Err(DecodeError::UnionSelectorInvalid(other)),
            }
        }
    }

    #[test]
    fn union_variants_round_trip() {
        for shape in [
            Shape::Point,
            Shape::Circle(10),
            Shape::Line { from: 1, to: 2 },
        ] {
            let bytes = shape.as_ssz_bytes();
            assert_eq!(Shape::from_ssz_bytes(&bytes).unwrap(), shape);
        }
    }

    #[test]
    fn union_selector_prefixes_each_variant() {
        assert_eq!(Shape::Point.as_ssz_bytes(), vec![0u8]);
        assert_eq!(Shape::Circle(10).as_ssz_bytes()[0], 1);
        assert_eq!(Shape::Line { from: 1, to: 2 }.as_ssz_bytes()[0], 2);
    }

    #[test]
    fn union_rejects_unknown_selector() {
        assert!(matches!(
            Shape::from_ssz_bytes(&[3]),
            Err(DecodeError::UnionSelectorInvalid(3))
        ));
    }
}
