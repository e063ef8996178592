//! # Snapsync Serde
//! Bit-level serialization: a bit cursor over byte buffers, the `Serde`
//! trait, and primitive encodings built on top of them.

mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitCounter, BitWrite, BitWriter};
pub use error::SerdeErr;
pub use integer::{
    bits_required, SerdeInteger, SignedInteger, SignedVariableInteger, UnsignedInteger,
    UnsignedVariableInteger,
};
pub use serde::{ConstBitLength, Serde};
