use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

/// Number of bits needed to store every value in `0..=max_value`.
pub fn bits_required(max_value: u64) -> u8 {
    (u64::BITS - max_value.leading_zeros()).max(1) as u8
}

/// An integer with a custom bit width.
///
/// Fixed integers always take `BITS` bits (plus a sign bit when `SIGNED`).
/// Variable integers are written in `BITS`-sized chunks, each preceded by a
/// continuation bit, so small values stay small on the wire.
// The generic wrapper is thin; the work happens in a non-generic inner type to
// keep monomorphization bloat down.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    inner: IntegerInner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct IntegerInner {
    value: i64,
    signed: bool,
    variable: bool,
    bits: u8,
}

impl IntegerInner {
    fn in_range(signed: bool, variable: bool, bits: u8, value: i64) -> bool {
        if bits == 0 || bits > 63 {
            return false;
        }
        if !signed && value < 0 {
            return false;
        }
        // its magnitude needs 64 bits
        if value == i64::MIN {
            return false;
        }
        if variable {
            return true;
        }
        value.unsigned_abs() < (1u64 << bits)
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        if self.signed {
            writer.write_bit(self.value < 0);
        }

        let mut magnitude = self.value.unsigned_abs();

        if !self.variable {
            writer.write_bits(magnitude, self.bits);
            return;
        }

        loop {
            let proceed = magnitude >= (1u64 << self.bits);
            writer.write_bit(proceed);
            writer.write_bits(magnitude, self.bits);
            magnitude >>= self.bits;
            if !proceed {
                return;
            }
        }
    }

    fn de(reader: &mut BitReader, signed: bool, variable: bool, bits: u8) -> Result<Self, SerdeErr> {
        let negative = signed && reader.read_bit()?;

        let magnitude = if variable {
            let mut output: u64 = 0;
            let mut shift: u32 = 0;
            loop {
                let proceed = reader.read_bit()?;
                let chunk = reader.read_bits(bits)?;
                if shift >= 63 || (shift > 0 && chunk >> (63 - shift) != 0) {
                    return Err(SerdeErr::malformed("variable integer overflows 63 bits"));
                }
                output |= chunk << shift;
                shift += bits as u32;
                if !proceed {
                    break output;
                }
            }
        } else {
            reader.read_bits(bits)?
        };

        if magnitude > i64::MAX as u64 {
            return Err(SerdeErr::malformed("integer out of range"));
        }
        let value = if negative {
            -(magnitude as i64)
        } else {
            magnitude as i64
        };

        Ok(Self {
            value,
            signed,
            variable,
            bits,
        })
    }

    fn bit_length(&self) -> u32 {
        let mut output: u32 = u32::from(self.signed);

        if !self.variable {
            return output + self.bits as u32;
        }

        let mut magnitude = self.value.unsigned_abs();
        loop {
            let proceed = magnitude >= (1u64 << self.bits);
            output += 1 + self.bits as u32;
            magnitude >>= self.bits;
            if !proceed {
                return output;
            }
        }
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    /// Creates a new integer.
    ///
    /// # Panics
    /// Panics if `value` can't be represented with this width / signedness.
    /// For a non-panicking version, use `try_new`.
    pub fn new<T: Into<i64>>(value: T) -> Self {
        let value = value.into();
        let Some(integer) = Self::try_new(value) else {
            panic!(
                "value `{}` can't be encoded with {} bits (signed: {}, variable: {})",
                value, BITS, SIGNED, VARIABLE
            );
        };
        integer
    }

    pub fn try_new<T: Into<i64>>(value: T) -> Option<Self> {
        let value = value.into();
        if !IntegerInner::in_range(SIGNED, VARIABLE, BITS, value) {
            return None;
        }
        Some(Self {
            inner: IntegerInner {
                value,
                signed: SIGNED,
                variable: VARIABLE,
                bits: BITS,
            },
        })
    }

    pub fn get(&self) -> i64 {
        self.inner.value
    }

    /// Converts to `T`, or `None` if the value doesn't fit.
    pub fn to<T: TryFrom<i64>>(&self) -> Option<T> {
        T::try_from(self.inner.value).ok()
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde for SerdeInteger<SIGNED, VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = IntegerInner::de(reader, SIGNED, VARIABLE, BITS)?;
        Ok(Self { inner })
    }

    fn bit_length(&self) -> u32 {
        self.inner.bit_length()
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        u32::from(SIGNED) + BITS as u32
    }
}
