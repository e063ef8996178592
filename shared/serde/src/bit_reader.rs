use crate::error::SerdeErr;

/// Reads bits back out of a buffer produced by a `BitWriter`.
pub struct BitReader<'b> {
    buffer: &'b [u8],
    bit_index: usize,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            bit_index: 0,
        }
    }

    pub fn bits_read(&self) -> usize {
        self.bit_index
    }

    pub fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - self.bit_index
    }

    fn check(&self, requested: usize) -> Result<(), SerdeErr> {
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(SerdeErr::Underflow {
                requested: requested as u32,
                remaining: remaining as u32,
            });
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        self.check(1)?;

        let byte = self.buffer[self.bit_index / 8];
        let bit = (byte >> (self.bit_index % 8)) & 1 != 0;
        self.bit_index += 1;

        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        self.check(8)?;

        if self.bit_index % 8 == 0 {
            let byte = self.buffer[self.bit_index / 8];
            self.bit_index += 8;
            return Ok(byte);
        }

        Ok(self.read_bits(8)? as u8)
    }

    /// Reads `bits` bits written by `BitWrite::write_bits`.
    pub fn read_bits(&mut self, bits: u8) -> Result<u64, SerdeErr> {
        debug_assert!(bits <= 64, "can't read more than 64 bits at once");
        self.check(bits as usize)?;

        let mut output: u64 = 0;
        for index in 0..bits {
            if self.read_bit()? {
                output |= 1u64 << index;
            }
        }
        Ok(output)
    }

    /// Reads every whole byte left in the buffer.
    pub fn read_remaining_bytes(&mut self) -> Result<Vec<u8>, SerdeErr> {
        let count = self.remaining_bits() / 8;
        let mut output = Vec::with_capacity(count);
        for _ in 0..count {
            output.push(self.read_byte()?);
        }
        Ok(output)
    }

    /// Fails if a whole unread byte is left over. Fewer than 8 bits may
    /// remain, since that is the padding of the final byte.
    pub fn ensure_consumed(&self) -> Result<(), SerdeErr> {
        if self.remaining_bits() >= 8 {
            return Err(SerdeErr::malformed("trailing bytes after message"));
        }
        Ok(())
    }
}
