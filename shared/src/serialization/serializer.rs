use std::marker::PhantomData;

use snapsync_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

/// Maps a structured value to and from the bit stream.
///
/// Unlike `Serde`, a serializer is a value, so it can carry runtime
/// parameters (e.g. a player limit) and wrap other serializers to add
/// envelope fields.
pub trait Serializer<T>: Send + Sync {
    fn ser(&self, value: &T, writer: &mut dyn BitWrite);

    /// Fails rather than returning a partially read value
    fn de(&self, reader: &mut BitReader) -> Result<T, SerdeErr>;
}

/// Serializer for any type implementing `Serde`
pub struct SerdeSerializer<T> {
    phantom_t: PhantomData<fn() -> T>,
}

impl<T> SerdeSerializer<T> {
    pub fn new() -> Self {
        Self {
            phantom_t: PhantomData,
        }
    }
}

impl<T> Default for SerdeSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serde> Serializer<T> for SerdeSerializer<T> {
    fn ser(&self, value: &T, writer: &mut dyn BitWrite) {
        value.ser(writer);
    }

    fn de(&self, reader: &mut BitReader) -> Result<T, SerdeErr> {
        T::de(reader)
    }
}

impl<T, S: Serializer<T> + ?Sized> Serializer<T> for Box<S> {
    fn ser(&self, value: &T, writer: &mut dyn BitWrite) {
        (**self).ser(value, writer);
    }

    fn de(&self, reader: &mut BitReader) -> Result<T, SerdeErr> {
        (**self).de(reader)
    }
}

/// Encodes one whole message and finalizes the writer
pub fn write_message<T, S: Serializer<T> + ?Sized>(serializer: &S, value: &T) -> Vec<u8> {
    let mut writer = BitWriter::new();
    serializer.ser(value, &mut writer);
    writer.to_bytes()
}

/// Decodes one whole message. Leftover bytes mean the payload didn't have the
/// expected shape, so they fail the read too.
pub fn read_message<T, S: Serializer<T> + ?Sized>(serializer: &S, payload: &[u8]) -> Result<T, SerdeErr> {
    let mut reader = BitReader::new(payload);
    let value = serializer.de(&mut reader)?;
    reader.ensure_consumed()?;
    Ok(value)
}
