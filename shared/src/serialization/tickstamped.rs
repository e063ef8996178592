use snapsync_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::{serialization::serializer::Serializer, types::Tick};

/// A payload stamped with the sender's tick at send time
#[derive(Clone, Debug, PartialEq)]
pub struct Tickstamped<T> {
    pub tick: Tick,
    pub content: T,
}

/// How far the sender's view of the peer lags its own clock.
///
/// `queued` is the tick the sender is at when it sends, `received` is the
/// most recent tick it has received from the peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferInfo {
    pub queued: Tick,
    pub received: Tick,
}

impl BufferInfo {
    /// `queued - received`, signed
    pub fn offset(&self) -> i64 {
        i64::from(self.queued) - i64::from(self.received)
    }
}

impl Serde for BufferInfo {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.queued.ser(writer);
        self.received.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            queued: Serde::de(reader)?,
            received: Serde::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for BufferInfo {
    fn const_bit_length() -> u32 {
        <Tick as ConstBitLength>::const_bit_length() * 2
    }
}

/// A tickstamped payload that also reports the sender's `BufferInfo`, once
/// the sender has one
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseTickstamped<T> {
    pub tick: Tick,
    pub buffer: Option<BufferInfo>,
    pub content: T,
}

/// `[tick: u32][content]`
pub struct TickstampedSerializer<S> {
    inner: S,
}

impl<S> TickstampedSerializer<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<T, S: Serializer<T>> Serializer<Tickstamped<T>> for TickstampedSerializer<S> {
    fn ser(&self, value: &Tickstamped<T>, writer: &mut dyn BitWrite) {
        value.tick.ser(writer);
        self.inner.ser(&value.content, writer);
    }

    fn de(&self, reader: &mut BitReader) -> Result<Tickstamped<T>, SerdeErr> {
        let tick = Tick::de(reader)?;
        let content = self.inner.de(reader)?;
        Ok(Tickstamped { tick, content })
    }
}

/// `[tick: u32][has buffer: bit][queued: u32][received: u32]?[content]`
pub struct ResponseTickstampedSerializer<S> {
    inner: S,
}

impl<S> ResponseTickstampedSerializer<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<T, S: Serializer<T>> Serializer<ResponseTickstamped<T>> for ResponseTickstampedSerializer<S> {
    fn ser(&self, value: &ResponseTickstamped<T>, writer: &mut dyn BitWrite) {
        value.tick.ser(writer);
        value.buffer.ser(writer);
        self.inner.ser(&value.content, writer);
    }

    fn de(&self, reader: &mut BitReader) -> Result<ResponseTickstamped<T>, SerdeErr> {
        let tick = Tick::de(reader)?;
        let buffer = Option::<BufferInfo>::de(reader)?;
        let content = self.inner.de(reader)?;
        Ok(ResponseTickstamped {
            tick,
            buffer,
            content,
        })
    }
}
