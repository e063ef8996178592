use std::fmt;

use snapsync_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::serialization::serializer::Serializer;

/// Version of the wire protocol, sent first in every connection request.
/// Peers only talk when major and minor match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl ProtocolVersion {
    pub const CURRENT: ProtocolVersion = ProtocolVersion::new(0, 1, 0);

    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_compatible_with(&self, other: &ProtocolVersion) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serde for ProtocolVersion {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for part in [self.major, self.minor, self.patch] {
            UnsignedVariableInteger::<7>::new(part).ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut parts = [0u16; 3];
        for part in &mut parts {
            *part = UnsignedVariableInteger::<7>::de(reader)?
                .to()
                .ok_or(SerdeErr::malformed("version part out of range"))?;
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }

    fn bit_length(&self) -> u32 {
        [self.major, self.minor, self.patch]
            .into_iter()
            .map(|part| UnsignedVariableInteger::<7>::new(part).bit_length())
            .sum()
    }
}

/// Payload of a connection attempt: `[ProtocolVersion][caller-supplied bytes]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub version: ProtocolVersion,
    pub payload: Vec<u8>,
}

impl ConnectionRequest {
    pub fn new(version: ProtocolVersion, payload: Option<Vec<u8>>) -> Self {
        Self {
            version,
            payload: payload.unwrap_or_default(),
        }
    }
}

/// The caller payload runs to the end of the buffer, so this is only valid as
/// the last thing in a message.
#[derive(Default)]
pub struct ConnectionRequestSerializer;

impl Serializer<ConnectionRequest> for ConnectionRequestSerializer {
    fn ser(&self, value: &ConnectionRequest, writer: &mut dyn BitWrite) {
        value.version.ser(writer);
        writer.write_bytes(&value.payload);
    }

    fn de(&self, reader: &mut BitReader) -> Result<ConnectionRequest, SerdeErr> {
        let version = ProtocolVersion::de(reader)?;
        let payload = reader.read_remaining_bytes()?;
        Ok(ConnectionRequest { version, payload })
    }
}
