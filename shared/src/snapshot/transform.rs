use snapsync_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Position and orientation of a tracked object. The core treats both as
/// opaque float vectors; only the fitter gives them meaning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`
    pub rotation: [f32; 4],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: [0.0; 3],
        rotation: [0.0, 0.0, 0.0, 1.0],
    };

    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Equality on the encoded bits: `-0.0` differs from `0.0` and a NaN
    /// equals itself. This is what "unchanged" means on the wire.
    pub fn bitwise_eq(&self, other: &Transform) -> bool {
        let same = |a: &[f32], b: &[f32]| a.iter().zip(b).all(|(a, b)| a.to_bits() == b.to_bits());
        same(&self.position, &other.position) && same(&self.rotation, &other.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Serde for Transform {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.position.ser(writer);
        self.rotation.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            position: Serde::de(reader)?,
            rotation: Serde::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for Transform {
    fn const_bit_length() -> u32 {
        <[f32; 3]>::const_bit_length() + <[f32; 4]>::const_bit_length()
    }
}
