use thiserror::Error;

/// Errors raised while decoding bit-packed data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// A read was attempted past the end of the buffer
    #[error("Buffer underflow: tried to read {requested} bits with only {remaining} remaining")]
    Underflow { requested: u32, remaining: u32 },

    /// The bits could be read but do not form a valid value
    #[error("Malformed data: {reason}")]
    Malformed { reason: &'static str },
}

impl SerdeErr {
    pub fn malformed(reason: &'static str) -> Self {
        Self::Malformed { reason }
    }
}
