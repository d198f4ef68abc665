//! Stick snapshot and remote-menu code frames.

/// Error returned when decoding a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Input shorter than the frame.
    Truncated,
    /// Input byte is not a known code.
    UnknownCode(u8),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated frame"),
            Self::UnknownCode(code) => write!(f, "unknown code 0x{code:02X}"),
        }
    }
}

/// Plain four-axis snapshot sent when no telemetry protocol is selected.
///
/// Layout is four little-endian `f32` in field order, 16 bytes total.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlPacket {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
}

impl ControlPacket {
    /// Encoded size in bytes.
    pub const SIZE: usize = 16;

    /// Create a packet from the four stick values.
    #[inline]
    #[must_use]
    pub const fn new(left_x: f32, left_y: f32, right_x: f32, right_y: f32) -> Self {
        Self {
            left_x,
            left_y,
            right_x,
            right_y,
        }
    }

    /// Encode into a fixed array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        for (chunk, value) in out
            .chunks_exact_mut(4)
            .zip([self.left_x, self.left_y, self.right_x, self.right_y])
        {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Decode from the first [`Self::SIZE`] bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < Self::SIZE {
            return Err(ParseError::Truncated);
        }
        let field = |i: usize| {
            let start = i * 4;
            f32::from_le_bytes([data[start], data[start + 1], data[start + 2], data[start + 3]])
        };
        Ok(Self::new(field(0), field(1), field(2), field(3)))
    }
}

/// One-byte commands understood by menu peers that predate packed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RemoteCode {
    Reload = 0x10,
    Click = 0x20,
    Left = 0x30,
    Right = 0x31,
    Up = 0x40,
    Down = 0x41,
}

impl RemoteCode {
    /// Raw byte value.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for RemoteCode {
    type Error = ParseError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x10 => Ok(Self::Reload),
            0x20 => Ok(Self::Click),
            0x30 => Ok(Self::Left),
            0x31 => Ok(Self::Right),
            0x40 => Ok(Self::Up),
            0x41 => Ok(Self::Down),
            other => Err(ParseError::UnknownCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_packet_layout() {
        let packet = ControlPacket::new(1.0, -1.0, 0.5, 0.0);
        let bytes = packet.to_bytes();
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-1.0f32).to_le_bytes());
        assert_eq!(&bytes[8..12], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(ControlPacket::parse(&bytes), Ok(packet));
    }

    #[test]
    fn test_control_packet_truncated() {
        assert_eq!(ControlPacket::parse(&[0u8; 15]), Err(ParseError::Truncated));
    }

    #[test]
    fn test_remote_code_bytes() {
        assert_eq!(RemoteCode::Reload.as_u8(), 0x10);
        assert_eq!(RemoteCode::try_from(0x41), Ok(RemoteCode::Down));
        assert_eq!(RemoteCode::try_from(0x00), Err(ParseError::UnknownCode(0x00)));
    }
}
