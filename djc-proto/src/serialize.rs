//! Writing outgoing frames into caller buffers.
//!
//! # Example
//!
//! ```
//! use djc_proto::{Event, Serialize};
//!
//! let mut buf = [0u8; 4];
//! let len = Event::PageCursorMove(-1).serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0x7F]);
//! ```

use crate::event::Event;
use crate::packet::{ControlPacket, RemoteCode};

/// Error type for frame encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer cannot hold the whole frame.
    BufferTooSmall,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

/// A value with a fixed wire form.
pub trait Serialize {
    /// Write the wire form to the start of `buf`, returning its length.
    ///
    /// # Errors
    ///
    /// [`SerializeError::BufferTooSmall`] if `buf` is shorter than the frame.
    /// Nothing is written in that case.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;
}

/// Store a single byte at the start of `buf`.
fn put_byte(buf: &mut [u8], byte: u8) -> Result<usize, SerializeError> {
    let slot = buf.first_mut().ok_or(SerializeError::BufferTooSmall)?;
    *slot = byte;
    Ok(1)
}

impl Serialize for Event {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        put_byte(buf, self.encode())
    }
}

impl Serialize for RemoteCode {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        put_byte(buf, self.as_u8())
    }
}

impl Serialize for ControlPacket {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        buf.get_mut(..ControlPacket::SIZE)
            .ok_or(SerializeError::BufferTooSmall)?
            .copy_from_slice(&self.to_bytes());
        Ok(ControlPacket::SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_one_byte() {
        let mut buf = [0xAAu8; 2];
        assert_eq!(Event::WidgetClick.serialize(&mut buf), Ok(1));
        assert_eq!(buf, [0x40, 0xAA]);
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf: [u8; 0] = [];
        assert_eq!(
            Event::Update.serialize(&mut buf),
            Err(SerializeError::BufferTooSmall)
        );
        assert_eq!(
            RemoteCode::Click.serialize(&mut buf),
            Err(SerializeError::BufferTooSmall)
        );
    }

    #[test]
    fn test_control_packet_parses_back() {
        let packet = ControlPacket::new(0.25, 0.0, -0.75, 1.0);
        let mut buf = [0u8; 32];
        let len = packet.serialize(&mut buf).unwrap();
        assert_eq!(len, 16);
        assert_eq!(ControlPacket::parse(&buf[..len]), Ok(packet));
    }

    #[test]
    fn test_short_buffer_is_untouched() {
        let mut buf = [0u8; 10];
        assert_eq!(
            ControlPacket::new(1.0, 1.0, 1.0, 1.0).serialize(&mut buf),
            Err(SerializeError::BufferTooSmall)
        );
        assert_eq!(buf, [0u8; 10]);
    }

    #[test]
    fn test_remote_code_byte() {
        let mut buf = [0u8; 1];
        RemoteCode::Up.serialize(&mut buf).unwrap();
        assert_eq!(buf[0], 0x40);
    }
}
