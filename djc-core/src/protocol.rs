//! Telemetry protocol seam.
//!
//! Flight control hands stick values to a [`ControlProtocol`] which frames
//! them for the vehicle, and feeds it received bytes to pick up status
//! messages. The MAVLink implementation lives in the `mavlink-proto` crate.

use djc_proto::{ControlPacket, SerializeError};

/// Capacity of a [`Telemetry::Text`] message.
pub const TELEMETRY_TEXT_LEN: usize = 70;

/// Normalized values of all four stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlAxes {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
}

impl ControlAxes {
    /// Plain snapshot frame for peers without a telemetry protocol.
    #[must_use]
    pub const fn to_packet(&self) -> ControlPacket {
        ControlPacket::new(self.left_x, self.left_y, self.right_x, self.right_y)
    }
}

/// Status decoded from the vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Telemetry {
    /// Free-form text, e.g. a forwarded serial console line.
    Text(heapless::String<TELEMETRY_TEXT_LEN>),
    /// Acceleration in g.
    Accel { x: f32, y: f32, z: f32 },
    /// Peer is alive.
    Heartbeat,
}

/// Frames control output and decodes status input for one vehicle protocol.
pub trait ControlProtocol {
    /// Encode a manual-control frame for `axes` into `buf`.
    ///
    /// Returns the frame length.
    fn encode_manual_control(
        &mut self,
        axes: &ControlAxes,
        buf: &mut [u8],
    ) -> Result<usize, SerializeError>;

    /// Encode a keep-alive frame into `buf`.
    fn encode_heartbeat(&mut self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Feed one received byte, returning status when a frame completes.
    fn push_byte(&mut self, byte: u8) -> Option<Telemetry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_to_packet_keeps_field_order() {
        let axes = ControlAxes {
            left_x: 0.1,
            left_y: 0.2,
            right_x: 0.3,
            right_y: 0.4,
        };
        assert_eq!(axes.to_packet(), ControlPacket::new(0.1, 0.2, 0.3, 0.4));
    }
}
