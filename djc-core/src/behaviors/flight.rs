//! Direct stick control.
//!
//! Streams all four sticks to the vehicle every update. The left button
//! switches between the telemetry protocol (manual-control frames plus a
//! periodic heartbeat, with status shown from received frames) and plain
//! [`ControlPacket`](djc_proto::ControlPacket) snapshots.

use djc_proto::Serialize;
use heapless::String;

use crate::behavior::{Behavior, View};
use crate::input::{AnalogInputs, ButtonInput};
use crate::output::{SendError, Transport};
use crate::periphery::Periphery;
use crate::protocol::{ControlAxes, ControlProtocol, Telemetry, TELEMETRY_TEXT_LEN};
use crate::render::Screen;
use crate::timer::Timer;

/// Scratch size for one outgoing frame.
const FRAME_LEN: usize = 64;

/// Scratch size for one received frame.
const RX_LEN: usize = 256;

/// Received frames handled per update.
const RX_FRAMES_PER_UPDATE: usize = 4;

/// Last thing worth showing under the stick values.
#[derive(Debug, Clone, PartialEq)]
enum Status {
    Idle,
    Text(String<TELEMETRY_TEXT_LEN>),
    Accel { x: f32, y: f32, z: f32 },
    Error(SendError),
}

pub struct FlightControl<C> {
    protocol: C,
    use_protocol: bool,
    axes: ControlAxes,
    heartbeat: Timer,
    status: Status,
    heartbeats_seen: u32,
}

impl<C: ControlProtocol> FlightControl<C> {
    /// Start in protocol mode, sending a heartbeat every `heartbeat_period_ms`.
    pub fn new(protocol: C, heartbeat_period_ms: u32) -> Self {
        Self {
            protocol,
            use_protocol: true,
            axes: ControlAxes::default(),
            heartbeat: Timer::new(heartbeat_period_ms),
            status: Status::Idle,
            heartbeats_seen: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn uses_protocol(&self) -> bool {
        self.use_protocol
    }

    /// Stick values from the latest update.
    #[inline]
    #[must_use]
    pub const fn axes(&self) -> &ControlAxes {
        &self.axes
    }

    /// Heartbeats received from the vehicle.
    #[inline]
    #[must_use]
    pub const fn heartbeats_seen(&self) -> u32 {
        self.heartbeats_seen
    }

    pub fn protocol_mut(&mut self) -> &mut C {
        &mut self.protocol
    }

    fn toggle_mode(&mut self) {
        self.use_protocol = !self.use_protocol;
        self.heartbeat.reset();
        self.status = Status::Idle;
        info!("flight: protocol {=bool}", self.use_protocol);
    }

    fn send<T: Transport>(&mut self, transport: &mut T, frame: &[u8]) {
        if let Err(e) = transport.send(frame) {
            warn!("flight: send failed: {}", e);
            self.status = Status::Error(e);
        }
    }

    fn send_protocol<T: Transport>(&mut self, transport: &mut T, now_ms: u64) {
        let mut frame = [0u8; FRAME_LEN];

        if self.heartbeat.ready(now_ms) {
            match self.protocol.encode_heartbeat(&mut frame) {
                Ok(len) => self.send(transport, &frame[..len]),
                Err(e) => warn!("flight: heartbeat encode: {}", e),
            }
        }

        match self.protocol.encode_manual_control(&self.axes, &mut frame) {
            Ok(len) => self.send(transport, &frame[..len]),
            Err(e) => warn!("flight: control encode: {}", e),
        }
    }

    fn receive<T: Transport>(&mut self, transport: &mut T) {
        let mut buf = [0u8; RX_LEN];
        for _ in 0..RX_FRAMES_PER_UPDATE {
            let Some(len) = transport.receive(&mut buf) else {
                break;
            };
            for &byte in &buf[..len] {
                if let Some(telemetry) = self.protocol.push_byte(byte) {
                    self.apply(telemetry);
                }
            }
        }
    }

    fn apply(&mut self, telemetry: Telemetry) {
        self.status = match telemetry {
            Telemetry::Text(text) => Status::Text(text),
            Telemetry::Accel { x, y, z } => Status::Accel { x, y, z },
            Telemetry::Heartbeat => {
                self.heartbeats_seen = self.heartbeats_seen.wrapping_add(1);
                return;
            }
        };
    }
}

impl<C: ControlProtocol> View for FlightControl<C> {
    fn name(&self) -> &'static str {
        "Flight"
    }

    fn render(&mut self, screen: &mut Screen) {
        let mode = if self.use_protocol { "MAV" } else { "RAW" };
        screen.line(format_args!("Flight [{mode}]"));
        screen.line(format_args!(
            "L {:+.2} {:+.2}",
            self.axes.left_x, self.axes.left_y
        ));
        screen.line(format_args!(
            "R {:+.2} {:+.2}",
            self.axes.right_x, self.axes.right_y
        ));
        match &self.status {
            Status::Idle => {}
            Status::Text(text) => screen.push_wrapped(text),
            Status::Accel { x, y, z } => screen.line(format_args!("Acc {x:.2} {y:.2} {z:.2}")),
            Status::Error(e) => screen.line(format_args!("tx: {e}")),
        }
    }
}

impl<A, B, T, C> Behavior<Periphery<A, B, T>> for FlightControl<C>
where
    A: AnalogInputs,
    B: ButtonInput,
    T: Transport,
    C: ControlProtocol,
{
    fn on_entry(&mut self, periphery: &mut Periphery<A, B, T>) {
        // Drop a click latched before entry.
        let _ = periphery.left_button.take_click();
        self.heartbeat.reset();
        self.status = Status::Idle;
    }

    fn update(&mut self, periphery: &mut Periphery<A, B, T>, now_ms: u64) {
        if periphery.left_button.take_click() {
            self.toggle_mode();
        }

        self.axes = periphery.sticks();

        if self.use_protocol {
            self.send_protocol(&mut periphery.transport, now_ms);
            self.receive(&mut periphery.transport);
        } else {
            let mut frame = [0u8; FRAME_LEN];
            match self.axes.to_packet().serialize(&mut frame) {
                Ok(len) => self.send(&mut periphery.transport, &frame[..len]),
                Err(e) => warn!("flight: packet encode: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::periphery::tests::{calibrated, FakePeriphery};
    use djc_proto::{ControlPacket, SerializeError};
    use std::vec;
    use std::vec::Vec;

    /// Protocol stub: heartbeat is `[0xAA]`, control is `[0xCC, x]` where x
    /// is left_x scaled to a signed byte. Any received `b'!'` completes a
    /// text message, `b'H'` a heartbeat, `b'A'` an accel reading.
    #[derive(Default)]
    struct StubProtocol {
        text: Vec<u8>,
    }

    impl ControlProtocol for StubProtocol {
        fn encode_manual_control(
            &mut self,
            axes: &ControlAxes,
            buf: &mut [u8],
        ) -> Result<usize, SerializeError> {
            if buf.len() < 2 {
                return Err(SerializeError::BufferTooSmall);
            }
            buf[0] = 0xCC;
            buf[1] = (axes.left_x * 100.0) as i8 as u8;
            Ok(2)
        }

        fn encode_heartbeat(&mut self, buf: &mut [u8]) -> Result<usize, SerializeError> {
            buf[0] = 0xAA;
            Ok(1)
        }

        fn push_byte(&mut self, byte: u8) -> Option<Telemetry> {
            match byte {
                b'H' => Some(Telemetry::Heartbeat),
                b'A' => Some(Telemetry::Accel {
                    x: 0.0,
                    y: 0.0,
                    z: -1.0,
                }),
                b'!' => {
                    let text = core::str::from_utf8(&self.text).ok()?;
                    let msg = String::try_from(text).ok()?;
                    self.text.clear();
                    Some(Telemetry::Text(msg))
                }
                other => {
                    self.text.push(other);
                    None
                }
            }
        }
    }

    fn flight() -> FlightControl<StubProtocol> {
        FlightControl::new(StubProtocol::default(), 2000)
    }

    fn entered() -> (FlightControl<StubProtocol>, FakePeriphery) {
        let mut behavior = flight();
        let mut periphery = calibrated();
        behavior.on_entry(&mut periphery);
        (behavior, periphery)
    }

    fn render(behavior: &mut FlightControl<StubProtocol>) -> Vec<std::string::String> {
        let mut screen = Screen::new();
        behavior.render(&mut screen);
        screen.lines().map(Into::into).collect()
    }

    #[test]
    fn test_heartbeat_then_control() {
        let (mut behavior, mut periphery) = entered();
        periphery.inputs_mut().raw[0] = 0; // left X full, inverted
        behavior.update(&mut periphery, 0);
        behavior.update(&mut periphery, 20);
        behavior.update(&mut periphery, 2000);

        assert_eq!(
            periphery.transport.sent,
            vec![
                vec![0xAA],
                vec![0xCC, 100],
                vec![0xCC, 100],
                vec![0xAA],
                vec![0xCC, 100],
            ]
        );
        assert_eq!(behavior.axes().left_x, 1.0);
    }

    #[test]
    fn test_left_click_switches_to_plain_packets() {
        let (mut behavior, mut periphery) = entered();
        periphery.left_button.pin_mut().0 = true;
        periphery.poll_buttons(0);
        behavior.update(&mut periphery, 0);

        assert!(!behavior.uses_protocol());
        assert_eq!(periphery.transport.sent.len(), 1);
        let packet = ControlPacket::parse(&periphery.transport.sent[0]).unwrap();
        assert_eq!(packet, ControlPacket::default());
    }

    #[test]
    fn test_click_before_entry_is_dropped() {
        let mut behavior = flight();
        let mut periphery = calibrated();
        periphery.left_button.pin_mut().0 = true;
        periphery.poll_buttons(0);
        behavior.on_entry(&mut periphery);
        behavior.update(&mut periphery, 0);
        assert!(behavior.uses_protocol());
    }

    #[test]
    fn test_telemetry_updates_status() {
        let (mut behavior, mut periphery) = entered();
        periphery.transport.inbox.push_back(b"HHok!".to_vec());
        behavior.update(&mut periphery, 0);
        assert_eq!(behavior.heartbeats_seen(), 2);
        assert_eq!(render(&mut behavior).last().map(|s| s.as_str()), Some("ok"));

        periphery.transport.inbox.push_back(b"A".to_vec());
        behavior.update(&mut periphery, 20);
        assert_eq!(
            render(&mut behavior).last().map(|s| s.as_str()),
            Some("Acc 0.00 0.00 -1.00")
        );
    }

    #[test]
    fn test_send_failure_is_shown() {
        let (mut behavior, mut periphery) = entered();
        periphery.transport.fail = Some(SendError::Busy);
        behavior.update(&mut periphery, 0);
        assert_eq!(
            render(&mut behavior).last().map(|s| s.as_str()),
            Some("tx: link busy")
        );
    }

    #[test]
    fn test_render_layout() {
        let (mut behavior, mut periphery) = entered();
        behavior.update(&mut periphery, 0);
        assert_eq!(
            render(&mut behavior),
            ["Flight [MAV]", "L +0.00 +0.00", "R +0.00 +0.00"]
        );
    }
}
