//! Menu hosted on the peer.
//!
//! Navigation events are sent over the link instead of driving a local
//! [`Ui`](crate::ui::Ui), and whatever text the peer sends back is shown
//! as-is.

use djc_proto::{Event, RemoteCode};
use heapless::String;

use crate::behavior::{Behavior, View};
use crate::direction::DirectionListener;
use crate::input::{AnalogInputs, ButtonInput};
use crate::output::Transport;
use crate::periphery::Periphery;
use crate::render::Screen;

/// Capacity of the displayed peer text.
pub const REMOTE_TEXT_LEN: usize = 250;

const WAITING: &str = "Waiting for menu...";

/// Payloads read per update; only the last one is kept.
const RX_FRAMES_PER_UPDATE: usize = 4;

/// How navigation events are put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteEncoding {
    /// One packed [`Event`] byte.
    #[default]
    Packed,
    /// One [`RemoteCode`] byte, for peers that predate packed events.
    Legacy,
}

impl RemoteEncoding {
    /// Wire byte for `event`, or `None` if it has no representation.
    #[must_use]
    pub fn encode(self, event: Event) -> Option<u8> {
        if event.is_none() {
            return None;
        }
        match self {
            Self::Packed => Some(event.encode()),
            Self::Legacy => legacy_code(event).map(RemoteCode::as_u8),
        }
    }
}

fn legacy_code(event: Event) -> Option<RemoteCode> {
    match event {
        Event::None => None,
        Event::Update => Some(RemoteCode::Reload),
        Event::WidgetClick => Some(RemoteCode::Click),
        Event::PageCursorMove(d) if d < 0 => Some(RemoteCode::Up),
        Event::PageCursorMove(d) if d > 0 => Some(RemoteCode::Down),
        Event::WidgetValueChange(d) if d < 0 => Some(RemoteCode::Left),
        Event::WidgetValueChange(d) if d > 0 => Some(RemoteCode::Right),
        Event::PageCursorMove(_) | Event::WidgetValueChange(_) => None,
    }
}

pub struct RemoteMenu {
    encoding: RemoteEncoding,
    listener: DirectionListener,
    text: String<REMOTE_TEXT_LEN>,
    dirty: bool,
}

impl RemoteMenu {
    #[must_use]
    pub fn new(encoding: RemoteEncoding, direction_threshold: f32) -> Self {
        Self {
            encoding,
            listener: DirectionListener::new(direction_threshold),
            text: String::new(),
            dirty: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn encoding(&self) -> RemoteEncoding {
        self.encoding
    }

    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn send<T: Transport>(&self, transport: &mut T, event: Event) {
        let Some(byte) = self.encoding.encode(event) else {
            return;
        };
        debug!("remote menu: send {=u8:#x}", byte);
        if let Err(e) = transport.send(&[byte]) {
            warn!("remote menu: send failed: {}", e);
        }
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        push_truncated(&mut self.text, text);
        self.dirty = true;
    }

    /// Replace the text with a received payload, substituting `?` for
    /// invalid UTF-8.
    fn show_payload(&mut self, payload: &[u8]) {
        self.text.clear();
        for chunk in payload.utf8_chunks() {
            if !push_truncated(&mut self.text, chunk.valid()) {
                break;
            }
            if !chunk.invalid().is_empty() && self.text.push('?').is_err() {
                break;
            }
        }
        self.dirty = true;
    }
}

/// Append as much of `s` as fits. Returns `false` once the buffer is full.
fn push_truncated<const N: usize>(buf: &mut String<N>, s: &str) -> bool {
    for c in s.chars() {
        if buf.push(c).is_err() {
            return false;
        }
    }
    true
}

impl View for RemoteMenu {
    fn name(&self) -> &'static str {
        "Remote"
    }

    fn render(&mut self, screen: &mut Screen) {
        screen.push_wrapped(&self.text);
        self.dirty = false;
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }
}

impl<A, B, T> Behavior<Periphery<A, B, T>> for RemoteMenu
where
    A: AnalogInputs,
    B: ButtonInput,
    T: Transport,
{
    fn on_entry(&mut self, periphery: &mut Periphery<A, B, T>) {
        let _ = periphery.left_button.take_click();
        self.listener.reset();
        self.set_text(WAITING);
        self.send(&mut periphery.transport, Event::Update);
    }

    fn update(&mut self, periphery: &mut Periphery<A, B, T>, _now_ms: u64) {
        if periphery.left_button.take_click() {
            self.send(&mut periphery.transport, Event::WidgetClick);
        }
        let (x, y) = periphery.left_stick();
        if let Some(direction) = self.listener.poll(x, y) {
            self.send(&mut periphery.transport, direction.event());
        }

        let mut buf = [0u8; REMOTE_TEXT_LEN];
        let mut latest = None;
        for _ in 0..RX_FRAMES_PER_UPDATE {
            match periphery.transport.receive(&mut buf) {
                Some(len) => latest = Some(len),
                None => break,
            }
        }
        if let Some(len) = latest {
            self.show_payload(&buf[..len]);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::input::AxisChannel;
    use crate::periphery::tests::{calibrated, FakePeriphery};
    use std::vec;
    use std::vec::Vec;

    fn entered(encoding: RemoteEncoding) -> (RemoteMenu, FakePeriphery) {
        let mut menu = RemoteMenu::new(encoding, 0.5);
        let mut periphery = calibrated();
        menu.on_entry(&mut periphery);
        (menu, periphery)
    }

    #[test]
    fn test_entry_requests_reload() {
        let (menu, periphery) = entered(RemoteEncoding::Packed);
        assert_eq!(periphery.transport.sent, vec![vec![0x20]]);
        assert_eq!(menu.text(), WAITING);

        let (_, periphery) = entered(RemoteEncoding::Legacy);
        assert_eq!(periphery.transport.sent, vec![vec![0x10]]);
    }

    #[test]
    fn test_stick_and_click_are_forwarded() {
        let (mut menu, mut periphery) = entered(RemoteEncoding::Packed);
        periphery.inputs_mut().raw[AxisChannel::LeftY.index()] = 4095;
        menu.update(&mut periphery, 20);
        menu.update(&mut periphery, 40);
        periphery.left_button.pin_mut().0 = true;
        periphery.poll_buttons(60);
        menu.update(&mut periphery, 60);

        let sent: Vec<u8> = periphery.transport.sent.iter().map(|f| f[0]).collect();
        // reload, cursor down once while held, click
        assert_eq!(sent, [0x20, 0x61, 0x40]);
    }

    #[test]
    fn test_legacy_codes() {
        let legacy = RemoteEncoding::Legacy;
        assert_eq!(legacy.encode(Event::PageCursorMove(-1)), Some(0x40));
        assert_eq!(legacy.encode(Event::PageCursorMove(1)), Some(0x41));
        assert_eq!(legacy.encode(Event::WidgetValueChange(-1)), Some(0x30));
        assert_eq!(legacy.encode(Event::WidgetValueChange(1)), Some(0x31));
        assert_eq!(legacy.encode(Event::WidgetClick), Some(0x20));
        assert_eq!(legacy.encode(Event::PageCursorMove(0)), None);
        assert_eq!(legacy.encode(Event::None), None);
        assert_eq!(RemoteEncoding::Packed.encode(Event::None), None);
    }

    #[test]
    fn test_payload_replaces_text() {
        let (mut menu, mut periphery) = entered(RemoteEncoding::Packed);
        periphery.transport.inbox.push_back(b"old".to_vec());
        periphery.transport.inbox.push_back(b"Main\n>Speed: 3".to_vec());
        menu.update(&mut periphery, 20);
        assert_eq!(menu.text(), "Main\n>Speed: 3");

        let mut screen = Screen::new();
        menu.render(&mut screen);
        assert_eq!(screen.lines().collect::<Vec<_>>(), ["Main", ">Speed: 3"]);
        assert!(!menu.needs_redraw());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let (mut menu, mut periphery) = entered(RemoteEncoding::Packed);
        periphery.transport.inbox.push_back(vec![b'a', 0xFF, b'b']);
        menu.update(&mut periphery, 20);
        assert_eq!(menu.text(), "a?b");
    }

    #[test]
    fn test_long_payload_is_truncated() {
        let (mut menu, mut periphery) = entered(RemoteEncoding::Packed);
        periphery.transport.inbox.push_back(vec![b'x'; 400]);
        menu.update(&mut periphery, 20);
        assert_eq!(menu.text().len(), REMOTE_TEXT_LEN);
    }
}
