//! Packed UI events.
//!
//! An [`Event`] is one of a closed set of menu actions. Relative actions
//! carry a small signed delta. On the wire every event is a single byte:
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! +-----------+-------------------+
//! |    tag    |   delta (i5, 2c)  |
//! +-----------+-------------------+
//! ```
//!
//! | Tag | Event                  | Payload            |
//! |-----|------------------------|--------------------|
//! | 0   | `None`                 | must be zero       |
//! | 1   | `Update`               | must be zero       |
//! | 2   | `WidgetClick`          | must be zero       |
//! | 3   | `PageCursorMove(d)`    | `d` in `[-16, 15]` |
//! | 4   | `WidgetValueChange(d)` | `d` in `[-16, 15]` |
//!
//! Tags 5-7 are reserved. A byte with a reserved tag, or with payload bits
//! set on a payload-less tag, decodes to [`Event::None`].

/// Smallest delta representable on the wire.
pub const DELTA_MIN: i8 = -16;

/// Largest delta representable on the wire.
pub const DELTA_MAX: i8 = 15;

const TAG_SHIFT: u8 = 5;
const PAYLOAD_MASK: u8 = 0x1F;

const TAG_NONE: u8 = 0;
const TAG_UPDATE: u8 = 1;
const TAG_WIDGET_CLICK: u8 = 2;
const TAG_PAGE_CURSOR_MOVE: u8 = 3;
const TAG_WIDGET_VALUE_CHANGE: u8 = 4;

/// A single menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// No action. Never queued.
    #[default]
    None,
    /// Redraw request; the receiver re-renders without changing state.
    Update,
    /// Click on the selected widget.
    WidgetClick,
    /// Move the page cursor by the given number of rows.
    PageCursorMove(i8),
    /// Adjust the selected widget's value by the given number of steps.
    WidgetValueChange(i8),
}

impl Event {
    /// Packed size in bytes.
    pub const SIZE: usize = 1;

    /// Returns `true` for [`Event::None`].
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Relative payload, zero for events without one.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> i8 {
        match self {
            Self::PageCursorMove(d) | Self::WidgetValueChange(d) => d,
            _ => 0,
        }
    }

    /// Pack into one byte. Deltas outside `[-16, 15]` saturate.
    #[must_use]
    pub const fn encode(self) -> u8 {
        let (tag, delta) = match self {
            Self::None => (TAG_NONE, 0),
            Self::Update => (TAG_UPDATE, 0),
            Self::WidgetClick => (TAG_WIDGET_CLICK, 0),
            Self::PageCursorMove(d) => (TAG_PAGE_CURSOR_MOVE, saturate(d)),
            Self::WidgetValueChange(d) => (TAG_WIDGET_VALUE_CHANGE, saturate(d)),
        };
        (tag << TAG_SHIFT) | (delta as u8 & PAYLOAD_MASK)
    }

    /// Unpack one byte. Malformed bytes yield [`Event::None`].
    #[must_use]
    pub const fn decode(byte: u8) -> Self {
        let payload = byte & PAYLOAD_MASK;
        // Sign-extend the 5-bit two's complement payload.
        let delta = ((payload << 3) as i8) >> 3;
        match byte >> TAG_SHIFT {
            TAG_UPDATE if payload == 0 => Self::Update,
            TAG_WIDGET_CLICK if payload == 0 => Self::WidgetClick,
            TAG_PAGE_CURSOR_MOVE => Self::PageCursorMove(delta),
            TAG_WIDGET_VALUE_CHANGE => Self::WidgetValueChange(delta),
            _ => Self::None,
        }
    }
}

impl From<u8> for Event {
    fn from(byte: u8) -> Self {
        Self::decode(byte)
    }
}

impl From<Event> for u8 {
    fn from(event: Event) -> Self {
        event.encode()
    }
}

#[inline]
const fn saturate(delta: i8) -> i8 {
    if delta < DELTA_MIN {
        DELTA_MIN
    } else if delta > DELTA_MAX {
        DELTA_MAX
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_representable_events() {
        assert_eq!(Event::decode(Event::None.encode()), Event::None);
        assert_eq!(Event::decode(Event::Update.encode()), Event::Update);
        assert_eq!(Event::decode(Event::WidgetClick.encode()), Event::WidgetClick);
        for d in DELTA_MIN..=DELTA_MAX {
            let cursor = Event::PageCursorMove(d);
            let value = Event::WidgetValueChange(d);
            assert_eq!(Event::decode(cursor.encode()), cursor);
            assert_eq!(Event::decode(value.encode()), value);
        }
    }

    #[test]
    fn test_known_bytes() {
        assert_eq!(Event::None.encode(), 0x00);
        assert_eq!(Event::Update.encode(), 0x20);
        assert_eq!(Event::WidgetClick.encode(), 0x40);
        assert_eq!(Event::PageCursorMove(1).encode(), 0x61);
        assert_eq!(Event::PageCursorMove(-1).encode(), 0x7F);
        assert_eq!(Event::WidgetValueChange(-16).encode(), 0x90);
    }

    #[test]
    fn test_encode_saturates_out_of_range_delta() {
        assert_eq!(
            Event::decode(Event::PageCursorMove(100).encode()),
            Event::PageCursorMove(DELTA_MAX)
        );
        assert_eq!(
            Event::decode(Event::WidgetValueChange(-100).encode()),
            Event::WidgetValueChange(DELTA_MIN)
        );
    }

    #[test]
    fn test_decode_rejects_reserved_tags() {
        for tag in 5u8..=7 {
            assert_eq!(Event::decode(tag << 5), Event::None);
            assert_eq!(Event::decode((tag << 5) | 0x03), Event::None);
        }
    }

    #[test]
    fn test_decode_rejects_payload_on_plain_tags() {
        assert_eq!(Event::decode(0x21), Event::None);
        assert_eq!(Event::decode(0x5F), Event::None);
        assert_eq!(Event::decode(0x01), Event::None);
    }

    #[test]
    fn test_delta_accessor() {
        assert_eq!(Event::PageCursorMove(-3).delta(), -3);
        assert_eq!(Event::WidgetValueChange(2).delta(), 2);
        assert_eq!(Event::WidgetClick.delta(), 0);
        assert!(Event::default().is_none());
    }
}
