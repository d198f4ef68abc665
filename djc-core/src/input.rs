//! Input collaborator traits and button edge detection.

/// One of the four stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisChannel {
    LeftX = 0,
    LeftY = 1,
    RightX = 2,
    RightY = 3,
}

impl AxisChannel {
    /// All channels in index order.
    pub const ALL: [AxisChannel; 4] = [Self::LeftX, Self::LeftY, Self::RightX, Self::RightY];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Source of raw analog samples.
///
/// Implementations read one ADC conversion per call and must not block for
/// longer than a conversion takes.
pub trait AnalogInputs {
    fn read_raw(&mut self, channel: AxisChannel) -> u16;
}

/// Level of a push button; `true` while held.
pub trait ButtonInput {
    fn is_pressed(&mut self) -> bool;
}

/// Debounced press-edge detector.
///
/// The first level change is accepted immediately; further changes within
/// `debounce_ms` of an accepted change are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickDetector {
    debounce_ms: u32,
    pressed: bool,
    last_change_ms: Option<u64>,
}

impl ClickDetector {
    #[must_use]
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            pressed: false,
            last_change_ms: None,
        }
    }

    /// Feed the current level. Returns `true` on an accepted press edge.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        if pressed == self.pressed {
            return false;
        }
        if let Some(last) = self.last_change_ms {
            if now_ms.saturating_sub(last) < u64::from(self.debounce_ms) {
                return false;
            }
        }
        self.pressed = pressed;
        self.last_change_ms = Some(now_ms);
        pressed
    }

    /// Debounced level.
    #[inline]
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// A [`ButtonInput`] paired with its [`ClickDetector`].
#[derive(Debug)]
pub struct Button<P> {
    pin: P,
    detector: ClickDetector,
    clicked: bool,
}

impl<P: ButtonInput> Button<P> {
    pub fn new(pin: P, debounce_ms: u32) -> Self {
        Self {
            pin,
            detector: ClickDetector::new(debounce_ms),
            clicked: false,
        }
    }

    /// Sample the pin. Returns `true` on a new click.
    ///
    /// The click is also latched until [`take_click`](Self::take_click).
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let level = self.pin.is_pressed();
        let click = self.detector.update(level, now_ms);
        self.clicked |= click;
        click
    }

    /// Consume a latched click.
    pub fn take_click(&mut self) -> bool {
        core::mem::take(&mut self.clicked)
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.detector.is_pressed()
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_only() {
        let mut detector = ClickDetector::new(0);
        assert!(detector.update(true, 0));
        assert!(!detector.update(true, 1));
        assert!(!detector.update(false, 2));
        assert!(detector.update(true, 3));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut detector = ClickDetector::new(30);
        assert!(detector.update(true, 100));
        // Contact bounce within the lockout
        assert!(!detector.update(false, 105));
        assert!(!detector.update(true, 110));
        assert!(detector.is_pressed());
        // Real release and second press
        assert!(!detector.update(false, 200));
        assert!(detector.update(true, 240));
    }

    struct Level(bool);

    impl ButtonInput for Level {
        fn is_pressed(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_button_latches_click() {
        let mut button = Button::new(Level(false), 0);
        assert!(!button.poll(0));
        button.pin_mut().0 = true;
        assert!(button.poll(1));
        assert!(!button.poll(2));
        assert!(button.take_click());
        assert!(!button.take_click());
    }
}
