//! Joystick potentiometers and push buttons.

use defmt::warn;
use djc_core::{AnalogInputs, AxisChannel, ButtonInput};
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Input;

/// Four potentiometers on the RP2040 ADC (GPIO 26..=29).
///
/// Channels are ordered like [`AxisChannel`]: left X, left Y, right X, right Y.
pub struct AdcSticks<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Channel<'d>; 4],
    /// Last good sample per channel, returned when a conversion fails.
    last: [u16; 4],
}

impl<'d> AdcSticks<'d> {
    #[must_use]
    pub fn new(adc: Adc<'d, Blocking>, channels: [Channel<'d>; 4]) -> Self {
        Self {
            adc,
            channels,
            last: [2048; 4],
        }
    }
}

impl AnalogInputs for AdcSticks<'_> {
    fn read_raw(&mut self, channel: AxisChannel) -> u16 {
        let i = channel.index();
        match self.adc.blocking_read(&mut self.channels[i]) {
            Ok(raw) => self.last[i] = raw,
            Err(e) => warn!("ADC read failed on {}: {:?}", channel, e),
        }
        self.last[i]
    }
}

/// Stick push button wired to ground with the internal pull-up enabled.
pub struct ActiveLowButton<'d>(Input<'d>);

impl<'d> ActiveLowButton<'d> {
    #[must_use]
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl ButtonInput for ActiveLowButton<'_> {
    fn is_pressed(&mut self) -> bool {
        self.0.is_low()
    }
}
