//! Hardware owned by the remote.

use crate::axis::{AnalogAxis, AxisCalibrator, Calibration};
use crate::config::RemoteConfig;
use crate::input::{AnalogInputs, AxisChannel, Button, ButtonInput};
use crate::output::Transport;
use crate::protocol::ControlAxes;

/// Sticks, buttons and radio link, passed to behaviors on every call.
pub struct Periphery<A, B, T> {
    inputs: A,
    axes: [AnalogAxis; 4],
    pub left_button: Button<B>,
    pub right_button: Button<B>,
    pub transport: T,
    config: RemoteConfig,
}

impl<A, B, T> Periphery<A, B, T>
where
    A: AnalogInputs,
    B: ButtonInput,
    T: Transport,
{
    /// Assemble the periphery. Axes start uncalibrated with the configured
    /// inversion.
    pub fn new(inputs: A, left_button: B, right_button: B, transport: T, config: RemoteConfig) -> Self {
        let axes = config
            .inverted
            .map(|inverted| AnalogAxis::new(Calibration::neutral(config.raw_limits), inverted));
        Self {
            inputs,
            axes,
            left_button: Button::new(left_button, config.debounce_ms),
            right_button: Button::new(right_button, config.debounce_ms),
            transport,
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Calibrate all four axes from rest samples.
    ///
    /// Blocks for the configured sample count, reading every axis once per
    /// round and calling `delay` between rounds. Axes are calibrated
    /// independently.
    pub fn calibrate<D: FnMut()>(&mut self, mut delay: D) -> [Calibration; 4] {
        let mut calibrators = [(); 4].map(|()| AxisCalibrator::from_config(&self.config));
        for calibrator in calibrators.iter_mut() {
            calibrator.start();
        }

        while calibrators.iter().any(AxisCalibrator::running) {
            for channel in AxisChannel::ALL {
                let raw = self.inputs.read_raw(channel);
                calibrators[channel.index()].poll(raw);
            }
            delay();
        }

        for channel in AxisChannel::ALL {
            let calibration = calibrators[channel.index()]
                .calibration()
                .unwrap_or_else(|| Calibration::neutral(self.config.raw_limits));
            info!(
                "axis {}: center={} deadzone={}",
                channel,
                calibration.raw_center,
                calibration.deadzone
            );
            self.axes[channel.index()].set_calibration(calibration);
        }

        self.axes.map(|axis| *axis.calibration())
    }

    #[must_use]
    pub fn axis(&self, channel: AxisChannel) -> &AnalogAxis {
        &self.axes[channel.index()]
    }

    /// Sample and normalize one axis.
    pub fn read(&mut self, channel: AxisChannel) -> f32 {
        let raw = self.inputs.read_raw(channel);
        self.axes[channel.index()].read(raw)
    }

    /// Left stick as `(x, y)`.
    pub fn left_stick(&mut self) -> (f32, f32) {
        (self.read(AxisChannel::LeftX), self.read(AxisChannel::LeftY))
    }

    /// Sample all four axes.
    pub fn sticks(&mut self) -> ControlAxes {
        ControlAxes {
            left_x: self.read(AxisChannel::LeftX),
            left_y: self.read(AxisChannel::LeftY),
            right_x: self.read(AxisChannel::RightX),
            right_y: self.read(AxisChannel::RightY),
        }
    }

    /// Sample both buttons, latching clicks.
    pub fn poll_buttons(&mut self, now_ms: u64) {
        self.left_button.poll(now_ms);
        self.right_button.poll(now_ms);
    }

    pub fn inputs_mut(&mut self) -> &mut A {
        &mut self.inputs
    }
}
