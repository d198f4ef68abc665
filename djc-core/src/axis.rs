//! Analog axis calibration and normalization.
//!
//! An [`AxisCalibrator`] is fed raw ADC samples at startup and produces a
//! [`Calibration`]. An [`AnalogAxis`] owns that calibration and maps every
//! later raw sample to a signed value in `[-1.0, 1.0]`.
//!
//! # Example
//!
//! ```
//! use djc_core::axis::{AnalogAxis, AxisCalibrator};
//!
//! let mut calibrator = AxisCalibrator::new(3, 0.05, None);
//! calibrator.start();
//! for raw in [1000, 2000, 3000] {
//!     calibrator.poll(raw);
//! }
//! assert!(!calibrator.running());
//!
//! let axis = AnalogAxis::new(calibrator.calibration().unwrap(), false);
//! assert_eq!(axis.read(2000), 0.0);
//! assert_eq!(axis.read(3000), 1.0);
//! assert_eq!(axis.read(4095), 1.0);
//! ```

use crate::config::RemoteConfig;

/// Usable range of one analog axis, measured in raw ADC units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub raw_min: u16,
    pub raw_max: u16,
    /// Mean of the calibration samples.
    pub raw_center: f32,
    /// Half-width of the band around center that reads as zero.
    pub deadzone: f32,
}

impl Calibration {
    /// Calibration used when no samples were taken.
    ///
    /// Centered on the midpoint of `raw_limits` (or zero) with no deadzone.
    #[must_use]
    pub fn neutral(raw_limits: Option<(u16, u16)>) -> Self {
        let (raw_min, raw_max) = raw_limits.unwrap_or((0, 0));
        Self {
            raw_min,
            raw_max,
            raw_center: (f32::from(raw_min) + f32::from(raw_max)) / 2.0,
            deadzone: 0.0,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::neutral(None)
    }
}

/// Collects a fixed number of raw samples and derives a [`Calibration`].
///
/// Call [`start`](Self::start), then [`poll`](Self::poll) once per tick
/// while [`running`](Self::running) is true.
#[derive(Debug, Clone)]
pub struct AxisCalibrator {
    samples: u16,
    remaining: u16,
    sum: u64,
    min: u16,
    max: u16,
    deadzone_fraction: f32,
    raw_limits: Option<(u16, u16)>,
    result: Option<Calibration>,
}

impl AxisCalibrator {
    /// Create a calibrator for `samples` raw readings.
    ///
    /// `deadzone_fraction` is applied to the final raw range. `raw_limits`,
    /// when set, widens the observed extremes so a stick sampled at rest
    /// still gets its full travel.
    #[must_use]
    pub fn new(samples: u16, deadzone_fraction: f32, raw_limits: Option<(u16, u16)>) -> Self {
        Self {
            samples,
            remaining: 0,
            sum: 0,
            min: u16::MAX,
            max: u16::MIN,
            deadzone_fraction: deadzone_fraction.clamp(0.0, 1.0),
            raw_limits,
            result: None,
        }
    }

    /// Create a calibrator from the device configuration.
    #[must_use]
    pub fn from_config(config: &RemoteConfig) -> Self {
        Self::new(
            config.calibration_samples,
            config.deadzone_fraction,
            config.raw_limits,
        )
    }

    /// Begin (or restart) sample collection.
    ///
    /// With zero samples configured this completes immediately with
    /// [`Calibration::neutral`].
    pub fn start(&mut self) {
        self.sum = 0;
        self.min = u16::MAX;
        self.max = u16::MIN;
        self.result = None;
        self.remaining = self.samples;
        if self.samples == 0 {
            self.result = Some(Calibration::neutral(self.raw_limits));
        }
    }

    /// Consume one raw sample. No-op unless running.
    pub fn poll(&mut self, raw: u16) {
        if !self.running() {
            return;
        }

        self.sum += u64::from(raw);
        self.min = self.min.min(raw);
        self.max = self.max.max(raw);
        self.remaining -= 1;

        if self.remaining == 0 {
            self.result = Some(self.finish());
        }
    }

    /// Returns `true` while samples are still being collected.
    #[inline]
    #[must_use]
    pub fn running(&self) -> bool {
        self.remaining > 0
    }

    /// The computed calibration, once collection has finished.
    #[inline]
    #[must_use]
    pub fn calibration(&self) -> Option<Calibration> {
        self.result
    }

    fn finish(&self) -> Calibration {
        let (mut raw_min, mut raw_max) = (self.min, self.max);
        if let Some((lo, hi)) = self.raw_limits {
            raw_min = raw_min.min(lo);
            raw_max = raw_max.max(hi);
        }

        let raw_center = self.sum as f32 / f32::from(self.samples);
        let spread = f32::from(raw_max - raw_min);

        Calibration {
            raw_min,
            raw_max,
            raw_center,
            deadzone: spread * self.deadzone_fraction,
        }
    }
}

/// One calibrated analog axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogAxis {
    calibration: Calibration,
    inverted: bool,
}

impl AnalogAxis {
    #[must_use]
    pub const fn new(calibration: Calibration, inverted: bool) -> Self {
        Self {
            calibration,
            inverted,
        }
    }

    #[inline]
    #[must_use]
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    #[inline]
    #[must_use]
    pub const fn inverted(&self) -> bool {
        self.inverted
    }

    /// Replace the calibration, keeping the inversion flag.
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }

    /// Map a raw sample to `[-1.0, 1.0]`.
    ///
    /// Samples within the deadzone read exactly zero. Past the deadzone the
    /// remaining travel on that side is rescaled so full deflection reaches
    /// ±1. A side with no travel reads zero.
    #[must_use]
    pub fn read(&self, raw: u16) -> f32 {
        let cal = &self.calibration;
        let offset = f32::from(raw) - cal.raw_center;
        let distance = abs(offset);
        if distance <= cal.deadzone {
            return 0.0;
        }

        let span = if offset > 0.0 {
            f32::from(cal.raw_max) - cal.raw_center
        } else {
            cal.raw_center - f32::from(cal.raw_min)
        };
        let usable = span - cal.deadzone;
        if usable <= 0.0 {
            return 0.0;
        }

        let magnitude = ((distance - cal.deadzone) / usable).min(1.0);
        let value = if offset > 0.0 { magnitude } else { -magnitude };
        if self.inverted {
            -value
        } else {
            value
        }
    }
}

#[inline]
pub(crate) fn abs(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}
