//! Compile-time device configuration.

/// Tunables for input conditioning, tick rates and the text screen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteConfig {
    /// Raw samples collected per axis during startup calibration.
    pub calibration_samples: u16,
    /// Deadzone as a fraction of the observed raw spread.
    pub deadzone_fraction: f32,
    /// Raw limits of the ADC; the calibrated range is widened to these.
    pub raw_limits: Option<(u16, u16)>,
    /// Normalized magnitude a stick must exceed to leave `Home`.
    pub direction_threshold: f32,
    /// Minimum time between behavior updates.
    pub update_period_ms: u32,
    /// Minimum time between display refreshes.
    pub render_period_ms: u32,
    /// Minimum time between telemetry heartbeats.
    pub heartbeat_period_ms: u32,
    /// Lockout after an accepted button edge.
    pub debounce_ms: u32,
    /// Per-axis inversion, indexed by [`AxisChannel`](crate::input::AxisChannel).
    pub inverted: [bool; 4],
}

/// Reference board: 12-bit ADC, left X and right Y mounted flipped.
pub const DEFAULT_CONFIG: RemoteConfig = RemoteConfig {
    calibration_samples: 500,
    deadzone_fraction: 0.05,
    raw_limits: Some((0, 4095)),
    direction_threshold: 0.5,
    update_period_ms: 20,
    render_period_ms: 50,
    heartbeat_period_ms: 2000,
    debounce_ms: 30,
    inverted: [true, false, false, true],
};

impl Default for RemoteConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
