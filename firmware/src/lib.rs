//! Dual-joystick remote firmware for RP2040.
//!
//! This crate provides the hardware side of the remote: ADC sticks, push
//! buttons, the UART radio link and the OLED. Everything else lives in
//! `djc-core`.

#![no_std]

// Re-export core types for convenience
pub use djc_core::{
    Behavior, DisplaySink, FlightControl, LocalMenu, Periphery, Remote, RemoteBehavior,
    RemoteConfig, RemoteEncoding, RemoteMenu, Transport, DEFAULT_CONFIG,
};
pub use mavlink_proto::MavlinkCodec;

pub mod display;
pub mod radio;
pub mod sticks;

pub use display::OledDisplay;
pub use radio::{rx_loop, tx_loop, FrameQueue, RadioLink};
pub use sticks::{ActiveLowButton, AdcSticks};

/// Behaviors on the right-button cycle.
pub const BEHAVIOR_SLOTS: usize = 3;

/// The behavior set used on this board.
pub type Behaviors = RemoteBehavior<MavlinkCodec>;
