//! Platform-agnostic interaction core of the dual-joystick remote.
//!
//! Everything here runs on the device and on host for testing. Hardware is
//! reached only through the traits in [`input`], [`output`] and
//! [`protocol`].
//!
//! # Overview
//!
//! - [`axis`]: rest-sample calibration ([`AxisCalibrator`]) and normalized
//!   reads ([`AnalogAxis`])
//! - [`direction`]: edge-triggered stick directions ([`DirectionListener`])
//! - [`queue`]: bounded drop-oldest [`EventQueue`]
//! - [`ui`]: Page/Widget menu engine ([`Ui`])
//! - [`render`]: fixed-size text screen ([`LineBuffer`])
//! - [`behavior`]: mode switching ([`BehaviorManager`])
//! - [`behaviors`]: flight control, local menu and remote menu
//! - [`remote`]: composition root driving the tick loop ([`Remote`])
//!
//! # Data flow
//!
//! ```text
//! ADC samples -> AnalogAxis -> DirectionListener -> Event -> Ui -> Screen -> display
//!                          \-> ControlAxes -> ControlProtocol -> radio
//! ```
//!
//! # Example
//!
//! ```rust
//! use djc_core::{AnalogAxis, AxisCalibrator, Direction, DirectionListener};
//! use djc_proto::Event;
//!
//! let mut calibrator = AxisCalibrator::new(4, 0.05, Some((0, 4095)));
//! calibrator.start();
//! while calibrator.running() {
//!     calibrator.poll(2048);
//! }
//! let axis = AnalogAxis::new(calibrator.calibration().unwrap(), false);
//!
//! let mut listener = DirectionListener::default();
//! assert_eq!(listener.poll(0.0, axis.read(4095)), Some(Direction::Down));
//! assert_eq!(Direction::Down.event(), Event::PageCursorMove(1));
//! // Holding the stick does not repeat
//! assert_eq!(listener.poll(0.0, axis.read(4095)), None);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt and derive `defmt::Format` on public types

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod axis;
pub mod behavior;
pub mod behaviors;
pub mod config;
pub mod direction;
pub mod input;
pub mod output;
pub mod periphery;
pub mod protocol;
pub mod queue;
pub mod remote;
pub mod render;
pub mod timer;
pub mod ui;

pub use axis::{AnalogAxis, AxisCalibrator, Calibration};
pub use behavior::{Behavior, BehaviorError, BehaviorManager, View};
pub use behaviors::{FlightControl, LocalMenu, RemoteBehavior, RemoteEncoding, RemoteMenu};
pub use config::{RemoteConfig, DEFAULT_CONFIG};
pub use direction::{Direction, DirectionListener};
pub use input::{AnalogInputs, AxisChannel, Button, ButtonInput, ClickDetector};
pub use output::{DisplayError, DisplaySink, SendError, Transport};
pub use periphery::Periphery;
pub use protocol::{ControlAxes, ControlProtocol, Telemetry};
pub use queue::EventQueue;
pub use remote::Remote;
pub use render::{LineBuffer, Screen};
pub use timer::Timer;
pub use ui::Ui;
