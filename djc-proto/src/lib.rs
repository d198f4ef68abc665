//! Wire-level value types for the dual-joystick remote.
//!
//! - [`Event`]: one-byte packed menu action (see [`event`] for the layout)
//! - [`ControlPacket`]: plain four-axis stick snapshot
//! - [`RemoteCode`]: legacy one-byte remote-menu commands
//! - [`Serialize`]: writes any of them into a caller buffer
//!
//! # Example
//!
//! ```
//! use djc_proto::Event;
//!
//! let byte = Event::WidgetValueChange(1).encode();
//! assert_eq!(Event::decode(byte), Event::WidgetValueChange(1));
//!
//! // Reserved tags decode to `None`
//! assert_eq!(Event::decode(0xE0), Event::None);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod event;
pub mod packet;
pub mod serialize;

pub use event::{Event, DELTA_MAX, DELTA_MIN};
pub use packet::{ControlPacket, ParseError, RemoteCode};
pub use serialize::{Serialize, SerializeError};
