//! Output collaborator traits and error types.

use crate::render::Screen;

/// Error type for display operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus/communication error.
    Io,
    /// Display not initialized.
    NotReady,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "display bus error"),
            Self::NotReady => write!(f, "display not ready"),
        }
    }
}

/// Renders finished text screens.
///
/// The core never addresses pixels; implementations own font and layout.
pub trait DisplaySink {
    /// Replace the displayed content with `screen`.
    fn show(&mut self, screen: &Screen) -> Result<(), DisplayError>;
}

/// Error type for transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// Link/communication I/O error.
    Io,
    /// Frame exceeds the link's maximum payload.
    TooLarge,
    /// Previous frame still in flight.
    Busy,
}

impl core::fmt::Display for SendError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "link I/O error"),
            Self::TooLarge => write!(f, "frame too large"),
            Self::Busy => write!(f, "link busy"),
        }
    }
}

/// Wireless link to the peer.
///
/// Both directions are non-blocking. The core never retries a failed send.
pub trait Transport {
    /// Queue one frame for transmission.
    fn send(&mut self, frame: &[u8]) -> Result<(), SendError>;

    /// Copy the next received frame into `buf`, returning its length.
    ///
    /// Frames longer than `buf` are truncated.
    fn receive(&mut self, buf: &mut [u8]) -> Option<usize>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, frame: &[u8]) -> Result<(), SendError> {
        (**self).send(frame)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Option<usize> {
        (**self).receive(buf)
    }
}
