//! Transparent UART radio link.
//!
//! The radio module forwards whatever the UART sends and delivers what it
//! receives with short gaps between packets. A frame on the receive side is
//! therefore every byte that arrives before the line goes quiet for
//! [`FRAME_GAP`].
//!
//! The tick loop is synchronous, so both directions go through channels:
//! [`RadioLink`] queues and dequeues frames without waiting, the
//! [`tx_loop`] and [`rx_loop`] futures own the UART halves.

use defmt::{debug, warn};
use djc_core::{SendError, Transport};
use embassy_rp::uart::{Async, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration};
use heapless::Vec;

/// Largest frame carried in either direction.
pub const MAX_FRAME_LEN: usize = 256;

/// Frames buffered per direction.
pub const QUEUE_DEPTH: usize = 4;

/// Silence that ends a received frame.
pub const FRAME_GAP: Duration = Duration::from_millis(5);

pub type Frame = Vec<u8, MAX_FRAME_LEN>;
pub type FrameQueue = Channel<CriticalSectionRawMutex, Frame, QUEUE_DEPTH>;

/// [`Transport`] over the two frame queues.
pub struct RadioLink {
    tx: &'static FrameQueue,
    rx: &'static FrameQueue,
}

impl RadioLink {
    #[must_use]
    pub fn new(tx: &'static FrameQueue, rx: &'static FrameQueue) -> Self {
        Self { tx, rx }
    }
}

impl Transport for RadioLink {
    fn send(&mut self, frame: &[u8]) -> Result<(), SendError> {
        let frame = Frame::from_slice(frame).map_err(|()| SendError::TooLarge)?;
        self.tx.try_send(frame).map_err(|_| SendError::Busy)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Option<usize> {
        let frame = self.rx.try_receive().ok()?;
        let len = frame.len().min(buf.len());
        buf[..len].copy_from_slice(&frame[..len]);
        Some(len)
    }
}

/// Write queued frames to the radio.
pub async fn tx_loop(mut tx: UartTx<'static, Async>, queue: &'static FrameQueue) -> ! {
    loop {
        let frame = queue.receive().await;
        if let Err(e) = tx.write(&frame).await {
            warn!("UART write failed: {:?}", e);
        }
    }
}

/// Split the radio byte stream into frames on idle gaps.
pub async fn rx_loop(mut rx: UartRx<'static, Async>, queue: &'static FrameQueue) -> ! {
    let mut byte = [0u8; 1];
    loop {
        if let Err(e) = rx.read(&mut byte).await {
            warn!("UART read failed: {:?}", e);
            continue;
        }
        let mut frame = Frame::new();
        let _ = frame.push(byte[0]);

        while !frame.is_full() {
            match with_timeout(FRAME_GAP, rx.read(&mut byte)).await {
                Ok(Ok(())) => {
                    let _ = frame.push(byte[0]);
                }
                Ok(Err(e)) => {
                    warn!("UART read failed: {:?}", e);
                    break;
                }
                Err(_) => break,
            }
        }

        if queue.try_send(frame).is_err() {
            debug!("rx queue full, frame dropped");
        }
    }
}
