//! Bounded event queue.

use djc_proto::Event;
use heapless::Deque;

/// Fixed-capacity FIFO of pending [`Event`]s.
///
/// [`Event::None`] is never stored. When full, the oldest entry is dropped
/// to make room and the drop is counted.
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    events: Deque<Event, N>,
    dropped: u32,
}

impl<const N: usize> EventQueue<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue an event. Returns `false` if it was `None` and ignored.
    pub fn push(&mut self, event: Event) -> bool {
        if event.is_none() {
            return false;
        }
        if self.events.is_full() {
            let _ = self.events.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
            trace!("event queue full, dropped oldest");
        }
        // Cannot fail: a slot was freed above if needed.
        let _ = self.events.push_back(event);
        true
    }

    /// Take the oldest pending event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events discarded because the queue was full.
    #[inline]
    #[must_use]
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
