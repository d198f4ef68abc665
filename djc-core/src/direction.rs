//! Edge-triggered stick directions.
//!
//! A [`DirectionListener`] classifies a two-axis reading into one of five
//! discrete [`Direction`]s every poll and reports only transitions.

use crate::axis::abs;
use djc_proto::Event;

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Discrete stick position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Home,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Classify a normalized reading.
    ///
    /// The axis with the larger magnitude wins when it reaches `threshold`;
    /// ties go to the horizontal axis. Negative Y is up.
    #[must_use]
    pub fn classify(x: f32, y: f32, threshold: f32) -> Self {
        let (ax, ay) = (abs(x), abs(y));
        if ax.max(ay) < threshold {
            Self::Home
        } else if ax >= ay {
            if x < 0.0 {
                Self::Left
            } else {
                Self::Right
            }
        } else if y < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Menu event for this direction.
    ///
    /// Vertical moves the page cursor, horizontal adjusts the selected
    /// widget. `Home` produces [`Event::None`].
    #[must_use]
    pub const fn event(self) -> Event {
        match self {
            Self::Up => Event::PageCursorMove(-1),
            Self::Down => Event::PageCursorMove(1),
            Self::Left => Event::WidgetValueChange(-1),
            Self::Right => Event::WidgetValueChange(1),
            Self::Home => Event::None,
        }
    }
}

/// Turns a continuous two-axis signal into direction transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectionListener {
    threshold: f32,
    last: Direction,
    changed: bool,
}

impl DirectionListener {
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last: Direction::Home,
            changed: false,
        }
    }

    /// Classify `(x, y)` and return the new direction on a transition.
    pub fn poll(&mut self, x: f32, y: f32) -> Option<Direction> {
        let current = Direction::classify(x, y, self.threshold);
        self.changed = current != self.last;
        self.last = current;
        self.changed.then_some(current)
    }

    /// Like [`poll`](Self::poll), invoking `handler` on a transition.
    pub fn poll_with<F: FnOnce(Direction)>(&mut self, x: f32, y: f32, handler: F) {
        if let Some(direction) = self.poll(x, y) {
            handler(direction);
        }
    }

    /// `true` only after the poll that detected a transition.
    #[inline]
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    /// Most recently classified direction.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.last
    }

    /// Forget the last direction so the next deflection fires again.
    pub fn reset(&mut self) {
        self.last = Direction::Home;
        self.changed = false;
    }
}

impl Default for DirectionListener {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_classify() {
        assert_eq!(Direction::classify(0.0, 0.0, 0.5), Direction::Home);
        assert_eq!(Direction::classify(0.49, -0.49, 0.5), Direction::Home);
        assert_eq!(Direction::classify(0.5, 0.0, 0.5), Direction::Right);
        assert_eq!(Direction::classify(-0.9, 0.2, 0.5), Direction::Left);
        assert_eq!(Direction::classify(0.1, -0.8, 0.5), Direction::Up);
        assert_eq!(Direction::classify(0.1, 0.8, 0.5), Direction::Down);
        // Tie goes horizontal
        assert_eq!(Direction::classify(-0.7, 0.7, 0.5), Direction::Left);
    }

    #[test]
    fn test_edge_sequence() {
        let mut listener = DirectionListener::default();

        assert_eq!(listener.poll(0.9, 0.0), Some(Direction::Right));
        assert!(listener.changed());
        assert_eq!(listener.direction(), Direction::Right);

        assert_eq!(listener.poll(0.9, 0.0), None);
        assert!(!listener.changed());
        assert_eq!(listener.direction(), Direction::Right);

        assert_eq!(listener.poll(0.0, 0.0), Some(Direction::Home));
        assert!(listener.changed());
        assert_eq!(listener.direction(), Direction::Home);
    }

    #[test]
    fn test_hold_fires_once() {
        let mut listener = DirectionListener::default();
        let fired = (0..10)
            .filter(|_| listener.poll(0.0, -1.0).is_some())
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_home_to_home_never_fires() {
        let mut listener = DirectionListener::default();
        assert_eq!(listener.poll(0.1, 0.1), None);
        assert_eq!(listener.poll(0.0, 0.0), None);
    }

    #[test]
    fn test_direct_switch_between_directions() {
        let mut listener = DirectionListener::default();
        let mut seen = Vec::new();
        for (x, y) in [(0.9, 0.0), (0.0, 0.9), (0.0, 0.9), (-0.9, 0.0)] {
            listener.poll_with(x, y, |d| seen.push(d));
        }
        assert_eq!(seen, [Direction::Right, Direction::Down, Direction::Left]);
    }

    #[test]
    fn test_direction_events() {
        assert_eq!(Direction::Up.event(), Event::PageCursorMove(-1));
        assert_eq!(Direction::Down.event(), Event::PageCursorMove(1));
        assert_eq!(Direction::Left.event(), Event::WidgetValueChange(-1));
        assert_eq!(Direction::Right.event(), Event::WidgetValueChange(1));
        assert!(Direction::Home.event().is_none());
    }
}
