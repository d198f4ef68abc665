//! Top-level interaction modes.
//!
//! A [`Behavior`] is one mutually exclusive mode of the remote (direct
//! flight control, local menu, remote menu). The [`BehaviorManager`] holds
//! the registered behaviors and forwards ticks to the active one.

use heapless::Vec;

use crate::render::Screen;

/// The part of a behavior that does not touch hardware.
pub trait View {
    /// Short name shown on the splash and in logs.
    fn name(&self) -> &'static str;

    /// Draw the current state into `screen`.
    fn render(&mut self, screen: &mut Screen);

    /// Whether the next render would change the screen.
    fn needs_redraw(&self) -> bool {
        true
    }
}

/// One interaction mode, driven with access to the periphery `P`.
pub trait Behavior<P>: View {
    /// One-time setup at startup, before any behavior is bound.
    fn init(&mut self, _periphery: &mut P) {}

    /// Called every time this behavior becomes active.
    fn on_entry(&mut self, periphery: &mut P);

    /// Per-tick logic.
    fn update(&mut self, periphery: &mut P, now_ms: u64);
}

/// Error type for behavior registration and switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BehaviorError {
    /// Behavior capacity exhausted.
    Full,
    /// No behavior registered at this index.
    UnknownIndex(usize),
}

impl core::fmt::Display for BehaviorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "behavior capacity exhausted"),
            Self::UnknownIndex(i) => write!(f, "no behavior at index {i}"),
        }
    }
}

/// Holds up to `N` behaviors with at most one active.
#[derive(Debug)]
pub struct BehaviorManager<B, const N: usize> {
    behaviors: Vec<B, N>,
    active: Option<usize>,
}

impl<B, const N: usize> BehaviorManager<B, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            behaviors: Vec::new(),
            active: None,
        }
    }

    /// Register a behavior, returning its index. Registration order is the
    /// order [`next`](Self::next) cycles through.
    pub fn register(&mut self, behavior: B) -> Result<usize, BehaviorError> {
        self.behaviors
            .push(behavior)
            .map_err(|_| BehaviorError::Full)?;
        Ok(self.behaviors.len() - 1)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Index of the active behavior.
    #[inline]
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&B> {
        self.behaviors.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut B> {
        self.behaviors.get_mut(self.active?)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&B> {
        self.behaviors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut B> {
        self.behaviors.get_mut(index)
    }
}

impl<B, const N: usize> BehaviorManager<B, N> {
    /// Run every behavior's [`Behavior::init`].
    pub fn init_all<P>(&mut self, periphery: &mut P)
    where
        B: Behavior<P>,
    {
        for behavior in self.behaviors.iter_mut() {
            behavior.init(periphery);
        }
    }

    /// Activate the behavior at `index` and call its `on_entry`.
    ///
    /// Re-binding the active behavior runs `on_entry` again.
    pub fn bind<P>(&mut self, index: usize, periphery: &mut P) -> Result<(), BehaviorError>
    where
        B: Behavior<P>,
    {
        let behavior = self
            .behaviors
            .get_mut(index)
            .ok_or(BehaviorError::UnknownIndex(index))?;
        self.active = Some(index);
        info!("behavior: {=str}", behavior.name());
        behavior.on_entry(periphery);
        Ok(())
    }

    /// Activate the behavior after the current one, wrapping.
    ///
    /// With none active the first behavior is bound. Returns the new index,
    /// or `None` when nothing is registered.
    pub fn next<P>(&mut self, periphery: &mut P) -> Option<usize>
    where
        B: Behavior<P>,
    {
        if self.behaviors.is_empty() {
            return None;
        }
        let index = self.active.map_or(0, |i| (i + 1) % self.behaviors.len());
        self.bind(index, periphery).ok()?;
        Some(index)
    }

    /// Forward a tick to the active behavior. No-op when none is active.
    pub fn update<P>(&mut self, periphery: &mut P, now_ms: u64)
    where
        B: Behavior<P>,
    {
        if let Some(behavior) = self.active_mut() {
            behavior.update(periphery, now_ms);
        }
    }

    /// Render the active behavior. No-op when none is active.
    pub fn render(&mut self, screen: &mut Screen)
    where
        B: View,
    {
        if let Some(behavior) = self.active_mut() {
            behavior.render(screen);
        }
    }
}

impl<B, const N: usize> Default for BehaviorManager<B, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec as StdVec;

    /// Records calls into the shared periphery log.
    struct Probe(&'static str);

    #[derive(Default)]
    struct Log(StdVec<(&'static str, &'static str)>);

    impl View for Probe {
        fn name(&self) -> &'static str {
            self.0
        }

        fn render(&mut self, screen: &mut Screen) {
            screen.push_str(self.0);
        }
    }

    impl Behavior<Log> for Probe {
        fn init(&mut self, log: &mut Log) {
            log.0.push((self.0, "init"));
        }

        fn on_entry(&mut self, log: &mut Log) {
            log.0.push((self.0, "entry"));
        }

        fn update(&mut self, log: &mut Log, _now_ms: u64) {
            log.0.push((self.0, "update"));
        }
    }

    fn manager() -> BehaviorManager<Probe, 4> {
        let mut manager = BehaviorManager::new();
        manager.register(Probe("A")).unwrap();
        manager.register(Probe("B")).unwrap();
        manager
    }

    #[test]
    fn test_unbound_is_noop() {
        let mut manager = manager();
        let mut log = Log::default();
        let mut screen = Screen::new();
        manager.update(&mut log, 0);
        manager.render(&mut screen);
        assert!(log.0.is_empty());
        assert!(screen.is_empty());
        assert!(manager.active().is_none());
    }

    #[test]
    fn test_next_cycles_and_enters() {
        let mut manager = manager();
        let mut log = Log::default();

        manager.bind(0, &mut log).unwrap();
        assert_eq!(manager.next(&mut log), Some(1));
        assert_eq!(manager.next(&mut log), Some(0));
        assert_eq!(
            log.0,
            [("A", "entry"), ("B", "entry"), ("A", "entry")]
        );
    }

    #[test]
    fn test_next_from_none_binds_first() {
        let mut manager = manager();
        let mut log = Log::default();
        assert_eq!(manager.next(&mut log), Some(0));
        assert_eq!(manager.active().map(|b| b.0), Some("A"));
    }

    #[test]
    fn test_rebind_calls_entry_again() {
        let mut manager = manager();
        let mut log = Log::default();
        manager.bind(1, &mut log).unwrap();
        manager.bind(1, &mut log).unwrap();
        assert_eq!(log.0, [("B", "entry"), ("B", "entry")]);
    }

    #[test]
    fn test_bind_unknown_index() {
        let mut manager = manager();
        let mut log = Log::default();
        assert_eq!(
            manager.bind(7, &mut log),
            Err(BehaviorError::UnknownIndex(7))
        );
        assert!(manager.active_index().is_none());
    }

    #[test]
    fn test_update_and_render_reach_active_only() {
        let mut manager = manager();
        let mut log = Log::default();
        manager.init_all(&mut log);
        manager.bind(1, &mut log).unwrap();
        manager.update(&mut log, 20);

        let mut screen = Screen::new();
        manager.render(&mut screen);

        assert_eq!(
            log.0,
            [("A", "init"), ("B", "init"), ("B", "entry"), ("B", "update")]
        );
        assert_eq!(screen.lines().next(), Some("B"));
    }

    #[test]
    fn test_next_on_empty_manager() {
        let mut manager: BehaviorManager<Probe, 2> = BehaviorManager::new();
        assert_eq!(manager.next(&mut Log::default()), None);
    }

    #[test]
    fn test_capacity() {
        let mut manager: BehaviorManager<Probe, 1> = BehaviorManager::new();
        manager.register(Probe("A")).unwrap();
        assert_eq!(manager.register(Probe("B")).err(), Some(BehaviorError::Full));
    }
}
