//! The remote's interaction modes.
//!
//! [`RemoteBehavior`] closes the set so the [`BehaviorManager`] can hold
//! them by value.
//!
//! [`BehaviorManager`]: crate::behavior::BehaviorManager

mod flight;
mod local_menu;
mod remote_menu;

pub use flight::FlightControl;
pub use local_menu::LocalMenu;
pub use remote_menu::{RemoteEncoding, RemoteMenu, REMOTE_TEXT_LEN};

use crate::behavior::{Behavior, View};
use crate::input::{AnalogInputs, ButtonInput};
use crate::output::Transport;
use crate::periphery::Periphery;
use crate::protocol::ControlProtocol;
use crate::render::Screen;

/// Every behavior the remote ships with.
pub enum RemoteBehavior<C> {
    Flight(FlightControl<C>),
    LocalMenu(LocalMenu),
    RemoteMenu(RemoteMenu),
}

impl<C: ControlProtocol> View for RemoteBehavior<C> {
    fn name(&self) -> &'static str {
        match self {
            Self::Flight(b) => b.name(),
            Self::LocalMenu(b) => b.name(),
            Self::RemoteMenu(b) => b.name(),
        }
    }

    fn render(&mut self, screen: &mut Screen) {
        match self {
            Self::Flight(b) => b.render(screen),
            Self::LocalMenu(b) => b.render(screen),
            Self::RemoteMenu(b) => b.render(screen),
        }
    }

    fn needs_redraw(&self) -> bool {
        match self {
            Self::Flight(b) => b.needs_redraw(),
            Self::LocalMenu(b) => b.needs_redraw(),
            Self::RemoteMenu(b) => b.needs_redraw(),
        }
    }
}

impl<A, B, T, C> Behavior<Periphery<A, B, T>> for RemoteBehavior<C>
where
    A: AnalogInputs,
    B: ButtonInput,
    T: Transport,
    C: ControlProtocol,
{
    fn init(&mut self, periphery: &mut Periphery<A, B, T>) {
        match self {
            Self::Flight(b) => b.init(periphery),
            Self::LocalMenu(b) => b.init(periphery),
            Self::RemoteMenu(b) => b.init(periphery),
        }
    }

    fn on_entry(&mut self, periphery: &mut Periphery<A, B, T>) {
        match self {
            Self::Flight(b) => b.on_entry(periphery),
            Self::LocalMenu(b) => b.on_entry(periphery),
            Self::RemoteMenu(b) => b.on_entry(periphery),
        }
    }

    fn update(&mut self, periphery: &mut Periphery<A, B, T>, now_ms: u64) {
        match self {
            Self::Flight(b) => b.update(periphery, now_ms),
            Self::LocalMenu(b) => b.update(periphery, now_ms),
            Self::RemoteMenu(b) => b.update(periphery, now_ms),
        }
    }
}

impl<C> From<FlightControl<C>> for RemoteBehavior<C> {
    fn from(b: FlightControl<C>) -> Self {
        Self::Flight(b)
    }
}

impl<C> From<LocalMenu> for RemoteBehavior<C> {
    fn from(b: LocalMenu) -> Self {
        Self::LocalMenu(b)
    }
}

impl<C> From<RemoteMenu> for RemoteBehavior<C> {
    fn from(b: RemoteMenu) -> Self {
        Self::RemoteMenu(b)
    }
}
