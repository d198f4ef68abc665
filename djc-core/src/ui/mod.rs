//! Page/widget menu engine.
//!
//! A [`Ui`] holds a fixed set of [`Page`]s linked into a graph. Each page
//! owns an ordered list of [`Widget`]s and a cursor. Events from the
//! [`EventQueue`](crate::queue::EventQueue) move the cursor or act on the
//! selected widget; every dispatch returns a [`Response`] that the owning
//! behavior uses to apply side effects.
//!
//! # Example
//!
//! ```
//! use djc_core::ui::{Page, Response, Ui, Value, Widget};
//! use djc_proto::Event;
//!
//! let mut ui: Ui<2, 8> = Ui::new();
//! let mut page = Page::new("Demo");
//! page.add(Widget::button("go")).unwrap();
//! page.add(Widget::checkbox(false)).unwrap();
//! let demo = ui.add_page(page).unwrap();
//!
//! ui.push_event(Event::PageCursorMove(1));
//! ui.push_event(Event::WidgetClick);
//!
//! let mut responses = heapless::Vec::<Response, 4>::new();
//! ui.poll(|r| { let _ = responses.push(r); });
//! assert_eq!(
//!     responses[1],
//!     Response::Toggled { page: demo, widget: 1, checked: true }
//! );
//! ```

mod engine;
mod page;
mod widget;

pub use engine::Ui;
pub use page::{NavMode, Page, PAGE_LINKS, PAGE_WIDGETS};
pub use widget::{ComboBox, Scalar, SpinBox, SpinMode, Widget, WidgetKind};

use core::fmt;

/// Index of a page within its [`Ui`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageId(pub u8);

/// Value carried by a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Int(i32),
    Float(f32),
    Bool(bool),
    Text(&'static str),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.2}"),
            Self::Bool(v) => f.write_str(if *v { "on" } else { "off" }),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Event had no effect.
    None,
    /// State unchanged but the screen must be redrawn.
    Redraw,
    /// A button was clicked.
    Clicked { page: PageId, widget: usize },
    /// A checkbox changed state.
    Toggled {
        page: PageId,
        widget: usize,
        checked: bool,
    },
    /// An adjustable widget took a new value.
    Changed {
        page: PageId,
        widget: usize,
        value: Value,
    },
    /// Another page became active.
    PageEntered(PageId),
}

/// Error type for building the page graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiError {
    /// Page capacity exhausted.
    TooManyPages,
    /// Widget capacity of a page exhausted.
    TooManyWidgets,
    /// Link capacity of a page exhausted.
    TooManyLinks,
    /// No page with this id.
    UnknownPage(PageId),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyPages => write!(f, "too many pages"),
            Self::TooManyWidgets => write!(f, "too many widgets"),
            Self::TooManyLinks => write!(f, "too many links"),
            Self::UnknownPage(id) => write!(f, "unknown page {}", id.0),
        }
    }
}
