//! Menu widgets.
//!
//! A [`Widget`] is one row of a page: an optional label plus a
//! [`WidgetKind`] that decides how it reacts to clicks and value changes.

use core::fmt::{self, Write};

use super::{PageId, Value};

/// Numeric type a [`SpinBox`] can step.
pub trait Scalar: Copy + PartialOrd + Into<Value> {
    /// `self + step * delta`.
    fn offset(self, step: Self, delta: i8) -> Self;
    /// `self * factor^delta`.
    fn scale(self, factor: Self, delta: i8) -> Self;
}

impl Scalar for i32 {
    fn offset(self, step: Self, delta: i8) -> Self {
        self.saturating_add(step.saturating_mul(i32::from(delta)))
    }

    fn scale(self, factor: Self, delta: i8) -> Self {
        if factor == 0 {
            return self;
        }
        let mut value = self;
        for _ in 0..delta.unsigned_abs() {
            value = if delta > 0 {
                value.saturating_mul(factor)
            } else {
                value / factor
            };
        }
        value
    }
}

impl Scalar for f32 {
    fn offset(self, step: Self, delta: i8) -> Self {
        self + step * f32::from(delta)
    }

    fn scale(self, factor: Self, delta: i8) -> Self {
        if factor == 0.0 {
            return self;
        }
        let mut value = self;
        for _ in 0..delta.unsigned_abs() {
            value = if delta > 0 { value * factor } else { value / factor };
        }
        value
    }
}

/// How a [`SpinBox`] applies a step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinMode<T> {
    /// Add `delta * step`, unbounded.
    Arithmetic,
    /// Add `delta * step`, saturating at the bounds.
    Clamped { min: T, max: T },
    /// Add `delta * step`; stepping past one bound lands on the other.
    Wrapped { min: T, max: T },
    /// Multiply by `step` per positive delta, divide per negative delta.
    Geometric,
}

/// Adjustable number.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinBox<T> {
    value: T,
    step: T,
    mode: SpinMode<T>,
}

impl<T: Scalar> SpinBox<T> {
    #[must_use]
    pub const fn new(value: T, step: T, mode: SpinMode<T>) -> Self {
        Self { value, step, mode }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// Apply `delta` steps according to the mode and return the new value.
    pub fn apply(&mut self, delta: i8) -> T {
        let next = match self.mode {
            SpinMode::Geometric => self.value.scale(self.step, delta),
            _ => self.value.offset(self.step, delta),
        };
        self.value = match self.mode {
            SpinMode::Clamped { min, max } => {
                if next < min {
                    min
                } else if next > max {
                    max
                } else {
                    next
                }
            }
            SpinMode::Wrapped { min, max } => {
                if next > max {
                    min
                } else if next < min {
                    max
                } else {
                    next
                }
            }
            SpinMode::Arithmetic | SpinMode::Geometric => next,
        };
        self.value
    }
}

/// Cyclic choice between labeled values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboBox<T: 'static> {
    items: &'static [(&'static str, T)],
    index: usize,
}

impl<T: Copy> ComboBox<T> {
    #[must_use]
    pub const fn new(items: &'static [(&'static str, T)]) -> Self {
        Self { items, index: 0 }
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Currently selected item.
    #[must_use]
    pub fn selected(&self) -> Option<(&'static str, T)> {
        self.items.get(self.index).copied()
    }

    /// Advance by `delta` items, wrapping. Returns the new item.
    pub fn advance(&mut self, delta: i8) -> Option<(&'static str, T)> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len() as isize;
        self.index = (self.index as isize + isize::from(delta)).rem_euclid(len) as usize;
        self.selected()
    }
}

/// Behavior of a [`Widget`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetKind {
    /// Read-only value echo.
    Display(Value),
    /// Reports clicks.
    Button,
    /// Toggles on click.
    CheckBox(bool),
    SpinInt(SpinBox<i32>),
    SpinFloat(SpinBox<f32>),
    Combo(ComboBox<i32>),
    /// Opens another page on click.
    PageLink {
        target: PageId,
        title: &'static str,
    },
}

/// What a widget did with an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Outcome {
    Ignored,
    Clicked,
    Toggled(bool),
    Changed(Value),
    Open(PageId),
}

/// One row of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Widget {
    label: Option<&'static str>,
    kind: WidgetKind,
}

impl Widget {
    #[must_use]
    pub const fn new(kind: WidgetKind) -> Self {
        Self { label: None, kind }
    }

    #[must_use]
    pub const fn display(value: Value) -> Self {
        Self::new(WidgetKind::Display(value))
    }

    /// A button; its label is the caption.
    #[must_use]
    pub const fn button(caption: &'static str) -> Self {
        Self::new(WidgetKind::Button).labeled(caption)
    }

    #[must_use]
    pub const fn checkbox(checked: bool) -> Self {
        Self::new(WidgetKind::CheckBox(checked))
    }

    #[must_use]
    pub const fn spin_int(value: i32, step: i32, mode: SpinMode<i32>) -> Self {
        Self::new(WidgetKind::SpinInt(SpinBox::new(value, step, mode)))
    }

    #[must_use]
    pub const fn spin_float(value: f32, step: f32, mode: SpinMode<f32>) -> Self {
        Self::new(WidgetKind::SpinFloat(SpinBox::new(value, step, mode)))
    }

    #[must_use]
    pub const fn combo(items: &'static [(&'static str, i32)]) -> Self {
        Self::new(WidgetKind::Combo(ComboBox::new(items)))
    }

    #[must_use]
    pub const fn page_link(target: PageId, title: &'static str) -> Self {
        Self::new(WidgetKind::PageLink { target, title })
    }

    /// Attach a label shown before the widget's content.
    #[must_use]
    pub const fn labeled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    #[inline]
    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        self.label
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    /// Current value, if the widget holds one.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        match self.kind {
            WidgetKind::Display(value) => Some(value),
            WidgetKind::CheckBox(checked) => Some(Value::Bool(checked)),
            WidgetKind::SpinInt(spin) => Some(spin.value().into()),
            WidgetKind::SpinFloat(spin) => Some(spin.value().into()),
            WidgetKind::Combo(combo) => combo.selected().map(|(_, v)| Value::Int(v)),
            WidgetKind::Button | WidgetKind::PageLink { .. } => None,
        }
    }

    /// Overwrite the held value. Returns `false` on a type mismatch.
    pub fn set_value(&mut self, value: Value) -> bool {
        match (&mut self.kind, value) {
            (WidgetKind::Display(current), new) => *current = new,
            (WidgetKind::CheckBox(checked), Value::Bool(b)) => *checked = b,
            (WidgetKind::SpinInt(spin), Value::Int(v)) => spin.set(v),
            (WidgetKind::SpinFloat(spin), Value::Float(v)) => spin.set(v),
            _ => return false,
        }
        true
    }

    #[must_use]
    pub const fn is_clickable(&self) -> bool {
        matches!(
            self.kind,
            WidgetKind::Button | WidgetKind::CheckBox(_) | WidgetKind::PageLink { .. }
        )
    }

    #[must_use]
    pub const fn is_adjustable(&self) -> bool {
        matches!(
            self.kind,
            WidgetKind::SpinInt(_) | WidgetKind::SpinFloat(_) | WidgetKind::Combo(_)
        )
    }

    pub(crate) fn click(&mut self) -> Outcome {
        match &mut self.kind {
            WidgetKind::Button => Outcome::Clicked,
            WidgetKind::CheckBox(checked) => {
                *checked = !*checked;
                Outcome::Toggled(*checked)
            }
            WidgetKind::PageLink { target, .. } => Outcome::Open(*target),
            _ => Outcome::Ignored,
        }
    }

    pub(crate) fn adjust(&mut self, delta: i8) -> Outcome {
        match &mut self.kind {
            WidgetKind::SpinInt(spin) => Outcome::Changed(Value::Int(spin.apply(delta))),
            WidgetKind::SpinFloat(spin) => Outcome::Changed(Value::Float(spin.apply(delta))),
            WidgetKind::Combo(combo) => match combo.advance(delta) {
                Some((_, value)) => Outcome::Changed(Value::Int(value)),
                None => Outcome::Ignored,
            },
            _ => Outcome::Ignored,
        }
    }

    /// Write the widget's row content (without the cursor marker).
    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        if let WidgetKind::Button = self.kind {
            return write!(out, "[{}]", self.label.unwrap_or(""));
        }
        if let Some(label) = self.label {
            write!(out, "{label}: ")?;
        }
        match self.kind {
            WidgetKind::Display(value) => write!(out, "{value}"),
            WidgetKind::CheckBox(checked) => out.write_str(if checked { "[x]" } else { "[ ]" }),
            WidgetKind::SpinInt(spin) => write!(out, "<{}>", Value::Int(spin.value())),
            WidgetKind::SpinFloat(spin) => write!(out, "<{}>", Value::Float(spin.value())),
            WidgetKind::Combo(combo) => {
                write!(out, "<{}>", combo.selected().map_or("", |(name, _)| name))
            }
            WidgetKind::PageLink { title, .. } => write!(out, "-> {title}"),
            WidgetKind::Button => Ok(()),
        }
    }
}
