use heapless::Vec;

use super::widget::Widget;
use super::{PageId, UiError};

/// Widgets per page.
pub const PAGE_WIDGETS: usize = 12;

/// Links per page.
pub const PAGE_LINKS: usize = 4;

/// What `PageCursorMove` navigates on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavMode {
    /// Move the widget cursor.
    #[default]
    Widgets,
    /// Step through linked pages, opening each as it is selected.
    Links,
}

/// One screen of the menu.
#[derive(Debug, Clone)]
pub struct Page {
    title: &'static str,
    widgets: Vec<Widget, PAGE_WIDGETS>,
    links: Vec<PageId, PAGE_LINKS>,
    cursor: usize,
    mode: NavMode,
    link_cursor: Option<usize>,
}

impl Page {
    #[must_use]
    pub const fn new(title: &'static str) -> Self {
        Self {
            title,
            widgets: Vec::new(),
            links: Vec::new(),
            cursor: 0,
            mode: NavMode::Widgets,
            link_cursor: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: NavMode) -> Self {
        self.mode = mode;
        self
    }

    /// Append a widget, returning its index.
    pub fn add(&mut self, widget: Widget) -> Result<usize, UiError> {
        self.widgets
            .push(widget)
            .map_err(|_| UiError::TooManyWidgets)?;
        Ok(self.widgets.len() - 1)
    }

    #[inline]
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> NavMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    #[must_use]
    pub fn widget(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.widgets.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn links(&self) -> &[PageId] {
        &self.links
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn link_cursor(&self) -> Option<usize> {
        self.link_cursor
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut Widget> {
        self.widgets.get_mut(self.cursor)
    }

    pub(crate) fn add_link(&mut self, target: PageId) -> Result<(), UiError> {
        if self.links.contains(&target) {
            return Ok(());
        }
        self.links.push(target).map_err(|_| UiError::TooManyLinks)
    }

    /// Move the widget cursor by `delta`, wrapping. Returns `false` on an empty page.
    pub(crate) fn move_cursor(&mut self, delta: i8) -> bool {
        match wrap(Some(self.cursor), delta, self.widgets.len()) {
            Some(cursor) => {
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    /// Move the link cursor by `delta` and return the newly selected link.
    pub(crate) fn move_link_cursor(&mut self, delta: i8) -> Option<PageId> {
        let index = wrap(self.link_cursor, delta, self.links.len())?;
        self.link_cursor = Some(index);
        self.links.get(index).copied()
    }
}

/// Step `current` by `delta` modulo `len`.
///
/// From `None` a positive step lands on the first entry and a negative step
/// on the last, so the first move never skips an entry.
fn wrap(current: Option<usize>, delta: i8, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let delta = isize::from(delta);
    let next = match current {
        Some(index) => index as isize + delta,
        None if delta > 0 => delta - 1,
        None if delta < 0 => len + delta,
        None => 0,
    };
    Some(next.rem_euclid(len) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Value;

    fn page_with(count: usize) -> Page {
        let mut page = Page::new("p");
        for i in 0..count {
            page.add(Widget::display(Value::Int(i as i32))).unwrap();
        }
        page
    }

    #[test]
    fn test_cursor_wraps_backwards() {
        let mut page = page_with(4);
        assert!(page.move_cursor(-1));
        assert_eq!(page.cursor(), 3);
        assert!(page.move_cursor(1));
        assert_eq!(page.cursor(), 0);
    }

    #[test]
    fn test_cursor_on_empty_page() {
        let mut page = Page::new("empty");
        assert!(!page.move_cursor(1));
        assert_eq!(page.cursor(), 0);
    }

    #[test]
    fn test_widget_capacity() {
        let mut page = page_with(PAGE_WIDGETS);
        assert_eq!(
            page.add(Widget::checkbox(false)),
            Err(UiError::TooManyWidgets)
        );
    }

    #[test]
    fn test_link_cursor_first_move() {
        let mut page = Page::new("hub").with_mode(NavMode::Links);
        page.add_link(PageId(1)).unwrap();
        page.add_link(PageId(2)).unwrap();
        page.add_link(PageId(3)).unwrap();

        assert_eq!(page.clone().move_link_cursor(1), Some(PageId(1)));
        assert_eq!(page.move_link_cursor(-1), Some(PageId(3)));
        assert_eq!(page.move_link_cursor(1), Some(PageId(1)));
    }

    #[test]
    fn test_duplicate_link_ignored() {
        let mut page = Page::new("p");
        page.add_link(PageId(1)).unwrap();
        page.add_link(PageId(1)).unwrap();
        assert_eq!(page.links(), &[PageId(1)]);
    }
}
