use core::fmt::Write;

use djc_proto::Event;
use heapless::Vec;

use super::page::{NavMode, Page};
use super::widget::{Outcome, Widget};
use super::{PageId, Response, UiError, Value};
use crate::queue::EventQueue;
use crate::render::LineBuffer;

/// Marker drawn in front of the selected row.
const CURSOR: char = '>';

/// Menu state: up to `PAGES` pages and a queue of `QUEUE` pending events.
#[derive(Debug)]
pub struct Ui<const PAGES: usize, const QUEUE: usize> {
    pages: Vec<Page, PAGES>,
    active: PageId,
    queue: EventQueue<QUEUE>,
    dirty: bool,
}

impl<const PAGES: usize, const QUEUE: usize> Ui<PAGES, QUEUE> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages: Vec::new(),
            active: PageId(0),
            queue: EventQueue::new(),
            dirty: true,
        }
    }

    /// Add a page. The first page added is active.
    ///
    /// Fails with [`UiError::TooManyPages`] when `PAGES` is full or the
    /// page would not get a unique [`PageId`].
    pub fn add_page(&mut self, page: Page) -> Result<PageId, UiError> {
        let id = u8::try_from(self.pages.len())
            .map(PageId)
            .map_err(|_| UiError::TooManyPages)?;
        self.pages.push(page).map_err(|_| UiError::TooManyPages)?;
        Ok(id)
    }

    /// Link two pages in both directions.
    ///
    /// Pages in [`NavMode::Widgets`] also get a page-link widget to the
    /// other page, appended after their existing widgets.
    pub fn link(&mut self, a: PageId, b: PageId) -> Result<(), UiError> {
        let title_a = self.page(a)?.title();
        let title_b = self.page(b)?.title();
        self.attach(a, b, title_b)?;
        self.attach(b, a, title_a)
    }

    fn attach(&mut self, from: PageId, to: PageId, title: &'static str) -> Result<(), UiError> {
        let page = self.page_mut(from)?;
        if page.links().contains(&to) {
            return Ok(());
        }
        page.add_link(to)?;
        if page.mode() == NavMode::Widgets {
            page.add(Widget::page_link(to, title))?;
        }
        Ok(())
    }

    pub fn page(&self, id: PageId) -> Result<&Page, UiError> {
        self.pages
            .get(usize::from(id.0))
            .ok_or(UiError::UnknownPage(id))
    }

    pub fn page_mut(&mut self, id: PageId) -> Result<&mut Page, UiError> {
        self.pages
            .get_mut(usize::from(id.0))
            .ok_or(UiError::UnknownPage(id))
    }

    #[inline]
    #[must_use]
    pub const fn active(&self) -> PageId {
        self.active
    }

    /// Make `id` the active page.
    pub fn bind(&mut self, id: PageId) -> Result<(), UiError> {
        self.page(id)?;
        self.active = id;
        self.dirty = true;
        debug!("ui: page {=u8}", id.0);
        Ok(())
    }

    /// Queue an event for the next [`poll`](Self::poll).
    pub fn push_event(&mut self, event: Event) -> bool {
        self.queue.push(event)
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Events lost to queue overflow.
    #[inline]
    #[must_use]
    pub const fn dropped(&self) -> u32 {
        self.queue.dropped()
    }

    /// Drain the queue, reporting every effective response.
    pub fn poll<F: FnMut(Response)>(&mut self, mut on_response: F) {
        while let Some(event) = self.queue.pop() {
            let response = self.dispatch(event);
            if response != Response::None {
                on_response(response);
            }
        }
    }

    /// Apply one event to the active page.
    ///
    /// At most one widget changes per call.
    pub fn dispatch(&mut self, event: Event) -> Response {
        trace!("ui: dispatch {}", event);
        let page_id = self.active;
        let Ok(page) = self.page_mut(page_id) else {
            return Response::None;
        };

        let response = match event {
            Event::None => Response::None,
            Event::Update => Response::Redraw,
            Event::PageCursorMove(delta) => match page.mode() {
                NavMode::Widgets => {
                    if page.move_cursor(delta) {
                        Response::Redraw
                    } else {
                        Response::None
                    }
                }
                NavMode::Links => match page.move_link_cursor(delta) {
                    Some(target) => self.enter(target),
                    None => Response::None,
                },
            },
            // Link pages have no widget cursor
            Event::WidgetClick | Event::WidgetValueChange(_) if page.mode() == NavMode::Links => {
                Response::None
            }
            Event::WidgetClick => {
                let widget = page.cursor();
                match page.selected_mut().map_or(Outcome::Ignored, Widget::click) {
                    Outcome::Clicked => Response::Clicked {
                        page: page_id,
                        widget,
                    },
                    Outcome::Toggled(checked) => Response::Toggled {
                        page: page_id,
                        widget,
                        checked,
                    },
                    Outcome::Open(target) => self.enter(target),
                    Outcome::Ignored | Outcome::Changed(_) => Response::None,
                }
            }
            Event::WidgetValueChange(delta) => {
                let widget = page.cursor();
                match page
                    .selected_mut()
                    .map_or(Outcome::Ignored, |w| w.adjust(delta))
                {
                    Outcome::Changed(value) => Response::Changed {
                        page: page_id,
                        widget,
                        value,
                    },
                    _ => Response::None,
                }
            }
        };

        if response != Response::None {
            self.dirty = true;
        }
        response
    }

    fn enter(&mut self, target: PageId) -> Response {
        match self.bind(target) {
            Ok(()) => Response::PageEntered(target),
            Err(_) => Response::None,
        }
    }

    /// Overwrite a widget's value, marking the screen dirty on success.
    pub fn set_value(&mut self, page: PageId, widget: usize, value: Value) -> bool {
        let updated = self
            .page_mut(page)
            .ok()
            .and_then(|p| p.widget_mut(widget))
            .is_some_and(|w| w.set_value(value));
        if updated && page == self.active {
            self.dirty = true;
        }
        updated
    }

    /// Read a widget's value.
    #[must_use]
    pub fn value(&self, page: PageId, widget: usize) -> Option<Value> {
        self.page(page).ok()?.widget(widget)?.value()
    }

    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Render the active page into `out` and clear the dirty flag.
    ///
    /// The title takes the first row. Widget rows follow in order, scrolled
    /// so the cursor row is always visible.
    pub fn render<const ROWS: usize, const COLS: usize>(&mut self, out: &mut LineBuffer<ROWS, COLS>) {
        self.dirty = false;
        let Ok(page) = self.page(self.active) else {
            return;
        };

        out.push_str(page.title());

        match page.mode() {
            NavMode::Widgets => {
                let visible = out.remaining();
                let cursor = page.cursor();
                let start = if visible > 0 && cursor >= visible {
                    cursor + 1 - visible
                } else {
                    0
                };
                for (index, widget) in page.widgets().iter().enumerate().skip(start) {
                    let Some(mut row) = out.row() else { break };
                    let marker = if index == cursor { CURSOR } else { ' ' };
                    let _ = row.write_char(marker);
                    let _ = widget.render(&mut row);
                }
            }
            NavMode::Links => {
                for widget in page.widgets() {
                    let Some(mut row) = out.row() else { break };
                    let _ = row.write_char(' ');
                    let _ = widget.render(&mut row);
                }
                for (index, target) in page.links().iter().enumerate() {
                    let Some(mut row) = out.row() else { break };
                    let marker = if page.link_cursor() == Some(index) { CURSOR } else { ' ' };
                    let title = self.pages.get(usize::from(target.0)).map_or("?", Page::title);
                    let _ = write!(row, "{marker}{title}");
                }
            }
        }
    }
}

impl<const PAGES: usize, const QUEUE: usize> Default for Ui<PAGES, QUEUE> {
    fn default() -> Self {
        Self::new()
    }
}
