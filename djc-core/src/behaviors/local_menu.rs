//! On-device menu driven by the left stick and left button.

use djc_proto::Event;
use heapless::Vec;

use crate::behavior::{Behavior, View};
use crate::direction::DirectionListener;
use crate::input::{AnalogInputs, AxisChannel, ButtonInput};
use crate::output::Transport;
use crate::periphery::Periphery;
use crate::render::Screen;
use crate::ui::{NavMode, Page, PageId, Response, SpinMode, Ui, UiError, Value, Widget};

const MENU_PAGES: usize = 4;
const MENU_QUEUE: usize = 8;

const BOILER: &[(&str, i32)] = &[("ice", 1), ("water", 20), ("steam", 300)];

/// Widget slots on the test page.
mod test_page {
    pub const COMBO: usize = 0;
    pub const ITEM: usize = 1;
    pub const SPIN: usize = 2;
    pub const BUTTON: usize = 3;
    pub const CHECK: usize = 4;
    pub const VALUE: usize = 5;
}

const INITIAL_VALUE: f32 = 12.3456;

/// Factor applied (with a sign flip) when the test button is clicked.
const BUTTON_GAIN: f32 = 1.4;

#[derive(Debug, Clone, Copy)]
struct Pages {
    main: PageId,
    test: PageId,
    axes: PageId,
}

pub struct LocalMenu {
    ui: Ui<MENU_PAGES, MENU_QUEUE>,
    pages: Pages,
    listener: DirectionListener,
    value: f32,
}

impl LocalMenu {
    /// Build the page graph: a link hub leading to the test and axis pages.
    pub fn new(direction_threshold: f32) -> Result<Self, UiError> {
        let mut ui = Ui::new();

        let main = ui.add_page(Page::new("ESP32-DJC").with_mode(NavMode::Links))?;

        let mut test = Page::new("Test");
        test.add(Widget::combo(BOILER).labeled("Boiler"))?;
        test.add(Widget::display(Value::Int(BOILER[0].1)).labeled("item"))?;
        test.add(Widget::spin_float(INITIAL_VALUE, 0.1, SpinMode::Arithmetic).labeled("val"))?;
        test.add(Widget::button("negate"))?;
        test.add(Widget::checkbox(false).labeled("flag"))?;
        test.add(Widget::display(Value::Float(INITIAL_VALUE)).labeled("value"))?;
        let test = ui.add_page(test)?;

        let mut axes = Page::new("Axes");
        for label in ["LX", "LY", "RX", "RY"] {
            axes.add(Widget::display(Value::Float(0.0)).labeled(label))?;
        }
        let axes = ui.add_page(axes)?;

        ui.link(main, test)?;
        ui.link(main, axes)?;

        Ok(Self {
            ui,
            pages: Pages { main, test, axes },
            listener: DirectionListener::new(direction_threshold),
            value: INITIAL_VALUE,
        })
    }

    #[must_use]
    pub fn ui(&self) -> &Ui<MENU_PAGES, MENU_QUEUE> {
        &self.ui
    }

    #[inline]
    #[must_use]
    pub const fn main_page(&self) -> PageId {
        self.pages.main
    }

    #[inline]
    #[must_use]
    pub const fn test_page(&self) -> PageId {
        self.pages.test
    }

    #[inline]
    #[must_use]
    pub const fn axes_page(&self) -> PageId {
        self.pages.axes
    }

    fn apply(&mut self, response: Response) {
        use test_page::*;

        let test = self.pages.test;
        match response {
            Response::Clicked { page, widget: BUTTON } if page == test => {
                self.value = -self.value * BUTTON_GAIN;
                self.ui.set_value(test, SPIN, Value::Float(self.value));
                self.ui.set_value(test, VALUE, Value::Float(self.value));
            }
            Response::Changed {
                page,
                widget: COMBO,
                value,
            } if page == test => {
                self.ui.set_value(test, ITEM, value);
            }
            Response::Changed {
                page,
                widget: SPIN,
                value: Value::Float(v),
            } if page == test => {
                self.value = v;
                self.ui.set_value(test, VALUE, Value::Float(v));
            }
            Response::Toggled {
                page,
                widget: CHECK,
                checked,
            } if page == test => {
                info!("menu: flag -> {=bool}", checked);
            }
            Response::PageEntered(page) => debug!("menu: entered {=u8}", page.0),
            _ => {}
        }
    }
}

impl View for LocalMenu {
    fn name(&self) -> &'static str {
        "Menu"
    }

    fn render(&mut self, screen: &mut Screen) {
        self.ui.render(screen);
    }

    fn needs_redraw(&self) -> bool {
        self.ui.is_dirty()
    }
}

impl<A, B, T> Behavior<Periphery<A, B, T>> for LocalMenu
where
    A: AnalogInputs,
    B: ButtonInput,
    T: Transport,
{
    fn init(&mut self, periphery: &mut Periphery<A, B, T>) {
        let axes = self.pages.axes;
        for channel in AxisChannel::ALL {
            let center = periphery.axis(channel).calibration().raw_center;
            self.ui
                .set_value(axes, channel.index(), Value::Float(center));
        }
    }

    fn on_entry(&mut self, periphery: &mut Periphery<A, B, T>) {
        let _ = periphery.left_button.take_click();
        self.listener.reset();
        self.ui.push_event(Event::Update);
    }

    fn update(&mut self, periphery: &mut Periphery<A, B, T>, _now_ms: u64) {
        if periphery.left_button.take_click() {
            self.ui.push_event(Event::WidgetClick);
        }
        let (x, y) = periphery.left_stick();
        if let Some(direction) = self.listener.poll(x, y) {
            self.ui.push_event(direction.event());
        }

        let mut responses: Vec<Response, MENU_QUEUE> = Vec::new();
        self.ui.poll(|response| {
            let _ = responses.push(response);
        });
        for response in responses {
            self.apply(response);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::periphery::tests::{calibrated, FakePeriphery};
    use std::string::String;
    use std::vec::Vec;

    const REST: u16 = 2048;
    const LOW: u16 = 0;
    const HIGH: u16 = 4095;

    struct Rig {
        menu: LocalMenu,
        periphery: FakePeriphery,
        now: u64,
    }

    impl Rig {
        fn new() -> Self {
            let mut menu = LocalMenu::new(0.5).unwrap();
            let mut periphery = calibrated();
            menu.init(&mut periphery);
            menu.on_entry(&mut periphery);
            menu.update(&mut periphery, 0);
            Self {
                menu,
                periphery,
                now: 0,
            }
        }

        fn tick(&mut self) {
            self.now += 20;
            self.periphery.poll_buttons(self.now);
            self.menu.update(&mut self.periphery, self.now);
        }

        /// Deflect the left stick on one channel and let it return.
        fn flick(&mut self, channel: AxisChannel, raw: u16) {
            self.periphery.inputs_mut().raw[channel.index()] = raw;
            self.tick();
            self.periphery.inputs_mut().raw[channel.index()] = REST;
            self.tick();
        }

        fn down(&mut self) {
            self.flick(AxisChannel::LeftY, HIGH);
        }

        /// Left X is mounted inverted, so a low reading is a right deflection.
        fn right(&mut self) {
            self.flick(AxisChannel::LeftX, LOW);
        }

        fn click(&mut self) {
            self.periphery.left_button.pin_mut().0 = true;
            self.tick();
            self.periphery.left_button.pin_mut().0 = false;
            self.tick();
            self.tick();
        }

        fn screen(&mut self) -> Vec<String> {
            let mut screen = Screen::new();
            self.menu.render(&mut screen);
            screen.lines().map(Into::into).collect()
        }

        fn test_value(&self, widget: usize) -> Option<Value> {
            self.menu.ui().value(self.menu.test_page(), widget)
        }
    }

    #[test]
    fn test_starts_on_link_hub() {
        let mut rig = Rig::new();
        assert_eq!(rig.menu.ui().active(), rig.menu.main_page());
        assert_eq!(rig.screen(), ["ESP32-DJC", " Test", " Axes"]);
    }

    #[test]
    fn test_down_opens_first_link() {
        let mut rig = Rig::new();
        rig.down();
        assert_eq!(rig.menu.ui().active(), rig.menu.test_page());
        let screen = rig.screen();
        assert_eq!(screen[0], "Test");
        assert_eq!(screen[1], ">Boiler: <ice>");
    }

    #[test]
    fn test_combo_mirrors_into_item() {
        let mut rig = Rig::new();
        rig.down();
        rig.right();
        assert_eq!(rig.test_value(test_page::COMBO), Some(Value::Int(20)));
        assert_eq!(rig.test_value(test_page::ITEM), Some(Value::Int(20)));
    }

    #[test]
    fn test_button_negates_and_scales() {
        let mut rig = Rig::new();
        rig.down();
        for _ in 0..test_page::BUTTON {
            rig.down();
        }
        rig.click();

        let expected = Value::Float(-INITIAL_VALUE * BUTTON_GAIN);
        assert_eq!(rig.test_value(test_page::VALUE), Some(expected));
        assert_eq!(rig.test_value(test_page::SPIN), Some(expected));
    }

    #[test]
    fn test_checkbox_toggles() {
        let mut rig = Rig::new();
        rig.down();
        for _ in 0..test_page::CHECK {
            rig.down();
        }
        rig.click();
        assert_eq!(rig.test_value(test_page::CHECK), Some(Value::Bool(true)));
    }

    #[test]
    fn test_axes_page_shows_centers() {
        let rig = Rig::new();
        let axes = rig.menu.axes_page();
        for index in 0..4 {
            assert_eq!(rig.menu.ui().value(axes, index), Some(Value::Float(2048.0)));
        }
    }

    #[test]
    fn test_back_link_returns_to_hub() {
        let mut rig = Rig::new();
        rig.down();
        // Cursor up from the first widget wraps to the trailing back link.
        rig.flick(AxisChannel::LeftY, LOW);
        rig.click();
        assert_eq!(rig.menu.ui().active(), rig.menu.main_page());
    }

    #[test]
    fn test_redraw_only_when_dirty() {
        let mut rig = Rig::new();
        rig.screen();
        assert!(!rig.menu.needs_redraw());
        rig.tick();
        assert!(!rig.menu.needs_redraw());
        rig.down();
        assert!(rig.menu.needs_redraw());
    }
}
