//! Composition root.
//!
//! [`Remote`] owns everything the tick loop touches: the periphery, the
//! registered behaviors, the display and the screen buffer. Firmware builds
//! one at startup, calls [`init`](Remote::init) once and then
//! [`tick`](Remote::tick) forever.

use crate::axis::Calibration;
use crate::behavior::{Behavior, BehaviorError, BehaviorManager, View};
use crate::input::{AnalogInputs, ButtonInput};
use crate::output::{DisplaySink, Transport};
use crate::periphery::Periphery;
use crate::render::Screen;
use crate::timer::Timer;

pub struct Remote<A, B, T, D, Bh, const N: usize> {
    periphery: Periphery<A, B, T>,
    behaviors: BehaviorManager<Bh, N>,
    display: D,
    screen: Screen,
    update_timer: Timer,
    render_timer: Timer,
    force_redraw: bool,
}

impl<A, B, T, D, Bh, const N: usize> Remote<A, B, T, D, Bh, N>
where
    A: AnalogInputs,
    B: ButtonInput,
    T: Transport,
    D: DisplaySink,
    Bh: Behavior<Periphery<A, B, T>>,
{
    /// Tick rates come from the periphery's config.
    pub fn new(periphery: Periphery<A, B, T>, display: D) -> Self {
        let config = periphery.config();
        let update_timer = Timer::new(config.update_period_ms);
        let render_timer = Timer::new(config.render_period_ms);
        Self {
            periphery,
            behaviors: BehaviorManager::new(),
            display,
            screen: Screen::new(),
            update_timer,
            render_timer,
            force_redraw: true,
        }
    }

    /// Add a behavior to the right-button cycle.
    pub fn register(&mut self, behavior: impl Into<Bh>) -> Result<usize, BehaviorError> {
        self.behaviors.register(behavior.into())
    }

    /// Show the splash, calibrate the sticks and enter the first behavior.
    ///
    /// Blocks for the whole calibration; `delay` runs between sample rounds.
    pub fn init<F: FnMut()>(&mut self, delay: F) -> [Calibration; 4] {
        self.screen.clear();
        self.screen.push_str("ESP32-DJC");
        self.screen.push_str("Calibrating...");
        self.screen.push_str("Release the sticks");
        self.flush();

        let calibration = self.periphery.calibrate(delay);

        self.behaviors.init_all(&mut self.periphery);
        if self.behaviors.next(&mut self.periphery).is_none() {
            warn!("remote: no behaviors registered");
        }
        self.update_timer.reset();
        self.render_timer.reset();
        self.force_redraw = true;
        calibration
    }

    /// Run one pass of the main loop at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        self.periphery.poll_buttons(now_ms);

        if self.periphery.right_button.take_click() {
            // The left button belongs to the behavior being left.
            let _ = self.periphery.left_button.take_click();
            if let Some(index) = self.behaviors.next(&mut self.periphery) {
                info!("remote: switched to {=usize}", index);
            }
            self.force_redraw = true;
        }

        if self.update_timer.ready(now_ms) {
            self.behaviors.update(&mut self.periphery, now_ms);
        }

        if self.render_timer.ready(now_ms) {
            self.redraw();
        }
    }

    fn redraw(&mut self) {
        let wanted = self.behaviors.active().is_some_and(View::needs_redraw);
        if !(wanted || self.force_redraw) {
            return;
        }
        self.force_redraw = false;
        self.screen.clear();
        self.behaviors.render(&mut self.screen);
        self.flush();
    }

    fn flush(&mut self) {
        if let Err(e) = self.display.show(&self.screen) {
            warn!("remote: display: {}", e);
        }
    }

    pub fn periphery(&self) -> &Periphery<A, B, T> {
        &self.periphery
    }

    pub fn periphery_mut(&mut self) -> &mut Periphery<A, B, T> {
        &mut self.periphery
    }

    pub fn behaviors(&self) -> &BehaviorManager<Bh, N> {
        &self.behaviors
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Last rendered screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}
