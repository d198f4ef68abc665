//! SSD1306 text display.

use djc_core::{DisplayError, DisplaySink, Screen};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Baseline of the first text row; rows are one glyph height apart.
const FIRST_BASELINE: i32 = 9;
const ROW_HEIGHT: i32 = 10;

/// 128x64 OLED showing six rows of 21 characters.
pub struct OledDisplay<I2C> {
    driver: Driver<I2C>,
    ready: bool,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and blank it.
    ///
    /// A panel that fails to initialise is kept; every later
    /// [`show`](DisplaySink::show) reports [`DisplayError::NotReady`].
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut driver = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let ready = driver.init().is_ok();
        if ready {
            driver.clear_buffer();
            let _ = driver.flush();
        } else {
            defmt::error!("SSD1306 init failed");
        }
        Self { driver, ready }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> DisplaySink for OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn show(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        self.driver.clear_buffer();
        let style = text_style();
        let mut y = FIRST_BASELINE;
        for line in screen.lines() {
            // Drawing into the frame buffer cannot fail
            let _ = Text::new(line, Point::new(0, y), style).draw(&mut self.driver);
            y += ROW_HEIGHT;
        }
        self.driver.flush().map_err(|_| DisplayError::Io)
    }
}
