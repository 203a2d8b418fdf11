//! SSD1306 OLED display surface
//!
//! Implements the core's `DisplaySurface` over the ssd1306 driver in
//! buffered graphics mode.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{Brightness, I2CDisplayInterface, Ssd1306};

use skopos_display::{DisplayError, DisplaySurface};

/// Concrete driver type, generic over the I²C bus
type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// The panel behind the core's drawing trait
pub struct Oled<I2C> {
    display: Driver<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and clear it
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = display.init();
        display.clear_buffer();
        let _ = display.flush();
        Self { display }
    }

    fn style(&self) -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build()
    }

    fn stroke(&self) -> PrimitiveStyle<BinaryColor> {
        PrimitiveStyle::with_stroke(BinaryColor::On, 1)
    }
}

/// The driver's error collapses to a communication failure
fn comm<E>(_: E) -> DisplayError {
    DisplayError::Communication
}

impl<I2C> DisplaySurface for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        Ok(())
    }

    fn text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        Text::with_baseline(
            text,
            Point::new(x as i32, y as i32),
            self.style(),
            Baseline::Top,
        )
        .draw(&mut self.display)
        .map(|_| ())
        .map_err(comm)
    }

    fn hline(&mut self, x: u16, y: u16, length: u16) -> Result<(), DisplayError> {
        Line::new(
            Point::new(x as i32, y as i32),
            Point::new((x + length.saturating_sub(1)) as i32, y as i32),
        )
        .into_styled(self.stroke())
        .draw(&mut self.display)
        .map_err(comm)
    }

    fn vline(&mut self, x: u16, y: u16, length: u16) -> Result<(), DisplayError> {
        Line::new(
            Point::new(x as i32, y as i32),
            Point::new(x as i32, (y + length.saturating_sub(1)) as i32),
        )
        .into_styled(self.stroke())
        .draw(&mut self.display)
        .map_err(comm)
    }

    fn rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError> {
        Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(self.stroke())
        .draw(&mut self.display)
        .map_err(comm)
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), DisplayError> {
        Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut self.display)
        .map_err(comm)
    }

    fn pixel(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        Pixel(Point::new(x as i32, y as i32), BinaryColor::On)
            .draw(&mut self.display)
            .map_err(comm)
    }

    fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.display.set_display_on(on).map_err(comm)
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError> {
        // The driver exposes five brightness presets
        let brightness = match level {
            0..=50 => Brightness::DIMMEST,
            51..=101 => Brightness::DIM,
            102..=152 => Brightness::NORMAL,
            153..=203 => Brightness::BRIGHT,
            _ => Brightness::BRIGHTEST,
        };
        self.display.set_brightness(brightness).map_err(comm)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(comm)
    }
}
