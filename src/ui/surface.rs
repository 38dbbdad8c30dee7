//! Rendering surface capability used by widgets
//!
//! A surface is shared by every widget on the same physical screen. Besides
//! primitive drawing it exposes text formatting registers (color, size,
//! datum, padding) that behave like global state: whatever one widget sets
//! is seen by the next `draw_string`. Widgets therefore never touch those
//! registers directly; they go through [`RenderSurface::with_text_format`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::core::{TextDatum, TextFormat};

/// Drawing primitives and text registers of a display.
pub trait RenderSurface {
    type Error;

    /// Fill a rounded rectangle
    fn fill_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Stroke the outline of a rounded rectangle
    fn draw_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Draw `text` anchored at `anchor` using the current text registers
    fn draw_string(&mut self, text: &str, anchor: Point) -> Result<(), Self::Error>;

    /// Fill the whole screen
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    fn text_color(&self) -> Rgb565;
    fn set_text_color(&mut self, color: Rgb565);

    fn text_size(&self) -> u8;
    fn set_text_size(&mut self, size: u8);

    fn text_datum(&self) -> TextDatum;
    fn set_text_datum(&mut self, datum: TextDatum);

    fn text_padding(&self) -> u16;
    fn set_text_padding(&mut self, padding: u16);

    /// Snapshot of all four text registers
    fn text_format(&self) -> TextFormat {
        TextFormat {
            color: self.text_color(),
            size: self.text_size(),
            datum: self.text_datum(),
            padding: self.text_padding(),
        }
    }

    fn set_text_format(&mut self, format: TextFormat) {
        self.set_text_color(format.color);
        self.set_text_size(format.size);
        self.set_text_datum(format.datum);
        self.set_text_padding(format.padding);
    }

    /// Run `f` with `format` applied, then restore the previous registers.
    ///
    /// The restore happens whatever `f` returns, including errors.
    fn with_text_format<R>(&mut self, format: TextFormat, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let saved = self.text_format();
        self.set_text_format(format);
        let result = f(self);
        self.set_text_format(saved);
        result
    }
}
