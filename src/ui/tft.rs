//! [`RenderSurface`] on top of any embedded-graphics display

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Text, TextStyleBuilder};

use crate::ui::colors::COLOR_BACKGROUND;
use crate::ui::core::{TextDatum, TextFormat};
use crate::ui::surface::RenderSurface;

/// Font used for a TFT-style text size multiplier.
///
/// Size 1 is the classic 6px-wide glyph; larger sizes pick the closest
/// embedded-graphics mono font.
pub fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &ascii::FONT_6X10,
        _ => &ascii::FONT_10X20,
    }
}

/// A display plus the text registers a TFT driver would keep.
///
/// # Examples
/// ```ignore
/// let mut surface = TftSurface::new(display);
/// button.draw(&mut surface, menu.registry(), DrawOptions::default())?;
/// ```
pub struct TftSurface<D> {
    target: D,
    format: TextFormat,
    background: Rgb565,
}

impl<D> TftSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            format: TextFormat::default(),
            background: COLOR_BACKGROUND,
        }
    }

    /// Color used to fill text padding
    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> RenderSurface for TftSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn fill_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn draw_round_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }

    fn draw_string(&mut self, text: &str, anchor: Point) -> Result<(), Self::Error> {
        let character_style = MonoTextStyle::new(font_for_size(self.format.size), self.format.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.format.datum.alignment())
            .baseline(self.format.datum.baseline())
            .build();
        let text = Text::with_text_style(text, anchor, character_style, text_style);

        // Padding clears a strip at least `padding` wide behind the text
        let padding = u32::from(self.format.padding);
        let text_box = text.bounding_box();
        if padding > text_box.size.width {
            let left = match self.format.datum.alignment() {
                Alignment::Left => anchor.x,
                Alignment::Center => anchor.x - (padding / 2) as i32,
                Alignment::Right => anchor.x - padding as i32,
            };
            let strip = Rectangle::new(
                Point::new(left, text_box.top_left.y),
                Size::new(padding, text_box.size.height),
            );
            self.target.fill_solid(&strip, self.background)?;
        }

        text.draw(&mut self.target)?;
        Ok(())
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.target.clear(color)
    }

    fn text_color(&self) -> Rgb565 {
        self.format.color
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.format.color = color;
    }

    fn text_size(&self) -> u8 {
        self.format.size
    }

    fn set_text_size(&mut self, size: u8) {
        self.format.size = size;
    }

    fn text_datum(&self) -> TextDatum {
        self.format.datum
    }

    fn set_text_datum(&mut self, datum: TextDatum) {
        self.format.datum = datum;
    }

    fn text_padding(&self) -> u16 {
        self.format.padding
    }

    fn set_text_padding(&mut self, padding: u16) {
        self.format.padding = padding;
    }
}
