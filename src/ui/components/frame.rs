// src/ui/components/frame.rs
//! Geometry, appearance and drawing shared by buttons and labels
//!
//! Both widget kinds draw the same way: a filled rounded rectangle, its
//! outline, and a caption anchored at the rectangle's center. The
//! [`Widget`] trait gives both kinds the same configuration surface on top
//! of a [`WidgetFrame`].

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::WidgetDefaults;
use crate::pages::PageContext;
use crate::pages::PageId;
use crate::ui::binding::{LinkedValue, ValueBinding};
use crate::ui::core::{
    DrawOptions, MAX_TEXT_LEN, TextDatum, TextFormat, Visibility, WidgetColors, bounded_text,
};
use crate::ui::surface::RenderSurface;

/// State common to every widget.
#[derive(Debug, Clone)]
pub struct WidgetFrame {
    bounds: Rectangle,
    radius: u32,
    /// Radius was set explicitly and survives `apply_defaults`
    custom_radius: bool,
    colors: WidgetColors,
    text: heapless::String<MAX_TEXT_LEN>,
    text_size: u8,
    datum: TextDatum,
    datum_offset: Point,
    custom_datum: bool,
    baseline_bias: i32,
    visibility: Visibility,
    page: Option<PageId>,
    binding: ValueBinding,
}

impl WidgetFrame {
    pub fn new(bounds: Rectangle, text: &str) -> Self {
        let defaults = WidgetDefaults::DEFAULT;
        Self {
            bounds,
            radius: defaults.radius_for(bounds.size.width, bounds.size.height),
            custom_radius: false,
            colors: WidgetColors::default(),
            text: bounded_text(text),
            text_size: 1,
            datum: defaults.datum,
            datum_offset: Point::new(defaults.datum_offset_x, defaults.datum_offset_y),
            custom_datum: false,
            baseline_bias: defaults.baseline_bias,
            visibility: Visibility::Visible,
            page: None,
            binding: ValueBinding::default(),
        }
    }

    /// Recompute radius, datum and offsets from `defaults`. A radius or
    /// datum set explicitly on the widget is kept.
    pub fn apply_defaults(&mut self, defaults: &WidgetDefaults) {
        if !self.custom_radius {
            self.radius = defaults.radius_for(self.bounds.size.width, self.bounds.size.height);
        }
        if !self.custom_datum {
            self.datum = defaults.datum;
            self.datum_offset = Point::new(defaults.datum_offset_x, defaults.datum_offset_y);
        }
        self.baseline_bias = defaults.baseline_bias;
    }

    pub fn binding(&self) -> &ValueBinding {
        &self.binding
    }

    /// Whether a draw with `options` would reach the surface.
    ///
    /// Own visibility is checked first and always wins. Page gating only
    /// applies when the widget has a page and that page is in a menu.
    pub fn passes_gates<C>(&self, pages: &C, options: DrawOptions) -> bool
    where
        C: PageContext + ?Sized,
    {
        if self.visibility == Visibility::Hidden {
            return false;
        }
        if options.gate_on_page_visibility
            && let Some(page) = self.page
            && !pages.is_showing(page)
        {
            return false;
        }
        true
    }

    /// Where the caption is anchored: the rectangle's center, nudged by the
    /// baseline bias and the datum offset.
    pub fn text_anchor(&self) -> Point {
        let center_x = self.bounds.top_left.x + (self.bounds.size.width / 2) as i32;
        let center_y = self.bounds.top_left.y + (self.bounds.size.height / 2) as i32;
        Point::new(
            center_x + self.datum_offset.x,
            center_y + self.baseline_bias + self.datum_offset.y,
        )
    }

    /// Draw rectangle, outline and caption. Gating is the caller's job.
    pub fn render<S: RenderSurface>(&self, surface: &mut S, inverted: bool) -> Result<(), S::Error> {
        let colors = if inverted {
            self.colors.inverted()
        } else {
            self.colors
        };

        surface.fill_round_rect(self.bounds, self.radius, colors.fill)?;
        surface.draw_round_rect(self.bounds, self.radius, colors.outline)?;

        let format = TextFormat {
            color: colors.text,
            size: self.text_size,
            datum: self.datum,
            padding: 0,
        };
        let anchor = self.text_anchor();
        surface.with_text_format(format, |surface| surface.draw_string(&self.text, anchor))
    }
}

/// Configuration shared by [`Button`](super::Button) and [`Label`](super::Label).
pub trait Widget {
    fn frame(&self) -> &WidgetFrame;
    fn frame_mut(&mut self) -> &mut WidgetFrame;

    fn show(&mut self) {
        self.frame_mut().visibility = Visibility::Visible;
    }

    fn hide(&mut self) {
        self.frame_mut().visibility = Visibility::Hidden;
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.frame_mut().visibility = visibility;
    }

    fn visibility(&self) -> Visibility {
        self.frame().visibility
    }

    fn is_visible(&self) -> bool {
        self.frame().visibility == Visibility::Visible
    }

    /// Replace the linked value and its display name in one step.
    fn bind(&mut self, value: Option<LinkedValue>, name: &str) {
        self.frame_mut().binding = ValueBinding::new(value, name);
    }

    fn linked_value(&self) -> Option<&LinkedValue> {
        self.frame().binding.value()
    }

    fn linked_value_name(&self) -> &str {
        self.frame().binding.name()
    }

    /// Set the text anchor and its pixel offset from the widget's center.
    fn set_datum(&mut self, datum: TextDatum, x_offset: i32, y_offset: i32) {
        let frame = self.frame_mut();
        frame.datum = datum;
        frame.datum_offset = Point::new(x_offset, y_offset);
        frame.custom_datum = true;
    }

    fn datum(&self) -> (TextDatum, Point) {
        (self.frame().datum, self.frame().datum_offset)
    }

    fn set_text(&mut self, text: &str) {
        self.frame_mut().text = bounded_text(text);
    }

    fn text(&self) -> &str {
        &self.frame().text
    }

    fn text_size(&self) -> u8 {
        self.frame().text_size
    }

    fn bounds(&self) -> Rectangle {
        self.frame().bounds
    }

    fn radius(&self) -> u32 {
        self.frame().radius
    }

    fn set_radius(&mut self, radius: u32) {
        let frame = self.frame_mut();
        frame.radius = radius;
        frame.custom_radius = true;
    }

    fn colors(&self) -> WidgetColors {
        self.frame().colors
    }

    fn set_colors(&mut self, colors: WidgetColors) {
        self.frame_mut().colors = colors;
    }

    /// Page this widget is drawn on, if any
    fn page(&self) -> Option<PageId> {
        self.frame().page
    }

    fn with_colors(mut self, colors: WidgetColors) -> Self
    where
        Self: Sized,
    {
        self.set_colors(colors);
        self
    }

    fn with_text_size(mut self, size: u8) -> Self
    where
        Self: Sized,
    {
        self.frame_mut().text_size = size;
        self
    }

    /// Override the default corner radius
    fn with_radius(mut self, radius: u32) -> Self
    where
        Self: Sized,
    {
        self.set_radius(radius);
        self
    }

    fn with_datum(mut self, datum: TextDatum, x_offset: i32, y_offset: i32) -> Self
    where
        Self: Sized,
    {
        self.set_datum(datum, x_offset, y_offset);
        self
    }

    /// Apply configured defaults to everything not set explicitly.
    fn with_defaults(mut self, defaults: &WidgetDefaults) -> Self
    where
        Self: Sized,
    {
        self.frame_mut().apply_defaults(defaults);
        self
    }

    fn on_page(mut self, page: PageId) -> Self
    where
        Self: Sized,
    {
        self.frame_mut().page = Some(page);
        self
    }
}
