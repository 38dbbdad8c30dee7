// src/ui/components/label.rs
//! Static or value-linked text label

use alloc::rc::Rc;
use core::fmt;

use embedded_graphics::primitives::Rectangle;

use crate::pages::PageContext;
use crate::ui::binding::LinkedValue;
use crate::ui::components::frame::{Widget, WidgetFrame};
use crate::ui::core::DrawOptions;
use crate::ui::surface::RenderSurface;

/// Callback run right before a label is rendered
pub type LabelDrawHook = Rc<dyn Fn(&Label)>;

/// A non-interactive widget showing a caption.
///
/// Labels draw exactly like buttons (rounded box plus caption) and can be
/// linked to a value for display, but have no press state or command.
///
/// # Examples
/// ```ignore
/// let mut readout = Label::linked(bounds, "21.0", temperature.clone(), 0.0)
///     .on_page(main_page);
/// readout.bind(Some(temperature), "Temperature");
/// ```
#[derive(Clone)]
pub struct Label {
    frame: WidgetFrame,
    step: f64,
    on_draw: Option<LabelDrawHook>,
}

impl Label {
    pub fn new(bounds: Rectangle, text: &str) -> Self {
        Self {
            frame: WidgetFrame::new(bounds, text),
            step: 0.0,
            on_draw: None,
        }
    }

    /// Label displaying `value`. The step is kept for the widget's owner;
    /// the label never changes the value itself.
    pub fn linked(bounds: Rectangle, text: &str, value: LinkedValue, step: f64) -> Self {
        let mut label = Self::new(bounds, text);
        label.bind(Some(value), "");
        label.step = step;
        label
    }

    pub fn increment(&self) -> f64 {
        self.step
    }

    /// Replace the hook called before each actual render.
    pub fn register_on_draw(&mut self, hook: impl Fn(&Label) + 'static) {
        let hook: LabelDrawHook = Rc::new(hook);
        self.on_draw = Some(hook);
    }

    /// Draw the label if it is visible and, when gated, on the visible page.
    ///
    /// Returns whether anything was rendered.
    pub fn draw<S, C>(&self, surface: &mut S, pages: &C, options: DrawOptions) -> Result<bool, S::Error>
    where
        S: RenderSurface,
        C: PageContext + ?Sized,
    {
        if !self.frame.passes_gates(pages, options) {
            return Ok(false);
        }
        if let Some(hook) = &self.on_draw {
            (hook.as_ref())(self);
        }
        self.frame.render(surface, options.inverted)?;
        Ok(true)
    }

    /// Change the caption and redraw right away with default options.
    pub fn set_text_and_draw<S, C>(
        &mut self,
        text: &str,
        surface: &mut S,
        pages: &C,
    ) -> Result<bool, S::Error>
    where
        S: RenderSurface,
        C: PageContext + ?Sized,
    {
        self.set_text(text);
        self.draw(surface, pages, DrawOptions::default())
    }
}

impl Widget for Label {
    fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WidgetFrame {
        &mut self.frame
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("frame", &self.frame)
            .field("step", &self.step)
            .field("on_draw", &self.on_draw.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Detached, PageRegistry};
    use crate::ui::core::{TextDatum, TextFormat};
    use crate::ui::surface::recording::{RecordingSurface, SurfaceCall};
    use core::cell::Cell;
    use embedded_graphics::prelude::*;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(0, 0), Size::new(100, 24))
    }

    #[test]
    fn linked_label_exposes_value_and_step() {
        let value = LinkedValue::new(3.0);
        let mut label = Label::linked(bounds(), "3.0", value.clone(), 0.1);

        assert!(label.linked_value().is_some_and(|v| v.ptr_eq(&value)));
        assert_eq!(label.linked_value_name(), "");
        assert_eq!(label.increment(), 0.1);

        label.bind(Some(value.clone()), "Pressure");
        assert_eq!(label.linked_value_name(), "Pressure");
        assert_eq!(value.get(), 3.0);
    }

    #[test]
    fn label_on_inactive_page_is_skipped() {
        let mut registry = PageRegistry::new();
        let menu = registry.register_menu().unwrap();
        let active = registry.register_page(Some(menu)).unwrap();
        let inactive = registry.register_page(Some(menu)).unwrap();
        registry.set_visible_page(menu, active).unwrap();

        let label = Label::new(bounds(), "Hi").on_page(inactive);
        let mut surface = RecordingSurface::new();

        assert!(!label.draw(&mut surface, &registry, DrawOptions::default()).unwrap());
        assert!(surface.calls.is_empty());

        assert!(label
            .draw(&mut surface, &registry, DrawOptions::default().ungated())
            .unwrap());
        assert_eq!(surface.strings(), ["Hi"]);
    }

    #[test]
    fn set_text_and_draw_renders_new_caption() {
        let mut label = Label::new(bounds(), "old");
        let mut surface = RecordingSurface::new();

        assert!(label.set_text_and_draw("new", &mut surface, &Detached).unwrap());
        assert_eq!(label.text(), "new");
        assert_eq!(surface.strings(), ["new"]);
    }

    #[test]
    fn hidden_label_keeps_text_but_does_not_draw() {
        let mut label = Label::new(bounds(), "old");
        label.hide();
        let mut surface = RecordingSurface::new();

        assert!(!label.set_text_and_draw("new", &mut surface, &Detached).unwrap());
        assert_eq!(label.text(), "new");
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn datum_and_offsets_reach_the_surface() {
        let before = TextFormat::default();
        let mut surface = RecordingSurface::with_format(before);
        let label = Label::new(bounds(), "L").with_datum(TextDatum::MiddleLeft, -40, 0);

        label.draw(&mut surface, &Detached, DrawOptions::default()).unwrap();

        let string = surface
            .calls
            .iter()
            .find_map(|call| match call {
                SurfaceCall::DrawString { anchor, format, .. } => Some((*anchor, *format)),
                _ => None,
            })
            .unwrap();
        // center (50, 12), bias -4
        assert_eq!(string.0, Point::new(10, 8));
        assert_eq!(string.1.datum, TextDatum::MiddleLeft);
        assert_eq!(surface.text_format(), before);
    }

    #[test]
    fn draw_hook_sees_the_label() {
        let hooks = Rc::new(Cell::new(0u32));
        let h = hooks.clone();
        let mut label = Label::new(bounds(), "hooked");
        label.register_on_draw(move |l| {
            assert_eq!(l.text(), "hooked");
            h.set(h.get() + 1);
        });
        let mut surface = RecordingSurface::new();

        label.draw(&mut surface, &Detached, DrawOptions::default()).unwrap();
        label.hide();
        label.draw(&mut surface, &Detached, DrawOptions::default()).unwrap();
        assert_eq!(hooks.get(), 1);
    }
}
