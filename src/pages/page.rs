// src/pages/page.rs
//! A page: the buttons and labels shown together on one screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, warn};

use super::registry::{PageContext, PageId};
use super::{MAX_WIDGETS_PER_PAGE, MenuError, MenuResult};
use crate::config::WidgetDefaults;
use crate::ui::colors::COLOR_BACKGROUND;
use crate::ui::core::{DrawOptions, MAX_NAME_LEN, bounded_text};
use crate::ui::surface::RenderSurface;
use crate::ui::{Button, Label, Widget};

/// Widgets of one screen plus the background behind them.
///
/// Besides drawing, a page coordinates its buttons during touch handling:
/// it feeds each button its contact state, lets only one exclusive button
/// register a press at a time, and executes commands on the press edge.
pub struct Page {
    id: PageId,
    title: heapless::String<MAX_NAME_LEN>,
    background: Rgb565,
    widget_defaults: WidgetDefaults,
    buttons: Vec<Button, MAX_WIDGETS_PER_PAGE>,
    labels: Vec<Label, MAX_WIDGETS_PER_PAGE>,
}

impl Page {
    pub fn new(id: PageId, title: &str) -> Self {
        Self {
            id,
            title: bounded_text(title),
            background: COLOR_BACKGROUND,
            widget_defaults: WidgetDefaults::DEFAULT,
            buttons: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    /// Defaults applied to every widget added from now on.
    pub fn with_widget_defaults(mut self, defaults: WidgetDefaults) -> Self {
        self.widget_defaults = defaults;
        self
    }

    pub fn widget_defaults(&self) -> &WidgetDefaults {
        &self.widget_defaults
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    pub fn set_background(&mut self, background: Rgb565) {
        self.background = background;
    }

    /// Add a button and return its index.
    ///
    /// The button is moved onto this page and takes the page's widget
    /// defaults, except for a radius or datum it set explicitly.
    pub fn add_button(&mut self, button: Button) -> MenuResult<usize> {
        let button = self.adopt(button);
        self.buttons
            .push(button)
            .map_err(|_| MenuError::WidgetCapacityExceeded {
                max: MAX_WIDGETS_PER_PAGE,
            })?;
        Ok(self.buttons.len() - 1)
    }

    /// Add a label and return its index, adopting it like
    /// [`add_button`](Page::add_button).
    pub fn add_label(&mut self, label: Label) -> MenuResult<usize> {
        let label = self.adopt(label);
        self.labels
            .push(label)
            .map_err(|_| MenuError::WidgetCapacityExceeded {
                max: MAX_WIDGETS_PER_PAGE,
            })?;
        Ok(self.labels.len() - 1)
    }

    fn adopt<W: Widget>(&self, widget: W) -> W {
        if let Some(previous) = widget.page()
            && previous != self.id
        {
            warn!(
                "Moving {:?} from {:?} to page {:?}",
                widget.text(),
                previous,
                self.title
            );
        }
        widget.with_defaults(&self.widget_defaults).on_page(self.id)
    }

    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut Button> {
        self.buttons.get_mut(index)
    }

    pub fn label(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    pub fn label_mut(&mut self, index: usize) -> Option<&mut Label> {
        self.labels.get_mut(index)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Clear stale contact on every button, e.g. right before the page is shown.
    pub fn reset_press_state(&mut self) {
        for button in self.buttons.iter_mut() {
            button.reset_press_state();
        }
    }

    /// Full redraw: background, labels, then buttons.
    ///
    /// Does nothing when the page is in a menu that shows another page.
    /// Buttons that are held down are drawn inverted.
    pub fn draw<S, C>(&self, surface: &mut S, pages: &C, inverted: bool) -> Result<bool, S::Error>
    where
        S: RenderSurface,
        C: PageContext + ?Sized,
    {
        if !pages.is_showing(self.id) {
            return Ok(false);
        }

        surface.fill_screen(self.background)?;

        let options = DrawOptions::default().inverted(inverted);
        for label in self.labels.iter() {
            label.draw(surface, pages, options)?;
        }
        for button in self.buttons.iter() {
            button.draw(surface, pages, options.inverted(inverted || button.is_pressed()))?;
        }
        Ok(true)
    }

    /// Feed one input cycle to the buttons.
    ///
    /// `touch` is the contact point, or `None` when nothing touches the
    /// screen. Buttons are redrawn inverted on their press edge and normal
    /// on their release edge; commands run on the press edge. Returns how
    /// many commands reported success.
    pub fn process_touch<S, C>(
        &mut self,
        touch: Option<Point>,
        pages: &mut C,
        surface: &mut S,
    ) -> Result<usize, S::Error>
    where
        S: RenderSurface,
        C: PageContext + ?Sized,
    {
        let mut exclusive_claimed = false;
        let mut executed = 0;

        for button in self.buttons.iter_mut() {
            let over = button.is_visible() && touch.is_some_and(|point| button.contains(point));
            let pressed = over && !(button.is_exclusive() && exclusive_claimed);
            if pressed && button.is_exclusive() {
                exclusive_claimed = true;
            }
            button.press(pressed);

            if button.just_pressed() {
                debug!("Page {:?}: {:?} pressed", self.title, button.text());
                button.draw(surface, &*pages, DrawOptions::default().inverted(true))?;
                if button.execute_command(pages) {
                    executed += 1;
                }
            } else if button.just_released() {
                debug!("Page {:?}: {:?} released", self.title, button.text());
                button.draw(surface, &*pages, DrawOptions::default())?;
            }
        }
        Ok(executed)
    }
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("buttons", &self.buttons.len())
            .field("labels", &self.labels.len())
            .finish()
    }
}
