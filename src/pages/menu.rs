// src/pages/menu.rs
//! Menu controller with page switching and request handling.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info, warn};

use super::page::Page;
use super::registry::{MenuId, MenuRequest, PageContext, PageId, PageRegistry};
use super::{MAX_PAGES, MenuError, MenuResult};
use crate::config::{DisplayConfig, WidgetDefaults};
use crate::ui::colors::COLOR_BACKGROUND;
use crate::ui::surface::RenderSurface;

/// Owns a set of pages and shows one of them at a time.
///
/// Each input cycle the application passes the current touch point to
/// [`handle_touch`](Menu::handle_touch); the visible page updates its
/// buttons, and any page switch or redraw their commands asked for is
/// carried out before the call returns.
pub struct Menu {
    id: MenuId,
    registry: PageRegistry,
    pages: Vec<Page, MAX_PAGES>,
    background: Rgb565,
    widget_defaults: WidgetDefaults,
    /// Set after a touch showed a page, until the finger lifts
    awaiting_release: bool,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        let (registry, id) = PageRegistry::with_menu();
        Self {
            id,
            registry,
            pages: Vec::new(),
            background: COLOR_BACKGROUND,
            widget_defaults: WidgetDefaults::DEFAULT,
            awaiting_release: false,
        }
    }

    /// Menu whose pages start with the configured background and apply the
    /// configured widget defaults.
    pub fn with_config(config: &DisplayConfig) -> Self {
        let mut menu = Self::new();
        menu.background = config.background_color();
        menu.widget_defaults = config.widgets;
        menu
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PageRegistry {
        &mut self.registry
    }

    /// Create an empty page in this menu.
    pub fn add_page(&mut self, title: &str) -> MenuResult<PageId> {
        let id = self.registry.register_page(Some(self.id))?;
        self.pages
            .push(
                Page::new(id, title)
                    .with_background(self.background)
                    .with_widget_defaults(self.widget_defaults),
            )
            .map_err(|_| MenuError::PageCapacityExceeded { max: MAX_PAGES })?;
        debug!("Added page {:?} as {:?}", title, id);
        Ok(id)
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id() == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id() == id)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn visible_page(&self) -> Option<PageId> {
        self.registry.visible_page(self.id)
    }

    /// Make `id` the visible page and draw it.
    ///
    /// The page's buttons lose any stale contact first, so a finger still
    /// down from the previous page does not fire anything here. Returns
    /// `false` if the page is not part of this menu.
    pub fn show_page<S: RenderSurface>(&mut self, id: PageId, surface: &mut S) -> Result<bool, S::Error> {
        let Some(page) = self.pages.iter_mut().find(|page| page.id() == id) else {
            warn!("Cannot show {:?}: not in this menu", id);
            return Ok(false);
        };

        page.reset_press_state();
        if let Err(err) = self.registry.set_visible_page(self.id, id) {
            warn!("Cannot show {:?}: {}", id, err);
            return Ok(false);
        }

        info!("Showing page {:?}", page.title());
        page.draw(surface, &self.registry, false)?;
        Ok(true)
    }

    /// Replace the text of a label and redraw it if its page is visible.
    pub fn set_label_text<S: RenderSurface>(
        &mut self,
        page: PageId,
        index: usize,
        text: &str,
        surface: &mut S,
    ) -> Result<bool, S::Error> {
        let Some(label) = self
            .pages
            .iter_mut()
            .find(|candidate| candidate.id() == page)
            .and_then(|page| page.label_mut(index))
        else {
            warn!("No label {} on {:?}", index, page);
            return Ok(false);
        };
        label.set_text_and_draw(text, surface, &self.registry)
    }

    /// Redraw the visible page.
    pub fn draw<S: RenderSurface>(&self, surface: &mut S, inverted: bool) -> Result<bool, S::Error> {
        match self.visible_page().and_then(|id| self.page(id)) {
            Some(page) => page.draw(surface, &self.registry, inverted),
            None => Ok(false),
        }
    }

    /// Run one input cycle. `touch` is `None` while the screen is untouched.
    ///
    /// After a touch shows a page, contact is ignored until the finger
    /// lifts, so the shown page never sees the old press. Returns how many
    /// button commands reported success.
    pub fn handle_touch<S: RenderSurface>(
        &mut self,
        touch: Option<Point>,
        surface: &mut S,
    ) -> Result<usize, S::Error> {
        let Some(visible) = self.visible_page() else {
            return Ok(0);
        };

        let touch = if self.awaiting_release {
            self.awaiting_release = touch.is_some();
            None
        } else {
            touch
        };

        let executed = match self.pages.iter_mut().find(|page| page.id() == visible) {
            Some(page) => page.process_touch(touch, &mut self.registry, surface)?,
            None => 0,
        };

        let shown = self.process_requests(surface)?;
        if touch.is_some() && shown {
            self.awaiting_release = true;
        }
        Ok(executed)
    }

    /// Carry out queued page switches and redraws, oldest first.
    ///
    /// Returns whether a page was shown.
    pub fn process_requests<S: RenderSurface>(&mut self, surface: &mut S) -> Result<bool, S::Error> {
        let mut shown = false;
        while let Some(request) = self.registry.take_request() {
            debug!("Processing {:?}", request);
            match request {
                MenuRequest::ShowPage { menu, page } if menu == self.id => {
                    shown |= self.show_page(page, surface)?;
                }
                MenuRequest::ShowPage { menu, page } => {
                    warn!("Ignoring request to show {:?} in foreign {:?}", page, menu);
                }
                MenuRequest::Redraw { page, inverted } => match self.page(page) {
                    Some(target) => {
                        target.draw(surface, &self.registry, inverted)?;
                    }
                    None => warn!("Ignoring redraw of unknown {:?}", page),
                },
            }
        }
        Ok(shown)
    }
}

impl core::fmt::Debug for Menu {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("visible", &self.visible_page())
            .field("pages", &self.pages)
            .finish()
    }
}
