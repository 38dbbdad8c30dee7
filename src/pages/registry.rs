//! Page and menu identities, and the lookups widgets make through them.
//!
//! Widgets refer to pages only through [`PageId`] handles. Whatever owns the
//! pages implements [`PageContext`], which answers the two questions a
//! widget asks ("which menu is my page in?" and "which page does that menu
//! show?") and accepts fire-and-forget [`MenuRequest`]s from button
//! commands.

use heapless::{Deque, Vec};
use log::{debug, warn};

use super::{MAX_MENUS, MAX_PAGES, MAX_PENDING_REQUESTS, MenuError, MenuResult};

/// Identity of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub(crate) u8);

/// Identity of a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) u8);

impl PageId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MenuId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Work a widget asks the menu layer to do after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRequest {
    /// Make `page` the visible page of `menu`
    ShowPage { menu: MenuId, page: PageId },
    /// Redraw every widget of `page`
    Redraw { page: PageId, inverted: bool },
}

/// The page/menu hierarchy as seen from a widget.
pub trait PageContext {
    /// Menu the page belongs to, if any
    fn menu_of(&self, page: PageId) -> Option<MenuId>;

    /// Page currently shown by the menu, if any
    fn visible_page(&self, menu: MenuId) -> Option<PageId>;

    /// Queue a request; nothing is returned to the caller.
    fn request(&mut self, request: MenuRequest);

    /// Whether widgets of `page` should currently reach the screen.
    ///
    /// A page outside any menu is always considered shown.
    fn is_showing(&self, page: PageId) -> bool {
        match self.menu_of(page) {
            Some(menu) => self.visible_page(menu) == Some(page),
            None => true,
        }
    }
}

/// A context with no pages and no menus; requests are dropped.
///
/// Useful for widgets that live outside any hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl PageContext for Detached {
    fn menu_of(&self, _page: PageId) -> Option<MenuId> {
        None
    }

    fn visible_page(&self, _menu: MenuId) -> Option<PageId> {
        None
    }

    fn request(&mut self, request: MenuRequest) {
        debug!("Dropping {:?} outside any menu", request);
    }
}

#[derive(Debug, Clone, Copy)]
struct PageEntry {
    menu: Option<MenuId>,
}

#[derive(Debug, Clone, Copy)]
struct MenuEntry {
    visible: Option<PageId>,
}

/// Arena of pages and menus plus the queue of pending requests.
#[derive(Debug, Default)]
pub struct PageRegistry {
    pages: Vec<PageEntry, MAX_PAGES>,
    menus: Vec<MenuEntry, MAX_MENUS>,
    requests: Deque<MenuRequest, MAX_PENDING_REQUESTS>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry already holding one menu, returned alongside it.
    pub fn with_menu() -> (Self, MenuId) {
        let mut registry = Self::new();
        registry.menus.push(MenuEntry { visible: None }).ok();
        (registry, MenuId(0))
    }

    pub fn register_menu(&mut self) -> MenuResult<MenuId> {
        let id = MenuId(self.menus.len() as u8);
        self.menus
            .push(MenuEntry { visible: None })
            .map_err(|_| MenuError::MenuCapacityExceeded { max: MAX_MENUS })?;
        Ok(id)
    }

    /// Register a page, optionally as a member of `menu`.
    pub fn register_page(&mut self, menu: Option<MenuId>) -> MenuResult<PageId> {
        if let Some(menu) = menu
            && menu.index() >= self.menus.len()
        {
            return Err(MenuError::UnknownMenu(menu));
        }
        let id = PageId(self.pages.len() as u8);
        self.pages
            .push(PageEntry { menu })
            .map_err(|_| MenuError::PageCapacityExceeded { max: MAX_PAGES })?;
        Ok(id)
    }

    /// Record `page` as the page `menu` shows.
    pub fn set_visible_page(&mut self, menu: MenuId, page: PageId) -> MenuResult<()> {
        if page.index() >= self.pages.len() {
            return Err(MenuError::UnknownPage(page));
        }
        let entry = self
            .menus
            .get_mut(menu.index())
            .ok_or(MenuError::UnknownMenu(menu))?;
        entry.visible = Some(page);
        Ok(())
    }

    /// Next pending request, oldest first
    pub fn take_request(&mut self) -> Option<MenuRequest> {
        self.requests.pop_front()
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.requests.is_empty()
    }
}

impl PageContext for PageRegistry {
    fn menu_of(&self, page: PageId) -> Option<MenuId> {
        self.pages.get(page.index()).and_then(|entry| entry.menu)
    }

    fn visible_page(&self, menu: MenuId) -> Option<PageId> {
        self.menus.get(menu.index()).and_then(|entry| entry.visible)
    }

    fn request(&mut self, request: MenuRequest) {
        if self.requests.push_back(request).is_err() {
            warn!("Request queue full, dropping {:?}", request);
        }
    }
}
