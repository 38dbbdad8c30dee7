//! Pages and menus
//!
//! A [`Page`] owns the buttons and labels drawn together on one screen. A
//! [`Menu`] owns a set of pages, tracks which one is visible and carries out
//! the requests button commands leave in its [`PageRegistry`].

use thiserror_no_std::Error;

pub mod menu;
pub mod page;
pub mod registry;

pub use menu::Menu;
pub use page::Page;
pub use registry::{Detached, MenuId, MenuRequest, PageContext, PageId, PageRegistry};

/// Maximum number of pages in a registry
pub const MAX_PAGES: usize = 8;

/// Maximum number of menus in a registry
pub const MAX_MENUS: usize = 4;

/// Maximum number of buttons, and separately of labels, on one page
pub const MAX_WIDGETS_PER_PAGE: usize = 16;

/// Requests that can wait for the menu before new ones are dropped
pub const MAX_PENDING_REQUESTS: usize = 8;

/// Error types for building the page/menu hierarchy
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// Page capacity exceeded
    #[error("Page capacity exceeded (max: {max})")]
    PageCapacityExceeded {
        /// Maximum allowed page count
        max: usize,
    },

    /// Menu capacity exceeded
    #[error("Menu capacity exceeded (max: {max})")]
    MenuCapacityExceeded {
        /// Maximum allowed menu count
        max: usize,
    },

    /// Widget capacity of a page exceeded
    #[error("Widget capacity exceeded (max: {max})")]
    WidgetCapacityExceeded {
        /// Maximum allowed widgets of one kind per page
        max: usize,
    },

    /// Page handle not known to this registry or menu
    #[error("Unknown page: {0:?}")]
    UnknownPage(PageId),

    /// Menu handle not known to this registry
    #[error("Unknown menu: {0:?}")]
    UnknownMenu(MenuId),
}

/// Result type for page/menu operations
pub type MenuResult<T> = Result<T, MenuError>;
