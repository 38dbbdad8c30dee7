//! Touchscreen widgets for embedded displays.
//!
//! Buttons and labels are drawn through a [`RenderSurface`](ui::RenderSurface)
//! and grouped into pages, which a [`Menu`](pages::Menu) switches between.
//! Widgets never own their page, menu or linked value; they hold identity
//! handles and ask a [`PageContext`](pages::PageContext) when they need to
//! know what is on screen.
//!
//! The crate is `#![no_std]` with `extern crate alloc` so it runs on the
//! device and on desktop hosts (simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod pages;
pub mod ui;
