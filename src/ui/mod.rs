// src/ui/mod.rs
//! Widget layer for touchscreen menus
//!
//! This module provides:
//! - Core value types (visibility, text datum, text formatting registers)
//! - Linked values shared between widgets and application code
//! - Press state tracking with edge detection
//! - The rendering surface capability and an embedded-graphics adapter
//! - Buttons and labels

pub mod binding;
pub mod colors;
pub mod components;
pub mod core;
pub mod press;
pub mod surface;
pub mod tft;

// Re-export commonly used items
pub use binding::{LinkedValue, ValueBinding};
pub use components::{Button, Command, CommandKind, Label, PressHandler, Widget, WidgetFrame};
pub use self::core::{DrawOptions, TextDatum, TextFormat, Visibility, WidgetColors};
pub use press::PressState;
pub use surface::RenderSurface;
pub use tft::TftSurface;
