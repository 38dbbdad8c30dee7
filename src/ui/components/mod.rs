// src/ui/components/mod.rs
//! Widgets: buttons and labels

pub mod button;
pub mod frame;
pub mod label;

pub use button::{Button, ButtonDrawHook, Command, CommandKind, PressHandler};
pub use frame::{Widget, WidgetFrame};
pub use label::{Label, LabelDrawHook};
