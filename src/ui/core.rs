// src/ui/core.rs
//! Core value types shared by every widget

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::ui::colors::{COLOR_STROKE, COLOR_SURFACE, WHITE};

/// Maximum number of bytes a widget caption can hold
pub const MAX_TEXT_LEN: usize = 48;

/// Maximum number of bytes of a linked value's display name
pub const MAX_NAME_LEN: usize = 24;

/// A widget's own visibility, independent from its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Anchor point of a text string relative to the draw position.
///
/// Mirrors the twelve datums of common TFT drivers: three horizontal
/// alignments against top, middle, bottom and alphabetic baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDatum {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    BaselineLeft,
    BaselineCenter,
    BaselineRight,
}

impl TextDatum {
    /// Horizontal alignment in embedded-graphics terms
    pub fn alignment(self) -> Alignment {
        match self {
            TextDatum::TopLeft
            | TextDatum::MiddleLeft
            | TextDatum::BottomLeft
            | TextDatum::BaselineLeft => Alignment::Left,
            TextDatum::TopCenter
            | TextDatum::MiddleCenter
            | TextDatum::BottomCenter
            | TextDatum::BaselineCenter => Alignment::Center,
            TextDatum::TopRight
            | TextDatum::MiddleRight
            | TextDatum::BottomRight
            | TextDatum::BaselineRight => Alignment::Right,
        }
    }

    /// Vertical baseline in embedded-graphics terms
    pub fn baseline(self) -> Baseline {
        match self {
            TextDatum::TopLeft | TextDatum::TopCenter | TextDatum::TopRight => Baseline::Top,
            TextDatum::MiddleLeft | TextDatum::MiddleCenter | TextDatum::MiddleRight => {
                Baseline::Middle
            }
            TextDatum::BottomLeft | TextDatum::BottomCenter | TextDatum::BottomRight => {
                Baseline::Bottom
            }
            TextDatum::BaselineLeft | TextDatum::BaselineCenter | TextDatum::BaselineRight => {
                Baseline::Alphabetic
            }
        }
    }
}

/// The text formatting registers of a rendering surface.
///
/// These are shared by every widget drawn on the same screen, so widgets
/// only ever change them inside a save/apply/restore bracket
/// (see [`RenderSurface::with_text_format`](super::surface::RenderSurface::with_text_format)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormat {
    pub color: Rgb565,
    pub size: u8,
    pub datum: TextDatum,
    pub padding: u16,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            color: WHITE,
            size: 1,
            datum: TextDatum::TopLeft,
            padding: 0,
        }
    }
}

/// Outline, fill and text color of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetColors {
    pub outline: Rgb565,
    pub fill: Rgb565,
    pub text: Rgb565,
}

impl WidgetColors {
    pub fn new(outline: Rgb565, fill: Rgb565, text: Rgb565) -> Self {
        Self {
            outline,
            fill,
            text,
        }
    }

    /// Colors used for an inverted ("pressed") draw: fill and text swap,
    /// the outline stays.
    pub fn inverted(self) -> Self {
        Self {
            outline: self.outline,
            fill: self.text,
            text: self.fill,
        }
    }
}

impl Default for WidgetColors {
    fn default() -> Self {
        Self::new(COLOR_STROKE, COLOR_SURFACE, WHITE)
    }
}

/// Options for a single widget draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// Swap fill and text colors
    pub inverted: bool,
    /// Skip the draw when the owning page is not the visible page of its menu
    pub gate_on_page_visibility: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            inverted: false,
            gate_on_page_visibility: true,
        }
    }
}

impl DrawOptions {
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Draw regardless of which page is currently visible
    pub fn ungated(mut self) -> Self {
        self.gate_on_page_visibility = false;
        self
    }
}

/// Copy `text` into a bounded string, truncating at a char boundary.
pub(crate) fn bounded_text<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            warn!("Text truncated to {} bytes: {:?}", N, text);
            break;
        }
    }
    out
}
