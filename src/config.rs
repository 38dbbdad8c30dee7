//! Display and widget configuration

use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Serialize};

use crate::ui::colors::from_raw;
use crate::ui::core::TextDatum;

/// Defaults applied to every widget at construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDefaults {
    /// Corner radius is `min(width, height) / radius_divisor`
    pub radius_divisor: u32,
    pub datum: TextDatum,
    pub datum_offset_x: i32,
    pub datum_offset_y: i32,
    /// Vertical shift of the text anchor before the datum offset is added
    pub baseline_bias: i32,
}

impl WidgetDefaults {
    pub const DEFAULT: Self = Self {
        radius_divisor: 6,
        datum: TextDatum::MiddleCenter,
        datum_offset_x: 0,
        datum_offset_y: 2,
        baseline_bias: -4,
    };

    /// Corner radius for a widget of the given size
    pub fn radius_for(&self, width: u32, height: u32) -> u32 {
        width.min(height) / self.radius_divisor.max(1)
    }
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Screen geometry and page defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u16,
    pub height: u16,
    /// Page background as raw RGB565
    pub background: u16,
    pub widgets: WidgetDefaults,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            background: 0x10A3,
            widgets: WidgetDefaults::DEFAULT,
        }
    }
}

impl DisplayConfig {
    pub fn background_color(&self) -> Rgb565 {
        from_raw(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_a_sixth_of_the_short_side() {
        let defaults = WidgetDefaults::default();
        assert_eq!(defaults.radius_for(120, 40), 6);
        assert_eq!(defaults.radius_for(20, 20), 3);
        assert_eq!(defaults.radius_for(5, 100), 0);
    }

    #[test]
    fn zero_divisor_does_not_panic() {
        let defaults = WidgetDefaults {
            radius_divisor: 0,
            ..WidgetDefaults::DEFAULT
        };
        assert_eq!(defaults.radius_for(30, 40), 30);
    }
}
