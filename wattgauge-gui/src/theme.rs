//! Window theme and color conversion
//!
//! The gauge draws with the colors from its configuration; the iced theme
//! only has to agree with the gauge background.

use iced::theme::{Custom, Palette};
use iced::Theme;
use std::sync::Arc;
use wattgauge::gauge::GaugeStyle;

/// Color helpers
pub mod colors {
    use iced::Color;
    use wattgauge::domain::Rgb;

    /// Green used for the palette's success slot
    pub const SUCCESS: Color = Color::from_rgb(0.0, 0.8, 0.45);

    /// Red used for the palette's danger slot
    pub const DANGER: Color = Color::from_rgb(0.94, 0.2, 0.25);

    /// Convert a gauge color
    pub fn rgb(color: Rgb) -> Color {
        Color::from_rgb8(color.r(), color.g(), color.b())
    }
}

/// Theme matching a gauge style
pub fn gauge_theme(style: &GaugeStyle) -> Theme {
    Theme::Custom(Arc::new(Custom::new(
        "wattgauge".to_string(),
        Palette {
            background: colors::rgb(style.background),
            text: colors::rgb(style.value),
            primary: colors::rgb(style.progress),
            success: colors::SUCCESS,
            danger: colors::DANGER,
        },
    )))
}
