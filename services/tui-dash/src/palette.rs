// services/tui-dash/src/palette.rs
//
// Light and dark terminal palettes

use dashkit::{ChartPalette, Rgba, Theme};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPalette {
    pub bg: Rgba,
    pub panel: Rgba,
    pub text: Rgba,
    pub muted: Rgba,
    pub border: Rgba,
    pub brand: Rgba,
    pub accent: Rgba,
    pub success: Rgba,
    pub warn: Rgba,
    pub alert: Rgba,
}

pub const LIGHT: UiPalette = UiPalette {
    bg: Rgba::rgb(0xf8, 0xfa, 0xfc),
    panel: Rgba::rgb(0xff, 0xff, 0xff),
    text: Rgba::rgb(0x0f, 0x17, 0x2a),
    muted: Rgba::rgb(0x64, 0x74, 0x8b),
    border: Rgba::rgb(0xcb, 0xd5, 0xe1),
    brand: Rgba::rgb(0x0f, 0x2a, 0x5f),
    accent: Rgba::rgb(0x25, 0x63, 0xeb),
    success: Rgba::rgb(0x15, 0x80, 0x3d),
    warn: Rgba::rgb(0xb4, 0x53, 0x09),
    alert: Rgba::rgb(0xb9, 0x1c, 0x1c),
};

pub const DARK: UiPalette = UiPalette {
    bg: Rgba::rgb(0x0b, 0x12, 0x20),
    panel: Rgba::rgb(0x11, 0x1a, 0x2e),
    text: Rgba::rgb(0xe2, 0xe8, 0xf0),
    muted: Rgba::rgb(0x94, 0xa3, 0xb8),
    border: Rgba::rgb(0x33, 0x41, 0x55),
    brand: Rgba::rgb(0x60, 0xa5, 0xfa),
    accent: Rgba::rgb(0x93, 0xc5, 0xfd),
    success: Rgba::rgb(0x4a, 0xde, 0x80),
    warn: Rgba::rgb(0xfb, 0xbf, 0x24),
    alert: Rgba::rgb(0xf8, 0x71, 0x71),
};

impl UiPalette {
    pub fn tone(&self, rgba: Rgba) -> Color {
        color(rgba, self.panel)
    }
}

pub fn for_theme(theme: Theme) -> UiPalette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}

/// Terminals have no alpha channel, so translucent colours are flattened onto the panel.
pub fn color(rgba: Rgba, background: Rgba) -> Color {
    let flat = if rgba.is_opaque() { rgba } else { rgba.over(background) };
    Color::Rgb(flat.r, flat.g, flat.b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotColors {
    pub axis: Color,
    pub grid: Color,
    pub bar: Color,
}

pub fn plot_colors(chart: ChartPalette, ui: &UiPalette) -> PlotColors {
    PlotColors {
        axis: color(chart.axis, ui.panel),
        grid: color(chart.grid, ui.panel),
        bar: color(chart.bar, ui.panel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_grid_is_flattened_onto_panel() {
        let colors = plot_colors(Theme::Dark.chart_palette(), &DARK);
        assert_eq!(colors.axis, Color::Rgb(0xff, 0xff, 0xff));
        let Color::Rgb(r, g, b) = colors.grid else {
            panic!("expected rgb");
        };
        assert!(r > DARK.panel.r && r < 0xff);
        assert!(g > DARK.panel.g && b > DARK.panel.b);
    }

    #[test]
    fn light_chrome_is_passed_through() {
        let colors = plot_colors(Theme::Light.chart_palette(), &LIGHT);
        assert_eq!(colors.axis, Color::Rgb(0, 0, 0));
        assert_eq!(colors.grid, Color::Rgb(0xe2, 0xe8, 0xf0));
        assert_eq!(colors.bar, Color::Rgb(0x0f, 0x2a, 0x5f));
    }

    #[test]
    fn palette_follows_theme_toggle() {
        assert_eq!(for_theme(Theme::Light.toggled()), DARK);
        assert_eq!(for_theme(Theme::Light.toggled().toggled()), LIGHT);
    }
}
