// dashkit/src/theme.rs
//
// Display theme and the fixed chart chrome palettes
//

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DashError;

/// Parsed case-insensitively from config files, env and the CLI alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value written to the page-wide `data-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Caption of the toggle button, which names the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    pub fn chart_palette(self) -> ChartPalette {
        match self {
            Theme::Light => LIGHT_CHART_PALETTE,
            Theme::Dark => DARK_CHART_PALETTE,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(DashError::ConfigError(format!(
                "unknown theme '{}', expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = DashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 8-bit RGBA colour; alpha 255 is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// CSS notation: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.2})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }

    /// Composite over an opaque background, for surfaces without alpha support.
    pub fn over(&self, background: Rgba) -> Rgba {
        let alpha = self.a as f64 / 255.0;
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f64 * alpha + bg as f64 * (1.0 - alpha)).round() as u8
        };
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// Colours for plot chrome; only axis and grid change with the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartPalette {
    pub axis: Rgba,
    pub grid: Rgba,
    pub bar: Rgba,
}

pub const BAR_FILL: Rgba = Rgba::rgb(0x0f, 0x2a, 0x5f);

pub const LIGHT_CHART_PALETTE: ChartPalette = ChartPalette {
    axis: Rgba::rgb(0x00, 0x00, 0x00),
    grid: Rgba::rgb(0xe2, 0xe8, 0xf0),
    bar: BAR_FILL,
};

pub const DARK_CHART_PALETTE: ChartPalette = ChartPalette {
    axis: Rgba::rgb(0xff, 0xff, 0xff),
    grid: Rgba::rgba(0xff, 0xff, 0xff, 38),
    bar: BAR_FILL,
};
