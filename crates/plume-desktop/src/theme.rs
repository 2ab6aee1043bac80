//! Theme configuration for the desktop app

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Get the color palette for this theme
    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Detect the theme from the environment.
///
/// `PLUME_THEME` wins when set; on Linux a dark GTK theme is honored;
/// everything else defaults to light.
#[must_use]
pub fn detect() -> ResolvedTheme {
    if let Ok(forced) = std::env::var("PLUME_THEME") {
        return if forced.eq_ignore_ascii_case("dark") {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        };
    }

    if let Ok(gtk_theme) = std::env::var("GTK_THEME") {
        if gtk_theme.to_lowercase().contains("dark") {
            return ResolvedTheme::Dark;
        }
    }

    ResolvedTheme::Light
}

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // All colors defined for completeness, not all used yet
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub border_light: &'static str,
    pub accent: &'static str,
    pub accent_hover: &'static str,
    pub accent_text: &'static str,
    pub danger: &'static str,
    pub success: &'static str,
}

/// Light theme colors
pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f8f9fa",
    bg_tertiary: "#eef0f2",
    text_primary: "#1f2328",
    text_secondary: "#57606a",
    text_muted: "#8c959f",
    border: "#d0d7de",
    border_light: "#e7ebef",
    accent: "#2563eb",
    accent_hover: "#1d4ed8",
    accent_text: "#ffffff",
    danger: "#dc2626",
    success: "#16a34a",
};

/// Dark theme colors
pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#16181d",
    bg_secondary: "#1f232a",
    bg_tertiary: "#2a2f38",
    text_primary: "#e6e8eb",
    text_secondary: "#9ba3ad",
    text_muted: "#646c76",
    border: "#353b45",
    border_light: "#4b535e",
    accent: "#60a5fa",
    accent_hover: "#93c5fd",
    accent_text: "#16181d",
    danger: "#f87171",
    success: "#4ade80",
};
