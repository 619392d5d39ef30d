use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colors the dialog host and the demo shell paint with.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: Color,
    pub mantle: Color,
    pub surface1: Color,
    pub overlay0: Color,
    pub text: Color,
    pub subtext0: Color,
    pub mauve: Color,
    pub red: Color,
    pub peach: Color,
    pub lavender: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Create a theme from a Catppuccin flavor.
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            mantle: catppuccin_to_color(&c.mantle),
            surface1: catppuccin_to_color(&c.surface1),
            overlay0: catppuccin_to_color(&c.overlay0),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            mauve: catppuccin_to_color(&c.mauve),
            red: catppuccin_to_color(&c.red),
            peach: catppuccin_to_color(&c.peach),
            lavender: catppuccin_to_color(&c.lavender),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    // Semantic colors
    #[must_use]
    pub const fn title(&self) -> Color {
        self.mauve
    }

    #[must_use]
    pub const fn border(&self) -> Color {
        self.lavender
    }

    #[must_use]
    pub const fn focus_bg(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn focus_fg(&self) -> Color {
        self.peach
    }

    #[must_use]
    pub const fn disabled(&self) -> Color {
        self.overlay0
    }

    #[must_use]
    pub const fn muted(&self) -> Color {
        self.subtext0
    }

    #[must_use]
    pub const fn error(&self) -> Color {
        self.red
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

/// Built-in themes by display name.
pub fn available_themes() -> Vec<(&'static str, Theme)> {
    vec![
        ("Catppuccin Mocha", Theme::catppuccin_mocha()),
        ("Catppuccin Macchiato", Theme::catppuccin_macchiato()),
        ("Catppuccin Frappé", Theme::catppuccin_frappe()),
        ("Catppuccin Latte", Theme::catppuccin_latte()),
    ]
}

/// Look up a theme by name. Returns the default theme if not found.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|(theme_name, _)| theme_name.eq_ignore_ascii_case(name))
        .map(|(_, theme)| theme)
        .unwrap_or_default()
}
